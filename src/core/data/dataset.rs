use crate::core::data::element::{Element, ElementState};
use rand::Rng;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetError {
    InvalidValueRange { min: i32, max: i32 },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValueRange { min, max } => {
                write!(
                    f,
                    "minimum value {} must be below maximum value {} for a non-empty dataset",
                    min, max
                )
            }
        }
    }
}

impl Error for DatasetError {}

/// The ordered, fixed-length sequence of elements under sort, plus the
/// largest generated value for display scaling. Exactly one writer (the
/// session worker) mutates a live dataset; everything else consumes
/// published snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    elements: Vec<Element>,
    max_value: i32,
}

impl Dataset {
    /// Builds a dataset of `size` values drawn uniformly from `min..max`
    /// (upper bound exclusive), all in the `Normal` state.
    pub fn generate<R: Rng>(
        size: usize,
        min: i32,
        max: i32,
        rng: &mut R,
    ) -> Result<Self, DatasetError> {
        if size > 0 && min >= max {
            return Err(DatasetError::InvalidValueRange { min, max });
        }

        let elements: Vec<Element> = (0..size).map(|_| Element::new(rng.gen_range(min..max))).collect();

        Ok(Self::from_elements(elements))
    }

    #[must_use]
    pub fn from_values(values: &[i32]) -> Self {
        Self::from_elements(values.iter().copied().map(Element::new).collect())
    }

    fn from_elements(elements: Vec<Element>) -> Self {
        let max_value = elements
            .iter()
            .map(Element::value)
            .max()
            .unwrap_or(1)
            .max(1);

        Self { elements, max_value }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Largest value of the current generation, floored at 1 so observers
    /// can always scale against it.
    #[must_use]
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn value(&self, index: usize) -> i32 {
        self.elements[index].value()
    }

    pub fn set_value(&mut self, index: usize, value: i32) {
        self.elements[index].set_value(value);
    }

    #[must_use]
    pub fn state(&self, index: usize) -> ElementState {
        self.elements[index].state()
    }

    pub fn set_state(&mut self, index: usize, state: ElementState) {
        self.elements[index].set_state(state);
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.elements.swap(i, j);
    }

    /// Puts every element back into the `Normal` state, `Sorted` included.
    /// Used when a fresh session takes its working copy.
    pub fn reset_states(&mut self) {
        for element in &mut self.elements {
            element.set_state(ElementState::Normal);
        }
    }

    /// Clears every non-`Sorted` state back to `Normal`, leaving completed
    /// positions marked. Used on the stopped/cancelled exit path.
    pub fn clear_transient_states(&mut self) {
        for element in &mut self.elements {
            if element.state() != ElementState::Sorted {
                element.set_state(ElementState::Normal);
            }
        }
    }

    pub fn mark_all_sorted(&mut self) {
        for element in &mut self.elements {
            element.set_state(ElementState::Sorted);
        }
    }

    #[must_use]
    pub fn values(&self) -> Vec<i32> {
        self.elements.iter().map(Element::value).collect()
    }

    #[must_use]
    pub fn is_sorted_ascending(&self) -> bool {
        self.elements
            .windows(2)
            .all(|pair| pair[0].value() <= pair[1].value())
    }
}
