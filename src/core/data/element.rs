/// Display state of a single element, advisory for observers only.
/// Carries no algorithmic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Normal,
    Compare,
    Swap,
    Pivot,
    Sorted,
}

impl ElementState {
    /// Transient states are meaningful only until the next reset; `Sorted`
    /// is stable and must never be silently cleared.
    #[must_use]
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Compare | Self::Swap | Self::Pivot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    value: i32,
    state: ElementState,
}

impl Element {
    #[must_use]
    pub fn new(value: i32) -> Self {
        Self {
            value,
            state: ElementState::Normal,
        }
    }

    #[must_use]
    pub fn with_state(value: i32, state: ElementState) -> Self {
        Self { value, state }
    }

    #[must_use]
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    #[must_use]
    pub fn state(&self) -> ElementState {
        self.state
    }

    pub fn set_state(&mut self, state: ElementState) {
        self.state = state;
    }
}
