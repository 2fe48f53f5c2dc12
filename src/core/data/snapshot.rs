use crate::core::data::dataset::Dataset;
use crate::core::data::element::Element;

/// Immutable copy of the dataset published to observers. Renderers and
/// other consumers only ever read snapshots, never the live dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub max_value: i32,
}

impl Snapshot {
    #[must_use]
    pub fn of(dataset: &Dataset) -> Self {
        Self {
            elements: dataset.elements().to_vec(),
            max_value: dataset.max_value(),
        }
    }
}
