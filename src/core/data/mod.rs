pub mod dataset;
pub mod element;
pub mod snapshot;

pub use dataset::{Dataset, DatasetError};
pub use element::{Element, ElementState};
pub use snapshot::Snapshot;
