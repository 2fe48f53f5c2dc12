pub mod context;
pub mod control;
pub mod events;

pub use context::{SessionMarks, StepContext};
pub use control::{FreeRun, StepControl};
pub use events::{CountingEventSink, NullEventSink, StepEventSink};
