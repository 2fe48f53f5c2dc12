mod controllers;
mod core;
mod presenters;

pub use controllers::headless::{HeadlessReport, run_headless};
pub use controllers::session::{DriverError, DriverPresenterPort, SessionEvent, SortDriver};
pub use core::algorithms::{
    AlgorithmRegistry, BogoSort, BubbleSort, CocktailSort, HeapSort, InsertionSort, MergeSort,
    QuickSort, ShellSort, SortAlgorithm, TreeSort, UnknownAlgorithm,
};
pub use core::data::{Dataset, DatasetError, Element, ElementState, Snapshot};
pub use core::step::{
    CountingEventSink, FreeRun, NullEventSink, SessionMarks, StepContext, StepControl,
    StepEventSink,
};
pub use presenters::{LatestSnapshotCell, render_bars};
