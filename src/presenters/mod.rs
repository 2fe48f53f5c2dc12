pub mod console;
pub mod latest;

pub use console::render_bars;
pub use latest::LatestSnapshotCell;
