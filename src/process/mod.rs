#[allow(clippy::module_inception)]
mod process;
mod report;

pub use process::{prepare_target_dir, process_entry, process_tracking, EntryOutcome, TargetDir};
pub use report::SyncReport;
