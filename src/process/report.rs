/// Tally of a run, printed once every entry has been processed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub downloaded: usize,
    pub skipped: usize,
    /// Names of the entries that failed, in processing order.
    pub failed: Vec<String>,
}

impl SyncReport {
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn print_summary(&self) {
        println!(
            "\x1b[1m\x1b[34m{} entries processed: {} downloaded, {} skipped, {} failed\x1b[0m",
            self.total(),
            self.downloaded,
            self.skipped,
            self.failed.len()
        );
        if self.has_failures() {
            println!("\x1b[31mFailed entries: {}\x1b[0m", self.failed.join(", "));
        }
    }
}
