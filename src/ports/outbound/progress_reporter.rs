/// ProgressReporter port for reporting progress during a scan
///
/// This port abstracts user-facing progress output (e.g., to stderr)
/// so that stdout stays reserved for machine readable results.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted step such as hashing
    ///
    /// # Arguments
    /// * `current` - Current progress value
    /// * `total` - Total expected value
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of the scan
    fn report_completion(&self, message: &str);
}
