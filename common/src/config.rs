#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Keeps destinations in private (RFC1918) ranges in the extraction
    /// output.
    ///
    /// Such traffic is dropped by default.
    pub include_local: bool,
}
