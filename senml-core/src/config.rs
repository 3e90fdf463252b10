/// Highest SenML version understood by this crate (RFC 8428)
pub const SENML_VERSION: u32 = 10;

/// Resolver settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Records declaring a higher `bver` are rejected. Packs targeting a
    /// lower version get that version stamped on every resolved record.
    pub max_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_version: SENML_VERSION,
        }
    }
}

impl Config {
    /// Set the highest accepted version
    pub fn max_version(mut self, version: u32) -> Self {
        self.max_version = version;
        self
    }
}
