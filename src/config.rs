use serde::Deserialize;

/// Nesting limit used unless configured otherwise. Matches the limit the game
/// itself applies.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for the binary codec.
///
/// ```
/// use mcnbt::Config;
///
/// let config = Config::default().with_compression(true).with_max_depth(64);
/// assert!(config.compressed);
/// ```
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Whether the whole document is wrapped in gzip.
    pub compressed: bool,

    /// How many compounds/lists may be nested inside the root before reading
    /// fails.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compressed: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_compression(mut self, compressed: bool) -> Self {
        self.compressed = compressed;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
