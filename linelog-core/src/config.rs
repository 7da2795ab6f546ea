use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "LINELOG")]
#[allow(non_snake_case)]
pub struct LineLogConfig {
    /// Colorize the level token on console output. File output is never colored.
    #[from_env(default = "false")]
    pub COLORED: bool,
    /// Flush the log file after every line instead of only on explicit flush.
    #[from_env(default = "true")]
    pub FLUSH_EACH_LINE: bool,
}

impl Default for LineLogConfig {
    fn default() -> Self {
        Self {
            COLORED: false,
            FLUSH_EACH_LINE: true,
        }
    }
}

/// Falls back to the defaults when a variable is set but cannot be parsed.
pub static LINELOG_CONFIG: LazyLock<LineLogConfig> =
    LazyLock::new(|| LineLogConfig::from_env().unwrap_or_default());
