use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

/// Tunable defaults for the toolkit. Loaded once at startup and passed into
/// components by reference; nothing reads this through global state.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Filename prefix for sequential renaming.
    #[serde(default = "default_rename_prefix")]
    pub rename_prefix: String,
    /// First index assigned by sequential renaming.
    #[serde(default = "default_rename_start_index")]
    pub rename_start_index: u32,
    /// Zero-padding width for the rename index.
    #[serde(default = "default_rename_digits")]
    pub rename_digits: usize,
    /// Extensions (lower-case, no dot) treated as images for the corruption
    /// pass, renaming, and class balance counting.
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    /// Warn when class_count / max_count falls below this ratio.
    #[serde(default = "default_balance_ratio_threshold")]
    pub balance_ratio_threshold: f64,
    /// Warn when max_count - class_count exceeds this difference.
    #[serde(default = "default_balance_diff_threshold")]
    pub balance_diff_threshold: u64,
}

fn default_rename_prefix() -> String {
    "img".to_string()
}

fn default_rename_start_index() -> u32 {
    1
}

fn default_rename_digits() -> usize {
    3
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_balance_ratio_threshold() -> f64 {
    0.5
}

fn default_balance_diff_threshold() -> u64 {
    50
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rename_prefix: default_rename_prefix(),
            rename_start_index: default_rename_start_index(),
            rename_digits: default_rename_digits(),
            image_extensions: default_image_extensions(),
            balance_ratio_threshold: default_balance_ratio_threshold(),
            balance_diff_threshold: default_balance_diff_threshold(),
        }
    }
}

impl AppConfig {
    /// Case-insensitive membership test against the recognized image extensions.
    pub fn is_image_extension(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.image_extensions.iter().any(|e| *e == extension)
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
