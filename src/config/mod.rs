pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Record initializer as it appears in the records page before the patch.
pub const DEFAULT_SEARCH: &str = "setNewRecord({ client_id: '', type: '장애', details: '' });";

/// Same initializer extended with the receiver_id field.
pub const DEFAULT_REPLACEMENT: &str =
    "setNewRecord({ client_id: '', type: '장애', details: '', receiver_id: '' });";

pub const DEFAULT_TARGET_PATH: &str = "src/app/dashboard/records/page.tsx";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fixlog-patch")]
#[command(about = "Applies the receiver_id patch to the FixLog records page")]
pub struct CliConfig {
    /// Directory the target path is resolved against
    #[arg(long, default_value = ".")]
    pub project_root: String,

    /// File to patch, relative to the project root
    #[arg(long, default_value = DEFAULT_TARGET_PATH)]
    pub target_path: String,

    /// Exact text to search for (no pattern matching)
    #[arg(long, default_value = DEFAULT_SEARCH)]
    pub search: String,

    /// Text every occurrence is replaced with
    #[arg(long, default_value = DEFAULT_REPLACEMENT)]
    pub replacement: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn project_root(&self) -> &str {
        &self.project_root
    }

    fn target_path(&self) -> &str {
        &self.target_path
    }

    fn search_text(&self) -> &str {
        &self.search
    }

    fn replacement_text(&self) -> &str {
        &self.replacement
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("project_root", &self.project_root)?;
        validate_path("target_path", &self.target_path)?;
        // 空白搜尋字串會匹配到每個位置
        validate_non_empty_string("search", &self.search)?;
        Ok(())
    }
}
