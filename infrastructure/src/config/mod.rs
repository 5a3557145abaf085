//! Configuration file loading for realism-enhancer
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `REALISM_*` environment variables (e.g. `REALISM_EDITOR__ENDPOINT`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./realism.toml` or `./.realism.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/realism-enhancer/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileEditorConfig, FileEnhancementConfig,
    FileReasoningConfig, FileVisionConfig,
};
pub use loader::{ConfigError, ConfigLoader};
