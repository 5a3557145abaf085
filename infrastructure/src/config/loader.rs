//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: [&str; 2] = ["realism.toml", ".realism.toml"];
const ENV_PREFIX: &str = "REALISM_";

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `REALISM_` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./realism.toml` or `./.realism.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/realism-enhancer/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let global = Self::global_config_path();
        Self::load_from(global.as_deref(), Path::new("."), config_path)
    }

    /// Load with explicit locations for the global file and project directory.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = global_path
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        if let Some(project) = Self::project_config_path(project_dir) {
            figment = figment.merge(Toml::file(project));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("realism-enhancer").join("config.toml"))
    }

    /// First project-level config file found in `dir`
    pub fn project_config_path(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.enhancement.max_iterations, 3);
        assert!(config.editor.endpoint.is_none());
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.to_string_lossy().contains("realism-enhancer"));
        }
    }

    #[test]
    fn test_project_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        fs::write(
            &global,
            "[reasoning]\nmodel = \"global-model\"\nmax_tokens = 512\n",
        )
        .unwrap();
        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(
            project.join(".realism.toml"),
            "[reasoning]\nmodel = \"project-model\"\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(Some(&global), &project, None).unwrap();
        assert_eq!(config.reasoning.model, "project-model");
        assert_eq!(config.reasoning.max_tokens, 512);
    }

    #[test]
    fn test_explicit_file_has_highest_file_priority() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("realism.toml"),
            "[editor]\nendpoint = \"http://project\"\nmax_poll_attempts = 5\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        fs::write(&explicit, "[editor]\nendpoint = \"http://explicit\"\n").unwrap();

        let config = ConfigLoader::load_from(None, dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.editor.endpoint.as_deref(), Some("http://explicit"));
        assert_eq!(config.editor.max_poll_attempts, 5);
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            ConfigLoader::load_from(Some(&dir.path().join("absent.toml")), dir.path(), None)
                .unwrap();
        assert_eq!(config.enhancement, FileConfig::default().enhancement);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        fs::write(&explicit, "[enhancement]\nmax_iterations = \"many\"\n").unwrap();

        let result = ConfigLoader::load_from(None, dir.path(), Some(&explicit));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
