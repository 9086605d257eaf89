//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["toolchat.toml", ".toolchat.toml"];

/// Prefix for environment overrides (`TOOLCHAT_AGENT__MAX_ITERATIONS=3`)
pub const ENV_PREFIX: &str = "TOOLCHAT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOOLCHAT_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./toolchat.toml` or `./.toolchat.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/toolchat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path().filter(|p| p.exists());
        let project = Self::project_config_path();
        Self::figment(global.as_deref(), project.as_deref(), config_path.map(PathBuf::as_path))?
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// File layers only, lowest priority first. A missing explicit file is an error.
    fn figment(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Figment, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            tracing::debug!(path = %path.display(), "Merging config file");
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Box::new(<figment::Error as serde::de::Error>::custom(
                    format!("config file not found: {}", path.display()),
                )));
            }
            tracing::debug!(path = %path.display(), "Merging explicit config file");
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/toolchat/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("toolchat").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}* (section separator: __)", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./{} or ./{}", PROJECT_FILES[0], PROJECT_FILES[1]);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_toml(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.providers.openai.model, "gpt-4o");
        assert_eq!(config.tools.weather.provider, "openweathermap");
    }

    #[test]
    fn test_global_config_path_names_toolchat() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("toolchat/config.toml"));
        }
    }

    #[test]
    fn test_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            &dir,
            "global.toml",
            "[agent]\nmax_iterations = 7\n\n[providers.openai]\nmodel = \"gpt-4o-mini\"\n",
        );
        let project = write_toml(&dir, "project.toml", "[agent]\nmax_iterations = 9\n");
        let explicit = write_toml(&dir, "explicit.toml", "[tools.weather]\nprovider = \"weatherapi\"\n");

        let config: FileConfig =
            ConfigLoader::figment(Some(&global), Some(&project), Some(&explicit))
                .unwrap()
                .extract()
                .unwrap();

        assert_eq!(config.agent.max_iterations, 9);
        assert_eq!(config.providers.openai.model, "gpt-4o-mini");
        assert_eq!(config.tools.weather.provider, "weatherapi");
        assert!(config.agent.parallel_tool_calls);
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");

        let config: FileConfig = ConfigLoader::figment(Some(&absent), None, None)
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");

        let err = ConfigLoader::figment(None, None, Some(&absent)).err().unwrap();

        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_toml(&dir, "bad.toml", "[agent]\nmax_iterations = \"many\"\n");

        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&bad)).unwrap().extract();

        assert!(result.is_err());
    }
}
