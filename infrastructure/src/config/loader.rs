//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["quizpatch.toml", ".quizpatch.toml"];
const ENV_PREFIX: &str = "QUIZPATCH_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `QUIZPATCH_<SECTION>__<KEY>` (e.g. `QUIZPATCH_STORAGE__DIR`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./quizpatch.toml` or `./.quizpatch.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/quizpatch/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/quizpatch/config.toml if set,
    /// otherwise falls back to ~/.config/quizpatch/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quizpatch").join("config.toml"))
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
        print!("{}", Self::describe_sources(config_path));
    }

    /// Config sources in priority order, one per line, marking the files that exist.
    pub fn describe_sources(config_path: Option<&PathBuf>) -> String {
        let mut lines = vec![
            "Configuration sources (in priority order):".to_string(),
            format!("  [     ] Env:      {}<SECTION>__<KEY>", ENV_PREFIX),
        ];

        if let Some(path) = config_path {
            lines.push(format!(
                "  [{}] Explicit: {}",
                found_marker(path),
                path.display()
            ));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project:  {}", path.display())),
            None => lines.push("  [     ] Project:  ./quizpatch.toml or ./.quizpatch.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            lines.push(format!(
                "  [{}] Global:   {}",
                found_marker(&path),
                path.display()
            ));
        }

        lines.push("  [     ] Default:  built-in defaults".to_string());
        lines.join("\n") + "\n"
    }
}

fn found_marker(path: &Path) -> &'static str {
    if path.exists() { "FOUND" } else { "     " }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.limits.max_title_len, 200);
        assert!(config.output.color);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quizpatch"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[limits]\nmax_answer_text_len = 42\n").unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.limits.max_answer_text_len, 42);
    }

    #[test]
    fn test_describe_sources_lists_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("custom.toml");
        std::fs::write(&present, "").unwrap();
        let missing = dir.path().join("missing.toml");

        let found = ConfigLoader::describe_sources(Some(&present));
        assert!(found.contains(&format!("[FOUND] Explicit: {}", present.display())));

        let absent = ConfigLoader::describe_sources(Some(&missing));
        assert!(absent.contains(&format!("[     ] Explicit: {}", missing.display())));

        assert!(!ConfigLoader::describe_sources(None).contains("Explicit"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[limits]\nmax_title_len = \"many\"\n").unwrap();

        assert!(ConfigLoader::load(Some(&path)).is_err());
    }
}
