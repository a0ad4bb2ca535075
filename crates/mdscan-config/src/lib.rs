use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    GlobPatternError {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed while matching files: {source}")]
    GlobReadError { source: glob::GlobError },
}

/// Which rules to switch on or off, by id (`md010`) or name (`no-hard-tabs`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enable: Vec<String>,
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep scanning other files after one fails to tokenize.
    pub continue_on_error: bool,
    pub front_matter: bool,
    /// Globs relative to the scan root.
    pub include: Vec<String>,
    /// Globs matched against paths relative to the scan root.
    pub exclude: Vec<String>,
    pub rules: RulesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            continue_on_error: true,
            front_matter: false,
            include: vec![Self::DEFAULT_INCLUDE.to_string()],
            exclude: vec![],
            rules: RulesConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_INCLUDE: &'static str = "**/*.md";
    pub const PROJECT_FILE: &'static str = ".mdscan.toml";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded globs
        config.include = config.include.iter().map(|p| Self::expand_path(p)).collect();
        config.exclude = config.exclude.iter().map(|p| Self::expand_path(p)).collect();

        debug!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// The user-wide config file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// The project config file in `dir`, if there is one.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(dir.as_ref().join(Self::PROJECT_FILE))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/mdscan");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Files under `root` matching any include glob and no exclude glob,
    /// sorted and de-duplicated.
    pub fn resolve_files<P: AsRef<Path>>(&self, root: P) -> Result<Vec<PathBuf>, ConfigError> {
        let root = root.as_ref();
        let excludes = self
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| ConfigError::GlobPatternError {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let mut files = vec![];
        for include in &self.include {
            let pattern = if Path::new(include).is_absolute() {
                include.clone()
            } else {
                format!("{}/{include}", escaped_root.trim_end_matches('/'))
            };
            let paths = glob::glob(&pattern).map_err(|source| ConfigError::GlobPatternError {
                pattern: include.clone(),
                source,
            })?;
            for entry in paths {
                let path = entry.map_err(|source| ConfigError::GlobReadError { source })?;
                if !path.is_file() {
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if excludes.iter().any(|e| e.matches_path(relative)) {
                    debug!("Excluded {}", relative.display());
                    continue;
                }
                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn expand_path(pattern: &str) -> String {
        match shellexpand::full(pattern) {
            Ok(expanded) => expanded.into_owned(),
            Err(_) => pattern.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "# test\n").unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/mdscan/config.toml"));
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: Config = toml::from_str("front_matter = true\n").unwrap();

        assert!(config.continue_on_error);
        assert!(config.front_matter);
        assert_eq!(config.include, vec!["**/*.md".to_string()]);
        assert_eq!(config.rules, RulesConfig::default());
    }

    #[test]
    fn test_full_config_parses() {
        let config_content = r#"
continue_on_error = false
include = ["docs/**/*.md"]
exclude = ["target/**"]

[rules]
disable = ["md010"]
enable = ["md001"]
"#;
        let config: Config = toml::from_str(config_content).unwrap();

        assert!(!config.continue_on_error);
        assert_eq!(config.exclude, vec!["target/**".to_string()]);
        assert_eq!(config.rules.disable, vec!["md010".to_string()]);
        assert_eq!(config.rules.enable, vec!["md001".to_string()]);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/notes/**/*.md");

        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("notes/**/*.md"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MDSCAN_TEST_DOCS", "/test/env/docs");
        }

        assert_eq!(
            Config::expand_path("$MDSCAN_TEST_DOCS/*.md"),
            "/test/env/docs/*.md"
        );

        unsafe {
            env::remove_var("MDSCAN_TEST_DOCS");
        }
    }

    #[test]
    fn test_expand_path_with_unknown_var_is_left_alone() {
        assert_eq!(
            Config::expand_path("$MDSCAN_SURELY_UNSET_VAR/x"),
            "$MDSCAN_SURELY_UNSET_VAR/x"
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "include = 3\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            continue_on_error: false,
            exclude: vec!["drafts/**".to_string()],
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_discover_project_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::discover(temp_dir.path()).unwrap().is_none());

        fs::write(
            temp_dir.path().join(".mdscan.toml"),
            "[rules]\ndisable = [\"no-hard-tabs\"]\n",
        )
        .unwrap();
        let config = Config::discover(temp_dir.path()).unwrap().unwrap();

        assert_eq!(config.rules.disable, vec!["no-hard-tabs".to_string()]);
    }

    #[test]
    fn test_resolve_files_applies_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "README.md");
        touch(root, "docs/guide.md");
        touch(root, "docs/notes.txt");
        touch(root, "target/generated.md");

        let config = Config {
            exclude: vec!["target/**".to_string()],
            ..Config::default()
        };
        let files = config.resolve_files(root).unwrap();

        assert_eq!(relative_names(root, &files), vec!["README.md", "docs/guide.md"]);
    }

    #[test]
    fn test_resolve_files_deduplicates_overlapping_includes() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "b.md");
        touch(root, "a.md");

        let config = Config {
            include: vec!["*.md".to_string(), "**/*.md".to_string()],
            ..Config::default()
        };
        let files = config.resolve_files(root).unwrap();

        assert_eq!(relative_names(root, &files), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_resolve_files_rejects_bad_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            exclude: vec!["[".to_string()],
            ..Config::default()
        };

        let err = config.resolve_files(temp_dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::GlobPatternError { .. }));
    }
}
