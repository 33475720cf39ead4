use crate::classifier::Classifier;
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bookmark-classifier";

/// Main configuration structure
///
/// Loaded from `<config dir>/bookmark-classifier/config.toml`. A missing
/// file just means defaults; the CLI's `--db` flag wins over the file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
        // catch typos in category names at load time rather than on first add
        config.classifier.extra_keywords()?;
        Ok(config)
    }

    /// Write a starter config where [`Config::load`] looks for it.
    ///
    /// Returns the path written, or `None` if a file is already there and
    /// `force` is off.
    pub fn init(force: bool) -> crate::Result<Option<PathBuf>> {
        let path = Self::config_path()?;
        let written = Self::starter().write_to(&path, force)?;
        Ok(written.then_some(path))
    }

    /// Defaults plus an empty keyword list per category, ready to fill in
    pub fn starter() -> Self {
        let mut config = Self::default();
        for category in Category::ALL {
            config
                .classifier
                .extra_keywords
                .insert(category.as_str().to_lowercase(), Vec::new());
        }
        config
    }

    /// Serialize to `path`, creating parent directories. An existing file is
    /// only replaced when `force` is set; returns whether anything was written.
    pub fn write_to(&self, path: &Path, force: bool) -> crate::Result<bool> {
        if path.exists() && !force {
            tracing::debug!("Config already exists at {}, leaving it", path.display());
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;

        tracing::info!("Wrote config to {}", path.display());
        Ok(true)
    }

    /// Where the database lives: configured path, else the platform data dir
    pub fn database_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))?;
        Ok(data_dir.join(APP_DIR).join("bookmarks.db"))
    }

    /// Classifier with any configured extra keywords folded in
    pub fn classifier(&self) -> crate::Result<Classifier> {
        Ok(Classifier::with_extra_keywords(
            &self.classifier.extra_keywords()?,
        ))
    }

    /// XDG on Linux, Application Support on macOS, AppData on Windows
    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?;
        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// SQLite file; defaults to `<data dir>/bookmark-classifier/bookmarks.db`
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClassifierConfig {
    /// Category name -> additional keywords, e.g. `entertainment = ["youtube"]`
    #[serde(default)]
    pub extra_keywords: BTreeMap<String, Vec<String>>,
}

impl ClassifierConfig {
    pub fn extra_keywords(&self) -> crate::Result<BTreeMap<Category, Vec<String>>> {
        let mut parsed: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for (name, keywords) in &self.extra_keywords {
            let category: Category = name.parse().map_err(|_| {
                crate::Error::ConfigError(format!("Unknown category in extra_keywords: {}", name))
            })?;
            parsed.entry(category).or_default().extend(keywords.iter().cloned());
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database.path.is_none());
        assert!(config.classifier.extra_keywords.is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert!(config.database.path.is_none());
        assert!(config.classifier.extra_keywords.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [database]
            path = "/tmp/bookmarks.db"

            [classifier.extra_keywords]
            entertainment = ["youtube", "netflix"]
            "social media" = ["mastodon"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/bookmarks.db")
        );

        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.classify("https://youtube.com"), Category::Entertainment);
        assert_eq!(classifier.classify("https://mastodon.social"), Category::SocialMedia);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Config::from_toml(
            r#"
            [classifier.extra_keywords]
            cooking = ["recipes"]
            "#,
        );
        assert!(matches!(result, Err(crate::Error::ConfigError(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_load_from_file_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [database]
            path = "/var/lib/bookmarks.db"

            [classifier.extra_keywords]
            entertainment = ["twitch"]
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/var/lib/bookmarks.db")
        );
        assert_eq!(
            config.classifier().unwrap().classify("https://twitch.tv"),
            Category::Entertainment
        );
    }

    #[test]
    fn test_unknown_category_on_disk_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[classifier.extra_keywords]\ngardening = [\"seeds\"]\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(crate::Error::ConfigError(_))));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database\npath = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(crate::Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.database.path = Some(PathBuf::from("/srv/bookmarks.db"));
        config
            .classifier
            .extra_keywords
            .insert("entertainment".to_string(), vec!["netflix".to_string()]);
        assert!(config.write_to(&path, false).unwrap());

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.database.path, Some(PathBuf::from("/srv/bookmarks.db")));
        assert_eq!(
            loaded.classifier.extra_keywords.get("entertainment"),
            Some(&vec!["netflix".to_string()])
        );
    }

    #[test]
    fn test_write_keeps_existing_file_unless_forced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# hand edited\n").unwrap();

        assert!(!Config::starter().write_to(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hand edited\n");

        assert!(Config::starter().write_to(&path, true).unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("extra_keywords"));
    }

    #[test]
    fn test_starter_config_loads_and_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::starter().write_to(&path, false).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.classifier.extra_keywords.len(), Category::ALL.len());
        assert!(loaded.classifier.extra_keywords.contains_key("social media"));
        assert_eq!(
            loaded.classifier().unwrap().priority(),
            Classifier::default().priority()
        );
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config
            .classifier
            .extra_keywords
            .insert("entertainment".to_string(), vec!["twitch".to_string()]);
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("extra_keywords"));
        assert!(toml.contains("twitch"));
    }
}
