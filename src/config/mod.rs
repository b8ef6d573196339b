// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{BladeGraphToml, Config, RenderPreferences, DEFAULT_SUFFIX};

use std::path::Path;

use crate::discovery::DiscoveryOptions;
use crate::error::Result;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with `bladegraph.toml` from the template root, if any.
    ///
    /// # Errors
    /// Returns error if the config file is malformed.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::new();
        if let Some(file) = io::load_toml(root)? {
            io::apply(&mut config, file, &root.join(CONFIG_FILE))?;
        }
        Ok(config)
    }

    /// Parses config text directly (no file lookup).
    ///
    /// # Errors
    /// Returns error if the text is not valid config.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let origin = Path::new(CONFIG_FILE);
        let file = io::parse_toml(content).map_err(|message| crate::error::Error::Config {
            path: origin.to_path_buf(),
            message,
        })?;
        let mut config = Self::new();
        io::apply(&mut config, file, origin)?;
        Ok(config)
    }

    #[must_use]
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            suffix: self.suffix.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LabelFormat;

    #[test]
    fn test_defaults() {
        let c = Config::new();
        assert_eq!(c.suffix, ".blade.php");
        assert_eq!(c.render.rankdir, "LR");
        assert_eq!(c.render.labels, LabelFormat::Path);
        assert!(c.render.edge_labels);
        assert!(!c.render.show_dangling);
    }

    #[test]
    fn test_parse_overrides() {
        let c = Config::from_toml_str(
            "suffix = \".tpl.php\"\nexclude = [\"^vendor/\"]\n[render]\nlabels = \"id\"\nrankdir = \"TB\"\n",
        )
        .unwrap();
        assert_eq!(c.suffix, ".tpl.php");
        assert_eq!(c.exclude_patterns.len(), 1);
        assert_eq!(c.render.labels, LabelFormat::Id);
        assert_eq!(c.render.rankdir, "TB");
        assert!(c.render.edge_labels);
    }

    #[test]
    fn test_bad_regex_is_config_error() {
        let err = Config::from_toml_str("exclude = [\"(\"]").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config { .. }));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let c = Config::load(dir.path()).unwrap();
        assert_eq!(c.suffix, DEFAULT_SUFFIX);
    }
}
