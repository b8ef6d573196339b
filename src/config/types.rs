use serde::{Deserialize, Serialize};

use crate::render::LabelFormat;

pub const DEFAULT_SUFFIX: &str = ".blade.php";

/// Rendering defaults from the `[render]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPreferences {
    #[serde(default = "default_rankdir")]
    pub rankdir: String,
    #[serde(default)]
    pub labels: LabelFormat,
    #[serde(default = "default_true")]
    pub edge_labels: bool,
    #[serde(default)]
    pub show_dangling: bool,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            rankdir: default_rankdir(),
            labels: LabelFormat::default(),
            edge_labels: default_true(),
            show_dangling: false,
        }
    }
}

fn default_rankdir() -> String { "LR".to_string() }
const fn default_true() -> bool { true }
fn default_suffix() -> String { DEFAULT_SUFFIX.to_string() }

/// On-disk shape of `bladegraph.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BladeGraphToml {
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub render: RenderPreferences,
}

impl Default for BladeGraphToml {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            exclude: Vec::new(),
            render: RenderPreferences::default(),
        }
    }
}

/// Runtime configuration with compiled patterns.
#[derive(Debug, Clone)]
pub struct Config {
    pub suffix: String,
    pub exclude_patterns: Vec<regex::Regex>,
    pub render: RenderPreferences,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            exclude_patterns: Vec::new(),
            render: RenderPreferences::default(),
        }
    }
}
