//! Configuration discovery and effective settings resolution.
//!
//! phpcheck reads `phpcheck.toml|yaml|yml` from the working directory (or the
//! closest ancestor) and merges it with CLI flags to produce `Settings`.
//! Defaults:
//! - `extensions`: `["php"]`
//! - `fallback_encoding`: `windows-1252`
//! - `run_on_save`: true
//! - `display.{gutter_marks,status,quick_panel,on_save}`: true
//! - `syntax`: enabled, `php -l`, pattern `(?P<message>.*) on line (?P<line>\d+)`
//! - `style`: enabled, `phpcs --standard=PSR2 -n`
//! - `complexity`: disabled, `phpmd ... codesize,unusedcode,naming`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["phpcheck.toml", "phpcheck.yaml", "phpcheck.yml"];

pub const DEFAULT_SYNTAX_PATTERN: &str = r"(?P<message>.*) on line (?P<line>\d+)";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
/// Settings for one external analyzer under `[syntax]`, `[style]` or `[complexity]`.
pub struct ToolCfg {
    pub enabled: Option<bool>,
    /// Explicit executable; empty or missing means the bare tool name.
    pub executable: Option<String>,
    /// Extra `key[=value]` tokens, in file order.
    pub args: Option<IndexMap<String, String>>,
    /// Extraction pattern; only meaningful for `[syntax]`.
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
/// Display toggles under `[display]`.
pub struct DisplayCfg {
    pub gutter_marks: Option<bool>,
    pub status: Option<bool>,
    pub quick_panel: Option<bool>,
    pub on_save: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
/// Root configuration loaded from `phpcheck.toml|yaml`.
pub struct FileConfig {
    pub debug: Option<bool>,
    pub extensions: Option<Vec<String>>,
    pub fallback_encoding: Option<String>,
    pub run_on_save: Option<bool>,
    pub display: Option<DisplayCfg>,
    pub syntax: Option<ToolCfg>,
    pub style: Option<ToolCfg>,
    pub complexity: Option<ToolCfg>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Resolved settings of one analyzer.
pub struct ToolSettings {
    pub enabled: bool,
    pub executable: String,
    pub args: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplaySettings {
    pub gutter_marks: bool,
    pub status: bool,
    pub quick_panel: bool,
    pub on_save: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
/// Fully-resolved settings used by adapters, the aggregator and commands.
pub struct Settings {
    pub debug: bool,
    pub extensions: Vec<String>,
    pub fallback_encoding: String,
    pub run_on_save: bool,
    pub display: DisplaySettings,
    pub syntax: ToolSettings,
    pub syntax_pattern: String,
    pub style: ToolSettings,
    pub complexity: ToolSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::from_file(FileConfig::default())
    }
}

#[derive(Debug, Clone, Default)]
/// CLI-level overrides; `None` leaves the file/default value in place.
pub struct Overrides {
    pub debug: Option<bool>,
    pub syntax: Option<bool>,
    pub style: Option<bool>,
    pub complexity: Option<bool>,
    pub quick_panel: Option<bool>,
}

fn tool(cfg: Option<ToolCfg>, enabled: bool, args: &[(&str, &str)]) -> (ToolSettings, Option<String>) {
    let cfg = cfg.unwrap_or_default();
    let settings = ToolSettings {
        enabled: cfg.enabled.unwrap_or(enabled),
        executable: cfg.executable.unwrap_or_default(),
        args: cfg.args.unwrap_or_else(|| {
            args.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }),
    };
    (settings, cfg.pattern)
}

impl Settings {
    /// Apply defaults to everything the file left unset.
    pub fn from_file(cfg: FileConfig) -> Settings {
        let display = cfg.display.unwrap_or_default();
        let (syntax, pattern) = tool(cfg.syntax, true, &[]);
        let (style, _) = tool(cfg.style, true, &[("--standard", "PSR2"), ("-n", "")]);
        let (complexity, _) = tool(cfg.complexity, false, &[("codesize,unusedcode,naming", "")]);
        Settings {
            debug: cfg.debug.unwrap_or(false),
            extensions: cfg.extensions.unwrap_or_else(|| vec!["php".to_string()]),
            fallback_encoding: cfg
                .fallback_encoding
                .unwrap_or_else(|| "windows-1252".to_string()),
            run_on_save: cfg.run_on_save.unwrap_or(true),
            display: DisplaySettings {
                gutter_marks: display.gutter_marks.unwrap_or(true),
                status: display.status.unwrap_or(true),
                quick_panel: display.quick_panel.unwrap_or(true),
                on_save: display.on_save.unwrap_or(true),
            },
            syntax,
            syntax_pattern: pattern.unwrap_or_else(|| DEFAULT_SYNTAX_PATTERN.to_string()),
            style,
            complexity,
        }
    }

    pub fn apply(mut self, ov: &Overrides) -> Settings {
        if let Some(v) = ov.debug {
            self.debug = v;
        }
        if let Some(v) = ov.syntax {
            self.syntax.enabled = v;
        }
        if let Some(v) = ov.style {
            self.style.enabled = v;
        }
        if let Some(v) = ov.complexity {
            self.complexity.enabled = v;
        }
        if let Some(v) = ov.quick_panel {
            self.display.quick_panel = v;
        }
        self
    }

    /// Whether `ext` (no leading dot) is in the allow-list.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when a `phpcheck.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `FileConfig` from `phpcheck.toml` or `phpcheck.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<FileConfig>, ConfigError> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| ConfigError::Toml { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Settings` by merging CLI overrides, discovered config, and defaults.
///
/// Returns the settings together with the root the config was looked up in
/// and whether a config file was actually found there.
pub fn resolve_settings(
    cli_root: Option<&str>,
    ov: &Overrides,
) -> Result<(Settings, PathBuf, bool), ConfigError> {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root)?;
    let found = cfg.is_some();
    let settings = Settings::from_file(cfg.unwrap_or_default()).apply(ov);
    Ok((settings, root, found))
}
