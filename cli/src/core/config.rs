//! # Chatbox Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Layered TOML configuration of the `chatbox` CLI. A user file and a project
//! file are read when present, merged field by field over the built-in
//! defaults, then `~` is expanded and the result validated.
//!
//! Every key of a file is optional, and a key set in the project file wins
//! over the same key in the user file even when it repeats the default.
//!
//! The widget's overlap policy and selectors and the FAQ bot are
//! configurable. The widget's texts and reply delay are constants.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.chatbox.toml` in current directory or ancestors
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! Configuration file format:
//!
//! ```toml
//! [widget]
//! overlap = "cancel-previous"
//!
//! [widget.selectors]
//! bot_display = "#reply"
//! trigger = ".send"
//!
//! [faq]
//! knowledge_base = "~/chatbox/faq.json"
//! summary_sentences = 3
//! ```
//!
//! Loading and using configuration:
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let policy = cfg.widget.overlap;
//! let sentences = cfg.faq.summary_sentences;
//! ```
//!
use crate::core::error::{ChatboxError, Result};
use crate::widget::{OverlapPolicy, Selector, WidgetSelectors};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The effective configuration, after merging every source and applying defaults.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub widget: WidgetConfig,
    pub faq: FaqConfig,
}

/// Configuration of the chat widget (`chatbox chat`, `chatbox page`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WidgetConfig {
    /// What happens to a still-pending reply when a new message is submitted.
    pub overlap: OverlapPolicy,
    /// Where the widget's elements are, and how the chat page marks them.
    pub selectors: WidgetSelectors,
}

/// Configuration of the rule-based FAQ bot (`chatbox faq ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct FaqConfig {
    /// Path to a JSON knowledge base (can use ~). The embedded one is used when unset.
    pub knowledge_base: Option<String>,
    /// Number of sentences kept by `faq summarize` when `-n` is not given.
    pub summary_sentences: usize,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            knowledge_base: None,
            summary_sentences: 2,
        }
    }
}

/// One configuration file as written. Unset keys stay `None` so they never
/// shadow a lower-precedence file.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
struct ConfigFile {
    #[serde(default)]
    widget: WidgetFile,
    #[serde(default)]
    faq: FaqFile,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct WidgetFile {
    overlap: Option<OverlapPolicy>,
    #[serde(default)]
    selectors: SelectorsFile,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct SelectorsFile {
    input: Option<String>,
    user_display: Option<String>,
    bot_display: Option<String>,
    trigger: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct FaqFile {
    knowledge_base: Option<String>,
    summary_sentences: Option<usize>,
}

const PROJECT_CONFIG_FILENAME: &str = ".chatbox.toml";

/// # Load Configuration (`load_config`)
///
/// Loads the user and project configuration files, merges them key by key
/// (project wins), applies defaults, expands `~` in paths and validates the
/// result.
///
/// ## Returns
///
/// * `Result<Config>`: The effective configuration, or an error if a file exists but
///   cannot be read or parsed, or if validation fails.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut config = resolve_config(merge_configs(user_config, project_config))?;
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Chatbox", "chatbox") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.chatbox.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.chatbox.toml`.
/// The search stops at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Every key the project file sets wins; the user file fills the rest.
fn merge_configs(user: Option<ConfigFile>, project: Option<ConfigFile>) -> ConfigFile {
    let user = user.unwrap_or_default();
    let project = project.unwrap_or_default();
    let (user_sel, project_sel) = (user.widget.selectors, project.widget.selectors);
    ConfigFile {
        widget: WidgetFile {
            overlap: project.widget.overlap.or(user.widget.overlap),
            selectors: SelectorsFile {
                input: project_sel.input.or(user_sel.input),
                user_display: project_sel.user_display.or(user_sel.user_display),
                bot_display: project_sel.bot_display.or(user_sel.bot_display),
                trigger: project_sel.trigger.or(user_sel.trigger),
            },
        },
        faq: FaqFile {
            knowledge_base: project.faq.knowledge_base.or(user.faq.knowledge_base),
            summary_sentences: project
                .faq
                .summary_sentences
                .or(user.faq.summary_sentences),
        },
    }
}

fn parse_selector(key: &str, raw: Option<String>, default: Selector) -> Result<Selector> {
    match raw {
        Some(raw) => raw
            .parse::<Selector>()
            .with_context(|| format!("Invalid value for widget.selectors.{}", key)),
        None => Ok(default),
    }
}

/// Fills unset keys with defaults and parses the selectors.
fn resolve_config(file: ConfigFile) -> Result<Config> {
    let defaults = Config::default();
    let raw = file.widget.selectors;
    let selectors = WidgetSelectors {
        input: parse_selector("input", raw.input, defaults.widget.selectors.input)?,
        user_display: parse_selector(
            "user_display",
            raw.user_display,
            defaults.widget.selectors.user_display,
        )?,
        bot_display: parse_selector(
            "bot_display",
            raw.bot_display,
            defaults.widget.selectors.bot_display,
        )?,
        trigger: parse_selector("trigger", raw.trigger, defaults.widget.selectors.trigger)?,
    };
    Ok(Config {
        widget: WidgetConfig {
            overlap: file.widget.overlap.unwrap_or(defaults.widget.overlap),
            selectors,
        },
        faq: FaqConfig {
            knowledge_base: file.faq.knowledge_base,
            summary_sentences: file
                .faq
                .summary_sentences
                .unwrap_or(defaults.faq.summary_sentences),
        },
    })
}

fn expand_config_paths(config: &mut Config) {
    if let Some(kb) = config.faq.knowledge_base.as_mut() {
        *kb = shellexpand::tilde(kb).into_owned();
        debug!("Expanded knowledge base path: {}", kb);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let selectors = &config.widget.selectors;
    let all = [
        &selectors.input,
        &selectors.user_display,
        &selectors.bot_display,
        &selectors.trigger,
    ];
    for (i, selector) in all.iter().enumerate() {
        if all[i + 1..].contains(selector) {
            return Err(anyhow!(ChatboxError::Config(format!(
                "Selector '{}' is used for more than one widget element.",
                selector
            ))));
        }
    }
    if config.faq.summary_sentences == 0 {
        return Err(anyhow!(ChatboxError::Config(
            "faq.summary_sentences must be at least 1".to_string()
        )));
    }
    if let Some(kb) = &config.faq.knowledge_base {
        let kb_path = PathBuf::from(kb);
        if !kb_path.exists() {
            return Err(anyhow!(ChatboxError::Config(format!(
                "Configured knowledge base '{}' does not exist.",
                kb_path.display()
            ))));
        } else if !kb_path.is_file() {
            return Err(anyhow!(ChatboxError::Config(format!(
                "Configured knowledge base '{}' exists but is not a file.",
                kb_path.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(toml_content: &str) -> ConfigFile {
        toml::from_str(toml_content).expect("Failed to parse TOML")
    }

    #[test]
    fn test_deserialize_basic_toml() {
        let file = parse(
            r#"
            [widget]
            overlap = "cancel-previous"

            [faq]
            knowledge_base = "~/kb/faq.json"
        "#,
        );
        let config = resolve_config(file).unwrap();

        assert_eq!(config.widget.overlap, OverlapPolicy::CancelPrevious);
        assert_eq!(config.faq.knowledge_base.as_deref(), Some("~/kb/faq.json")); // Not yet expanded
        assert_eq!(config.faq.summary_sentences, 2); // Default
        assert_eq!(config.widget.selectors, WidgetSelectors::default());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = resolve_config(parse("")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.widget.overlap, OverlapPolicy::LastFireWins);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: std::result::Result<ConfigFile, _> =
            toml::from_str("[widget]\nreply = \"hi\"\n");
        assert!(result.is_err());
        let result: std::result::Result<ConfigFile, _> =
            toml::from_str("[widget.selectors]\nheader = \"#top\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            faq: FaqConfig {
                knowledge_base: Some("~/faq.json".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config);

        let home = shellexpand::tilde("~").into_owned();
        let expanded = config.faq.knowledge_base.unwrap();
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with("faq.json"));
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = parse(
            r#"
            [faq]
            knowledge_base = "/user/faq.json"
            summary_sentences = 4
        "#,
        );
        let project = parse("[widget]\noverlap = \"cancel-previous\"\n");

        let merged = resolve_config(merge_configs(Some(user), Some(project))).unwrap();

        assert_eq!(merged.widget.overlap, OverlapPolicy::CancelPrevious);
        // Project left these unset, so the user values survive.
        assert_eq!(merged.faq.knowledge_base.as_deref(), Some("/user/faq.json"));
        assert_eq!(merged.faq.summary_sentences, 4);
    }

    #[test]
    fn test_merge_project_default_value_still_wins() {
        let user = parse(
            r#"
            [widget]
            overlap = "cancel-previous"
            [faq]
            summary_sentences = 5
        "#,
        );
        let project = parse(
            r#"
            [widget]
            overlap = "last-fire-wins"
            [faq]
            summary_sentences = 2
        "#,
        );

        let merged = resolve_config(merge_configs(Some(user), Some(project))).unwrap();

        assert_eq!(merged.widget.overlap, OverlapPolicy::LastFireWins);
        assert_eq!(merged.faq.summary_sentences, 2);
    }

    #[test]
    fn test_merge_without_files_is_default() {
        let merged = resolve_config(merge_configs(None, None)).unwrap();
        assert_eq!(merged, Config::default());
    }

    #[test]
    fn test_custom_selectors_merge_per_key() {
        let user = parse("[widget.selectors]\nbot_display = \"#reply\"\ntrigger = \".go\"\n");
        let project = parse("[widget.selectors]\ntrigger = \".send\"\n");

        let config = resolve_config(merge_configs(Some(user), Some(project))).unwrap();

        let selectors = &config.widget.selectors;
        assert_eq!(selectors.bot_display, Selector::Id("reply".into()));
        assert_eq!(selectors.trigger, Selector::Class("send".into()));
        assert_eq!(selectors.input, WidgetSelectors::default().input);
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let file = parse("[widget.selectors]\ntrigger = \"button\"\n");
        let err = resolve_config(file).unwrap_err();

        assert!(format!("{:#}", err).contains("widget.selectors.trigger"));
        assert!(matches!(
            err.downcast_ref::<ChatboxError>(),
            Some(ChatboxError::InvalidSelector(s)) if s == "button"
        ));
    }

    #[test]
    fn test_validate_config_duplicate_selectors() {
        let file = parse("[widget.selectors]\nbot_display = \"#usermessage\"\n");
        let config = resolve_config(file).unwrap();
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("more than one widget element"));
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        let found = find_project_config_path(&nested);
        assert_eq!(found, Some(root.path().join(PROJECT_CONFIG_FILENAME)));
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let root = tempdir().unwrap();
        let repo = root.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_validate_config_valid() {
        let temp_dir = tempdir().unwrap();
        let kb = temp_dir.path().join("faq.json");
        fs::write(&kb, "{}").unwrap();

        let config = Config {
            faq: FaqConfig {
                knowledge_base: Some(kb.to_string_lossy().to_string()),
                summary_sentences: 1,
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_zero_sentences() {
        let config = Config {
            faq: FaqConfig {
                summary_sentences: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("summary_sentences must be at least 1"));
    }

    #[test]
    fn test_validate_config_knowledge_base_is_dir() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            faq: FaqConfig {
                knowledge_base: Some(temp_dir.path().to_string_lossy().to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("is not a file"));
    }

    #[test]
    fn test_load_config_from_path_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(&path, "[widget\noverlap =").unwrap();

        let result = load_config_from_path(&path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse TOML"));
    }
}
