//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.squad-panel/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::nav::{NavGroup, Navigation};
use super::page::PageId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SquadPanelConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fragments: FragmentsConfig,
    #[serde(default)]
    pub servers: ServersConfig,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_page: Option<String>,
    pub log_level: Option<String>,
    pub sidebar_expanded: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FragmentsConfig {
    /// URL of a web server hosting `pages/`, or a local directory.
    pub base: Option<String>,
    pub embedded: Option<bool>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServersConfig {
    pub ids: Option<Vec<String>>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GroupEntry {
    pub title: String,
    pub pages: Vec<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_PAGE: &str = "console";
pub const DEFAULT_FRAGMENT_BASE: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_SERVERS: [&str; 3] = ["server1", "server2", "server3"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_page: PageId,
    pub log_level: LevelFilter,
    pub sidebar_expanded: bool,
    pub fragment_base: String,
    pub embedded: bool,
    pub fetch_timeout: Option<Duration>,
    pub servers: Vec<String>,
    pub server_id: String,
    pub navigation: Navigation,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&SquadPanelConfig::default(), &CliOverrides::default())
    }
}

/// Values given on the command line. `None`/`false` means "not specified".
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides<'a> {
    pub pages: Option<&'a str>,
    pub embedded: bool,
    pub server: Option<&'a str>,
    pub page: Option<&'a str>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.squad-panel/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".squad-panel").join("config.toml"))
}

/// Load config from `~/.squad-panel/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SquadPanelConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SquadPanelConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SquadPanelConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SquadPanelConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SquadPanelConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SquadPanelConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Squad Panel Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_page = "console"           # Or set SQUAD_PANEL_DEFAULT_PAGE
# log_level = "debug"                # "error", "warn", "info", "debug", "trace"
# sidebar_expanded = true

# [fragments]
# base = "http://localhost:8080"     # URL or directory holding pages/; or SQUAD_PANEL_PAGES
# embedded = false                   # Use the fragments built into the binary
# timeout_secs = 10                  # Omit for no timeout

# [servers]
# ids = ["server1", "server2", "server3"]
# default = "server1"

# [[groups]]
# title = "服务器管理"
# pages = ["console", "chat", "vote"]

# [[groups]]
# title = "游戏记录"
# pages = ["game-history", "kills", "downs", "squads"]
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SquadPanelConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Start page: CLI → env → config → default
    let default_page = cli
        .page
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SQUAD_PANEL_DEFAULT_PAGE").ok())
        .or_else(|| config.general.default_page.clone())
        .unwrap_or_else(|| DEFAULT_PAGE.to_string());

    // Fragment base: CLI → env → config → default
    let fragment_base = cli
        .pages
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SQUAD_PANEL_PAGES").ok())
        .or_else(|| config.fragments.base.clone())
        .unwrap_or_else(|| DEFAULT_FRAGMENT_BASE.to_string());

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match level.parse() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log level '{}', using {}", level, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let servers = config
        .servers
        .ids
        .clone()
        .filter(|ids| !ids.is_empty())
        .unwrap_or_else(|| DEFAULT_SERVERS.iter().map(|s| s.to_string()).collect());

    // Server: CLI → config → first known
    let server_id = cli
        .server
        .map(|s| s.to_string())
        .or_else(|| config.servers.default.clone())
        .unwrap_or_else(|| servers[0].clone());

    ResolvedConfig {
        default_page: PageId::new(default_page),
        log_level,
        sidebar_expanded: config.general.sidebar_expanded.unwrap_or(true),
        fragment_base,
        embedded: cli.embedded || config.fragments.embedded.unwrap_or(false),
        fetch_timeout: config.fragments.timeout_secs.map(Duration::from_secs),
        servers,
        server_id,
        navigation: resolve_navigation(&config.groups),
    }
}

/// Builds the sidebar layout from `[[groups]]`, or the built-in one if none
/// are configured. The first configured group starts expanded.
fn resolve_navigation(groups: &[GroupEntry]) -> Navigation {
    if groups.is_empty() {
        return Navigation::default();
    }
    let mut groups: Vec<NavGroup> = groups
        .iter()
        .map(|g| NavGroup::new(g.title.clone(), g.pages.iter().map(|p| PageId::new(p.as_str()))))
        .collect();
    groups[0].expanded = true;
    Navigation::new(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SquadPanelConfig::default();
        assert!(config.groups.is_empty());
        assert!(config.general.default_page.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&SquadPanelConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert!(resolved.sidebar_expanded);
        assert!(!resolved.embedded);
        assert!(resolved.fetch_timeout.is_none());
        assert_eq!(resolved.servers, vec!["server1", "server2", "server3"]);
        assert_eq!(resolved.server_id, "server1");
        assert_eq!(resolved.navigation, Navigation::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = SquadPanelConfig {
            general: GeneralConfig {
                default_page: None,
                log_level: Some("warn".to_string()),
                sidebar_expanded: Some(false),
            },
            fragments: FragmentsConfig {
                base: None,
                embedded: Some(true),
                timeout_secs: Some(3),
            },
            servers: ServersConfig {
                ids: Some(vec!["eu-1".to_string(), "eu-2".to_string()]),
                default: None,
            },
            groups: Vec::new(),
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert!(!resolved.sidebar_expanded);
        assert!(resolved.embedded);
        assert_eq!(resolved.fetch_timeout, Some(Duration::from_secs(3)));
        assert_eq!(resolved.server_id, "eu-1");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = SquadPanelConfig {
            fragments: FragmentsConfig {
                base: Some("/srv/panel".to_string()),
                ..Default::default()
            },
            servers: ServersConfig {
                default: Some("server2".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            pages: Some("http://127.0.0.1:9000"),
            server: Some("server3"),
            page: Some("kills"),
            embedded: false,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.fragment_base, "http://127.0.0.1:9000");
        assert_eq!(resolved.server_id, "server3");
        assert_eq!(resolved.default_page, PageId::new("kills"));
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = SquadPanelConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            resolve(&config, &CliOverrides::default()).log_level,
            DEFAULT_LOG_LEVEL
        );
    }

    #[test]
    fn test_toml_with_groups() {
        let toml_str = r#"
[general]
default_page = "stats"

[fragments]
base = "./site"
timeout_secs = 5

[servers]
ids = ["a", "b"]
default = "b"

[[groups]]
title = "常用"
pages = ["stats", "kills"]

[[groups]]
title = "其他"
pages = ["custom-page"]
"#;
        let config: SquadPanelConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_page.as_deref(), Some("stats"));
        assert_eq!(config.groups.len(), 2);

        let nav = resolve_navigation(&config.groups);
        assert!(nav.groups[0].expanded);
        assert!(!nav.groups[1].expanded);
        assert_eq!(nav.groups[0].items[1].label, "击杀记录");
        // Unknown ids keep their raw id as label.
        assert_eq!(nav.groups[1].items[0].label, "custom-page");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: SquadPanelConfig = toml::from_str("[fragments]\nembedded = true\n").unwrap();
        assert_eq!(config.fragments.embedded, Some(true));
        assert!(config.fragments.base.is_none());
        assert!(config.servers.ids.is_none());
    }

    #[test]
    fn test_default_template_is_valid_toml() {
        let config: SquadPanelConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.groups.is_empty());
    }

    #[test]
    fn test_load_config_from_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("squad-panel-bad-{}.toml", std::process::id()));
        fs::write(&path, "[general\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        fs::remove_file(path).unwrap();
    }
}
