//! Config command implementation.
//!
//! View and manage configuration settings.
//! Config file is located at ~/.config/agenda/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use chrono_tz::Tz;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Civil timezone of the agenda's city.
pub const DEFAULT_TIMEZONE: &str = "America/Maceio";

/// Listing size when neither `--limit` nor `output.limit` is given.
pub const DEFAULT_LIMIT: usize = 50;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Events file to read (default: XDG data dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_path: Option<PathBuf>,

    /// IANA timezone that defines "today".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            events_path: None,
            timezone: None,
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Returns the configured timezone, or `America/Maceio`.
    pub fn timezone(&self) -> Result<Tz> {
        let name = self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE);
        parse_timezone(name)
    }

    /// Returns the configured listing size.
    pub fn limit(&self) -> usize {
        self.output.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,

    /// Default number of events listed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/agenda/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("agenda"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("agenda"))
        .ok_or_else(|| {
            CommandError::Config("Could not determine config directory".to_string())
        })
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("AGENDA_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
/// Returns the config as-is if already at current version.
fn migrate_config(mut config: Config) -> Result<Config> {
    // version 1 is the initial schema
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        match config.events_path {
            Some(ref events) => println!("  events_path: {}", events.display()),
            None => println!("  events_path: (default)"),
        }
        println!(
            "  timezone: {}",
            config.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
        );

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {}", color);
        }
        println!("  limit: {}", config.limit());
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Configuration key.
    pub key: String,
    /// Configuration value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    let path = get_config_path()?;

    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Validates and stores one `key = value` setting.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let (section, field) = match key.split_once('.') {
        Some((section, field)) => (Some(section), field),
        None => (None, key),
    };

    match (section, field) {
        (None, "events_path") => {
            config.events_path = Some(PathBuf::from(value));
        }
        (None, "timezone") => {
            parse_timezone(value)?;
            config.timezone = Some(value.to_string());
        }
        (Some("output"), "color") => {
            config.output.color = Some(parse_bool(value)?);
        }
        (Some("output"), "limit") => {
            let limit = value.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                CommandError::Config(format!(
                    "Invalid limit value '{}'. Use a positive number",
                    value
                ))
            })?;
            config.output.limit = Some(limit);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: events_path, timezone, output.color, output.limit",
                key
            )));
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Parses an IANA timezone name.
fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| {
        CommandError::Config(format!(
            "Invalid timezone '{}'. Use an IANA name such as {}",
            name, DEFAULT_TIMEZONE
        ))
    })
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, 1/0, or on/off",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Runs `f` with the given environment variables set (or removed), then
    /// restores the previous values.
    fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
        let saved: Vec<(String, Option<String>)> = vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(&key, v),
                None => env::remove_var(&key),
            }
        }
        result
    }

    #[test]
    #[serial]
    fn test_config_path_from_agenda_config() {
        let path = with_env(&[("AGENDA_CONFIG", Some("/tmp/agenda-test/custom.toml"))], || {
            get_config_path().unwrap()
        });
        assert_eq!(path, PathBuf::from("/tmp/agenda-test/custom.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_honors_xdg_config_home() {
        let path = with_env(
            &[
                ("AGENDA_CONFIG", None),
                ("XDG_CONFIG_HOME", Some("/tmp/agenda-xdg")),
            ],
            || get_config_path().unwrap(),
        );
        assert_eq!(path, PathBuf::from("/tmp/agenda-xdg/agenda/config.toml"));
    }

    #[test]
    #[serial]
    fn test_save_then_load_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap().to_string();

        let loaded = with_env(&[("AGENDA_CONFIG", Some(&path_str))], || {
            assert!(load_config().unwrap().timezone.is_none());

            let mut config = Config::default();
            apply_setting(&mut config, "timezone", "America/Recife").unwrap();
            save_config(&config).unwrap();
            load_config().unwrap()
        });

        assert_eq!(loaded.timezone.as_deref(), Some("America/Recife"));
        assert!(path.exists());
    }

    #[test]
    #[serial]
    fn test_load_config_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "output = [not toml").unwrap();
        let path_str = path.to_str().unwrap().to_string();

        let result = with_env(&[("AGENDA_CONFIG", Some(&path_str))], load_config);
        assert!(matches!(result, Err(CommandError::Config(_))));
    }

    #[test]
    fn test_parse_bool_values() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(parse_bool("on").unwrap());
        assert!(!parse_bool("False").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("talvez").is_err());
        assert!(parse_bool("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.events_path.is_none());
        assert!(config.output.color.is_none());
        assert_eq!(config.limit(), DEFAULT_LIMIT);
        assert_eq!(config.timezone().unwrap(), chrono_tz::America::Maceio);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            version: CONFIG_VERSION,
            events_path: Some(PathBuf::from("/srv/agenda/events.json")),
            timezone: Some("America/Recife".to_string()),
            output: OutputConfig {
                color: Some(false),
                limit: Some(20),
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains("events_path = \"/srv/agenda/events.json\""));
        assert!(toml_str.contains("timezone = \"America/Recife\""));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("limit = 20"));
    }

    #[test]
    fn test_config_deserialization_partial() {
        let toml_str = r#"
[output]
color = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.timezone.is_none());
        assert_eq!(config.output.color, Some(true));
        assert!(config.output.limit.is_none());
    }

    #[test]
    fn test_config_deserialization_with_future_version() {
        let config: Config = toml::from_str("version = 999\ntimezone = \"UTC\"").unwrap();
        assert_eq!(config.version, 999);

        let migrated = migrate_config(config).unwrap();
        assert_eq!(migrated.version, CONFIG_VERSION);
        assert_eq!(migrated.timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn test_invalid_timezone() {
        let config = Config {
            timezone: Some("America/Atlantis".to_string()),
            ..Config::default()
        };
        assert!(matches!(config.timezone(), Err(CommandError::Config(_))));
    }

    #[test]
    fn test_apply_setting() {
        let mut config = Config::default();
        apply_setting(&mut config, "timezone", "America/Sao_Paulo").unwrap();
        apply_setting(&mut config, "output.limit", "10").unwrap();
        apply_setting(&mut config, "output.color", "no").unwrap();
        apply_setting(&mut config, "events_path", "/tmp/events.json").unwrap();

        assert_eq!(config.timezone.as_deref(), Some("America/Sao_Paulo"));
        assert_eq!(config.limit(), 10);
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.events_path, Some(PathBuf::from("/tmp/events.json")));
    }

    #[test]
    fn test_apply_setting_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply_setting(&mut config, "timezone", "Nowhere/City").is_err());
        assert!(apply_setting(&mut config, "output.limit", "0").is_err());
        assert!(apply_setting(&mut config, "output.limit", "many").is_err());
        assert!(apply_setting(&mut config, "token", "abc").is_err());
        assert!(config.timezone.is_none());
    }
}
