// Configuration loading and parsing (contest.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The shipped defaults, compiled in so tests and first runs share one source.
pub const DEFAULT_CONTEST_TOML: &str = include_str!("../../../defaults/contest.toml");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub contest: ContestInfo,
    pub rules: RulesConfig,
    pub submission: SubmissionConfig,
    /// Candidate dataset overrides, already resolved against the base dir.
    /// `None` means the bundled datasets are used.
    pub data_paths: Option<DataPaths>,
}

// ---------------------------------------------------------------------------
// contest.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire contest.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ContestFile {
    contest: ContestInfo,
    rules: RulesConfig,
    submission: SubmissionConfig,
    #[serde(default)]
    data: Option<DataPaths>,
}

/// Page chrome shown above the form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContestInfo {
    pub name: String,
    #[serde(default)]
    pub payment_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Exact number of returning players an entry must pick.
    pub player_count: usize,
    /// Exact number of rookies an entry must pick.
    pub rookie_count: usize,
    /// Inclusive cap on the summed prior-season touchdowns of the picks.
    pub max_touchdowns: u32,
    /// First rookie identifier. Returning players occupy `1..rookie_id_offset`.
    pub rookie_id_offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    pub endpoint: String,
    pub entries: SubmissionEntries,
}

/// Form-field keys assigned by the remote form. These are opaque and must
/// match the remote schema exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionEntries {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub team_name: String,
    /// One key per returning-player slot, in slot order.
    pub players: Vec<String>,
    /// One key per rookie slot, in slot order.
    pub rookies: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub players: PathBuf,
    pub rookies: PathBuf,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

impl Config {
    /// Build a config from the compiled-in defaults.
    pub fn from_defaults() -> Result<Config, ConfigError> {
        parse_config(DEFAULT_CONTEST_TOML, Path::new("defaults/contest.toml"), Path::new("."))
    }
}

/// Load and validate configuration from `config/contest.toml` relative to
/// `base_dir`.
/// Nothing is copied from `defaults/` here; see `load_config`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let contest_path = base_dir.join("config").join("contest.toml");
    let text = read_file(&contest_path)?;
    parse_config(&text, &contest_path, base_dir)
}

fn parse_config(text: &str, path: &Path, base_dir: &Path) -> Result<Config, ConfigError> {
    let file: ContestFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let data_paths = file.data.map(|paths| DataPaths {
        players: base_dir.join(paths.players),
        rookies: base_dir.join(paths.rookies),
    });

    let config = Config {
        contest: file.contest,
        rules: file.rules,
        submission: file.submission,
        data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Populate `config/` from `defaults/` without touching files the user has
/// already edited. `.example` files are skipped. Without a `defaults/`
/// directory the compiled-in `contest.toml` is written instead, so the
/// binary also starts outside a checkout. Returns the files created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_error(format!("failed to create {}: {e}", config_dir.display())))?;

    if !defaults_dir.is_dir() {
        let target = config_dir.join("contest.toml");
        return Ok(match write_new(&target, DEFAULT_CONTEST_TOML.as_bytes())? {
            true => vec![target],
            false => vec![],
        });
    }

    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_error(format!("failed to read {}: {e}", defaults_dir.display())))?;

    let mut created = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| copy_error(format!("failed to read defaults entry: {e}")))?
            .path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || name.ends_with(".example") {
            continue;
        }

        let target = config_dir.join(name);
        if target.exists() {
            continue;
        }
        let content = std::fs::read(&path)
            .map_err(|e| copy_error(format!("failed to read {}: {e}", path.display())))?;
        if write_new(&target, &content)? {
            created.push(target);
        }
    }

    Ok(created)
}

/// Create `target` with `content`; `Ok(false)` when it already exists.
fn write_new(target: &Path, content: &[u8]) -> Result<bool, ConfigError> {
    use std::io::Write;

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(copy_error(format!("failed to create {}: {e}", target.display()))),
    };
    file.write_all(content)
        .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;
    Ok(true)
}

/// Load config from the working directory, seeding `config/` first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn copy_error(message: String) -> ConfigError {
    ConfigError::DefaultsCopyError { message }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let rules = &config.rules;
    if rules.player_count == 0 {
        return Err(invalid("rules.player_count", "must be greater than 0"));
    }
    if rules.rookie_count == 0 {
        return Err(invalid("rules.rookie_count", "must be greater than 0"));
    }
    // Returning players start at id 1, so the rookie space must begin above it.
    if rules.rookie_id_offset <= 1 {
        return Err(invalid(
            "rules.rookie_id_offset",
            format!("must be greater than 1, got {}", rules.rookie_id_offset),
        ));
    }

    let endpoint = &config.submission.endpoint;
    if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
        return Err(invalid(
            "submission.endpoint",
            format!("must be an http(s) URL, got {endpoint:?}"),
        ));
    }

    let entries = &config.submission.entries;
    if entries.players.len() != rules.player_count {
        return Err(invalid(
            "submission.entries.players",
            format!(
                "expected {} keys (one per player slot), got {}",
                rules.player_count,
                entries.players.len()
            ),
        ));
    }
    if entries.rookies.len() != rules.rookie_count {
        return Err(invalid(
            "submission.entries.rookies",
            format!(
                "expected {} keys (one per rookie slot), got {}",
                rules.rookie_count,
                entries.rookies.len()
            ),
        ));
    }

    let named_keys: &[(&str, &str)] = &[
        ("submission.entries.first_name", &entries.first_name),
        ("submission.entries.last_name", &entries.last_name),
        ("submission.entries.email", &entries.email),
        ("submission.entries.team_name", &entries.team_name),
    ];
    for (name, key) in named_keys {
        if key.trim().is_empty() {
            return Err(invalid(name, "must not be empty"));
        }
    }
    if entries
        .players
        .iter()
        .chain(entries.rookies.iter())
        .any(|k| k.trim().is_empty())
    {
        return Err(invalid("submission.entries", "slot keys must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
