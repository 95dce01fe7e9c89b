use std::path::{Path, PathBuf};

use facet::Facet;

use crate::error::InventoryError;

/// Settings file looked up in the current directory when `--config` is absent.
pub const LOCAL_CONFIG_FILE: &str = "vagrant-inventory.toml";

#[derive(Debug, Clone, Facet)]
#[facet(default)]
pub struct Settings {
    /// Program invoked for `status` and `ssh-config`.
    #[facet(default = "vagrant")]
    pub vagrant_bin: String,
    /// Directory holding the Vagrantfile; subprocesses run here.
    pub working_dir: Option<String>,
    /// Append debug logs to this file in addition to stderr.
    pub log_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vagrant_bin: "vagrant".into(),
            working_dir: None,
            log_file: None,
        }
    }
}

impl Settings {
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref().map(Path::new)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref().map(Path::new)
    }
}

// ── validation ────────────────────────────────────────────

fn validate_settings(settings: &Settings) -> Result<(), InventoryError> {
    if settings.vagrant_bin.trim().is_empty() {
        return Err(InventoryError::Validation {
            message: "vagrant_bin must not be empty".into(),
        });
    }
    if let Some(dir) = settings.working_dir() {
        if !dir.is_dir() {
            return Err(InventoryError::Validation {
                message: format!("working_dir '{}' is not a directory", dir.display()),
            });
        }
    }
    Ok(())
}

// ── lookup ────────────────────────────────────────────────

/// User-level settings file: `~/.config/vagrant-inventory/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vagrant-inventory").join("config.toml"))
}

/// Pick the settings file to read, if any.
///
/// An explicit path is always returned so a missing file surfaces as an
/// error; the implicit locations are only used when they exist.
fn resolve_path(
    explicit: Option<&Path>,
    local_dir: &Path,
    user_config: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = local_dir.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }
    user_config.filter(|p| p.is_file())
}

// ── public API ────────────────────────────────────────────

pub fn parse_settings(contents: &str, path: &Path) -> Result<Settings, InventoryError> {
    let settings: Settings =
        facet_toml::from_str(contents).map_err(|e| InventoryError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings from `--config`, the current directory, or the user config
/// dir, falling back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, InventoryError> {
    load_settings_from(explicit, Path::new("."), user_config_path())
}

fn load_settings_from(
    explicit: Option<&Path>,
    local_dir: &Path,
    user_config: Option<PathBuf>,
) -> Result<Settings, InventoryError> {
    let Some(path) = resolve_path(explicit, local_dir, user_config) else {
        tracing::debug!("no settings file found, using defaults");
        return Ok(Settings::default());
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| InventoryError::ConfigLoad {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loaded settings");
    parse_settings(&contents, &path)
}
