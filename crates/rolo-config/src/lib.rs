use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rolo_core::domain::Category;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "rolo";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_COUNTRY_CODE: &str = "+1";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_country_code: String,
    pub remote: Option<RemoteConfig>,
    pub webhooks: WebhooksConfig,
}

/// Endpoint of the backend-as-a-service store. Absent remote config keeps
/// every flow local-only.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: String,
}

/// Optional per-category notification endpoints, posted to on manual entry.
#[derive(Debug, Clone, Default)]
pub struct WebhooksConfig {
    pub general: Option<String>,
    pub doctor: Option<String>,
    pub real_estate: Option<String>,
}

impl WebhooksConfig {
    pub fn endpoint_for(&self, category: Category) -> Option<&str> {
        match category {
            Category::General => self.general.as_deref(),
            Category::Doctor => self.doctor.as_deref(),
            Category::RealEstate => self.real_estate.as_deref(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            remote: None,
            webhooks: WebhooksConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid default_country_code value: {0}")]
    InvalidCountryCode(String),
    #[error("invalid remote.url value: {0}")]
    InvalidRemoteUrl(String),
    #[error("remote.anon_key must not be empty")]
    EmptyAnonKey,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_country_code: Option<String>,
    remote: Option<RemoteFile>,
    webhooks: Option<WebhooksFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RemoteFile {
    url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WebhooksFile {
    general: Option<String>,
    doctor: Option<String>,
    real_estate: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(code) = parsed.default_country_code {
        let valid = code
            .strip_prefix('+')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()));
        if !valid {
            return Err(ConfigError::InvalidCountryCode(code));
        }
        config.default_country_code = code;
    }

    if let Some(remote) = parsed.remote {
        if !remote.url.starts_with("https://") {
            return Err(ConfigError::InvalidRemoteUrl(remote.url));
        }
        if remote.anon_key.trim().is_empty() {
            return Err(ConfigError::EmptyAnonKey);
        }
        config.remote = Some(RemoteConfig {
            url: remote.url,
            anon_key: remote.anon_key,
        });
    }

    if let Some(webhooks) = parsed.webhooks {
        config.webhooks = WebhooksConfig {
            general: webhooks.general,
            doctor: webhooks.doctor,
            real_estate: webhooks.real_estate,
        };
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
