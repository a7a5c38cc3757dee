use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// Runtime settings. With no config file and no environment overrides the
/// defaults reproduce the historical fixed behavior: port 8080, `./ps.log`
/// in, `./profile.csv` out.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,
    pub log_path: String,
    pub profile_path: String,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialAppConfig {
    listen_addr: Option<String>,
    log_path: Option<String>,
    profile_path: Option<String>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_path() -> String {
    "ps.log".to_string()
}

fn default_profile_path() -> String {
    "profile.csv".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            listen_addr: default_listen_addr(),
            log_path: default_log_path(),
            profile_path: default_profile_path(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config: PartialAppConfig = if let Some(path_str) = config_path {
            let path = Path::new(path_str);
            if path.exists() {
                let contents = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
                toml::from_str(&contents)
                    .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))?
            } else {
                PartialAppConfig::default()
            }
        } else {
            PartialAppConfig::default()
        };

        // 2. Load from environment variables
        let env_config = PartialAppConfig {
            listen_addr: env::var("PSCHART_LISTEN_ADDR").ok(),
            log_path: env::var("PSCHART_LOG_PATH").ok(),
            profile_path: env::var("PSCHART_PROFILE_PATH").ok(),
        };

        // 3. Merge: environment overrides file, defaults fill the rest
        Ok(AppConfig {
            listen_addr: env_config
                .listen_addr
                .or(file_config.listen_addr)
                .unwrap_or_else(default_listen_addr),
            log_path: env_config
                .log_path
                .or(file_config.log_path)
                .unwrap_or_else(default_log_path),
            profile_path: env_config
                .profile_path
                .or(file_config.profile_path)
                .unwrap_or_else(default_profile_path),
        })
    }
}
