use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use harbor_core::DEFAULT_SESSION_FILE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolved configuration: defaults, then TOML files, then `HARBOR_*` env, then CLI flags
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Registry base URL, without the `/api` suffix
    pub url: Option<String>,
    /// Session cookie file written by a previous login
    pub session_file: Option<PathBuf>,
    /// Harbor UI language sent as the `harbor-lang` cookie (e.g. "en-us")
    pub language: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(explicit_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("HARBOR_").only(&["url", "session_file", "language"]));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli_url: Option<String>, cli_session_file: Option<PathBuf>) {
        if let Some(url) = cli_url {
            self.url = Some(url);
        }
        if let Some(path) = cli_session_file {
            self.session_file = Some(path);
        }
    }

    /// The registry URL, or an error telling the user how to set it
    pub fn require_url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("Registry URL not configured. Set via --url, HARBOR_URL env var, or config file")
            })
    }

    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE))
    }
}

/// Candidate config files in merge order (later files win)
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "harbor").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("harbor").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("harbor")
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join("config.toml"))
}
