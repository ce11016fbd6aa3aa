//! Session cookie persisted by a previous login.
//!
//! The file is YAML with a single `beegosessionID` key. This crate only reads it.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{HarborError, Result};

pub const DEFAULT_SESSION_FILE: &str = ".cookie.yaml";

/// Name of the cookie Harbor's web layer issues for a logged-in session
pub const SESSION_COOKIE: &str = "beegosessionID";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Session {
    #[serde(rename = "beegosessionID")]
    pub session_id: String,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// Load the session from `path`. A missing file, bad YAML or blank token are all errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HarborError::Session(format!(
                "failed to read session file {}: {}",
                path.display(),
                e
            ))
        })?;

        let session: Session = serde_yaml::from_str(&content).map_err(|e| {
            HarborError::Session(format!(
                "failed to parse session file {}: {}",
                path.display(),
                e
            ))
        })?;

        if session.session_id.trim().is_empty() {
            return Err(HarborError::Session(format!(
                "session file {} has an empty {}",
                path.display(),
                SESSION_COOKIE
            )));
        }

        Ok(session)
    }

    /// Value for the `Cookie` request header.
    ///
    /// `language` adds Harbor's UI language cookie in front of the session cookie.
    pub fn cookie_header(&self, language: Option<&str>) -> String {
        match language {
            Some(lang) if !lang.is_empty() => format!(
                "harbor-lang={}; {}={}",
                lang,
                SESSION_COOKIE,
                self.session_id.trim()
            ),
            _ => format!("{}={}", SESSION_COOKIE, self.session_id.trim()),
        }
    }
}
