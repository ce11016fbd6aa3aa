use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::endpoint::{endpoint, LABELS_PATH};
use crate::error::{HarborError, Result};
use crate::request::ApiRequest;

/// Timestamp layout the label API accepts for creation/update times
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Whether a label is visible registry-wide or inside one project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelScope {
    #[default]
    #[serde(rename = "g")]
    Global,
    #[serde(rename = "p")]
    Project,
}

impl LabelScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelScope::Global => "g",
            LabelScope::Project => "p",
        }
    }
}

impl fmt::Display for LabelScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelScope {
    type Err = HarborError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "g" | "global" => Ok(LabelScope::Global),
            "p" | "project" => Ok(LabelScope::Project),
            other => Err(HarborError::InvalidInput(format!(
                "invalid scope '{}', expected 'g' (global) or 'p' (project)",
                other
            ))),
        }
    }
}

/// Query for `GET /api/labels`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLabels {
    pub scope: LabelScope,
    pub name: String,
    pub project_id: u64,
    pub page: u32,
    pub page_size: u32,
}

impl ListLabels {
    pub fn new(scope: LabelScope) -> Self {
        Self {
            scope,
            name: String::new(),
            project_id: 0,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_project(self.scope, self.project_id)?;
        if self.page == 0 {
            return Err(HarborError::InvalidInput(
                "page must be 1 or greater".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(HarborError::InvalidInput(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Query string in the fixed field order the endpoint documents
    pub fn query_string(&self) -> String {
        format!(
            "scope={}&name={}&project_id={}&page={}&page_size={}",
            self.scope,
            urlencoding::encode(&self.name),
            self.project_id,
            self.page,
            self.page_size
        )
    }

    pub fn to_request(&self, base_url: &str) -> Result<ApiRequest> {
        self.validate()?;
        let url = endpoint(base_url, LABELS_PATH)?;
        Ok(ApiRequest::get(format!("{}?{}", url, self.query_string())))
    }
}

/// Body of `POST /api/labels`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLabel {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub color: String,
    pub scope: LabelScope,
    pub project_id: u64,
    pub creation_time: String,
    pub update_time: String,
    pub deleted: bool,
}

impl CreateLabel {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            color: DEFAULT_COLOR.to_string(),
            scope: LabelScope::Global,
            project_id: 0,
            creation_time: String::new(),
            update_time: String::new(),
            deleted: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("description", &self.description)?;
        validate_color(&self.color)?;
        validate_project(self.scope, self.project_id)
    }

    /// Fill whichever of the time fields is unset with `now`.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        let ts = now.format(TIMESTAMP_FORMAT).to_string();
        if self.creation_time.is_empty() {
            self.creation_time = ts.clone();
        }
        if self.update_time.is_empty() {
            self.update_time = ts;
        }
        self
    }

    pub fn to_request(&self, base_url: &str) -> Result<ApiRequest> {
        let mut label = self.clone();
        label.color = normalize_color(&label.color);
        label.validate()?;
        let label = label.stamped(Utc::now());
        ApiRequest::post(endpoint(base_url, LABELS_PATH)?, &label)
    }
}

/// Path parameter for `GET /api/labels/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetLabel {
    pub id: u64,
}

impl GetLabel {
    pub fn to_request(&self, base_url: &str) -> Result<ApiRequest> {
        Ok(ApiRequest::get(label_url(base_url, self.id)?))
    }
}

/// Path parameter for `DELETE /api/labels/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteLabel {
    pub id: u64,
}

impl DeleteLabel {
    pub fn to_request(&self, base_url: &str) -> Result<ApiRequest> {
        Ok(ApiRequest::delete(label_url(base_url, self.id)?))
    }
}

/// Body of `PUT /api/labels/{id}`.
///
/// The server ignores creation/update times on update, so they are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLabel {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub color: String,
    pub scope: LabelScope,
    pub project_id: u64,
    pub deleted: bool,
}

impl UpdateLabel {
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            color: DEFAULT_COLOR.to_string(),
            scope: LabelScope::Global,
            project_id: 0,
            deleted: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("description", &self.description)?;
        validate_color(&self.color)?;
        validate_project(self.scope, self.project_id)
    }

    pub fn to_request(&self, base_url: &str) -> Result<ApiRequest> {
        let mut label = self.clone();
        label.color = normalize_color(&label.color);
        label.validate()?;
        ApiRequest::put(label_url(base_url, self.id)?, &label)
    }
}

fn label_url(base_url: &str, id: u64) -> Result<String> {
    Ok(format!("{}/{}", endpoint(base_url, LABELS_PATH)?, id))
}

/// Prefix a bare hex color with `#`.
pub fn normalize_color(color: &str) -> String {
    let color = color.trim();
    if color.starts_with('#') {
        color.to_string()
    } else {
        format!("#{}", color)
    }
}

fn validate_color(color: &str) -> Result<()> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    let valid_len = hex.len() == 3 || hex.len() == 6;
    if !valid_len || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HarborError::InvalidInput(format!(
            "invalid color '{}', expected a hex code such as #A9B6BE",
            color
        )));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HarborError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

fn validate_project(scope: LabelScope, project_id: u64) -> Result<()> {
    if scope == LabelScope::Project && project_id == 0 {
        return Err(HarborError::InvalidInput(
            "project_id is required when scope is 'p'".to_string(),
        ));
    }
    Ok(())
}
