use serde::Serialize;
use std::fmt;

use crate::error::Result;

/// HTTP verbs used by the label endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready to hand to a [`crate::Dispatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON body, only set for POST and PUT
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
        }
    }

    pub fn post<T: Serialize>(url: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::Post,
            url: url.into(),
            body: Some(serde_json::to_string(body)?),
        })
    }

    pub fn put<T: Serialize>(url: impl Into<String>, body: &T) -> Result<Self> {
        Ok(Self {
            method: Method::Put,
            url: url.into(),
            body: Some(serde_json::to_string(body)?),
        })
    }
}

/// What came back from the registry. Non-2xx statuses are still responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// e.g. `200 OK`
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}
