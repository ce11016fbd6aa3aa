use crate::error::{HarborError, Result};

/// Path of the label collection on the Harbor API
pub const LABELS_PATH: &str = "/api/labels";

/// Join a registry base address with an API path.
///
/// Trailing slashes on `base` are dropped so `https://harbor.local/` and
/// `https://harbor.local` produce the same URL. `path` is expected to start with `/`.
pub fn endpoint(base: &str, path: &str) -> Result<String> {
    let base = base.trim().trim_end_matches('/');

    if base.is_empty() {
        return Err(HarborError::Config("registry URL is empty".to_string()));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(HarborError::Config(format!(
            "registry URL must start with http:// or https://, got '{}'",
            base
        )));
    }

    Ok(format!("{}{}", base, path))
}
