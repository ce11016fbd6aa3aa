use crate::error::Result;
use crate::request::{ApiRequest, ApiResponse};

/// Sends a built request to the registry.
///
/// Implementations attach authentication and return whatever status the server
/// answered with. Only transport-level failures are errors.
pub trait Dispatcher {
    fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse>;
}
