pub mod endpoint;
pub mod error;
pub mod models;
pub mod request;
pub mod session;
pub mod traits;

pub use endpoint::{endpoint, LABELS_PATH};
pub use error::{HarborError, Result};
pub use models::*;
pub use request::{ApiRequest, ApiResponse, Method};
pub use session::{Session, DEFAULT_SESSION_FILE};
pub use traits::Dispatcher;
