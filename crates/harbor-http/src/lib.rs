pub mod client;
pub mod error;


pub use client::HarborClient;
pub use error::{HttpError, Result};
