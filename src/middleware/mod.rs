pub mod auth;
pub mod error_details;
pub mod json_body;
pub mod response;

pub use auth::basic_auth_middleware;
pub use error_details::expose_error_details;
pub use json_body::JsonBody;
pub use response::{ApiResponse, ApiResult};
