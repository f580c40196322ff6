pub mod app_state;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod security;


pub use app_state::AppState;
pub use error::{ApiError, ErrorBody};
pub use handlers::*;
pub use router::create_router;
pub use security::{rate_limit_middleware, RateLimitPolicy};
