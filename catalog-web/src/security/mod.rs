pub mod middleware;

pub use middleware::{rate_limit_middleware, RateLimitPolicy};
