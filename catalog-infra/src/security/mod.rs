pub mod rate_limit;

pub use rate_limit::{
    parse_rules, MemoryRateLimiter, RateLimitCheck, RateLimitDecision, RateLimitError,
    RateLimitRule, RateLimitRuleError, RateLimiter,
};
