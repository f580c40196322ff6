use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

/// 速率限制规则：每个窗口内最多 `limit` 次请求
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateLimitRule {
    pub limit: u64,
    pub window: Duration,
}

impl RateLimitRule {
    pub fn new(limit: u64, window: Duration) -> Self {
        Self { limit, window }
    }

    pub fn per_second(limit: u64) -> Self {
        Self::new(limit, Duration::from_secs(1))
    }
}

impl fmt::Display for RateLimitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per {} seconds", self.limit, self.window.as_secs())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RateLimitRuleError {
    #[error("Invalid rate limit `{0}`: expected `N per unit` or `N/unit`")]
    Syntax(String),

    #[error("Invalid rate limit `{0}`: unknown unit `{1}`")]
    Unit(String, String),

    #[error("Invalid rate limit `{0}`: limit and multiplier must be positive")]
    Zero(String),
}

/// 解析 `200 per day`、`50/hour`、`10 per 5 minutes` 形式的规则
impl FromStr for RateLimitRule {
    type Err = RateLimitRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let (count, period) = text
            .split_once(" per ")
            .or_else(|| text.split_once('/'))
            .ok_or_else(|| RateLimitRuleError::Syntax(s.to_string()))?;

        let limit: u64 = count
            .trim()
            .parse()
            .map_err(|_| RateLimitRuleError::Syntax(s.to_string()))?;

        let mut parts = period.split_whitespace();
        let (multiplier, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(unit), None, None) => (1, unit),
            (Some(n), Some(unit), None) => (
                n.parse::<u64>()
                    .map_err(|_| RateLimitRuleError::Syntax(s.to_string()))?,
                unit,
            ),
            _ => return Err(RateLimitRuleError::Syntax(s.to_string())),
        };

        let unit_seconds = match unit.trim_end_matches('s') {
            "second" | "sec" => 1,
            "minute" | "min" => 60,
            "hour" => 3_600,
            "day" => 86_400,
            other => return Err(RateLimitRuleError::Unit(s.to_string(), other.to_string())),
        };

        if limit == 0 || multiplier == 0 {
            return Err(RateLimitRuleError::Zero(s.to_string()));
        }

        Ok(Self::new(limit, Duration::from_secs(unit_seconds * multiplier)))
    }
}

/// 解析一组规则，忽略空白项
pub fn parse_rules<S: AsRef<str>>(rules: &[S]) -> Result<Vec<RateLimitRule>, RateLimitRuleError> {
    rules
        .iter()
        .map(|rule| rule.as_ref())
        .filter(|rule| !rule.trim().is_empty())
        .map(|rule| rule.parse::<RateLimitRule>())
        .collect()
}

/// 一次检查：某个计数键及其适用的规则
#[derive(Debug, Clone)]
pub struct RateLimitCheck {
    pub key: String,
    pub rules: Vec<RateLimitRule>,
}

impl RateLimitCheck {
    pub fn new(key: impl Into<String>, rules: Vec<RateLimitRule>) -> Self {
        Self {
            key: key.into(),
            rules,
        }
    }
}

/// 速率限制判定结果
///
/// 拒绝时描述被触发的规则；放行时描述剩余额度最少的规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u64,
    pub remaining: u64,
    pub reset_after: Duration,
}

impl RateLimitDecision {
    fn unlimited() -> Self {
        Self {
            allowed: true,
            limit: 0,
            remaining: 0,
            reset_after: Duration::ZERO,
        }
    }
}

#[derive(Error, Debug)]
pub enum RateLimitError {
    #[error("Rate limiter state is poisoned")]
    Poisoned,
}

/// 速率限制器trait
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// 原子地检查并计数
    ///
    /// 所有检查的所有窗口都未超限时才计入本次请求；任意一个超限则拒绝，
    /// 且不修改任何计数。
    async fn acquire(&self, checks: &[RateLimitCheck]) -> Result<RateLimitDecision, RateLimitError>;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u64,
}

impl Window {
    fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }
}

/// 基于进程内存的速率限制器实现（固定窗口算法）
///
/// 窗口从该键的第一次请求开始计时。进程重启后状态清空。
pub struct MemoryRateLimiter {
    /// 每个 (键, 规则) 独立计数，窗口长度相同的规则互不影响
    windows: Mutex<HashMap<(String, RateLimitRule), Window>>,
    max_entries: usize,
}

impl MemoryRateLimiter {
    pub fn new(max_entries: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    /// 当前跟踪的窗口数量
    pub fn tracked_windows(&self) -> usize {
        self.windows.lock().map(|w| w.len()).unwrap_or(0)
    }

    fn acquire_at(
        &self,
        checks: &[RateLimitCheck],
        now: Instant,
    ) -> Result<RateLimitDecision, RateLimitError> {
        let mut windows = self.windows.lock().map_err(|_| RateLimitError::Poisoned)?;

        if windows.len() > self.max_entries {
            windows.retain(|(_, rule), state| state.elapsed(now) < rule.window);
        }

        let mut decision: Option<RateLimitDecision> = None;
        for check in checks {
            for rule in &check.rules {
                let (count, reset_after) = match windows.get(&(check.key.clone(), *rule)) {
                    Some(state) if state.elapsed(now) < rule.window => {
                        (state.count, rule.window - state.elapsed(now))
                    }
                    _ => (0, rule.window),
                };

                if count >= rule.limit {
                    return Ok(RateLimitDecision {
                        allowed: false,
                        limit: rule.limit,
                        remaining: 0,
                        reset_after,
                    });
                }

                let remaining = rule.limit - count - 1;
                if decision.map_or(true, |d| remaining < d.remaining) {
                    decision = Some(RateLimitDecision {
                        allowed: true,
                        limit: rule.limit,
                        remaining,
                        reset_after,
                    });
                }
            }
        }

        // 同一次请求里重复出现的规则只计数一次
        let mut counted = HashSet::new();
        for check in checks {
            for rule in &check.rules {
                if !counted.insert((check.key.as_str(), *rule)) {
                    continue;
                }
                let state = windows
                    .entry((check.key.clone(), *rule))
                    .or_insert(Window { started: now, count: 0 });
                if state.elapsed(now) >= rule.window {
                    *state = Window { started: now, count: 0 };
                }
                state.count += 1;
            }
        }

        Ok(decision.unwrap_or_else(RateLimitDecision::unlimited))
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn acquire(
        &self,
        checks: &[RateLimitCheck],
    ) -> Result<RateLimitDecision, RateLimitError> {
        self.acquire_at(checks, Instant::now())
    }
}
