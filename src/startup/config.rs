//! Client configuration.
//!
//! Built with the builder methods, or read from `FRONTLINE_*` environment
//! variables by [`ClientConfig::from_env`].

use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::error::FrontlineError;
use crate::gesture::GestureConfig;
use crate::sync::{AutoAdvancePolicy, POLL_INTERVAL};

pub const ENV_API_URL: &str = "FRONTLINE_API_URL";
pub const ENV_POLL_MS: &str = "FRONTLINE_POLL_MS";
pub const ENV_LONG_PRESS_MS: &str = "FRONTLINE_LONG_PRESS_MS";
pub const ENV_DOUBLE_TAP_MS: &str = "FRONTLINE_DOUBLE_TAP_MS";
pub const ENV_DRAG_THRESHOLD: &str = "FRONTLINE_DRAG_THRESHOLD";
pub const ENV_AUTO_ADVANCE: &str = "FRONTLINE_AUTO_ADVANCE";

/// Per-request timeout applied to the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delay between room lookups while waiting for an opponent.
pub const DEFAULT_ROOM_POLL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub poll_interval: Duration,
    pub room_poll_interval: Duration,
    pub request_timeout: Duration,
    pub gesture: GestureConfig,
    pub auto_advance: AutoAdvancePolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: POLL_INTERVAL,
            room_poll_interval: DEFAULT_ROOM_POLL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            gesture: GestureConfig::default(),
            auto_advance: AutoAdvancePolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_room_poll_interval(mut self, interval: Duration) -> Self {
        self.room_poll_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn with_auto_advance(mut self, policy: AutoAdvancePolicy) -> Self {
        self.auto_advance = policy;
        self
    }

    /// Defaults overridden by any `FRONTLINE_*` variable that is set.
    pub fn from_env() -> Result<Self, FrontlineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FrontlineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }
        if let Some(ms) = parse_millis(&lookup, ENV_POLL_MS)? {
            if ms.is_zero() {
                return Err(FrontlineError::Config(format!("{} must be positive", ENV_POLL_MS)));
            }
            config.poll_interval = ms;
        }
        if let Some(ms) = parse_millis(&lookup, ENV_LONG_PRESS_MS)? {
            config.gesture = config.gesture.with_long_press(ms);
        }
        if let Some(ms) = parse_millis(&lookup, ENV_DOUBLE_TAP_MS)? {
            config.gesture = config.gesture.with_double_tap_window(ms);
        }
        if let Some(raw) = lookup(ENV_DRAG_THRESHOLD) {
            let threshold: f32 = raw.trim().parse().map_err(|_| {
                FrontlineError::Config(format!("{} is not a number: {:?}", ENV_DRAG_THRESHOLD, raw))
            })?;
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(FrontlineError::Config(format!(
                    "{} must be a non-negative number",
                    ENV_DRAG_THRESHOLD
                )));
            }
            config.gesture = config.gesture.with_drag_threshold(threshold);
        }
        if let Some(raw) = lookup(ENV_AUTO_ADVANCE) {
            config.auto_advance = match raw.trim().to_lowercase().as_str() {
                "" | "any" => AutoAdvancePolicy::AnyClient,
                "withdrawer" => AutoAdvancePolicy::WithdrawingPlayerOnly,
                other => {
                    return Err(FrontlineError::Config(format!(
                        "{} must be \"any\" or \"withdrawer\", got {:?}",
                        ENV_AUTO_ADVANCE, other
                    )))
                }
            };
        }

        Ok(config)
    }
}

fn parse_millis<F>(lookup: &F, key: &str) -> Result<Option<Duration>, FrontlineError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(|ms| Some(Duration::from_millis(ms)))
        .map_err(|_| FrontlineError::Config(format!("{} is not a whole number of ms: {:?}", key, raw)))
}
