use crate::error::{Error, Result};
use crate::operator::BackoffPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSettings {
    /// Logging configuration
    pub logging: LoggingSettings,

    /// Retry schedule for cluster deletion
    pub backoff: BackoffSettings,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter directive (trace, debug, info, warn, error, or an EnvFilter expression)
    pub level: String,

    /// Emit JSON lines instead of human-readable text
    pub json: bool,

    /// Also write logs to a rolling file in this directory
    pub dir: Option<PathBuf>,

    /// daily, hourly or never
    pub rotation: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            dir: None,
            rotation: "daily".to_string(),
        }
    }
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffSettings {
    /// Wait before the second attempt, in milliseconds
    pub initial_delay_ms: u64,

    /// Maximum number of attempts
    pub steps: u32,

    /// Growth factor between waits; 1.0 keeps the interval fixed
    pub factor: f64,

    /// Upper bound for a single wait, in milliseconds
    pub max_delay_ms: Option<u64>,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        let policy = BackoffPolicy::default();
        Self {
            initial_delay_ms: policy.initial_delay.as_millis() as u64,
            steps: policy.steps,
            factor: policy.factor,
            max_delay_ms: None,
        }
    }
}

impl BackoffSettings {
    /// Validate the settings and build the policy the lifecycle engine runs with
    pub fn to_policy(&self) -> Result<BackoffPolicy> {
        if self.steps == 0 {
            return Err(Error::Config("backoff.steps must be at least 1".to_string()));
        }
        if !self.factor.is_finite() || self.factor < 1.0 {
            return Err(Error::Config(format!(
                "backoff.factor must be a finite number >= 1.0, got {}",
                self.factor
            )));
        }

        let initial = Duration::from_millis(self.initial_delay_ms);
        let cap = self.max_delay_ms.map(Duration::from_millis);

        Ok(if self.factor == 1.0 && cap.is_none() {
            BackoffPolicy::fixed(initial, self.steps)
        } else {
            BackoffPolicy::exponential(initial, self.factor, self.steps, cap)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_backoff_settings_round_trip_to_policy() {
        let policy = BackoffSettings::default().to_policy().unwrap();
        assert_eq!(policy, BackoffPolicy::default());
    }

    #[test]
    fn test_invalid_backoff_settings() {
        let zero_steps = BackoffSettings {
            steps: 0,
            ..Default::default()
        };
        assert!(matches!(zero_steps.to_policy(), Err(Error::Config(_))));

        let shrinking = BackoffSettings {
            factor: 0.5,
            ..Default::default()
        };
        assert!(matches!(shrinking.to_policy(), Err(Error::Config(_))));
    }

    #[test]
    fn test_exponential_settings() {
        let settings = BackoffSettings {
            initial_delay_ms: 100,
            steps: 4,
            factor: 2.0,
            max_delay_ms: Some(250),
        };
        let policy = settings.to_policy().unwrap();
        assert_eq!(policy.delay_after(3), Duration::from_millis(250));
    }
}
