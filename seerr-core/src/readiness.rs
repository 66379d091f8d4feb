//! Bounded wait for a collaborator to become ready.

use std::future::Future;
use std::time::Duration;

use seerr_config::{ReadinessBackoff, ReadinessConfig};
use tracing::debug;

use crate::error::DiscoveryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    Fixed,
    Exponential { factor: f64, max_interval: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::from(&ReadinessConfig::default())
    }
}

impl From<&ReadinessConfig> for ReadinessPolicy {
    fn from(config: &ReadinessConfig) -> Self {
        let backoff = match config.backoff {
            ReadinessBackoff::Fixed => Backoff::Fixed,
            ReadinessBackoff::Exponential => Backoff::Exponential {
                factor: config.factor,
                max_interval: config.max_interval,
            },
        };
        Self {
            max_attempts: config.max_attempts,
            interval: config.interval,
            backoff,
        }
    }
}

impl ReadinessPolicy {
    /// Pause after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                factor,
                max_interval,
            } => {
                let exponent = attempt.saturating_sub(1).min(32) as i32;
                let scaled = self.interval.as_secs_f64() * factor.max(1.0).powi(exponent);
                Duration::try_from_secs_f64(scaled)
                    .unwrap_or(max_interval)
                    .min(max_interval)
            }
        }
    }
}

/// Poll `probe` until it reports ready, at most `policy.max_attempts` times.
pub async fn wait_until_ready<F, Fut>(
    policy: &ReadinessPolicy,
    mut probe: F,
) -> Result<u32, DiscoveryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        if probe().await {
            debug!(attempt, "ready");
            return Ok(attempt);
        }
        if attempt < attempts {
            tokio::time::sleep(policy.delay_after(attempt)).await;
        }
    }
    Err(DiscoveryError::NotReady { attempts })
}
