use thiserror::Error;

use crate::gateway::GatewayError;

/// Failures surfaced by discovery operations.
///
/// Every variant is recoverable: callers degrade to an empty or partial
/// result set and the host page keeps working.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("nothing matches {0}")]
    NoSubjectMatch(String),

    #[error("no upstream endpoint configured")]
    ConfigurationMissing,

    #[error("upstream not ready after {attempts} attempts")]
    NotReady { attempts: u32 },

    #[error("discovery is disabled")]
    Disabled,
}

impl From<GatewayError> for DiscoveryError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::NotConfigured | GatewayError::InvalidBaseUrl(_) => {
                DiscoveryError::ConfigurationMissing
            }
            other => DiscoveryError::UpstreamUnavailable(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
