use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A state quantity went NaN or infinite during integration. Usually the
    /// step is too large for the configured drag/inertia coefficients.
    #[error("non-finite {quantity} after tick {tick}")]
    NonFinite { quantity: &'static str, tick: u64 },
    #[error("invalid simulation settings: {0}")]
    InvalidSettings(String),
}
