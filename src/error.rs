use std::collections::TryReserveError;
use std::io;

/// Errors raised while reading, validating or scoring partner links
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("expected {expected}, found {found}")]
    Parse { expected: String, found: String },

    #[error("{list}[{index}] = {value} is outside partner range [1, {partner_count}]")]
    PartnerOutOfRange {
        list: &'static str,
        index: usize,
        value: i64,
        partner_count: usize,
    },

    #[error("edge lists differ in length: from={from}, to={to}, restaurant={restaurant}")]
    LengthMismatch {
        from: usize,
        to: usize,
        restaurant: usize,
    },

    #[error("product {0} * {1} overflows a 64-bit signed integer")]
    Overflow(usize, usize),

    #[error("cannot allocate partner sets for {partner_count} partners")]
    Allocation {
        partner_count: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("failed to read input")]
    Io(#[from] io::Error),
}

impl ClusterError {
    /// True for errors caused by well-formed but invalid values
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClusterError::PartnerOutOfRange { .. } | ClusterError::LengthMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClusterError>;
