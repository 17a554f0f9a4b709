use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    InvalidCapacity {
        capacity: usize,
        reason: &'static str,
    },
    CapacityTooSmall {
        requested: usize,
        required: usize,
    },
    InvalidChunk {
        chunk: usize,
    },
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { capacity, reason } => {
                write!(f, "Invalid capacity {}: {}", capacity, reason)
            }
            Self::CapacityTooSmall { requested, required } => {
                write!(
                    f,
                    "Capacity too small: requested {} elements, {} elements are still unread",
                    requested, required
                )
            }
            Self::InvalidChunk { chunk } => {
                write!(f, "Invalid chunk size {}: must be greater than zero", chunk)
            }
        }
    }
}

impl std::error::Error for RingError {}
