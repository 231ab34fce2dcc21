//! Error types for network evaluation, recombination and persistence.

/// Precondition violations raised by `fire` and `crossover`.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A unit received an input vector whose length differs from its weight count
    DimensionMismatch { expected: usize, found: usize },
    /// A network received an input vector whose length differs from its input size
    InputSizeMismatch { expected: usize, found: usize },
    /// Two operands (or a reconstructed tree) do not share the same shape
    TopologyMismatch(String),
}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: inputs ({}) and weights ({}) must have the same number of elements",
                found, expected
            ),
            Self::InputSizeMismatch { expected, found } => write!(
                f,
                "Input size mismatch: network accepts {} inputs but received {}",
                expected, found
            ),
            Self::TopologyMismatch(msg) => write!(f, "Topology mismatch: {}", msg),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Errors that can occur while encoding or decoding a network
#[derive(Debug)]
pub enum PersistError {
    Json(serde_json::Error),
    Bincode(bincode::Error),
    Topology(NetworkError),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Bincode(e) => write!(f, "Bincode error: {}", e),
            Self::Topology(e) => write!(f, "Invalid network: {}", e),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Bincode(e) => Some(e),
            Self::Topology(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<bincode::Error> for PersistError {
    fn from(e: bincode::Error) -> Self {
        Self::Bincode(e)
    }
}

impl From<NetworkError> for PersistError {
    fn from(e: NetworkError) -> Self {
        Self::Topology(e)
    }
}
