use reqwest::StatusCode;
use thiserror::Error;

/// The network-level reason a payment call never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// The connection could not be established; the request was not delivered.
    Connect,
    /// The configured timeout elapsed before a response arrived.
    Timeout,
    /// The connection broke while sending the request or reading the response.
    Io,
}

/// Failures of a payment authorization call.
///
/// A declined payment is not one of these: it is a successful call whose
/// `PaymentResponse` carries `authorised = false`.
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("payment service unreachable ({kind:?}): {detail}")]
    Transport {
        kind: TransportFailure,
        detail: String,
    },
    #[error("unexpected response from payment service (status {status}): {detail}")]
    Protocol { status: StatusCode, detail: String },
}

impl AuthorizationError {
    pub fn transport(kind: TransportFailure, detail: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            detail: detail.into(),
        }
    }

    /// True when the request is known not to have reached the provider.
    pub fn is_undelivered(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                kind: TransportFailure::Connect,
                ..
            }
        )
    }
}

impl From<reqwest::Error> for AuthorizationError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() {
            TransportFailure::Connect
        } else {
            TransportFailure::Io
        };
        Self::transport(kind, err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[cfg(feature = "storage-rocksdb")]
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
