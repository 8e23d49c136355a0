//! Result and error types for the core library

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::wallet::WalletId;

/// Which side of a transfer a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferSide {
    Source,
    Target,
}

impl std::fmt::Display for TransferSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferSide::Source => write!(f, "source"),
            TransferSide::Target => write!(f, "target"),
        }
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transfer amount must be positive with at most 2 decimal places, got {0}")]
    InvalidAmount(Decimal),

    #[error("Invalid transfer request: {0}")]
    InvalidRequest(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(WalletId),

    #[error("Insufficient balance for transfer: wallet {wallet_id} has {available}, requested {requested}")]
    InsufficientBalance {
        wallet_id: WalletId,
        available: Decimal,
        requested: Decimal,
    },

    #[error("Update failed for {side} wallet {wallet_id}")]
    UpdateFailed { wallet_id: WalletId, side: TransferSide },

    /// Passed through from the storage layer; the original error is kept as the source.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<duckdb::Error> for Error {
    fn from(err: duckdb::Error) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Discriminant of [`Error`], stable across messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidAmount,
    InvalidRequest,
    WalletNotFound,
    InsufficientBalance,
    UpdateFailed,
    Storage,
    Validation,
    Config,
    Io,
    Json,
}

impl Error {
    /// Create a storage error from any displayable message
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into().into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::WalletNotFound(_) => ErrorKind::WalletNotFound,
            Error::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Error::UpdateFailed { .. } => ErrorKind::UpdateFailed,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Json(_) => ErrorKind::Json,
        }
    }

    /// True for failures caused by business rules rather than infrastructure
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidAmount
                | ErrorKind::InvalidRequest
                | ErrorKind::WalletNotFound
                | ErrorKind::InsufficientBalance
                | ErrorKind::Validation
        )
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for JSON output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let mut context = HashMap::new();
                context.insert(
                    "kind".to_string(),
                    serde_json::to_value(e.kind()).unwrap_or(serde_json::Value::Null),
                );
                Self::fail_with_context(e.to_string(), context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_result_ok() {
        let result: OperationResult<i32> = OperationResult::ok(42);
        assert!(result.success);
        assert_eq!(result.data, Some(42));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_operation_result_fail() {
        let result: OperationResult<i32> = OperationResult::fail("Something went wrong");
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error, Some("Something went wrong".to_string()));
    }

    #[test]
    fn test_from_result_carries_error_kind() {
        let ok: Result<i32> = Ok(42);
        let result: OperationResult<i32> = ok.into();
        assert!(result.success);

        let err: Result<i32> = Err(Error::WalletNotFound(7));
        let result: OperationResult<i32> = err.into();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("Wallet not found: 7"));
        let context = result.context.unwrap();
        assert_eq!(context["kind"], serde_json::json!("wallet_not_found"));
    }

    #[test]
    fn test_storage_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::storage("connection reset");
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert_eq!(err.source().unwrap().to_string(), "connection reset");
        assert!(!err.is_business_rule());
    }

    #[test]
    fn test_update_failed_message_names_side() {
        let err = Error::UpdateFailed {
            wallet_id: 2,
            side: TransferSide::Target,
        };
        assert_eq!(err.to_string(), "Update failed for target wallet 2");
        assert!(!err.is_business_rule());
    }
}
