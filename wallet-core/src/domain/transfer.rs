//! Transfer request and receipt

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::result::{Error, Result};
use super::wallet::{WalletId, BALANCE_SCALE};

/// A request to move `amount` from one wallet to another.
///
/// Ephemeral: lives for a single call and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source_id: WalletId,
    pub target_id: WalletId,
    pub amount: Decimal,
}

impl TransferRequest {
    pub fn new(source_id: WalletId, target_id: WalletId, amount: Decimal) -> Self {
        Self {
            source_id,
            target_id,
            amount,
        }
    }

    /// Parse the three text fields typed at a prompt.
    ///
    /// Only checks the shape of the input; business rules are applied by
    /// [`TransferRequest::validate`].
    pub fn parse(source: &str, target: &str, amount: &str) -> Result<Self> {
        let source_id = source
            .trim()
            .parse::<WalletId>()
            .map_err(|_| Error::invalid_request(format!("Invalid source wallet ID: '{}'", source.trim())))?;
        let target_id = target
            .trim()
            .parse::<WalletId>()
            .map_err(|_| Error::invalid_request(format!("Invalid target wallet ID: '{}'", target.trim())))?;
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| Error::invalid_request(format!("Invalid amount: '{}'", amount.trim())))?;

        Ok(Self::new(source_id, target_id, amount))
    }

    /// Check the request before any storage access
    pub fn validate(&self) -> Result<()> {
        if self.amount <= Decimal::ZERO || self.amount.normalize().scale() > BALANCE_SCALE {
            return Err(Error::InvalidAmount(self.amount));
        }
        if self.source_id == self.target_id {
            return Err(Error::invalid_request(format!(
                "Source and target must be different wallets (both are {})",
                self.source_id
            )));
        }
        Ok(())
    }
}

/// Confirmation of a committed transfer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: Uuid,
    pub source_id: WalletId,
    pub target_id: WalletId,
    pub amount: Decimal,
    /// Source balance after the debit
    pub source_balance: Decimal,
    /// Target balance after the credit
    pub target_balance: Decimal,
    pub completed_at: DateTime<Utc>,
}

impl TransferReceipt {
    pub fn new(request: &TransferRequest, source_balance: Decimal, target_balance: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_id: request.source_id,
            target_id: request.target_id,
            amount: request.amount,
            source_balance,
            target_balance,
            completed_at: Utc::now(),
        }
    }
}
