//! Wallet domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-supplied primary key of a wallet row
pub type WalletId = i32;

/// Number of fractional digits stored for balances (DECIMAL(18,2))
pub const BALANCE_SCALE: u32 = 2;

/// Represents a wallet row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub holder: String,
    pub balance: Decimal,
}

impl Wallet {
    pub fn new(id: WalletId, holder: impl Into<String>, balance: Decimal) -> Self {
        Self {
            id,
            holder: holder.into(),
            balance,
        }
    }

    /// True when the wallet can cover `amount`
    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}

impl std::fmt::Display for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} : {:.2}",
            self.id, self.holder, self.balance
        )
    }
}

/// Sample wallets written when seeding an empty table
pub fn default_wallets() -> Vec<Wallet> {
    vec![
        Wallet::new(1, "Omar Alashour", Decimal::new(10000, 0)),
        Wallet::new(2, "Khalid Alashour", Decimal::new(3500, 0)),
        Wallet::new(3, "Ali Hassan", Decimal::new(6500, 0)),
    ]
}
