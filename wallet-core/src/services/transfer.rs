//! Transfer service - atomic balance moves between two wallets

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::domain::{
    Error, Result, TransferReceipt, TransferRequest, TransferSide, WalletId,
};
use crate::ports::{UnitOfWork, WalletStore};

/// Moves money between wallets inside a single unit of work.
///
/// The service holds no balances of its own: every call re-reads both wallets
/// from the store. It is safe to share between threads, each call opening its
/// own unit of work.
pub struct TransferService {
    store: Arc<dyn WalletStore>,
}

impl TransferService {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }

    /// Transfer `amount` from `source_id` to `target_id`
    pub fn transfer(
        &self,
        source_id: WalletId,
        target_id: WalletId,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        self.execute(&TransferRequest::new(source_id, target_id, amount))
    }

    /// Execute a transfer request.
    ///
    /// Either both balances change and a receipt is returned, or the unit of
    /// work is rolled back and the failure is returned unchanged.
    pub fn execute(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        if let Err(e) = request.validate() {
            warn!(error = %e, "Transfer rejected before storage access");
            return Err(e);
        }

        let mut unit = self.store.begin()?;

        match apply(unit.as_mut(), request) {
            Ok(receipt) => {
                unit.commit()?;
                info!(
                    transfer_id = %receipt.id,
                    source_id = request.source_id,
                    target_id = request.target_id,
                    "Transfer committed"
                );
                Ok(receipt)
            }
            Err(e) => {
                if let Err(rollback_err) = unit.rollback() {
                    warn!(error = %rollback_err, "Rollback failed after transfer error");
                }
                if e.is_business_rule() {
                    warn!(
                        source_id = request.source_id,
                        target_id = request.target_id,
                        kind = ?e.kind(),
                        "Transfer aborted"
                    );
                } else {
                    error!(
                        source_id = request.source_id,
                        target_id = request.target_id,
                        error = %e,
                        "Transfer aborted"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Read, check and write inside an open unit of work.
///
/// The order is fixed: read source, read target, check, debit source,
/// credit target. Nothing here commits.
fn apply<'u>(
    unit: &mut (dyn UnitOfWork + 'u),
    request: &TransferRequest,
) -> Result<TransferReceipt> {
    let amount = request.amount;

    let source = unit.get(request.source_id)?;
    let target = unit.get(request.target_id)?;
    debug!(source_id = source.id, target_id = target.id, "Loaded wallets");

    if !source.can_cover(amount) {
        return Err(Error::InsufficientBalance {
            wallet_id: source.id,
            available: source.balance,
            requested: amount,
        });
    }

    let source_balance = source.balance - amount;
    if unit.set_balance(source.id, source_balance)? == 0 {
        return Err(Error::UpdateFailed {
            wallet_id: source.id,
            side: TransferSide::Source,
        });
    }

    let target_balance = target.balance + amount;
    if unit.set_balance(target.id, target_balance)? == 0 {
        return Err(Error::UpdateFailed {
            wallet_id: target.id,
            side: TransferSide::Target,
        });
    }
    debug!(source_id = source.id, target_id = target.id, "Balances written");

    Ok(TransferReceipt::new(request, source_balance, target_balance))
}
