use rust_decimal::Decimal;
use tracing::info;

use currentz_domain::money::round_cents;

use crate::{storage::FinanceStore, CoreError};

pub struct BalanceService;

impl BalanceService {
    /// Stored starting balance; an unset balance reads as zero.
    pub fn starting_balance(store: &dyn FinanceStore) -> Result<Decimal, CoreError> {
        Ok(store.starting_balance()?.unwrap_or(Decimal::ZERO))
    }

    pub fn set_starting_balance(
        store: &dyn FinanceStore,
        balance: Decimal,
    ) -> Result<Decimal, CoreError> {
        let rounded = round_cents(balance);
        store.set_starting_balance(rounded)?;
        info!(balance = %rounded, "starting balance updated");
        Ok(rounded)
    }
}
