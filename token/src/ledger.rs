//! The abstract ledger trait the engines depend on.

use crate::error::TokenError;
use tenure_types::{AccountAddress, TokenAmount};

/// A fungible token ledger.
///
/// Balance-and-allowance semantics: `transfer_from` spends `spender`'s
/// allowance on `from`'s balance, so a staker can pre-approve the engine vault
/// without handing over custody. Zero-amount moves succeed and change nothing.
pub trait TokenLedger {
    /// Current balance of `account` (zero for unknown accounts).
    fn balance_of(&self, account: &AccountAddress) -> TokenAmount;

    /// Move `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    /// Set `spender`'s allowance on `owner`'s balance to exactly `amount`.
    fn approve(
        &mut self,
        owner: &AccountAddress,
        spender: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;

    /// Remaining allowance `spender` holds on `owner`'s balance.
    fn allowance(&self, owner: &AccountAddress, spender: &AccountAddress) -> TokenAmount;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance.
    ///
    /// Allowance is checked before balance; both are debited atomically.
    fn transfer_from(
        &mut self,
        spender: &AccountAddress,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError>;
}
