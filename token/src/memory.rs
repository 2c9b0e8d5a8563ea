//! In-memory reference ledger.

use std::collections::HashMap;

use crate::error::TokenError;
use crate::ledger::TokenLedger;
use serde::{Deserialize, Serialize};
use tenure_types::{AccountAddress, TokenAmount};

/// A HashMap-backed ledger for tests and simple embeddings.
///
/// Balances are conserved by every operation except `mint`; the running
/// `total_supply` makes that checkable in O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: HashMap<AccountAddress, TokenAmount>,
    allowances: HashMap<(AccountAddress, AccountAddress), TokenAmount>,
    total_supply: TokenAmount,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `account` out of thin air.
    pub fn mint(
        &mut self,
        account: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        let balance = self.balances.entry(account.clone()).or_default();
        *balance = balance.checked_add(amount).ok_or(TokenError::Overflow)?;
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        Ok(())
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, account: &AccountAddress) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or(TokenAmount::ZERO)
    }

    fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(from);
        let remaining = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientFunds {
                needed: amount.raw(),
                available: from_balance.raw(),
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.balances.insert(from.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn approve(
        &mut self,
        owner: &AccountAddress,
        spender: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        self.allowances
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }

    fn allowance(&self, owner: &AccountAddress, spender: &AccountAddress) -> TokenAmount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountAddress,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), TokenError> {
        let approved = self.allowance(from, spender);
        let remaining_allowance =
            approved
                .checked_sub(amount)
                .ok_or(TokenError::InsufficientAllowance {
                    needed: amount.raw(),
                    approved: approved.raw(),
                })?;
        self.transfer(from, to, amount)?;
        self.allowances
            .insert((from.clone(), spender.clone()), remaining_allowance);
        Ok(())
    }
}
