//! Vesting schedules.
//!
//! A schedule binds one cliff timetable to a set of beneficiary entries and
//! a start time. The start is set once by the owner; beneficiaries claim
//! against the cumulative unlocked percent. Tokens come out of an external
//! vault account, never from the schedule itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tenure_access::{require_role, AccessError, AccessRegistry};
use tenure_token::TokenLedger;
use tenure_types::{AccountAddress, Role, Timestamp, TokenAmount};

use crate::error::VestingError;
use crate::timetable::{CliffTimetable, VestingRow};

/// One beneficiary's allocation and claim progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingEntry {
    /// Full allocation over the life of the schedule.
    pub total: TokenAmount,
    /// Paid out so far. Never exceeds `total` nor the unlocked amount.
    pub claimed: TokenAmount,
}

/// A cliff-vesting pool: one timetable, one start, many beneficiaries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VestingSchedule {
    timetable: CliffTimetable,
    /// Custody account claims draw from.
    vault: AccountAddress,
    /// Unset until `init`; claims and projections need it.
    schedule_start: Option<Timestamp>,
    /// Backend account allowed to register beneficiaries besides the owner.
    trusted_worker: Option<AccountAddress>,
    entries: HashMap<AccountAddress, VestingEntry>,
}

impl VestingSchedule {
    pub fn new(timetable: CliffTimetable, vault: AccountAddress) -> Self {
        Self {
            timetable,
            vault,
            schedule_start: None,
            trusted_worker: None,
            entries: HashMap::new(),
        }
    }

    // ── Administration ──

    /// Set the schedule start. Owner-gated, exactly once.
    pub fn init(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        start: Timestamp,
    ) -> Result<(), VestingError> {
        require_role(registry, Role::Owner, caller)?;
        if self.schedule_start.is_some() {
            return Err(VestingError::AlreadyInitialized);
        }
        self.schedule_start = Some(start);
        Ok(())
    }

    /// Set the start and bind a single beneficiary in one step. Used by
    /// pools whose recipient is known up front.
    pub fn init_with_beneficiary(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        start: Timestamp,
        beneficiary: AccountAddress,
        total: TokenAmount,
    ) -> Result<(), VestingError> {
        self.init(registry, caller, start)?;
        self.add_user(registry, caller, beneficiary, total)
    }

    /// Register a beneficiary. Owner or the trusted worker.
    pub fn add_user(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        beneficiary: AccountAddress,
        total: TokenAmount,
    ) -> Result<(), VestingError> {
        self.authorize_registrar(registry, caller)?;
        if self.entries.contains_key(&beneficiary) {
            return Err(VestingError::AlreadyRegistered(beneficiary));
        }
        self.entries.insert(
            beneficiary,
            VestingEntry {
                total,
                claimed: TokenAmount::ZERO,
            },
        );
        Ok(())
    }

    /// Delegate beneficiary registration to a backend account. Owner-gated;
    /// replaces any previous worker.
    pub fn set_trusted_worker(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        worker: AccountAddress,
    ) -> Result<(), VestingError> {
        require_role(registry, Role::Owner, caller)?;
        self.trusted_worker = Some(worker);
        Ok(())
    }

    fn authorize_registrar(
        &self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
    ) -> Result<(), VestingError> {
        if registry.has_role(Role::Owner, caller) || self.trusted_worker.as_ref() == Some(caller) {
            return Ok(());
        }
        Err(AccessError::Unauthorized {
            role: Role::Owner,
            account: caller.clone(),
        }
        .into())
    }

    // ── Claims ──

    /// Pay `amount` of the beneficiary's unlocked allocation out of the
    /// vault. The caller must be the beneficiary and the amount must satisfy
    /// `0 < amount <= claimable`.
    pub fn claim_tokens(
        &mut self,
        ledger: &mut dyn TokenLedger,
        caller: &AccountAddress,
        beneficiary: &AccountAddress,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<(), VestingError> {
        let start = self.schedule_start.ok_or(VestingError::NotInitialized)?;
        let percent = self.timetable.unlocked_percent(start, now);
        let vault = self.vault.clone();
        let entry = self
            .entries
            .get_mut(beneficiary)
            .ok_or_else(|| VestingError::BeneficiaryNotFound(beneficiary.clone()))?;
        if caller != beneficiary {
            return Err(VestingError::NotBeneficiary {
                expected: beneficiary.clone(),
                actual: caller.clone(),
            });
        }

        let claimable = claimable_raw(entry, percent)?;
        if amount.is_zero() || amount.raw() > claimable {
            return Err(VestingError::ExceedsClaimable {
                requested: amount.raw(),
                claimable,
            });
        }

        ledger.transfer(&vault, beneficiary, amount)?;
        entry.claimed = entry
            .claimed
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;
        Ok(())
    }

    // ── Queries ──

    /// Amount a claim would pay out right now.
    pub fn claimable(
        &self,
        beneficiary: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, VestingError> {
        let start = self.schedule_start.ok_or(VestingError::NotInitialized)?;
        let entry = self
            .entries
            .get(beneficiary)
            .ok_or_else(|| VestingError::BeneficiaryNotFound(beneficiary.clone()))?;
        let percent = self.timetable.unlocked_percent(start, now);
        Ok(TokenAmount::new(claimable_raw(entry, percent)?))
    }

    /// The beneficiary's per-cliff projection: absolute unlock times and
    /// amounts, last row absorbing rounding so the rows sum to the total.
    pub fn individual_scheme(
        &self,
        beneficiary: &AccountAddress,
    ) -> Result<Vec<VestingRow>, VestingError> {
        let start = self.schedule_start.ok_or(VestingError::NotInitialized)?;
        let entry = self
            .entries
            .get(beneficiary)
            .ok_or_else(|| VestingError::BeneficiaryNotFound(beneficiary.clone()))?;
        self.timetable
            .rows(start, entry.total)
            .ok_or(VestingError::Overflow)
    }

    pub fn entry(&self, beneficiary: &AccountAddress) -> Option<&VestingEntry> {
        self.entries.get(beneficiary)
    }

    pub fn schedule_start(&self) -> Option<Timestamp> {
        self.schedule_start
    }

    pub fn trusted_worker(&self) -> Option<&AccountAddress> {
        self.trusted_worker.as_ref()
    }

    pub fn timetable(&self) -> &CliffTimetable {
        &self.timetable
    }

    pub fn vault(&self) -> &AccountAddress {
        &self.vault
    }

    pub fn beneficiary_count(&self) -> usize {
        self.entries.len()
    }

    /// Tokens the vault must still hold to honor every entry.
    pub fn required_reserve(&self) -> Result<TokenAmount, VestingError> {
        let mut reserve = TokenAmount::ZERO;
        for entry in self.entries.values() {
            let outstanding = entry
                .total
                .checked_sub(entry.claimed)
                .ok_or(VestingError::Overflow)?;
            reserve = reserve
                .checked_add(outstanding)
                .ok_or(VestingError::Overflow)?;
        }
        Ok(reserve)
    }

    /// Sum of every entry's full allocation, claimed or not.
    pub fn total_vested(&self) -> Result<TokenAmount, VestingError> {
        let mut total = TokenAmount::ZERO;
        for entry in self.entries.values() {
            total = total
                .checked_add(entry.total)
                .ok_or(VestingError::Overflow)?;
        }
        Ok(total)
    }

    // ── Snapshots ──

    /// Serialize the full schedule state.
    pub fn snapshot(&self) -> Result<Vec<u8>, VestingError> {
        bincode::serialize(self).map_err(|e| VestingError::Snapshot(e.to_string()))
    }

    /// Rebuild a schedule from `snapshot` output.
    pub fn restore(data: &[u8]) -> Result<Self, VestingError> {
        bincode::deserialize(data).map_err(|e| VestingError::Snapshot(e.to_string()))
    }
}

/// Unlocked minus claimed, floored multiplication on the raw amount.
fn claimable_raw(entry: &VestingEntry, percent: u8) -> Result<u128, VestingError> {
    let unlocked = entry
        .total
        .raw()
        .checked_mul(percent as u128)
        .ok_or(VestingError::Overflow)?
        / 100;
    unlocked
        .checked_sub(entry.claimed.raw())
        .ok_or(VestingError::Overflow)
}
