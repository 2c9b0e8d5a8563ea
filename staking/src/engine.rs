//! The staking engine.
//!
//! Owns the scheme catalogue, every stake ever admitted, and the per-account
//! admission nonces. Token custody lives in an external ledger; the engine
//! moves funds through its vault account and never holds balances itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use tenure_access::{require_role, AccessRegistry};
use tenure_token::TokenLedger;
use tenure_types::{
    AccountAddress, LocationId, PublicKey, Role, Signature, Timestamp, TokenAmount,
};

use crate::admission::verify_admission;
use crate::error::StakingError;
use crate::params::{PenaltyBasis, StakingParams};
use crate::scheme::{SchemeId, SchemeRegistry, SchemeTerms, StakingScheme};
use crate::stake::{Stake, StakeId};

/// Staking state machine. All methods are synchronous and deterministic;
/// callers supply the clock, the ledger, and the role registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingEngine {
    params: StakingParams,
    /// Custody account for principal and yield reserves. Doubles as the
    /// engine's identity inside admission digests.
    vault: AccountAddress,
    /// Destination for cancellation penalties.
    penalty_vault: AccountAddress,
    /// Key whose co-signature admits stakes.
    trusted_signer: PublicKey,
    schemes: SchemeRegistry,
    /// Next id to assign. Starts at 1 so 0 never names a stake.
    next_stake_id: StakeId,
    stakes: HashMap<StakeId, Stake>,
    /// Stake ids per owner in admission order.
    stakes_by_owner: HashMap<AccountAddress, Vec<StakeId>>,
    /// Admission nonces. Missing entry means 0.
    nonces: HashMap<AccountAddress, u64>,
}

impl StakingEngine {
    /// An engine with an empty catalogue.
    pub fn new(
        vault: AccountAddress,
        penalty_vault: AccountAddress,
        trusted_signer: PublicKey,
        params: StakingParams,
    ) -> Self {
        Self {
            params,
            vault,
            penalty_vault,
            trusted_signer,
            schemes: SchemeRegistry::new(),
            next_stake_id: 1,
            stakes: HashMap::new(),
            stakes_by_owner: HashMap::new(),
            nonces: HashMap::new(),
        }
    }

    /// An engine preloaded with the standard seven-scheme catalogue.
    pub fn with_standard_catalogue(
        vault: AccountAddress,
        penalty_vault: AccountAddress,
        trusted_signer: PublicKey,
        params: StakingParams,
    ) -> Self {
        let mut engine = Self::new(vault, penalty_vault, trusted_signer, params);
        engine.schemes = SchemeRegistry::standard_catalogue();
        engine
    }

    // ── Catalogue administration ──

    /// Register a new scheme. Moderator-gated.
    pub fn add_scheme(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        terms: SchemeTerms,
    ) -> Result<SchemeId, StakingError> {
        require_role(registry, Role::Moderator, caller)?;
        terms.validate(&self.params)?;
        Ok(self.schemes.add(terms))
    }

    /// Replace the terms of a live scheme. Open stakes keep their snapshot.
    pub fn edit_scheme(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        id: SchemeId,
        terms: SchemeTerms,
    ) -> Result<(), StakingError> {
        require_role(registry, Role::Moderator, caller)?;
        terms.validate(&self.params)?;
        if !self.schemes.edit(id, terms) {
            return Err(StakingError::SchemeNotFound(id));
        }
        Ok(())
    }

    /// Tombstone a scheme. Its id stays reserved and open stakes under it
    /// continue to accrue.
    pub fn remove_scheme(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        id: SchemeId,
    ) -> Result<(), StakingError> {
        require_role(registry, Role::Moderator, caller)?;
        if !self.schemes.remove(id) {
            return Err(StakingError::SchemeNotFound(id));
        }
        Ok(())
    }

    // ── Engine configuration ──

    /// Rotate the trusted signer. Owner-gated. Signatures from the old key
    /// stop verifying immediately.
    pub fn set_trusted_signer(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        key: PublicKey,
    ) -> Result<(), StakingError> {
        require_role(registry, Role::Owner, caller)?;
        self.trusted_signer = key;
        Ok(())
    }

    /// Redirect future cancellation penalties. Owner-gated.
    pub fn set_penalty_vault(
        &mut self,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        account: AccountAddress,
    ) -> Result<(), StakingError> {
        require_role(registry, Role::Owner, caller)?;
        self.penalty_vault = account;
        Ok(())
    }

    // ── Stake lifecycle ──

    /// Admit a stake.
    ///
    /// The caller must present a co-signature from the trusted signer over
    /// this exact request and the caller's current nonce. On success the
    /// principal moves into the vault, the nonce advances, and the scheme
    /// terms are snapshotted into the new stake.
    pub fn stake_tokens(
        &mut self,
        ledger: &mut dyn TokenLedger,
        caller: &AccountAddress,
        scheme_id: SchemeId,
        location_id: LocationId,
        domain_name: String,
        signature: &Signature,
        now: Timestamp,
    ) -> Result<StakeId, StakingError> {
        let scheme = self
            .schemes
            .get(scheme_id)
            .ok_or(StakingError::SchemeNotFound(scheme_id))?;
        let terms = scheme.terms.clone();

        let nonce = self.nonce(caller);
        if !verify_admission(
            &self.trusted_signer,
            signature,
            &self.vault,
            caller,
            scheme_id,
            &location_id,
            &domain_name,
            nonce,
        ) {
            return Err(StakingError::InvalidSignature);
        }

        let stake_id = self.next_stake_id;
        let next_id = stake_id.checked_add(1).ok_or(StakingError::Overflow)?;
        let next_nonce = nonce.checked_add(1).ok_or(StakingError::Overflow)?;

        // A failed pull leaves the nonce untouched, so the same
        // co-signature stays valid for a retry.
        ledger.transfer_from(&self.vault, caller, &self.vault, terms.required_stake)?;
        self.nonces.insert(caller.clone(), next_nonce);

        self.next_stake_id = next_id;
        self.stakes.insert(
            stake_id,
            Stake {
                id: stake_id,
                owner: caller.clone(),
                scheme_id,
                terms,
                opened_at: now,
                location_id,
                domain_name,
                claimed: TokenAmount::ZERO,
                canceled: false,
                penalty_percent: None,
            },
        );
        self.stakes_by_owner
            .entry(caller.clone())
            .or_default()
            .push(stake_id);
        Ok(stake_id)
    }

    /// Pay out accrued yield, and at maturity the principal.
    ///
    /// `amount` of `None` claims everything currently claimable. An explicit
    /// amount must satisfy `0 < amount <= claimable`. Returns the amount
    /// paid.
    pub fn claim_rewards(
        &mut self,
        ledger: &mut dyn TokenLedger,
        caller: &AccountAddress,
        stake_id: StakeId,
        amount: Option<TokenAmount>,
        now: Timestamp,
    ) -> Result<TokenAmount, StakingError> {
        let unit_secs = self.params.accrual_unit_secs;
        let vault = self.vault.clone();
        let stake = self
            .stakes
            .get_mut(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        if stake.owner != *caller {
            return Err(StakingError::NotOwner {
                stake: stake_id,
                expected: stake.owner.clone(),
                actual: caller.clone(),
            });
        }
        if stake.canceled {
            return Err(StakingError::AlreadyCanceled(stake_id));
        }
        let claimable = stake
            .claimable_at(unit_secs, now)
            .ok_or(StakingError::Overflow)?;
        if claimable == 0 {
            return Err(StakingError::NothingToClaim(stake_id));
        }
        let payout = match amount {
            Some(requested) => {
                if requested.is_zero() || requested.raw() > claimable {
                    return Err(StakingError::ExceedsClaimable {
                        requested: requested.raw(),
                        claimable,
                    });
                }
                requested
            }
            None => TokenAmount::new(claimable),
        };

        ledger.transfer(&vault, &stake.owner, payout)?;
        stake.claimed = stake
            .claimed
            .checked_add(payout)
            .ok_or(StakingError::Overflow)?;
        Ok(payout)
    }

    /// Cancel a stake. Moderator-gated.
    ///
    /// Marks the stake canceled, freezing claims permanently, and routes
    /// `penalty_percent` of the configured basis from the vault to the
    /// penalty vault. Returns the penalty amount moved.
    pub fn cancel_stake(
        &mut self,
        ledger: &mut dyn TokenLedger,
        registry: &dyn AccessRegistry,
        caller: &AccountAddress,
        stake_id: StakeId,
        penalty_percent: u8,
    ) -> Result<TokenAmount, StakingError> {
        require_role(registry, Role::Moderator, caller)?;
        if penalty_percent > 100 {
            return Err(StakingError::InvalidTerms(format!(
                "penalty percent {penalty_percent} above 100"
            )));
        }

        let basis_kind = self.params.penalty_basis;
        let vault = self.vault.clone();
        let penalty_vault = self.penalty_vault.clone();
        let stake = self
            .stakes
            .get_mut(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        if stake.canceled {
            return Err(StakingError::AlreadyCanceled(stake_id));
        }

        let basis = match basis_kind {
            PenaltyBasis::RemainingEntitlement => stake.remaining_entitlement(),
            PenaltyBasis::RemainingPrincipal => stake.remaining_principal(),
        }
        .ok_or(StakingError::Overflow)?;
        let penalty = basis
            .checked_mul(penalty_percent as u128)
            .ok_or(StakingError::Overflow)?
            / 100;

        if penalty > 0 {
            ledger.transfer(&vault, &penalty_vault, TokenAmount::new(penalty))?;
        }
        stake.canceled = true;
        stake.penalty_percent = Some(penalty_percent);
        Ok(TokenAmount::new(penalty))
    }

    // ── Queries ──

    pub fn stake(&self, id: StakeId) -> Option<&Stake> {
        self.stakes.get(&id)
    }

    /// Ids of every stake an account ever opened, in admission order.
    /// Canceled stakes are included.
    pub fn user_stakes(&self, account: &AccountAddress) -> &[StakeId] {
        self.stakes_by_owner
            .get(account)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Current admission nonce for an account. Accounts start at 0.
    pub fn nonce(&self, account: &AccountAddress) -> u64 {
        self.nonces.get(account).copied().unwrap_or(0)
    }

    pub fn scheme(&self, id: SchemeId) -> Option<&StakingScheme> {
        self.schemes.get(id)
    }

    /// Live schemes in id order. Tombstoned entries are omitted.
    pub fn all_schemes(&self) -> Vec<&StakingScheme> {
        self.schemes.iter_live().collect()
    }

    /// Amount a claim would pay out right now. Zero for canceled stakes.
    pub fn claimable(&self, stake_id: StakeId, now: Timestamp) -> Result<TokenAmount, StakingError> {
        let stake = self
            .stakes
            .get(&stake_id)
            .ok_or(StakingError::StakeNotFound(stake_id))?;
        let claimable = stake
            .claimable_at(self.params.accrual_unit_secs, now)
            .ok_or(StakingError::Overflow)?;
        Ok(TokenAmount::new(claimable))
    }

    pub fn vault(&self) -> &AccountAddress {
        &self.vault
    }

    pub fn penalty_vault(&self) -> &AccountAddress {
        &self.penalty_vault
    }

    pub fn trusted_signer(&self) -> &PublicKey {
        &self.trusted_signer
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    // ── Snapshots ──

    /// Serialize the full engine state.
    pub fn snapshot(&self) -> Result<Vec<u8>, StakingError> {
        bincode::serialize(self).map_err(|e| StakingError::Snapshot(e.to_string()))
    }

    /// Rebuild an engine from `snapshot` output.
    pub fn restore(data: &[u8]) -> Result<Self, StakingError> {
        bincode::deserialize(data).map_err(|e| StakingError::Snapshot(e.to_string()))
    }
}
