//! The embedding surface for the tenure accounting engines.
//!
//! [`AccountingService`] owns the token ledger, the role registry, the
//! staking engine, and the two vesting pools, and routes every operation
//! through them with structured logging. A host process constructs one
//! service per deployment from a [`ServiceConfig`] and calls nothing else.

use tenure_access::AccessRegistry;
use tenure_staking::{SchemeId, SchemeTerms, StakeId, StakingEngine, StakingScheme};
use tenure_token::TokenLedger;
use tenure_types::{AccountAddress, LocationId, PublicKey, Signature, Timestamp, TokenAmount};
use tenure_vesting::{CliffTimetable, VestingRow, VestingSchedule};

use crate::{ServiceConfig, ServiceError};

/// Which vesting pool an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingPool {
    /// Early-supporter allocation, releasing from the schedule start.
    PreExchange,
    /// Team and advisor allocation, cliffed twelve months out.
    TeamAndAdvisors,
}

/// One deployment's accounting state behind a single call surface.
///
/// The ledger and registry are supplied by the embedding: production hosts
/// adapt their own token ledger, tests use `InMemoryLedger` and
/// `RoleRegistry`. All three engines share the custody vault named in the
/// configuration.
pub struct AccountingService<L, A> {
    ledger: L,
    registry: A,
    staking: StakingEngine,
    pre_exchange: VestingSchedule,
    team_vesting: VestingSchedule,
}

impl<L: TokenLedger, A: AccessRegistry> AccountingService<L, A> {
    /// Assemble a service from configuration.
    ///
    /// Fails with [`ServiceError::Config`] when the vault addresses or the
    /// trusted signer key in `config` do not parse.
    pub fn new(config: &ServiceConfig, ledger: L, registry: A) -> Result<Self, ServiceError> {
        let vault = config.vault_address()?;
        let penalty_vault = config.penalty_vault_address()?;
        let trusted_signer = config.trusted_signer_key()?;
        let params = config.staking_params();

        let staking = if config.standard_catalogue {
            StakingEngine::with_standard_catalogue(vault.clone(), penalty_vault, trusted_signer, params)
        } else {
            StakingEngine::new(vault.clone(), penalty_vault, trusted_signer, params)
        };

        let pre_exchange = VestingSchedule::new(CliffTimetable::pre_exchange(), vault.clone());
        let team_vesting = VestingSchedule::new(CliffTimetable::team_and_advisors(), vault.clone());

        tracing::info!(
            vault = %vault,
            schemes = staking.all_schemes().len(),
            accrual_unit_secs = config.accrual_unit_secs,
            "accounting service initialised"
        );

        Ok(Self {
            ledger,
            registry,
            staking,
            pre_exchange,
            team_vesting,
        })
    }

    // ── Staking ────────────────────────────────────────────────────────

    /// Admit a stake under `scheme_id` for `caller`.
    ///
    /// `signature` is the trusted signer's admission co-signature over the
    /// caller's current nonce; see `tenure_staking::sign_admission`.
    pub fn stake_tokens(
        &mut self,
        caller: &AccountAddress,
        scheme_id: SchemeId,
        location_id: LocationId,
        domain_name: String,
        signature: &Signature,
        now: Timestamp,
    ) -> Result<StakeId, ServiceError> {
        match self.staking.stake_tokens(
            &mut self.ledger,
            caller,
            scheme_id,
            location_id,
            domain_name,
            signature,
            now,
        ) {
            Ok(stake_id) => {
                tracing::info!(stake_id, scheme_id, staker = %caller, "stake admitted");
                Ok(stake_id)
            }
            Err(e) => {
                tracing::warn!(error = %e, scheme_id, staker = %caller, "stake admission rejected");
                Err(e.into())
            }
        }
    }

    /// Pay out accrued yield on a stake. `None` claims everything unlocked.
    pub fn claim_rewards(
        &mut self,
        caller: &AccountAddress,
        stake_id: StakeId,
        amount: Option<TokenAmount>,
        now: Timestamp,
    ) -> Result<TokenAmount, ServiceError> {
        let paid = self
            .staking
            .claim_rewards(&mut self.ledger, caller, stake_id, amount, now)?;
        tracing::info!(stake_id, paid = %paid, staker = %caller, "stake yield claimed");
        Ok(paid)
    }

    /// Cancel a stake with a penalty, moderator only.
    pub fn cancel_stake(
        &mut self,
        caller: &AccountAddress,
        stake_id: StakeId,
        penalty_percent: u8,
    ) -> Result<TokenAmount, ServiceError> {
        match self.staking.cancel_stake(
            &mut self.ledger,
            &self.registry,
            caller,
            stake_id,
            penalty_percent,
        ) {
            Ok(penalty) => {
                tracing::info!(stake_id, penalty_percent, penalty = %penalty, "stake canceled");
                Ok(penalty)
            }
            Err(e) => {
                tracing::warn!(error = %e, stake_id, "stake cancellation rejected");
                Err(e.into())
            }
        }
    }

    /// Register a new staking scheme, moderator only.
    pub fn add_scheme(
        &mut self,
        caller: &AccountAddress,
        terms: SchemeTerms,
    ) -> Result<SchemeId, ServiceError> {
        let id = self.staking.add_scheme(&self.registry, caller, terms)?;
        tracing::info!(scheme_id = id, "scheme added");
        Ok(id)
    }

    /// Replace the terms of an existing scheme, moderator only.
    ///
    /// Open stakes keep the terms they were admitted under.
    pub fn edit_scheme(
        &mut self,
        caller: &AccountAddress,
        id: SchemeId,
        terms: SchemeTerms,
    ) -> Result<(), ServiceError> {
        self.staking.edit_scheme(&self.registry, caller, id, terms)?;
        tracing::info!(scheme_id = id, "scheme edited");
        Ok(())
    }

    /// Retire a scheme from new admissions, moderator only.
    pub fn remove_scheme(&mut self, caller: &AccountAddress, id: SchemeId) -> Result<(), ServiceError> {
        self.staking.remove_scheme(&self.registry, caller, id)?;
        tracing::info!(scheme_id = id, "scheme removed");
        Ok(())
    }

    /// Rotate the admission co-signer, owner only.
    pub fn set_trusted_signer(
        &mut self,
        caller: &AccountAddress,
        key: PublicKey,
    ) -> Result<(), ServiceError> {
        self.staking.set_trusted_signer(&self.registry, caller, key)?;
        tracing::info!("trusted signer rotated");
        Ok(())
    }

    /// Redirect cancellation penalties, owner only.
    pub fn set_penalty_vault(
        &mut self,
        caller: &AccountAddress,
        account: AccountAddress,
    ) -> Result<(), ServiceError> {
        self.staking
            .set_penalty_vault(&self.registry, caller, account.clone())?;
        tracing::info!(penalty_vault = %account, "penalty vault changed");
        Ok(())
    }

    // ── Vesting ────────────────────────────────────────────────────────

    /// Start a vesting pool's clock, owner only. Each pool starts once.
    pub fn init_vesting(
        &mut self,
        pool: VestingPool,
        caller: &AccountAddress,
        start: Timestamp,
    ) -> Result<(), ServiceError> {
        let schedule = match pool {
            VestingPool::PreExchange => &mut self.pre_exchange,
            VestingPool::TeamAndAdvisors => &mut self.team_vesting,
        };
        schedule.init(&self.registry, caller, start)?;
        tracing::info!(?pool, start_secs = start.as_secs(), "vesting pool initialised");
        Ok(())
    }

    /// Start a pool's clock and bind its sole beneficiary in one step.
    pub fn init_vesting_with_beneficiary(
        &mut self,
        pool: VestingPool,
        caller: &AccountAddress,
        start: Timestamp,
        beneficiary: AccountAddress,
        total: TokenAmount,
    ) -> Result<(), ServiceError> {
        let schedule = match pool {
            VestingPool::PreExchange => &mut self.pre_exchange,
            VestingPool::TeamAndAdvisors => &mut self.team_vesting,
        };
        schedule.init_with_beneficiary(&self.registry, caller, start, beneficiary.clone(), total)?;
        tracing::info!(
            ?pool,
            start_secs = start.as_secs(),
            beneficiary = %beneficiary,
            total = %total,
            "vesting pool initialised",
        );
        Ok(())
    }

    /// Register a beneficiary allocation in a pool.
    ///
    /// Callable by the owner or the pool's trusted worker. Registration is
    /// allowed before the pool is initialised.
    pub fn add_beneficiary(
        &mut self,
        pool: VestingPool,
        caller: &AccountAddress,
        beneficiary: AccountAddress,
        total: TokenAmount,
    ) -> Result<(), ServiceError> {
        let schedule = match pool {
            VestingPool::PreExchange => &mut self.pre_exchange,
            VestingPool::TeamAndAdvisors => &mut self.team_vesting,
        };
        schedule.add_user(&self.registry, caller, beneficiary.clone(), total)?;
        tracing::debug!(?pool, beneficiary = %beneficiary, total = %total, "beneficiary registered");
        Ok(())
    }

    /// Delegate beneficiary registration for a pool to `worker`, owner only.
    pub fn set_trusted_worker(
        &mut self,
        pool: VestingPool,
        caller: &AccountAddress,
        worker: AccountAddress,
    ) -> Result<(), ServiceError> {
        let schedule = match pool {
            VestingPool::PreExchange => &mut self.pre_exchange,
            VestingPool::TeamAndAdvisors => &mut self.team_vesting,
        };
        schedule.set_trusted_worker(&self.registry, caller, worker)?;
        Ok(())
    }

    /// Pay out part of a beneficiary's unlocked allocation.
    pub fn claim_vested(
        &mut self,
        pool: VestingPool,
        caller: &AccountAddress,
        beneficiary: &AccountAddress,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<(), ServiceError> {
        let schedule = match pool {
            VestingPool::PreExchange => &mut self.pre_exchange,
            VestingPool::TeamAndAdvisors => &mut self.team_vesting,
        };
        match schedule.claim_tokens(&mut self.ledger, caller, beneficiary, amount, now) {
            Ok(()) => {
                tracing::info!(?pool, beneficiary = %beneficiary, amount = %amount, "vested tokens claimed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, ?pool, beneficiary = %beneficiary, "vesting claim rejected");
                Err(e.into())
            }
        }
    }

    /// Unlocked and unclaimed amount for a beneficiary right now.
    pub fn vested_claimable(
        &self,
        pool: VestingPool,
        beneficiary: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, ServiceError> {
        Ok(self.vesting(pool).claimable(beneficiary, now)?)
    }

    /// Per-cliff release projection for a beneficiary.
    pub fn vesting_rows(
        &self,
        pool: VestingPool,
        beneficiary: &AccountAddress,
    ) -> Result<Vec<VestingRow>, ServiceError> {
        Ok(self.vesting(pool).individual_scheme(beneficiary)?)
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Live staking schemes in id order.
    pub fn schemes(&self) -> Vec<&StakingScheme> {
        self.staking.all_schemes()
    }

    /// Amount a stake claim would pay out right now.
    pub fn stake_claimable(
        &self,
        stake_id: StakeId,
        now: Timestamp,
    ) -> Result<TokenAmount, ServiceError> {
        Ok(self.staking.claimable(stake_id, now)?)
    }

    pub fn staking(&self) -> &StakingEngine {
        &self.staking
    }

    pub fn vesting(&self, pool: VestingPool) -> &VestingSchedule {
        match pool {
            VestingPool::PreExchange => &self.pre_exchange,
            VestingPool::TeamAndAdvisors => &self.team_vesting,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access for the embedding (funding accounts, approvals).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn registry(&self) -> &A {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenure_access::RoleRegistry;
    use tenure_token::InMemoryLedger;

    fn test_address(n: u8) -> AccountAddress {
        AccountAddress::new(format!("tnr_{:0>40}", n))
    }

    fn test_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.trusted_signer = "00".repeat(32);
        config
    }

    #[test]
    fn service_builds_with_standard_catalogue() {
        let service = AccountingService::new(
            &test_config(),
            InMemoryLedger::new(),
            RoleRegistry::new(),
        )
        .expect("config is valid");

        assert_eq!(service.schemes().len(), 7);
        assert_eq!(service.staking().vault().as_str(), "tnr_custody_vault");
    }

    #[test]
    fn catalogue_can_be_disabled() {
        let mut config = test_config();
        config.standard_catalogue = false;

        let service =
            AccountingService::new(&config, InMemoryLedger::new(), RoleRegistry::new())
                .expect("config is valid");

        assert!(service.schemes().is_empty());
    }

    #[test]
    fn bad_signer_key_fails_construction() {
        let mut config = test_config();
        config.trusted_signer = "zz".repeat(32);

        let result = AccountingService::new(&config, InMemoryLedger::new(), RoleRegistry::new());
        match result {
            Err(ServiceError::Config(msg)) => assert!(msg.contains("hex")),
            other => panic!("expected Config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn pools_are_distinct_schedules() {
        let service = AccountingService::new(
            &test_config(),
            InMemoryLedger::new(),
            RoleRegistry::new(),
        )
        .expect("config is valid");

        let pre = service.vesting(VestingPool::PreExchange);
        let team = service.vesting(VestingPool::TeamAndAdvisors);
        assert_eq!(pre.timetable().cliffs()[0].offset_secs, 0);
        assert_ne!(
            team.timetable().cliffs()[0].offset_secs,
            pre.timetable().cliffs()[0].offset_secs
        );
    }

    #[test]
    fn unauthorized_vesting_init_is_rejected() {
        let mut service = AccountingService::new(
            &test_config(),
            InMemoryLedger::new(),
            RoleRegistry::new(),
        )
        .expect("config is valid");

        let outsider = test_address(9);
        let err = service
            .init_vesting(VestingPool::PreExchange, &outsider, Timestamp::EPOCH)
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Vesting(tenure_vesting::VestingError::Unauthorized(_))
        ));
    }
}
