use serde::{Deserialize, Serialize};

use tenure_types::{AccessTier, LicenseKind, TokenAmount, MONTH_SECS};

use crate::error::StakingError;
use crate::params::StakingParams;

/// Ordinal identifier of a scheme in the catalogue. Assigned once, never
/// reused, stable across removals.
pub type SchemeId = u64;

/// The economic terms of a staking scheme.
///
/// Admission snapshots these into the stake, so later catalogue edits never
/// change what an open stake accrues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeTerms {
    /// What the stake licenses the holder to operate.
    pub license_kind: LicenseKind,
    /// Minimum access tier the trusted signer admits for this scheme.
    pub required_tier: AccessTier,
    /// Lock duration in seconds.
    pub duration_secs: u64,
    /// Principal the staker must deposit.
    pub required_stake: TokenAmount,
    /// Total yield over the full duration, as a percent of the principal.
    pub yield_rate_percent: u8,
}

impl SchemeTerms {
    /// Validate terms against engine parameters before they enter the
    /// catalogue.
    pub fn validate(&self, params: &StakingParams) -> Result<(), StakingError> {
        if self.duration_secs == 0 {
            return Err(StakingError::InvalidTerms(
                "duration must be non-zero".to_string(),
            ));
        }
        if self.required_stake.is_zero() {
            return Err(StakingError::InvalidTerms(
                "required stake must be non-zero".to_string(),
            ));
        }
        if self.yield_rate_percent > params.max_yield_rate_percent {
            return Err(StakingError::InvalidTerms(format!(
                "yield rate {}% above the {}% ceiling",
                self.yield_rate_percent, params.max_yield_rate_percent
            )));
        }
        Ok(())
    }
}

/// A catalogue entry: terms plus the id they were registered under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingScheme {
    pub id: SchemeId,
    pub terms: SchemeTerms,
}

/// The scheme catalogue.
///
/// Ids are slot positions. Removal tombstones the slot instead of shifting
/// later entries, so every id stays valid for the lifetime of the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SchemeRegistry {
    slots: Vec<Option<StakingScheme>>,
}

impl SchemeRegistry {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// The seven-scheme catalogue deployments start from.
    pub fn standard_catalogue() -> Self {
        let mut registry = Self::new();
        let entries = [
            (LicenseKind::Location, AccessTier::Special, 6, 1_000, 25),
            (LicenseKind::Location, AccessTier::Standard, 12, 500, 15),
            (LicenseKind::Location, AccessTier::Standard, 6, 250, 10),
            (LicenseKind::Domain, AccessTier::Standard, 12, 750, 18),
            (LicenseKind::Domain, AccessTier::Special, 24, 2_000, 30),
            (LicenseKind::Combined, AccessTier::Special, 12, 1_500, 20),
            (LicenseKind::Combined, AccessTier::Ambassador, 24, 5_000, 35),
        ];
        for (license_kind, required_tier, months, tokens, yield_rate_percent) in entries {
            registry.add(SchemeTerms {
                license_kind,
                required_tier,
                duration_secs: months * MONTH_SECS,
                required_stake: TokenAmount::from_tokens(tokens),
                yield_rate_percent,
            });
        }
        registry
    }

    /// Register new terms and return the id they were assigned.
    pub fn add(&mut self, terms: SchemeTerms) -> SchemeId {
        let id = self.slots.len() as SchemeId;
        self.slots.push(Some(StakingScheme { id, terms }));
        id
    }

    /// Replace the terms of a live scheme. Returns false if the slot is
    /// empty or was removed.
    pub fn edit(&mut self, id: SchemeId, terms: SchemeTerms) -> bool {
        match self.slots.get_mut(id as usize) {
            Some(Some(scheme)) => {
                scheme.terms = terms;
                true
            }
            _ => false,
        }
    }

    /// Tombstone a scheme. Its id is never reassigned. Returns false if
    /// there was no live scheme under the id.
    pub fn remove(&mut self, id: SchemeId) -> bool {
        match self.slots.get_mut(id as usize) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: SchemeId) -> Option<&StakingScheme> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    /// All live schemes in id order. Tombstoned slots are skipped.
    pub fn iter_live(&self) -> impl Iterator<Item = &StakingScheme> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Number of live schemes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
