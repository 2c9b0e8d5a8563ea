use serde::{Deserialize, Serialize};

use tenure_types::{AccountAddress, LocationId, Timestamp, TokenAmount};

use crate::scheme::{SchemeId, SchemeTerms};

/// Identifier of an individual stake. Assigned sequentially from 1.
pub type StakeId = u64;

/// An admitted stake and the terms it accrues under.
///
/// Terms are snapshotted at admission. Catalogue edits and removals after
/// that point do not touch open stakes. Stakes are never deleted; canceled
/// ones stay queryable with `canceled` set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    pub id: StakeId,
    pub owner: AccountAddress,
    pub scheme_id: SchemeId,
    /// Terms captured at admission.
    pub terms: SchemeTerms,
    pub opened_at: Timestamp,
    /// Opaque 32-byte identifier of the licensed location.
    pub location_id: LocationId,
    /// Domain label the stake licenses, empty for location-only schemes.
    pub domain_name: String,
    /// Cumulative amount paid out, yield and principal together. Only grows.
    pub claimed: TokenAmount,
    pub canceled: bool,
    /// Percent applied when the stake was canceled, unset while open.
    pub penalty_percent: Option<u8>,
}

impl Stake {
    /// Total yield the stake earns over its full duration, before the
    /// per-unit floor division.
    pub fn total_yield(&self) -> Option<u128> {
        self.terms
            .required_stake
            .raw()
            .checked_mul(self.terms.yield_rate_percent as u128)
            .map(|value| value / 100)
    }

    /// Principal plus full yield. Everything the stake pays out if held to
    /// maturity.
    pub fn entitlement(&self) -> Option<u128> {
        self.terms.required_stake.raw().checked_add(self.total_yield()?)
    }

    /// Amount released up to `now`.
    ///
    /// Each full accrual unit elapsed releases one yield slice of
    /// `total_yield / units`. Once the full duration has elapsed the whole
    /// entitlement is released, which returns the principal and absorbs any
    /// dust the floor division left behind.
    pub fn unlocked_at(&self, unit_secs: u64, now: Timestamp) -> Option<u128> {
        let unit_secs = unit_secs.max(1);
        let elapsed = self
            .opened_at
            .elapsed_since(now)
            .min(self.terms.duration_secs);
        if elapsed >= self.terms.duration_secs {
            return self.entitlement();
        }
        let units = (self.terms.duration_secs / unit_secs).max(1) as u128;
        let yield_per_unit = self.total_yield()? / units;
        let elapsed_units = (elapsed / unit_secs) as u128;
        elapsed_units.checked_mul(yield_per_unit)
    }

    /// Unlocked amount not yet claimed. Zero for canceled stakes, whose
    /// accrual is frozen.
    pub fn claimable_at(&self, unit_secs: u64, now: Timestamp) -> Option<u128> {
        if self.canceled {
            return Some(0);
        }
        self.unlocked_at(unit_secs, now)?.checked_sub(self.claimed.raw())
    }

    /// Entitlement not yet paid out. Cancellation penalties on the
    /// `RemainingEntitlement` basis are computed on this.
    pub fn remaining_entitlement(&self) -> Option<u128> {
        self.entitlement()?.checked_sub(self.claimed.raw())
    }

    /// Principal not yet returned. Yield releases before principal, so the
    /// principal is only drawn down by claims past the total yield.
    pub fn remaining_principal(&self) -> Option<u128> {
        let principal_drawn = self.claimed.raw().saturating_sub(self.total_yield()?);
        self.terms.required_stake.raw().checked_sub(principal_drawn)
    }
}
