//! Admission digests and the trusted-signer co-signature.
//!
//! A stake only opens if the caller presents a signature from the engine's
//! trusted signer over the exact admission request, nonce included. The
//! signer attests off-engine facts (access tier, location vetting) that the
//! engine itself does not model.

use tenure_crypto::{blake2b_256_multi, sign_message, verify_signature};
use tenure_types::{AccountAddress, LocationId, PrivateKey, PublicKey, Signature};

use crate::scheme::SchemeId;

/// Domain separation tag. Keeps admission signatures from being replayed
/// as any other message type.
pub const ADMISSION_TAG: &[u8] = b"tenure.stake.admission.v1";

/// Digest of one admission request.
///
/// `engine_id` is the engine's vault address, which ties the signature to a
/// single deployment. Variable-width fields carry a length prefix so
/// adjacent fields cannot be confused.
pub fn admission_digest(
    engine_id: &AccountAddress,
    staker: &AccountAddress,
    scheme_id: SchemeId,
    location_id: &LocationId,
    domain_name: &str,
    nonce: u64,
) -> [u8; 32] {
    let engine_bytes = engine_id.as_str().as_bytes();
    let engine_len = (engine_bytes.len() as u32).to_be_bytes();
    let staker_bytes = staker.as_str().as_bytes();
    let staker_len = (staker_bytes.len() as u32).to_be_bytes();
    let scheme_bytes = scheme_id.to_be_bytes();
    let domain_bytes = domain_name.as_bytes();
    let domain_len = (domain_bytes.len() as u32).to_be_bytes();
    let nonce_bytes = nonce.to_be_bytes();

    blake2b_256_multi(&[
        ADMISSION_TAG,
        &engine_len,
        engine_bytes,
        &staker_len,
        staker_bytes,
        &scheme_bytes,
        location_id.as_bytes(),
        &domain_len,
        domain_bytes,
        &nonce_bytes,
    ])
}

/// Sign an admission request. Used by the trusted signer service and tests.
#[allow(clippy::too_many_arguments)]
pub fn sign_admission(
    signer: &PrivateKey,
    engine_id: &AccountAddress,
    staker: &AccountAddress,
    scheme_id: SchemeId,
    location_id: &LocationId,
    domain_name: &str,
    nonce: u64,
) -> Signature {
    let digest = admission_digest(engine_id, staker, scheme_id, location_id, domain_name, nonce);
    sign_message(&digest, signer)
}

/// Check an admission signature against the trusted signer's key.
#[allow(clippy::too_many_arguments)]
pub fn verify_admission(
    trusted_signer: &PublicKey,
    signature: &Signature,
    engine_id: &AccountAddress,
    staker: &AccountAddress,
    scheme_id: SchemeId,
    location_id: &LocationId,
    domain_name: &str,
    nonce: u64,
) -> bool {
    let digest = admission_digest(engine_id, staker, scheme_id, location_id, domain_name, nonce);
    verify_signature(&digest, signature, trusted_signer)
}
