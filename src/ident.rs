//! Identifier encoding shared by the API boundary and the storage layer.
//!
//! Identities travel as canonical UUID text and are stored packed into 16
//! bytes with the timestamp fields swapped to the front (time_hi | time_mid |
//! time_low | rest). For time-based UUIDs this keeps binary-sorted storage in
//! roughly creation order. The layout matches MySQL's `UUID_TO_BIN(x, 1)`, so
//! packed identifiers remain portable across the platform's datastores.

use uuid::Uuid;

use crate::authz::AuthzError;

/// Pack a UUID into its 16-byte storage form.
pub fn uuid_to_bin(uuid: &Uuid) -> [u8; 16] {
    let b = uuid.as_bytes();
    let mut out = [0u8; 16];
    out[..2].copy_from_slice(&b[6..8]);
    out[2..4].copy_from_slice(&b[4..6]);
    out[4..8].copy_from_slice(&b[..4]);
    out[8..].copy_from_slice(&b[8..]);
    out
}

/// Unpack a stored identifier back into a UUID.
///
/// Anything other than exactly 16 bytes is a malformed identifier.
pub fn bin_to_uuid(bin: &[u8]) -> Result<Uuid, AuthzError> {
    let bin: &[u8; 16] = bin
        .try_into()
        .map_err(|_| AuthzError::InvalidIdentifier(format!("{} byte identifier", bin.len())))?;
    let mut b = [0u8; 16];
    b[..4].copy_from_slice(&bin[4..8]);
    b[4..6].copy_from_slice(&bin[2..4]);
    b[6..8].copy_from_slice(&bin[..2]);
    b[8..].copy_from_slice(&bin[8..]);
    Ok(Uuid::from_bytes(b))
}

/// Parse canonical UUID text received at the API boundary.
pub fn parse_uuid(text: &str) -> Result<Uuid, AuthzError> {
    Uuid::try_parse(text).map_err(|_| AuthzError::InvalidIdentifier(text.to_string()))
}
