// crates/instana-core/src/id.rs
// ============================================================================
// Module: Random Identifiers
// Description: Locally generated record identifiers.
// Purpose: Assign ids to resources whose backend expects the caller to pick.
// Dependencies: rand
// ============================================================================

use rand::Rng;

/// Alphabet of generated ids (lowercase base32hex, as used by xid).
const ID_ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";
/// Length of generated ids.
pub const ID_LENGTH: usize = 20;

/// Returns a fresh 20 character identifier.
#[must_use]
pub fn random_id() -> String {
    let mut rng = rand::thread_rng();
    (0 .. ID_LENGTH)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0 .. ID_ALPHABET.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::ID_LENGTH;
    use super::random_id;

    #[test]
    fn ids_are_lowercase_base32() {
        let id = random_id();
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_digit() || ('a' ..= 'v').contains(&c)));
        assert_ne!(id, random_id());
    }
}
