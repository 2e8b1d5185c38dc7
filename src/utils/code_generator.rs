//! Short code generation.
//!
//! Codes are 6 characters drawn uniformly and independently from the 62-character
//! alphabet `[A-Za-z0-9]`, giving 62^6 (about 5.6 × 10^10) possible codes.
//! Codes starting with [`RESERVED_PREFIX`] are never issued, since that path
//! prefix belongs to the JSON API.

use rand::Rng;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Characters a short code may contain.
pub const CODE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Path prefix owned by the JSON API.
pub const RESERVED_PREFIX: &str = "api";

/// Generates a random short code using the thread-local RNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Generates a short code from the given RNG, redrawing reserved candidates.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    loop {
        let code: String = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();

        if !is_reserved_code(&code) {
            return code;
        }
    }
}

/// Returns true if `code` can never be served as a redirect.
///
/// Covers the API prefix and anything containing `.` (asset requests such as
/// `favicon.ico`).
pub fn is_reserved_code(code: &str) -> bool {
    code.contains('.') || code.starts_with(RESERVED_PREFIX)
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..1000 {
            let code = generate_code();
            assert!(
                code.chars().all(|c| c.is_ascii_alphanumeric()),
                "unexpected character in {code}"
            );
            assert!(is_well_formed(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_whole_alphabet() {
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<char> = (0..2000)
            .flat_map(|_| generate_code_with(&mut rng).chars().collect::<Vec<_>>())
            .collect();

        assert_eq!(seen.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let a = generate_code_with(&mut StdRng::seed_from_u64(42));
        let b = generate_code_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_codes_are_never_reserved() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            assert!(!is_reserved_code(&generate_code_with(&mut rng)));
        }
    }

    #[test]
    fn test_is_reserved_code() {
        assert!(is_reserved_code("apiXYZ"));
        assert!(is_reserved_code("api"));
        assert!(is_reserved_code("ab.cde"));
        assert!(!is_reserved_code("Api123"));
        assert!(!is_reserved_code("aB3xY9"));
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("aB3xY9"));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("abc-12"));
        assert!(!is_well_formed("abcdefg"));
        assert!(!is_well_formed(""));
    }
}
