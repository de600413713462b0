/// Radix of the polynomial hash: one digit per byte value.
pub const BASE: u64 = 256;

/// Small prime; collisions are frequent but always verified.
pub const DEFAULT_MODULUS: u64 = 101;

/// Largest modulus for which `hash * BASE + 255` cannot overflow a `u64`.
pub const MAX_MODULUS: u64 = 1 << 55;

/// Rabin-Karp with a rolling hash modulo `modulus`.
///
/// Every hash hit is confirmed with a slice comparison, so the modulus only
/// trades speed for collision rate. Values outside `2..=MAX_MODULUS` are
/// clamped into that range.
pub fn rabin_karp(text: &[u8], pattern: &[u8], modulus: u64) -> Option<usize> {
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n == 0 || m > n {
        return None;
    }
    let q = modulus.clamp(2, MAX_MODULUS);

    // BASE^(m-1) mod q: weight of the byte leaving the window
    let mut high = 1u64;
    for _ in 1..m {
        high = high * BASE % q;
    }

    let mut pattern_hash = 0u64;
    let mut window_hash = 0u64;
    for (&p, &t) in pattern.iter().zip(&text[..m]) {
        pattern_hash = (pattern_hash * BASE + u64::from(p)) % q;
        window_hash = (window_hash * BASE + u64::from(t)) % q;
    }

    for i in 0..=n - m {
        if pattern_hash == window_hash && text[i..i + m] == *pattern {
            return Some(i);
        }
        if i < n - m {
            let outgoing = u64::from(text[i]) * high % q;
            // add q before subtracting so the value stays non-negative
            window_hash = (window_hash + q - outgoing) % q;
            window_hash = (window_hash * BASE + u64::from(text[i + m])) % q;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_occurrence() {
        assert_eq!(
            rabin_karp(b"ABABDABACDABABCABAB", b"ABABCABAB", DEFAULT_MODULUS),
            Some(10)
        );
        assert_eq!(rabin_karp(b"AAAAAA", b"AAA", DEFAULT_MODULUS), Some(0));
        assert_eq!(rabin_karp(b"hello world", b"world", DEFAULT_MODULUS), Some(6));
    }

    #[test]
    fn last_window_is_checked() {
        assert_eq!(rabin_karp(b"abcdef", b"def", DEFAULT_MODULUS), Some(3));
        assert_eq!(rabin_karp(b"abcdef", b"f", DEFAULT_MODULUS), Some(5));
    }

    #[test]
    fn collisions_are_verified() {
        // Modulus 2 makes half of all windows collide with the pattern hash.
        let text = b"abababababababababxy";
        assert_eq!(rabin_karp(text, b"xy", 2), Some(18));
        assert_eq!(rabin_karp(text, b"yx", 2), None);
    }

    #[test]
    fn modulus_is_clamped() {
        assert_eq!(rabin_karp(b"needle in haystack", b"hay", 0), Some(10));
        assert_eq!(rabin_karp(b"needle in haystack", b"hay", 1), Some(10));
        assert_eq!(rabin_karp(b"needle in haystack", b"hay", u64::MAX), Some(10));
    }

    #[test]
    fn large_prime_modulus() {
        let q = 1_000_000_007;
        assert_eq!(rabin_karp(b"the quick brown fox", b"brown", q), Some(10));
        assert_eq!(rabin_karp(b"the quick brown fox", b"browne", q), None);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(rabin_karp(b"abc", b"", DEFAULT_MODULUS), None);
        assert_eq!(rabin_karp(b"", b"a", DEFAULT_MODULUS), None);
        assert_eq!(rabin_karp(b"ab", b"abc", DEFAULT_MODULUS), None);
        assert_eq!(rabin_karp(b"abc", b"abc", DEFAULT_MODULUS), Some(0));
    }
}
