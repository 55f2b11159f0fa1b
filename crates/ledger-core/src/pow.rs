//! Proof-of-work predicates over hex digests.

/// Number of leading `'0'` hex digits in `hash`.
pub fn leading_zero_digits(hash: &str) -> usize {
    hash.bytes().take_while(|b| *b == b'0').count()
}

/// True when `hash` starts with at least `difficulty` zero digits.
/// Difficulty 0 is always met.
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    leading_zero_digits(hash) >= difficulty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zero_digit_examples() {
        assert_eq!(leading_zero_digits(""), 0);
        assert_eq!(leading_zero_digits("abc"), 0);
        assert_eq!(leading_zero_digits("0abc"), 1);
        assert_eq!(leading_zero_digits("000f0"), 3);
        assert_eq!(leading_zero_digits(&"0".repeat(64)), 64);
    }

    #[test]
    fn difficulty_zero_always_met() {
        assert!(meets_difficulty("ffff", 0));
        assert!(meets_difficulty("", 0));
    }

    #[test]
    fn difficulty_is_a_lower_bound() {
        let hash = "00089e3d80fb211527135807db779c790ce15dd5e7f562b9ea576b5c77f30143";
        assert!(meets_difficulty(hash, 2));
        assert!(meets_difficulty(hash, 3));
        assert!(!meets_difficulty(hash, 4));
    }

    #[test]
    fn difficulty_beyond_hash_length_is_never_met() {
        let hash = "0".repeat(64);
        assert!(meets_difficulty(&hash, 64));
        assert!(!meets_difficulty(&hash, 65));
    }
}
