use rand::Rng;

/// Two-letter carrier code every booking reference starts with
pub const CARRIER_CODE: &str = "OH";

const REFERENCE_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Human-facing booking code such as `OH4K9Z0QW1B`.
/// Display only: uniqueness is probabilistic and never relied upon.
pub fn booking_reference() -> String {
    booking_reference_with(&mut rand::thread_rng())
}

pub fn booking_reference_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut reference = String::with_capacity(CARRIER_CODE.len() + REFERENCE_LEN);
    reference.push_str(CARRIER_CODE);
    for _ in 0..REFERENCE_LEN {
        let idx = rng.gen_range(0..ALPHABET.len());
        reference.push(ALPHABET[idx] as char);
    }
    reference
}

pub fn is_booking_reference(value: &str) -> bool {
    value.len() == CARRIER_CODE.len() + REFERENCE_LEN
        && value.starts_with(CARRIER_CODE)
        && value[CARRIER_CODE.len()..]
            .bytes()
            .all(|b| ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reference_format() {
        for _ in 0..100 {
            let reference = booking_reference();
            assert!(is_booking_reference(&reference), "bad reference {}", reference);
        }
    }

    #[test]
    fn test_seeded_generation_is_stable() {
        let a = booking_reference_with(&mut StdRng::seed_from_u64(7));
        let b = booking_reference_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_booking_reference("OH123"));
        assert!(!is_booking_reference("XX123456789"));
        assert!(!is_booking_reference("OH12345678a"));
    }
}
