//! Property-based tests for token generation and verification.

use onetime::verify::{get_delta, get_token, verify};
use onetime::{totp, Algorithm, Digits, Encoding, OtpError, Secret, TotpOptions};
use proptest::prelude::*;

fn digits_strategy() -> impl Strategy<Value = Digits> {
    prop_oneof![Just(Digits::SIX), Just(Digits::SEVEN), Just(Digits::EIGHT)]
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::Sha1),
        Just(Algorithm::Sha256),
        Just(Algorithm::Sha384),
        Just(Algorithm::Sha512),
    ]
}

fn encoding_strategy() -> impl Strategy<Value = Encoding> {
    prop_oneof![
        Just(Encoding::Hex),
        Just(Encoding::Base64Url),
        Just(Encoding::Base32),
    ]
}

fn secret_strategy() -> impl Strategy<Value = Secret> {
    (proptest::collection::vec(any::<u8>(), 1..64), algorithm_strategy())
        .prop_map(|(bytes, algorithm)| Secret::from_bytes(&bytes).with_algorithm(algorithm))
}

proptest! {
    #[test]
    fn token_has_exactly_digits_decimal_characters(
        secret in secret_strategy(),
        counter in any::<u64>(),
        digits in digits_strategy(),
    ) {
        let token = get_token(&secret, digits, counter).unwrap();
        prop_assert_eq!(token.len(), digits.value() as usize);
        prop_assert!(token.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn token_generation_is_deterministic(
        secret in secret_strategy(),
        counter in any::<u64>(),
        digits in digits_strategy(),
    ) {
        prop_assert_eq!(
            get_token(&secret, digits, counter).unwrap(),
            get_token(&secret, digits, counter).unwrap()
        );
    }

    #[test]
    fn codec_round_trips(
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
        encoding in encoding_strategy(),
    ) {
        let text = encoding.encode(&bytes).unwrap();
        prop_assert_eq!(encoding.decode(&text).unwrap(), bytes);
    }

    #[test]
    fn ascii_codec_round_trips(text in "[ -~]{0,40}") {
        let bytes = Encoding::Ascii.decode(&text).unwrap();
        prop_assert_eq!(Encoding::Ascii.encode(&bytes).unwrap(), text);
    }

    #[test]
    fn all_encodings_agree(bytes in proptest::collection::vec(any::<u8>(), 1..64)) {
        let secrets = Secret::from_bytes(&bytes).to_all_encodings().unwrap();
        prop_assert_eq!(Secret::hex(secrets.hex).decode().unwrap(), bytes.clone());
        prop_assert_eq!(Secret::base32(secrets.base32).decode().unwrap(), bytes.clone());
        prop_assert_eq!(Secret::base64url(secrets.base64url).decode().unwrap(), bytes.clone());
        if let Some(ascii) = secrets.ascii {
            prop_assert_eq!(Secret::ascii(ascii).decode().unwrap(), bytes);
        }
    }

    #[test]
    fn exact_counter_has_zero_delta(
        secret in secret_strategy(),
        counter in any::<u64>(),
        two_sided in any::<bool>(),
    ) {
        let token = get_token(&secret, Digits::SIX, counter).unwrap();
        prop_assert_eq!(
            get_delta(&secret, Digits::SIX, &token, counter, 0, two_sided).unwrap(),
            Some(0)
        );
    }

    #[test]
    fn one_sided_window_finds_forward_drift(
        counter in 0u64..1_000_000,
        window in 0u64..8,
        k in 0u64..12,
    ) {
        let secret = Secret::ascii("12345678901234567890");
        let token = get_token(&secret, Digits::EIGHT, counter + k).unwrap();
        let delta = get_delta(&secret, Digits::EIGHT, &token, counter, window, false).unwrap();
        if k <= window {
            // an earlier counter in the window may collide on the token
            prop_assert!(delta.is_some_and(|d| d <= k as i64));
        } else {
            // the token must have come from inside the window, if anywhere
            prop_assert!(delta.map_or(true, |d| (0..=window as i64).contains(&d)));
        }
    }

    #[test]
    fn two_sided_window_finds_lagging_tokens(
        counter in 16u64..1_000_000,
        window in 0u64..8,
        k in 0u64..8,
    ) {
        prop_assume!(k <= window);
        let secret = Secret::ascii("12345678901234567890");
        let token = get_token(&secret, Digits::EIGHT, counter - k).unwrap();
        let delta = get_delta(&secret, Digits::EIGHT, &token, counter, window, true).unwrap();
        prop_assert!(delta.is_some_and(|d| d <= -(k as i64)));
    }

    #[test]
    fn wrong_length_tokens_never_verify(
        secret in secret_strategy(),
        token in "[0-9]{1,12}",
        digits in digits_strategy(),
    ) {
        prop_assume!(token.len() != digits.value() as usize);
        prop_assert!(!verify(&secret, digits, &token, 0, 3, true).unwrap());
    }

    #[test]
    fn totp_is_stable_for_a_period(step in 0u64..100_000_000) {
        let start = step * 30;
        let base = TotpOptions::new(Secret::ascii("12345678901234567890"));
        let first = totp::token(&base.clone().time(start)).unwrap();
        let last = totp::token(&base.time(start + 29)).unwrap();
        prop_assert_eq!(first, last);
    }
}

#[test]
fn missing_token_is_signalled() {
    let secret = Secret::ascii("12345678901234567890");
    assert!(matches!(
        get_delta(&secret, Digits::SIX, "", 0, 0, false),
        Err(OtpError::MissingToken)
    ));
}

#[test]
fn fixed_vectors() {
    let secret = Secret::hex("DC0E3D9E461BC0341F6C451B848B312DE9537EB7");
    assert_eq!(get_token(&secret, Digits::SIX, 0).unwrap(), "522465");
    assert_eq!(get_token(&secret, Digits::EIGHT, 0).unwrap(), "48522465");
    assert_eq!(onetime::format_counter(10), "000000000000000a");
}

#[test]
fn totp_changes_across_a_step_boundary() {
    let base = TotpOptions::new(Secret::ascii("12345678901234567890"));
    let t = 1_234_567_890;
    let a = totp::token(&base.clone().time(t)).unwrap();
    let b = totp::token(&base.time(t + 30)).unwrap();
    assert_ne!(a, b);
}
