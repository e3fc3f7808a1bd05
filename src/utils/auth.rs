/// Compare a typed secret against the configured one in constant time
///
/// The loop always walks the full length of equal-length inputs so the
/// position of the first differing byte is not observable.
pub fn verify_secret(provided: &str, expected: &str) -> bool {
    provided.len() == expected.len()
        && provided
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
