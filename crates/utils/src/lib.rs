use rand::{distributions::Alphanumeric, thread_rng, Rng, RngCore};

/// Creates a random alphanumeric secret of the given length
pub fn create_random_secret(secret_len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(secret_len)
        .map(char::from)
        .collect()
}

/// Creates a hex encoded token from `byte_len` bytes of cryptographically
/// secure randomness. The returned string is `2 * byte_len` characters long.
pub fn create_random_hex_token(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn creates_secret_of_given_length() {
        let secret = create_random_secret(16);
        assert_eq!(secret.len(), 16);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn creates_hex_token() {
        let token = create_random_hex_token(32);
        assert_eq!(token.len(), 64);
        assert_eq!(token, token.to_lowercase());
        assert_eq!(hex::decode(&token).unwrap().len(), 32);
        assert_ne!(token, create_random_hex_token(32));
    }
}
