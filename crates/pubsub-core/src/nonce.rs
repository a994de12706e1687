//! LISTEN nonce generation

use rand::Rng;

/// Length of every generated nonce
pub const NONCE_LEN: usize = 15;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric correlation token for a LISTEN request.
///
/// Not cryptographically secure.
pub fn generate_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
