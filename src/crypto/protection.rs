use crate::error::{TokenSigError, TokenSigResult};
use aes_gcm::{
  aead::{Aead, KeyInit},
  Aes256Gcm, Nonce,
};
use argon2::Argon2;
use rand::RngCore;

/// Identifier of the at-rest protection scheme, recorded in entry metadata
pub const PROTECTION_SCHEME: &str = "argon2id-aes-256-gcm";

const SALT_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;
const KEY_LENGTH: usize = 32;

/// Derive a cipher key from a passphrase and salt with Argon2id
fn derive_key(passphrase: &str, salt: &[u8]) -> TokenSigResult<[u8; KEY_LENGTH]> {
  let mut output = [0u8; KEY_LENGTH];
  Argon2::default()
    .hash_password_into(passphrase.as_bytes(), salt, &mut output)
    .map_err(|e| TokenSigError::KeyProtectionError(format!("Key derivation failed: {e}")))?;
  Ok(output)
}

/// Seal key material under a passphrase.
/// Output layout: `salt (32 bytes) || nonce (12 bytes) || ciphertext`.
pub fn seal_bytes(plain: &[u8], passphrase: &str) -> TokenSigResult<Vec<u8>> {
  let mut rng = rand::rng();
  let mut salt = [0u8; SALT_LENGTH];
  rng.fill_bytes(&mut salt);
  let mut nonce_bytes = [0u8; NONCE_LENGTH];
  rng.fill_bytes(&mut nonce_bytes);

  let derived = derive_key(passphrase, &salt)?;
  let cipher = Aes256Gcm::new_from_slice(&derived)
    .map_err(|e| TokenSigError::KeyProtectionError(format!("Invalid cipher key length: {e}")))?;
  let ciphertext = cipher
    .encrypt(Nonce::from_slice(&nonce_bytes), plain)
    .map_err(|e| TokenSigError::KeyProtectionError(format!("Encryption failed: {e}")))?;

  let mut sealed = Vec::with_capacity(SALT_LENGTH + NONCE_LENGTH + ciphertext.len());
  sealed.extend_from_slice(&salt);
  sealed.extend_from_slice(&nonce_bytes);
  sealed.extend_from_slice(&ciphertext);
  Ok(sealed)
}

/// Unseal key material. The explicit unlock step: the store never calls this on its own.
pub fn unseal_bytes(sealed: &[u8], passphrase: &str) -> TokenSigResult<Vec<u8>> {
  if sealed.len() < SALT_LENGTH + NONCE_LENGTH {
    return Err(TokenSigError::KeyProtectionError(format!(
      "Sealed data too short: expected at least {} bytes, got {}",
      SALT_LENGTH + NONCE_LENGTH,
      sealed.len()
    )));
  }
  let salt = &sealed[..SALT_LENGTH];
  let nonce_bytes = &sealed[SALT_LENGTH..SALT_LENGTH + NONCE_LENGTH];
  let ciphertext = &sealed[SALT_LENGTH + NONCE_LENGTH..];

  let derived = derive_key(passphrase, salt)?;
  let cipher = Aes256Gcm::new_from_slice(&derived)
    .map_err(|e| TokenSigError::KeyProtectionError(format!("Invalid cipher key length: {e}")))?;
  // AEAD makes a wrong passphrase and a tampered ciphertext indistinguishable
  cipher
    .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
    .map_err(|_| TokenSigError::InvalidPassphrase)
}
