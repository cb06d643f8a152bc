use crate::{
  crypto::{AlgorithmName, PublicKey, SecretKey, SigningKey, VerifyingKey},
  error::{TokenSigError, TokenSigResult},
  trace::*,
};

/// Facade over the signing engine for access token payloads.
///
/// A signer is pinned to one algorithm so multi-algorithm deployments can
/// record which scheme produced a given signature. It holds no state beyond
/// that and is safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct TokenSigner {
  alg: AlgorithmName,
}

impl TokenSigner {
  pub fn new(alg: AlgorithmName) -> Self {
    Self { alg }
  }

  /// Stable identifier of the signing scheme in use
  pub fn algorithm(&self) -> &'static str {
    self.alg.as_str()
  }

  /// Generate the signature over token bytes with the given secret key.
  /// Fails when the key belongs to a different algorithm family.
  pub fn generate_token_signature(&self, token: &[u8], key: &SecretKey) -> TokenSigResult<Vec<u8>> {
    let key_alg = SigningKey::alg(key);
    if key_alg != self.alg {
      return Err(TokenSigError::KeyAlgorithmMismatch {
        expected: self.alg.to_string(),
        actual: key_alg.to_string(),
      });
    }
    key.sign(token)
  }

  /// Verify a signature over the original data with the signer's public key.
  ///
  /// Returns `Ok(false)` for any definite mismatch: wrong key, tampered
  /// data, or a key from a different algorithm family. Returns an error only
  /// when verification could not run at all, e.g. a signature that does not
  /// parse for the key's algorithm.
  pub fn verify_token_signature(&self, signature: &[u8], data: &[u8], key: &PublicKey) -> TokenSigResult<bool> {
    if key.alg() != self.alg {
      debug!("verification key algorithm differs from configured '{}'", self.alg);
      return Ok(false);
    }
    match key.verify(data, signature) {
      Ok(()) => Ok(true),
      Err(TokenSigError::InvalidSignature(_)) => Ok(false),
      Err(e) => Err(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sign_then_verify() {
    let signer = TokenSigner::new(AlgorithmName::Ed25519);
    assert_eq!(signer.algorithm(), "ed25519");

    let sk = SecretKey::generate(AlgorithmName::Ed25519);
    let pk = sk.public_key();

    let signature = signer.generate_token_signature(b"hello", &sk).unwrap();
    assert!(signer.verify_token_signature(&signature, b"hello", &pk).unwrap());
    assert!(!signer.verify_token_signature(&signature, b"hello!", &pk).unwrap());
  }

  #[test]
  fn test_wrong_key_is_false_not_error() {
    let signer = TokenSigner::new(AlgorithmName::EcdsaP256Sha256);
    let sk = SecretKey::generate(AlgorithmName::EcdsaP256Sha256);
    let other = SecretKey::generate(AlgorithmName::EcdsaP256Sha256);

    let signature = signer.generate_token_signature(b"token", &sk).unwrap();
    assert!(!signer
      .verify_token_signature(&signature, b"token", &other.public_key())
      .unwrap());
  }

  #[test]
  fn test_single_bit_tamper_detected() {
    let signer = TokenSigner::new(AlgorithmName::EcdsaP384Sha384);
    let sk = SecretKey::generate(AlgorithmName::EcdsaP384Sha384);
    let pk = sk.public_key();

    let payload = b"card content v1".to_vec();
    let signature = signer.generate_token_signature(&payload, &sk).unwrap();

    let mut tampered = payload.clone();
    tampered[0] ^= 0x01;
    assert!(!signer.verify_token_signature(&signature, &tampered, &pk).unwrap());
  }

  #[test]
  fn test_sign_with_mismatched_key_fails() {
    let signer = TokenSigner::new(AlgorithmName::Ed25519);
    let sk = SecretKey::generate(AlgorithmName::EcdsaP256Sha256);
    assert!(matches!(
      signer.generate_token_signature(b"token", &sk),
      Err(TokenSigError::KeyAlgorithmMismatch { .. })
    ));
  }

  #[test]
  fn test_verify_with_mismatched_key_is_false() {
    let signer = TokenSigner::new(AlgorithmName::Ed25519);
    let sk = SecretKey::generate(AlgorithmName::Ed25519);
    let signature = signer.generate_token_signature(b"token", &sk).unwrap();

    let other = SecretKey::generate(AlgorithmName::EcdsaP256Sha256);
    assert!(!signer
      .verify_token_signature(&signature, b"token", &other.public_key())
      .unwrap());
  }

  #[test]
  fn test_unparseable_signature_is_error() {
    // signature lengths are fixed per algorithm; a 3-byte blob cannot be
    // parsed for any of them, so verification cannot run
    for alg in [
      AlgorithmName::Ed25519,
      AlgorithmName::EcdsaP256Sha256,
      AlgorithmName::EcdsaP384Sha384,
    ] {
      let signer = TokenSigner::new(alg);
      let sk = SecretKey::generate(alg);
      let res = signer.verify_token_signature(b"sig", b"data", &sk.public_key());
      assert!(matches!(res, Err(TokenSigError::ParseSignatureError(_))));
    }
  }

  #[test]
  fn test_truncated_signature_is_error() {
    for alg in [AlgorithmName::EcdsaP256Sha256, AlgorithmName::EcdsaP384Sha384] {
      let signer = TokenSigner::new(alg);
      let sk = SecretKey::generate(alg);
      let signature = signer.generate_token_signature(b"token", &sk).unwrap();
      let res = signer.verify_token_signature(&signature[..signature.len() - 1], b"token", &sk.public_key());
      assert!(matches!(res, Err(TokenSigError::ParseSignatureError(_))));
    }
  }
}
