mod asymmetric;
mod fingerprint;
mod protection;

use crate::error::{TokenSigError, TokenSigResult};

pub use asymmetric::{PublicKey, SecretKey};
pub use fingerprint::{fingerprint, FINGERPRINT_SIZE};
pub use protection::{seal_bytes, unseal_bytes, PROTECTION_SCHEME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Algorithm names
pub enum AlgorithmName {
  EcdsaP256Sha256,
  EcdsaP384Sha384,
  Ed25519,
}

impl AlgorithmName {
  pub fn as_str(&self) -> &'static str {
    match self {
      AlgorithmName::EcdsaP256Sha256 => "ecdsa-p256-sha256",
      AlgorithmName::EcdsaP384Sha384 => "ecdsa-p384-sha384",
      AlgorithmName::Ed25519 => "ed25519",
    }
  }
}

impl std::fmt::Display for AlgorithmName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for AlgorithmName {
  type Err = TokenSigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "ecdsa-p256-sha256" => Ok(Self::EcdsaP256Sha256),
      "ecdsa-p384-sha384" => Ok(Self::EcdsaP384Sha384),
      "ed25519" => Ok(Self::Ed25519),
      _ => Err(TokenSigError::InvalidAlgorithmName(s.to_string())),
    }
  }
}

/// SigningKey trait
pub trait SigningKey {
  fn sign(&self, data: &[u8]) -> TokenSigResult<Vec<u8>>;
  fn key_id(&self) -> String;
  fn alg(&self) -> AlgorithmName;
}

/// VerifyingKey trait
pub trait VerifyingKey {
  fn verify(&self, data: &[u8], signature: &[u8]) -> TokenSigResult<()>;
  fn key_id(&self) -> String;
  fn alg(&self) -> AlgorithmName;
}

#[cfg(test)]
mod tests {
  use super::*;
  use core::str::FromStr;

  #[test]
  fn test_algorithm_name_round_trip() {
    for name in ["ecdsa-p256-sha256", "ecdsa-p384-sha384", "ed25519"] {
      let alg = AlgorithmName::from_str(name).unwrap();
      assert_eq!(alg.as_str(), name);
    }
  }

  #[test]
  fn test_algorithm_name_unknown() {
    let res = AlgorithmName::from_str("rsa-pss-sha512");
    assert!(matches!(res, Err(TokenSigError::InvalidAlgorithmName(_))));
  }
}
