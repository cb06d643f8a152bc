use crate::{
  crypto::{seal_bytes, unseal_bytes, SecretKey, SigningKey, PROTECTION_SCHEME},
  error::{TokenSigError, TokenSigResult},
};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Metadata kept alongside the protected bytes of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
  /// Unix timestamp of entry creation, in seconds
  pub created_at: u64,
  /// Identifier of the scheme protecting the entry value
  pub protection: String,
  /// Id of the public half of the stored key, when known
  pub key_id: Option<String>,
}

/// A named record pairing an alias with protected private-key bytes.
/// The value is never decrypted implicitly; unlocking takes an explicit
/// [`KeyEntry::unseal`] call with the caller's passphrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
  /// Alias, unique within a store
  pub name: String,
  /// Protected private-key bytes
  pub value: Vec<u8>,
  pub meta: EntryMeta,
}

fn unix_now() -> u64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_secs()
}

impl KeyEntry {
  /// Wrap bytes the caller has already protected under `scheme`
  pub fn new(name: impl Into<String>, protected: Vec<u8>, scheme: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: protected,
      meta: EntryMeta {
        created_at: unix_now(),
        protection: scheme.into(),
        key_id: None,
      },
    }
  }

  /// Protect a secret key under a passphrase and wrap it into an entry.
  /// The key is PKCS#8-encoded, then sealed with [`PROTECTION_SCHEME`].
  pub fn seal(name: impl Into<String>, key: &SecretKey, passphrase: &str) -> TokenSigResult<Self> {
    let der = key.to_der()?;
    let value = seal_bytes(&der, passphrase)?;
    Ok(Self {
      name: name.into(),
      value,
      meta: EntryMeta {
        created_at: unix_now(),
        protection: PROTECTION_SCHEME.to_string(),
        key_id: Some(key.key_id()),
      },
    })
  }

  /// Unlock the entry and decode the secret key it protects
  pub fn unseal(&self, passphrase: &str) -> TokenSigResult<SecretKey> {
    if self.meta.protection != PROTECTION_SCHEME {
      return Err(TokenSigError::KeyProtectionError(format!(
        "Unsupported protection scheme: {}",
        self.meta.protection
      )));
    }
    let der = unseal_bytes(&self.value, passphrase)?;
    SecretKey::from_der(&der)
  }
}
