use thiserror::Error;

/// Result type for key management operations
pub type TokenSigResult<T> = std::result::Result<T, TokenSigError>;

/// Error type for key management operations
#[derive(Error, Debug)]
pub enum TokenSigError {
  /* ----- Crypto errors ----- */
  /// Invalid private key for asymmetric algorithm
  #[error("Failed to parse private key: {0}")]
  ParsePrivateKeyError(String),
  /// Invalid public key for asymmetric algorithm
  #[error("Failed to parse public key: {0}")]
  ParsePublicKeyError(String),
  /// Failed to encode a key into its material representation
  #[error("Failed to encode key: {0}")]
  EncodeKeyError(String),

  /// Signature parse error
  #[error("Failed to parse signature: {0}")]
  ParseSignatureError(String),
  /// Invalid Signature
  #[error("Invalid Signature: {0}")]
  InvalidSignature(String),

  /// Unknown algorithm name
  #[error("Invalid algorithm name: {0}")]
  InvalidAlgorithmName(String),
  /// Key belongs to a different algorithm family than the one configured
  #[error("Key algorithm mismatch: expected {expected}, got {actual}")]
  KeyAlgorithmMismatch { expected: String, actual: String },

  /* ----- Protection errors ----- */
  /// Sealing or unsealing key material failed structurally
  #[error("Key protection error: {0}")]
  KeyProtectionError(String),
  /// Wrong passphrase or tampered sealed bytes
  #[error("Invalid passphrase or tampered key material")]
  InvalidPassphrase,

  /* ----- Store errors ----- */
  /// Alias absent from the key store
  #[error("Key not found: {0}")]
  KeyNotFound(String),
  /// Entry present but not decodable
  #[error("Corrupt key entry '{name}': {message}")]
  CorruptKeyEntry { name: String, message: String },
  /// Backing medium unreadable or unwritable
  #[error("Key store I/O error: {0}")]
  StoreIoError(#[from] std::io::Error),
  /// Entry serialization error
  #[error("Failed to serialize key entry: {0}")]
  SerializeEntryError(#[from] serde_json::Error),
}
