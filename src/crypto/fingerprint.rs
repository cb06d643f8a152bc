use sha2::{Digest, Sha512};

/// Byte length of a fingerprint, 512 bits
pub const FINGERPRINT_SIZE: usize = 64;

/// Compute the 512-bit fingerprint of arbitrary data.
/// Total function: defined for every input including the empty slice.
pub fn fingerprint(data: &[u8]) -> [u8; FINGERPRINT_SIZE] {
  let mut hasher = <Sha512 as Digest>::new();
  hasher.update(data);
  hasher.finalize().into()
}

#[cfg(test)]
mod tests {
  use super::*;
  use base64::{engine::general_purpose, Engine as _};

  #[test]
  fn test_fingerprint_deterministic() {
    let a = fingerprint(b"some card content");
    let b = fingerprint(b"some card content");
    assert_eq!(a, b);
    assert_eq!(a.len(), FINGERPRINT_SIZE);
  }

  #[test]
  fn test_fingerprint_differs_on_input() {
    assert_ne!(fingerprint(b"alice"), fingerprint(b"alicf"));
  }

  #[test]
  fn test_fingerprint_empty_input() {
    // SHA-512 of the empty string is a fixed constant
    let digest = fingerprint(b"");
    let expected = general_purpose::STANDARD
      .decode("z4PhNX7vuL3xVChQ1m2AB9Yg5AULVxXcg/SpIdNs6c5H0NE8XYXysP+DGNKHfuwvY7kxvUdBeoGlODJ6+SfaPg==")
      .unwrap();
    assert_eq!(digest.as_slice(), expected.as_slice());
  }
}
