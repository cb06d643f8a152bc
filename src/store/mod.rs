mod entry;

pub use entry::{EntryMeta, KeyEntry};

use crate::{
  error::{TokenSigError, TokenSigResult},
  trace::*,
};
use base64::{engine::general_purpose, Engine as _};
use std::{
  collections::BTreeSet,
  fs,
  io::{ErrorKind, Write},
  path::{Path, PathBuf},
  sync::{Mutex, PoisonError},
};
use tempfile::NamedTempFile;

/// Filename suffix for entry files; anything else in the directory is ignored
const ENTRY_SUFFIX: &str = ".key";

/// Durable alias-to-entry storage backed by a local directory.
///
/// Each alias maps to one file named `base64url(alias).key` holding the
/// JSON-serialized [`KeyEntry`]. Entries are replaced by writing to a
/// temporary file in the same directory and renaming it over the target, so
/// a crash mid-write never leaves a corrupt entry retrievable. Writers and
/// snapshots serialize on an internal mutex; plain reads need no lock since
/// the rename is atomic.
pub struct KeyStore {
  dir: PathBuf,
  write_lock: Mutex<()>,
}

impl KeyStore {
  /// Open a store rooted at `dir`, creating the directory if absent
  pub fn open(dir: impl AsRef<Path>) -> TokenSigResult<Self> {
    let dir = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(Self {
      dir,
      write_lock: Mutex::new(()),
    })
  }

  /// Directory backing this store
  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn entry_path(&self, name: &str) -> PathBuf {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(name.as_bytes());
    self.dir.join(format!("{encoded}{ENTRY_SUFFIX}"))
  }

  /// Insert or overwrite the entry under its alias. Last write wins.
  pub fn store(&self, entry: &KeyEntry) -> TokenSigResult<()> {
    let json = serde_json::to_vec_pretty(entry)?;
    let path = self.entry_path(&entry.name);

    let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
    let mut tmp = NamedTempFile::new_in(&self.dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|e| TokenSigError::StoreIoError(e.error))?;
    debug!("stored key entry '{}'", entry.name);
    Ok(())
  }

  /// Load the entry under the given alias
  pub fn load(&self, name: &str) -> TokenSigResult<KeyEntry> {
    let bytes = match fs::read(self.entry_path(name)) {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => return Err(TokenSigError::KeyNotFound(name.to_string())),
      Err(e) => return Err(e.into()),
    };
    let entry: KeyEntry = serde_json::from_slice(&bytes).map_err(|e| TokenSigError::CorruptKeyEntry {
      name: name.to_string(),
      message: e.to_string(),
    })?;
    if entry.name != name {
      return Err(TokenSigError::CorruptKeyEntry {
        name: name.to_string(),
        message: format!("Entry file holds alias '{}'", entry.name),
      });
    }
    Ok(entry)
  }

  /// Check whether an alias is present. I/O failure of the backing medium
  /// surfaces as an error rather than a silent `false`.
  pub fn exists(&self, name: &str) -> TokenSigResult<bool> {
    match fs::metadata(self.entry_path(name)) {
      Ok(meta) => Ok(meta.is_file()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
      Err(e) => Err(e.into()),
    }
  }

  /// Remove the entry under the given alias
  pub fn delete(&self, name: &str) -> TokenSigResult<()> {
    let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
    match fs::remove_file(self.entry_path(name)) {
      Ok(()) => {
        debug!("deleted key entry '{name}'");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Err(TokenSigError::KeyNotFound(name.to_string())),
      Err(e) => Err(e.into()),
    }
  }

  /// Snapshot of all aliases currently present
  pub fn names(&self) -> TokenSigResult<BTreeSet<String>> {
    let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
    let mut names = BTreeSet::new();
    for dir_entry in fs::read_dir(&self.dir)? {
      let file_name = dir_entry?.file_name();
      let Some(file_name) = file_name.to_str() else {
        continue;
      };
      let Some(encoded) = file_name.strip_suffix(ENTRY_SUFFIX) else {
        continue;
      };
      let Ok(raw) = general_purpose::URL_SAFE_NO_PAD.decode(encoded) else {
        continue;
      };
      let Ok(name) = String::from_utf8(raw) else {
        continue;
      };
      names.insert(name);
    }
    Ok(names)
  }
}
