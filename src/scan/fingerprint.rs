// src/scan/fingerprint.rs

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::fs::FileSystem;
use crate::types::Sha1Digest;

/// Result of hashing one file: either its digest or why it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashOutcome {
    Digest(Sha1Digest),
    Failed { reason: String },
}

/// Content fingerprint of a single file.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    path: PathBuf,
    outcome: HashOutcome,
}

impl Fingerprint {
    pub fn new(path: impl Into<PathBuf>, outcome: HashOutcome) -> Self {
        Self {
            path: path.into(),
            outcome,
        }
    }

    pub fn digest(path: impl Into<PathBuf>, digest: Sha1Digest) -> Self {
        Self::new(path, HashOutcome::Digest(digest))
    }

    pub fn failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::new(
            path,
            HashOutcome::Failed {
                reason: reason.into(),
            },
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn outcome(&self) -> &HashOutcome {
        &self.outcome
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, HashOutcome::Failed { .. })
    }

    /// The digest bytes, or `None` for a failed fingerprint.
    pub fn digest_bytes(&self) -> Option<&Sha1Digest> {
        match &self.outcome {
            HashOutcome::Digest(d) => Some(d),
            HashOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            HashOutcome::Digest(_) => None,
            HashOutcome::Failed { reason } => Some(reason),
        }
    }

    /// Lowercase hex rendering of the digest.
    pub fn hex(&self) -> Option<String> {
        self.digest_bytes().map(hex::encode)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            HashOutcome::Digest(d) => write!(f, "{}\t{}", hex::encode(d), self.path.display()),
            HashOutcome::Failed { reason } => write!(f, "ERROR: {reason}"),
        }
    }
}

/// Whether two fingerprints describe the same content.
///
/// Two failed fingerprints are equal whatever their reasons; a file that
/// stays unreadable has not changed. Two absent fingerprints are equal too.
pub fn same_content(before: Option<&Fingerprint>, after: Option<&Fingerprint>) -> bool {
    let (before, after) = match (before, after) {
        (Some(b), Some(a)) => (b, a),
        (None, None) => return true,
        _ => return false,
    };
    match (&before.outcome, &after.outcome) {
        (HashOutcome::Failed { .. }, HashOutcome::Failed { .. }) => true,
        (HashOutcome::Digest(b), HashOutcome::Digest(a)) => b == a,
        _ => false,
    }
}

/// Stream `reader` through SHA-1 until EOF.
pub fn hash_reader<R: Read + ?Sized>(reader: &mut R) -> io::Result<Sha1Digest> {
    let mut hasher = Sha1::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}

/// Compute the fingerprint of a single file.
///
/// Never fails: open and read errors end up in the returned fingerprint.
pub fn fingerprint_file(fs: &dyn FileSystem, path: &Path) -> Fingerprint {
    let mut reader = match fs.open_read(path) {
        Ok(r) => r,
        Err(err) => {
            debug!(?path, error = %err, "could not open file for hashing");
            return Fingerprint::failed(path, format!("{err:#}"));
        }
    };

    match hash_reader(&mut reader) {
        Ok(digest) => Fingerprint::digest(path, digest),
        Err(err) => {
            debug!(?path, error = %err, "read failed while hashing");
            Fingerprint::failed(path, format!("reading file {:?}: {err}", path))
        }
    }
}
