use crate::error::Error;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BLOCK_SIZE: usize = 64 * 1024; // 64KB

/// SHA-256 digest of a file's full byte content, as 64 lower-case hex chars.
/// Equal fingerprints are treated as byte-identical content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash a file's content in fixed-size blocks, never loading the whole file
/// into memory. The fingerprint depends only on byte content, not on the
/// filename or modification time.
pub fn hash_file(path: &Path) -> Result<ContentFingerprint, Error> {
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BLOCK_SIZE];

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|e| Error::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentFingerprint(format!("{:x}", hasher.finalize())))
}
