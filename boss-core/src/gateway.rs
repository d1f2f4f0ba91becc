use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::warn;

use crate::catalog::ContentDescriptor;
use crate::crypto::envelope::{self, PayloadKeys};
use crate::error::{BossError, Result};

/// Seam for the payload transform, so a deploy run can swap the shipped
/// envelope for another collaborator (or a test double).
pub trait PayloadCipher: Send + Sync {
    fn encrypt(&self, path: &Path, keys: &PayloadKeys) -> Result<Vec<u8>>;
}

/// Production cipher: read the source file and seal it with the current
/// timestamp as release stamp.
pub struct EnvelopeCipher;

impl PayloadCipher for EnvelopeCipher {
    fn encrypt(&self, path: &Path, keys: &PayloadKeys) -> Result<Vec<u8>> {
        let plain = std::fs::read(path)?;
        let released = time::OffsetDateTime::now_utc().unix_timestamp();
        envelope::seal(&plain, keys, released)
    }
}

/// Per-item adapter between the catalog and the cipher collaborator.
pub struct EncryptionGateway<'a> {
    cipher: &'a dyn PayloadCipher,
    keys: PayloadKeys,
    src_root: PathBuf,
}

impl<'a> EncryptionGateway<'a> {
    pub fn new(cipher: &'a dyn PayloadCipher, keys: PayloadKeys, src_root: PathBuf) -> Self {
        Self {
            cipher,
            keys,
            src_root,
        }
    }

    /// Ciphertext for one descriptor; errors carry the file name.
    pub fn encrypt(&self, descriptor: &ContentDescriptor) -> Result<Vec<u8>> {
        let path = self.src_root.join(descriptor.source_path);
        self.cipher
            .encrypt(&path, &self.keys)
            .map_err(|e| BossError::Encryption {
                file: descriptor.file_name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Encrypt a whole descriptor batch, in parallel; items are independent.
    /// A per-file failure is logged and yields `None` so siblings keep going.
    /// Output order matches input order.
    pub fn encrypt_all(&self, descriptors: &[ContentDescriptor]) -> Vec<Option<Vec<u8>>> {
        descriptors
            .par_iter()
            .map(|descriptor| match self.encrypt(descriptor) {
                Ok(cipher) => Some(cipher),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentDescriptor;
    use std::fs;

    fn keys() -> PayloadKeys {
        PayloadKeys {
            aes: [1u8; 16],
            hmac: [2u8; 32],
        }
    }

    #[test]
    fn sibling_failures_do_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ok.bin"), b"data").unwrap();

        let descriptors = [
            ContentDescriptor {
                file_name: "ok.bin",
                source_path: "ok.bin",
            },
            ContentDescriptor {
                file_name: "gone.bin",
                source_path: "gone.bin",
            },
        ];
        let gateway = EncryptionGateway::new(&EnvelopeCipher, keys(), dir.path().to_path_buf());
        let ciphers = gateway.encrypt_all(&descriptors);
        assert_eq!(ciphers.len(), 2);
        assert!(ciphers[0].is_some());
        assert!(ciphers[1].is_none());
    }

    #[test]
    fn encrypt_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = EncryptionGateway::new(&EnvelopeCipher, keys(), dir.path().to_path_buf());
        let err = gateway
            .encrypt(&ContentDescriptor {
                file_name: "missing.byaml",
                source_path: "missing.byaml",
            })
            .unwrap_err();
        assert!(matches!(err, BossError::Encryption { ref file, .. } if file == "missing.byaml"));
    }

    #[test]
    fn sealed_output_opens_back_to_source_bytes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("v.byaml"), b"schedule").unwrap();
        let gateway = EncryptionGateway::new(&EnvelopeCipher, keys(), dir.path().to_path_buf());
        let sealed = gateway
            .encrypt(&ContentDescriptor {
                file_name: "v.byaml",
                source_path: "v.byaml",
            })
            .unwrap();
        assert_eq!(envelope::open(&sealed, &keys()).unwrap(), b"schedule");
    }
}
