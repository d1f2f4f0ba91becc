use std::io::{Read, Write};

use aes_gcm::{
    Aes128Gcm, Key,
    aead::{Aead, KeyInit},
};
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{BossError, Result};

type HmacSha1 = Hmac<Sha1>;

pub const MAGIC: &[u8; 4] = b"boss";
pub const VERSION: u16 = 2;

pub const HEADER_LEN: usize = 16;
pub const HMAC_LEN: usize = 20;
pub const NONCE_LEN: usize = 12;

/// Key material for the payload transform: the platform AES key and the
/// content HMAC key.
#[derive(Clone, Copy)]
pub struct PayloadKeys {
    pub aes: [u8; 16],
    pub hmac: [u8; 32],
}

/// Fixed-size envelope header preceding the digest, nonce and body.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeHeader {
    pub version: u16,
    pub flags: u16,
    /// Release timestamp (unix seconds); clients use it to order content.
    pub released: i64,
}

impl EnvelopeHeader {
    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(MAGIC)?;
        w.write_all(&self.version.to_le_bytes())?;
        w.write_all(&self.flags.to_le_bytes())?;
        w.write_all(&self.released.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(mut r: impl Read) -> std::io::Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(std::io::ErrorKind::InvalidData.into());
        }
        let mut v = [0u8; 2];
        r.read_exact(&mut v)?;
        let version = u16::from_le_bytes(v);
        let mut fl = [0u8; 2];
        r.read_exact(&mut fl)?;
        let flags = u16::from_le_bytes(fl);
        let mut ts = [0u8; 8];
        r.read_exact(&mut ts)?;
        let released = i64::from_le_bytes(ts);
        Ok(Self {
            version,
            flags,
            released,
        })
    }
}

/// Seal one payload: header, HMAC-SHA1 of the plaintext, then the
/// AES-128-GCM body under a fresh nonce.
pub fn seal(plain: &[u8], keys: &PayloadKeys, released: i64) -> Result<Vec<u8>> {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(&keys.hmac)
        .map_err(|_| BossError::Format("bad hmac key length".into()))?;
    mac.update(plain);
    let digest = mac.finalize().into_bytes();

    let mut nonce = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut nonce).map_err(|e| BossError::Format(format!("nonce: {e}")))?;

    let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(&keys.aes));
    let gcm_nonce = &nonce.into();
    let body = cipher
        .encrypt(gcm_nonce, plain)
        .map_err(|_| BossError::Format("aead seal failed".into()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + HMAC_LEN + NONCE_LEN + body.len());
    EnvelopeHeader {
        version: VERSION,
        flags: 0,
        released,
    }
    .write_to(&mut out)?;
    out.extend_from_slice(&digest);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Inverse of `seal`. Rejects bad magic/version, truncation, an AEAD failure
/// or a plaintext digest mismatch.
pub fn open(envelope: &[u8], keys: &PayloadKeys) -> Result<Vec<u8>> {
    let mut r = envelope;
    let header = EnvelopeHeader::read_from(&mut r)?;
    if header.version != VERSION {
        return Err(BossError::Format(format!(
            "unsupported envelope version {}",
            header.version
        )));
    }
    if r.len() < HMAC_LEN + NONCE_LEN {
        return Err(BossError::Format("envelope truncated".into()));
    }
    let (digest, rest) = r.split_at(HMAC_LEN);
    let (nonce, body) = rest.split_at(NONCE_LEN);
    let nonce: [u8; NONCE_LEN] = nonce
        .try_into()
        .map_err(|_| BossError::Format("envelope truncated".into()))?;

    let cipher = Aes128Gcm::new(Key::<Aes128Gcm>::from_slice(&keys.aes));
    let gcm_nonce = &nonce.into();
    let plain = cipher
        .decrypt(gcm_nonce, body)
        .map_err(|_| BossError::Format("aead open failed".into()))?;

    let mut mac = <HmacSha1 as Mac>::new_from_slice(&keys.hmac)
        .map_err(|_| BossError::Format("bad hmac key length".into()))?;
    mac.update(&plain);
    mac.verify_slice(digest)
        .map_err(|_| BossError::Format("payload digest mismatch".into()))?;
    Ok(plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> PayloadKeys {
        PayloadKeys {
            aes: [0x11; 16],
            hmac: [0x22; 32],
        }
    }

    #[test]
    fn seal_open_round_trip() {
        let plain = b"festival payload bytes";
        let sealed = seal(plain, &keys(), 1_700_000_000).unwrap();
        assert_eq!(&sealed[..4], MAGIC);
        assert_eq!(
            sealed.len(),
            HEADER_LEN + HMAC_LEN + NONCE_LEN + plain.len() + 16
        );
        assert_eq!(open(&sealed, &keys()).unwrap(), plain);
    }

    #[test]
    fn header_survives_round_trip() {
        let mut buf = Vec::new();
        let header = EnvelopeHeader {
            version: VERSION,
            flags: 0,
            released: 1_700_000_000,
        };
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);
        let back = EnvelopeHeader::read_from(&buf[..]).unwrap();
        assert_eq!(back.released, header.released);
        assert_eq!(back.version, header.version);
    }

    #[test]
    fn tampered_body_is_rejected() {
        let mut sealed = seal(b"payload", &keys(), 0).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;
        assert!(open(&sealed, &keys()).is_err());
    }

    #[test]
    fn wrong_aes_key_is_rejected() {
        let sealed = seal(b"payload", &keys(), 0).unwrap();
        let mut other = keys();
        other.aes = [0x33; 16];
        assert!(open(&sealed, &other).is_err());
    }

    #[test]
    fn wrong_hmac_key_is_rejected() {
        let sealed = seal(b"payload", &keys(), 0).unwrap();
        let mut other = keys();
        other.hmac = [0x44; 32];
        assert!(open(&sealed, &other).is_err());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut sealed = seal(b"payload", &keys(), 0).unwrap();
        sealed[0] = b'x';
        assert!(open(&sealed, &keys()).is_err());
    }
}
