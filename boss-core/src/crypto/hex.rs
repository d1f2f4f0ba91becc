use crate::error::{BossError, Result};

/// Decode a hex string into an exact-length key array.
pub fn parse_hex_key<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    let bytes = hex::decode(hex_str.trim())
        .map_err(|e| BossError::Format(format!("invalid hex key: {e}")))?;
    if bytes.len() != N {
        return Err(BossError::Format(format!(
            "key must be {N} bytes ({} hex chars), got {}",
            N * 2,
            bytes.len()
        )));
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exact_length() {
        let key = parse_hex_key::<4>("deadbeef").unwrap();
        assert_eq!(key, [0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_wrong_length_and_bad_digits() {
        assert!(parse_hex_key::<4>("dead").is_err());
        assert!(parse_hex_key::<4>("zzzzzzzz").is_err());
    }
}
