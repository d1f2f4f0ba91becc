use std::path::PathBuf;

use boss_core::catalog::Catalog;
use boss_core::crypto::envelope::PayloadKeys;
use boss_core::crypto::hex::parse_hex_key;
use boss_core::dataid::{DataIdAllocator, ID_STORE_FILE};
use boss_core::deploy::{DeployOptions, deploy};
use boss_core::error::{BossError, Result};
use boss_core::gateway::{EnvelopeCipher, PayloadCipher};
use boss_core::resolver::resolve_task;

pub const AES_KEY_ENV: &str = "BOSS_AES_KEY";
pub const HMAC_KEY_ENV: &str = "BOSS_HMAC_KEY";

fn key_or_env(flag: Option<String>, var: &str) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => std::env::var(var)
            .map_err(|_| BossError::Format(format!("no key flag given and {var} is unset"))),
    }
}

fn keys_from_args(aes_key_hex: Option<String>, hmac_key_hex: Option<String>) -> Result<PayloadKeys> {
    Ok(PayloadKeys {
        aes: parse_hex_key::<16>(&key_or_env(aes_key_hex, AES_KEY_ENV)?)?,
        hmac: parse_hex_key::<32>(&key_or_env(hmac_key_hex, HMAC_KEY_ENV)?)?,
    })
}

pub fn handle_deploy(
    src: PathBuf,
    out: PathBuf,
    aes_key_hex: Option<String>,
    hmac_key_hex: Option<String>,
) -> Result<()> {
    let keys = keys_from_args(aes_key_hex, hmac_key_hex)?;
    let stats = deploy(
        &Catalog::builtin(),
        &EnvelopeCipher,
        &DeployOptions {
            src_dir: src,
            out_dir: out,
            keys,
        },
    )?;
    println!(
        "deployed {} task sheets ({} withheld), {} payload blobs",
        stats.sheets, stats.withheld, stats.payloads
    );
    Ok(())
}

pub fn handle_resolve(path: &str) -> Result<()> {
    match resolve_task(path) {
        Some((region, task)) => println!("{} {}", region.token(), task.token()),
        None => println!("unknown"),
    }
    Ok(())
}

pub fn handle_init(src: PathBuf, start: u64) -> Result<()> {
    let store = src.join(ID_STORE_FILE);
    DataIdAllocator::init(&store, start)?;
    println!("seeded {} at {start}", store.display());
    Ok(())
}

pub fn handle_encrypt(
    input: PathBuf,
    out: PathBuf,
    aes_key_hex: Option<String>,
    hmac_key_hex: Option<String>,
) -> Result<()> {
    let keys = keys_from_args(aes_key_hex, hmac_key_hex)?;
    let sealed = EnvelopeCipher.encrypt(&input, &keys)?;
    std::fs::write(&out, &sealed)?;
    println!("{} -> {} ({} bytes)", input.display(), out.display(), sealed.len());
    Ok(())
}
