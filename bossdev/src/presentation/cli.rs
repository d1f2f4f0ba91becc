use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "bossdev CLI (spoofed BOSS feed generator)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full rebuild: encrypt the catalog and regenerate every task sheet
    Deploy {
        /// Plaintext source root (also holds the .id counter)
        src: PathBuf,
        /// Output root for content/, tasksheet/ and cemusheet/
        out: PathBuf,

        /// 16-byte hex AES key (falls back to BOSS_AES_KEY)
        #[arg(long = "aes-key")]
        aes_key_hex: Option<String>,

        /// 32-byte hex HMAC key (falls back to BOSS_HMAC_KEY)
        #[arg(long = "hmac-key")]
        hmac_key_hex: Option<String>,
    },

    /// Map a request path back to its (region, task) pair
    Resolve { path: String },

    /// Seed a fresh data-id store under the source root
    Init {
        src: PathBuf,

        #[arg(long, default_value_t = 0)]
        start: u64,
    },

    /// Seal a single file into a payload envelope
    Encrypt {
        input: PathBuf,
        out: PathBuf,

        /// 16-byte hex AES key (falls back to BOSS_AES_KEY)
        #[arg(long = "aes-key")]
        aes_key_hex: Option<String>,

        /// 32-byte hex HMAC key (falls back to BOSS_HMAC_KEY)
        #[arg(long = "hmac-key")]
        hmac_key_hex: Option<String>,
    },
}
