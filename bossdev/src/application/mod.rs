pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use boss_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Deploy {
            src,
            out,
            aes_key_hex,
            hmac_key_hex,
        } => handlers::handle_deploy(src, out, aes_key_hex, hmac_key_hex),
        Commands::Resolve { path } => handlers::handle_resolve(&path),
        Commands::Init { src, start } => handlers::handle_init(src, start),
        Commands::Encrypt {
            input,
            out,
            aes_key_hex,
            hmac_key_hex,
        } => handlers::handle_encrypt(input, out, aes_key_hex, hmac_key_hex),
    }
}
