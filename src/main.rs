//! RAX FTP Client - Entry Point
//!
//! A Rust-based passive-mode FTP client implementing core features of RFC 959.

use log::{error, info};

use rax_ftp_client::config::ClientConfig;
use rax_ftp_client::shell;

fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    info!("Launching FTP client...");

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let mut args = std::env::args().skip(1);
    let host = args.next();
    let port = args.next().and_then(|p| p.parse().ok());

    shell::run(config, host, port);
}
