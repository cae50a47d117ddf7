//! panel-keygen binary entry point.
//!
//! `serve` runs the HTTP API; the other subcommands print freshly generated
//! key material and exit.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use panel_keygen::config::ServerConfig;
use panel_keygen::domain::short_id::MAX_SHORT_ID_BATCH;
use panel_keygen::{presentation, DefaultKeyMaterialService};

#[derive(Parser, Debug)]
#[command(name = "panel-keygen")]
#[command(about = "Key material generator for panel connection profiles")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve {
        /// TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// HTTP API listen address (overrides the config file).
        #[arg(short, long)]
        listen: Option<SocketAddr>,

        /// Log level (trace, debug, info, warn, error).
        #[arg(long)]
        log_level: Option<String>,
    },
    /// Generate an X25519 key pair, or complete one from a private key.
    X25519 {
        /// Existing base64url private key.
        #[arg(short = 'i', long)]
        input: Option<String>,
    },
    /// Generate an ML-KEM-768 key pair.
    Mlkem768,
    /// Generate Reality short IDs.
    ShortId {
        #[arg(
            short = 'n',
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u32).range(1..=MAX_SHORT_ID_BATCH as i64)
        )]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let service = DefaultKeyMaterialService::default();

    match args.command {
        Command::Serve {
            config,
            listen,
            log_level,
        } => serve(config, listen, log_level).await,
        Command::X25519 { input } => {
            let (private_key, public_key) = match input {
                Some(private_key) => {
                    let public_key = service
                        .public_key_from_private(&private_key)
                        .context("could not derive public key")?;
                    (private_key, public_key)
                }
                None => {
                    let key_pair = service
                        .generate_key_pair()
                        .context("could not generate key pair")?;
                    (key_pair.private_key, key_pair.public_key)
                }
            };
            println!("PrivateKey: {private_key}");
            println!("Password (PublicKey): {public_key}");
            Ok(())
        }
        Command::Mlkem768 => {
            let key_pair = service
                .generate_encapsulation_key_pair()
                .await
                .context("could not generate key pair")?;
            println!("Seed: {}", key_pair.private_key);
            println!("Client: {}", key_pair.public_key);
            Ok(())
        }
        Command::ShortId { count } => {
            let short_ids = service
                .generate_short_ids(count as usize)
                .context("could not generate short ids")?;
            for short_id in short_ids {
                println!("ShortId: {short_id}");
            }
            Ok(())
        }
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    listen: Option<SocketAddr>,
    log_level: Option<String>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config.apply_env();
    if let Some(listen) = listen {
        config.listen = listen;
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let app = presentation::create_router(&config);

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    tracing::info!("panel-keygen listening on http://{}", config.listen);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_count_is_bounded_on_the_command_line() {
        let args = Args::try_parse_from(["panel-keygen", "short-id", "-n", "1024"]).unwrap();
        assert!(matches!(args.command, Command::ShortId { count: 1024 }));

        for count in ["0", "1025", "18446744073709551615"] {
            assert!(Args::try_parse_from(["panel-keygen", "short-id", "-n", count]).is_err());
        }
    }
}
