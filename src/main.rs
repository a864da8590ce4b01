use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use duo_web::config::Config;
use duo_web::credentials::{generate_application_key, AKEY_MIN_LEN};

/// duo-web: sign and verify Duo Web two-factor handshakes.
///
/// Reads DUO_IKEY, DUO_SKEY, DUO_AKEY and DUO_HOST from the environment
/// (or a .env file in the working directory).
#[derive(Parser)]
#[command(name = "duo-web", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo relying-party server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (overrides DUO_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (overrides DUO_BIND)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Sign a request for a primary-authenticated user
    Sign {
        /// The username to sign for
        #[arg(long)]
        user: String,

        /// Unix time to sign at (default: now)
        #[arg(long)]
        time: Option<i64>,
    },

    /// Verify a signed response and print the authenticated user
    Verify {
        /// The sig_response value posted back by the Duo iframe
        response: String,

        /// Unix time to verify at (default: now)
        #[arg(long)]
        time: Option<i64>,
    },

    /// Generate a random application secret key for DUO_AKEY
    GenerateAkey {
        /// Key length in characters (minimum 40)
        #[arg(long, default_value = "40")]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up structured logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("duo_web=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let mut config = Config::load()?;
            config.require_credentials()?;
            config.require_host()?;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            println!("Server starting on http://{}:{}/", config.bind, config.port);
            println!(
                "Visit the root URL with a 'user' argument, e.g. 'http://{}:{}/?user=myname'.",
                config.bind, config.port
            );
            duo_web::web::run_server(config).await?;
        }

        Commands::Sign { user, time } => {
            let config = Config::load()?;
            let now = resolve_time(time)?;
            debug!(%user, at = %now, "signing request");

            match duo_web::sign_request_at(&config.credentials(), &user, now) {
                Ok(sig_request) => println!("{sig_request}"),
                Err(e) => {
                    eprintln!("{}", e.to_string().red());
                    std::process::exit(1);
                }
            }
        }

        Commands::Verify { response, time } => {
            let config = Config::load()?;
            let now = resolve_time(time)?;

            match duo_web::verify_response_at(&config.credentials(), &response, now) {
                Some(user) => println!("{user}"),
                None => {
                    eprintln!("{}", "Did not authenticate with Duo.".red());
                    std::process::exit(1);
                }
            }
        }

        Commands::GenerateAkey { length } => {
            if length < AKEY_MIN_LEN {
                anyhow::bail!("Application secret keys must be at least {AKEY_MIN_LEN} characters");
            }
            println!("{}", generate_application_key(length));
            eprintln!("{}", "Add this to your .env file as DUO_AKEY.".dimmed());
        }
    }

    Ok(())
}

/// Turn an optional `--time` flag into the clock value for sign/verify.
fn resolve_time(time: Option<i64>) -> Result<DateTime<Utc>> {
    match time {
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| anyhow::anyhow!("--time {secs} is out of range")),
        None => Ok(Utc::now()),
    }
}
