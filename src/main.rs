//! GoPlus Guard CLI
//!
//! Queries one GoPlus Security endpoint and prints the typed result as JSON.
//!
//! Usage:
//!   goplus-guard token 56 0x55d398326f99059fF775485246999027B3197955
//!   goplus-guard --token <ACCESS_TOKEN> erc20-approvals 1 0xowner
//!
//! Environment:
//!   GOPLUS_ACCESS_TOKEN  - Default access token
//!   GOPLUS_API_V1_URL    - v1 base URL override
//!   GOPLUS_API_V2_URL    - v2 base URL override
//!   GOPLUS_TIMEOUT_SECS  - HTTP timeout
//!   RUST_LOG             - Log level (default: info)

use clap::{Parser, Subcommand};
use eyre::Result;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use goplus_guard::utils::constants::{APP_NAME, APP_VERSION};
use goplus_guard::{AccessTokenRequest, ChainId, ClientConfig, GoPlusClient, LookupPolicy};

#[derive(Parser)]
#[command(name = "goplus-guard", version, about = "GoPlus Security API lookups")]
struct Cli {
    /// Access token for this call (overrides GOPLUS_ACCESS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// Take the first token-security entry instead of matching the address
    #[arg(long, global = true)]
    first_entry: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported chains
    Chains,
    /// Token security report
    Token { chain_id: String, contract: String },
    /// Malicious address lookup
    Address { chain_id: String, address: String },
    /// Spender contract approval risk (v1)
    Approval {
        chain_id: String,
        #[arg(required = true)]
        contracts: Vec<String>,
    },
    /// ERC-20 approvals held by owner address(es)
    Erc20Approvals {
        chain_id: String,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// NFT collection security
    Nft {
        chain_id: String,
        #[arg(required = true)]
        contracts: Vec<String>,
    },
    /// ERC-721 approvals held by owner address(es)
    Erc721Approvals {
        chain_id: String,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// ERC-1155 approvals held by owner address(es)
    Erc1155Approvals {
        chain_id: String,
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// dApp audit info for a site
    Dapp { url: String },
    /// Phishing-site check
    Phishing { url: String },
    /// Decode contract call data
    Decode {
        chain_id: String,
        data: String,
        #[arg(long)]
        contract: Option<String>,
    },
    /// Exchange app key + signature for an access token
    AccessToken {
        app_key: String,
        sign: String,
        /// Unix time the signature was computed for (default: now)
        #[arg(long)]
        time: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    info!("🛡️ {} v{}", APP_NAME, APP_VERSION);

    let mut config = ClientConfig::from_env()?;
    if cli.first_entry {
        config.lookup_policy = LookupPolicy::FirstEntry;
    }
    let client = GoPlusClient::with_config(config)?;
    let token = cli.token.as_deref();

    match cli.command {
        Command::Chains => print_json(&client.supported_chains().await?)?,
        Command::Token { chain_id, contract } => {
            let chain = ChainId::from(chain_id);
            info!("🔍 Token security for {} on {} ({})", contract, chain.name(), chain);
            let report = client.token_security(chain, &contract, token).await?;
            let flags = report.risk_flags();
            if flags.is_empty() {
                info!("✅ No risk flags raised for {}", report.address);
            } else {
                info!("⚠️ Risk flags for {}: {}", report.address, flags.join(", "));
            }
            print_json(&report)?;
        }
        Command::Address { chain_id, address } => {
            let chain = ChainId::from(chain_id);
            info!("🔍 Address security for {} on {} ({})", address, chain.name(), chain);
            let report = client.address_security(chain, &address, token).await?;
            if report.is_malicious() {
                info!("🚨 {} flagged: {}", address, report.flagged_categories().join(", "));
            }
            print_json(&report)?;
        }
        Command::Approval { chain_id, contracts } => {
            print_json(&client.approval_security(chain_id, &contracts, token).await?)?
        }
        Command::Erc20Approvals { chain_id, addresses } => {
            print_json(&client.erc20_approval_security(chain_id, &addresses, token).await?)?
        }
        Command::Nft { chain_id, contracts } => {
            print_json(&client.nft_security(chain_id, &contracts, token).await?)?
        }
        Command::Erc721Approvals { chain_id, addresses } => {
            print_json(&client.erc721_approval_security(chain_id, &addresses, token).await?)?
        }
        Command::Erc1155Approvals { chain_id, addresses } => {
            print_json(&client.erc1155_approval_security(chain_id, &addresses, token).await?)?
        }
        Command::Dapp { url } => print_json(&client.dapp_security(&url, token).await?)?,
        Command::Phishing { url } => {
            let site = client.phishing_site(&url, token).await?;
            if site.is_phishing() {
                info!("🚨 {} is a known phishing site", url);
            }
            print_json(&site)?;
        }
        Command::Decode { chain_id, data, contract } => {
            let decoded = client
                .input_decode(chain_id, &data, contract.as_deref(), token)
                .await?;
            print_json(&decoded)?;
        }
        Command::AccessToken { app_key, sign, time } => {
            let request = match time {
                Some(time) => AccessTokenRequest::new(app_key, time, sign),
                None => AccessTokenRequest::now(app_key, sign),
            };
            let access = client.get_access_token(&request).await?;
            info!("🔑 Access token expires at {}", access.expires_at(chrono::Utc::now()));
            print_json(&access)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
