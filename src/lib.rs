//! GoPlus Guard Library
//!
//! Typed async client for the GoPlus Security API:
//! - Token security (honeypot, tax, ownership and holder risks)
//! - Malicious address lookup
//! - Token / NFT approval scans (v1 spender checks, v2 ERC-20/721/1155)
//! - NFT collection, dApp and phishing-site checks
//! - ABI input decoding and the access-token flow
//!
//! ```no_run
//! # async fn run() -> goplus_guard::GuardResult<()> {
//! let client = goplus_guard::GoPlusClient::new(None)?;
//! let report = client.token_security(56, "0x55d398326f99059fF775485246999027B3197955", None).await?;
//! println!("honeypot: {}", report.is_honeypot());
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod providers;
pub mod utils;

pub use models::{
    AccessToken, AccessTokenRequest, AddressSecurity, ApprovalSecurity, ChainId, ClientConfig,
    DappSecurity, Erc20ApprovalSecurity, ErrorCode, GuardError, GuardResult, InputDecode,
    LookupPolicy, NftApprovalSecurity, NftSecurity, PhishingSite, SupportedChain, TokenSecurity,
};
pub use providers::{Envelope, GoPlusClient};
pub use utils::endpoint::ApiVersion;
