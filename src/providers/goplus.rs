//! GoPlus Security API Client
//!
//! One method per endpoint. Each call builds its URL, attaches the
//! `Authorization` header, sends a single request and passes the decoded
//! envelope through [`Envelope`] before shaping `result`.
//!
//! Authorization precedence, resolved on every call:
//! call-site token → client default → `""` (the header is always sent,
//! possibly empty). `supported_chains` and `get_access_token` send none.
//!
//! No retries, caching or rate limiting happen here; timeouts belong to the
//! underlying `reqwest::Client`.
//!
//! API: https://api.gopluslabs.io/api/v1, https://api.gopluslabs.io/api/v2

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::envelope::{Envelope, OneOrMany};
use crate::models::config::{ChainId, ClientConfig, LookupPolicy};
use crate::models::errors::{ErrorCode, GuardError, GuardResult};
use crate::models::types::{
    AccessToken, AccessTokenRequest, AddressSecurity, ApprovalSecurity, DappSecurity,
    Erc20ApprovalSecurity, InputDecode, InputDecodeRequest, NftApprovalSecurity, NftSecurity,
    PhishingSite, SupportedChain, TokenSecurity,
};
use crate::utils::endpoint::{join_addresses, ApiVersion, Endpoints};

/// GoPlus Security API client
#[derive(Clone)]
pub struct GoPlusClient {
    client: reqwest::Client,
    endpoints: Endpoints,
    auth_token: Option<String>,
    lookup_policy: LookupPolicy,
}

impl fmt::Debug for GoPlusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoPlusClient")
            .field("endpoints", &self.endpoints)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<hidden>"))
            .field("lookup_policy", &self.lookup_policy)
            .finish()
    }
}

impl GoPlusClient {
    /// Client for the public endpoints with an optional default token
    pub fn new(auth_token: Option<String>) -> GuardResult<Self> {
        let mut config = ClientConfig::default();
        config.auth_token = auth_token;
        Self::with_config(config)
    }

    /// Client with its own `reqwest::Client` built from `config`
    pub fn with_config(config: ClientConfig) -> GuardResult<Self> {
        let client = Self::build_client(&config)?;
        Self::with_http_client(config, client)
    }

    /// Client on top of a caller-provided `reqwest::Client`
    /// (`config.timeout` and `config.user_agent` are then up to that client)
    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> GuardResult<Self> {
        let endpoints = Endpoints::new(&config.base_url_v1, &config.base_url_v2)?;
        Ok(Self {
            client,
            endpoints,
            auth_token: config.auth_token,
            lookup_policy: config.lookup_policy,
        })
    }

    fn build_client(config: &ClientConfig) -> GuardResult<reqwest::Client> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| GuardError::invalid_config(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .gzip(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build().map_err(|e| {
            let message = format!("Failed to build HTTP client: {}", e);
            GuardError::with_source(ErrorCode::ConfigInvalidValue, message, e)
        })
    }

    // ============================================
    // DEFAULT TOKEN
    // ============================================

    /// Replace the default access token used when a call passes none
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.auth_token = Some(token.into());
    }

    pub fn clear_auth_token(&mut self) {
        self.auth_token = None;
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn lookup_policy(&self) -> LookupPolicy {
        self.lookup_policy
    }

    /// Call-site token, else default token, else `""`.
    /// Empty strings count as absent.
    pub fn resolve_auth<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .filter(|t| !t.is_empty())
            .or_else(|| self.auth_token.as_deref().filter(|t| !t.is_empty()))
            .unwrap_or("")
    }

    // ============================================
    // ENDPOINTS
    // ============================================

    /// Chains the service supports.
    ///
    /// The only call that skips the envelope failure check: `result` is
    /// returned as sent (a null result gives an empty list). Any error
    /// status is a transport error.
    pub async fn supported_chains(&self) -> GuardResult<Vec<SupportedChain>> {
        let url = self.endpoints.url(ApiVersion::V1, &["supported_chains"], &[])?;
        Self::send(self.get_request(url, None), EnvelopeCheck::Skipped)
            .await?
            .decode_unchecked()
    }

    /// Contract, trading and holder risk of one token.
    ///
    /// The contract is lower-cased before the request; the entry is picked
    /// from the keyed result per the client's [`LookupPolicy`].
    pub async fn token_security(
        &self,
        chain_id: impl Into<ChainId>,
        contract: &str,
        auth_token: Option<&str>,
    ) -> GuardResult<TokenSecurity> {
        let chain_id: ChainId = chain_id.into();
        let contract = contract.trim().to_lowercase();
        let url = self.endpoints.url(
            ApiVersion::V1,
            &["token_security", chain_id.as_str()],
            &[("contract_addresses", contract.as_str())],
        )?;
        self.get(url, Some(self.resolve_auth(auth_token)))
            .await?
            .token_security(&contract, self.lookup_policy)
    }

    /// Malicious-address lookup
    pub async fn address_security(
        &self,
        chain_id: impl Into<ChainId>,
        address: &str,
        auth_token: Option<&str>,
    ) -> GuardResult<AddressSecurity> {
        let chain_id: ChainId = chain_id.into();
        let url = self.endpoints.url(
            ApiVersion::V1,
            &["address_security", address.trim()],
            &[("chain_id", chain_id.as_str())],
        )?;
        self.get(url, Some(self.resolve_auth(auth_token))).await?.decode()
    }

    /// Risk of spender contract(s) that received approvals
    pub async fn approval_security<S: AsRef<str>>(
        &self,
        chain_id: impl Into<ChainId>,
        contracts: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<ApprovalSecurity> {
        let chain_id: ChainId = chain_id.into();
        let contracts = join_addresses(contracts);
        let url = self.endpoints.url(
            ApiVersion::V1,
            &["approval_security", chain_id.as_str()],
            &[("contract_addresses", contracts.as_str())],
        )?;
        self.get(url, Some(self.resolve_auth(auth_token))).await?.decode()
    }

    /// ERC-20 approvals granted by the given owner address(es)
    pub async fn erc20_approval_security<S: AsRef<str>>(
        &self,
        chain_id: impl Into<ChainId>,
        addresses: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<Vec<Erc20ApprovalSecurity>> {
        self.approval_scan("token_approval_security", chain_id.into(), addresses, auth_token)
            .await
    }

    /// ERC-721 approvals granted by the given owner address(es)
    pub async fn erc721_approval_security<S: AsRef<str>>(
        &self,
        chain_id: impl Into<ChainId>,
        addresses: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<Vec<NftApprovalSecurity>> {
        self.approval_scan("nft721_approval_security", chain_id.into(), addresses, auth_token)
            .await
    }

    /// ERC-1155 approvals granted by the given owner address(es)
    pub async fn erc1155_approval_security<S: AsRef<str>>(
        &self,
        chain_id: impl Into<ChainId>,
        addresses: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<Vec<NftApprovalSecurity>> {
        self.approval_scan("nft1155_approval_security", chain_id.into(), addresses, auth_token)
            .await
    }

    async fn approval_scan<T, S>(
        &self,
        resource: &str,
        chain_id: ChainId,
        addresses: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
        S: AsRef<str>,
    {
        let addresses = join_addresses(addresses);
        let url = self.endpoints.url(
            ApiVersion::V2,
            &[resource, chain_id.as_str()],
            &[("addresses", addresses.as_str())],
        )?;
        let records: OneOrMany<T> = self
            .get(url, Some(self.resolve_auth(auth_token)))
            .await?
            .decode()?;
        Ok(records.into())
    }

    /// NFT collection authenticity and market data
    pub async fn nft_security<S: AsRef<str>>(
        &self,
        chain_id: impl Into<ChainId>,
        contracts: &[S],
        auth_token: Option<&str>,
    ) -> GuardResult<NftSecurity> {
        let chain_id: ChainId = chain_id.into();
        let contracts = join_addresses(contracts);
        let url = self.endpoints.url(
            ApiVersion::V1,
            &["nft_security", chain_id.as_str()],
            &[("contract_addresses", contracts.as_str())],
        )?;
        self.get(url, Some(self.resolve_auth(auth_token))).await?.decode()
    }

    /// Audit and contract info for a dApp site
    pub async fn dapp_security(
        &self,
        site_url: &str,
        auth_token: Option<&str>,
    ) -> GuardResult<DappSecurity> {
        let url = self
            .endpoints
            .url(ApiVersion::V1, &["dapp_security"], &[("url", site_url.trim())])?;
        self.get(url, Some(self.resolve_auth(auth_token))).await?.decode()
    }

    /// Phishing-site flag for a URL
    pub async fn phishing_site(
        &self,
        site_url: &str,
        auth_token: Option<&str>,
    ) -> GuardResult<PhishingSite> {
        let url = self
            .endpoints
            .url(ApiVersion::V1, &["phishing_site"], &[("url", site_url.trim())])?;
        self.get(url, Some(self.resolve_auth(auth_token))).await?.decode()
    }

    /// Decode contract call data against the target's ABI
    pub async fn input_decode(
        &self,
        chain_id: impl Into<ChainId>,
        data: &str,
        contract_address: Option<&str>,
        auth_token: Option<&str>,
    ) -> GuardResult<InputDecode> {
        let chain_id: ChainId = chain_id.into();
        let body = InputDecodeRequest {
            chain_id: chain_id.to_string(),
            contract_address: contract_address.map(str::to_string),
            data: data.to_string(),
        };
        let url = self
            .endpoints
            .url(ApiVersion::V1, &["abi", "input_decode"], &[])?;
        self.post(url, &body, Some(self.resolve_auth(auth_token)))
            .await?
            .decode()
    }

    /// Exchange an app key and caller-computed signature for an access token
    pub async fn get_access_token(&self, request: &AccessTokenRequest) -> GuardResult<AccessToken> {
        let url = self.endpoints.url(ApiVersion::V1, &["token"], &[])?;
        self.post(url, request, None).await?.decode()
    }

    // ============================================
    // TRANSPORT
    // ============================================

    async fn get(&self, url: Url, authorization: Option<&str>) -> GuardResult<Envelope> {
        Self::send(self.get_request(url, authorization), EnvelopeCheck::Checked).await
    }

    fn get_request(&self, url: Url, authorization: Option<&str>) -> reqwest::RequestBuilder {
        debug!("🔍 GoPlus: GET {}", url.path());
        let mut request = self.client.get(url);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        request
    }

    async fn post<B: Serialize>(
        &self,
        url: Url,
        body: &B,
        authorization: Option<&str>,
    ) -> GuardResult<Envelope> {
        debug!("🔍 GoPlus: POST {}", url.path());
        let mut request = self.client.post(url).json(body);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        Self::send(request, EnvelopeCheck::Checked).await
    }

    /// Send and decode the envelope.
    ///
    /// A non-2xx status never succeeds. With [`EnvelopeCheck::Checked`] an
    /// error body whose envelope signals a failure keeps its remote code and
    /// text; every other error status is [`ErrorCode::TransportStatus`].
    async fn send(request: reqwest::RequestBuilder, check: EnvelopeCheck) -> GuardResult<Envelope> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            let envelope: Envelope = serde_json::from_slice(&body)?;
            debug!("📦 GoPlus: HTTP {} envelope code {}", status.as_u16(), envelope.code);
            return Ok(envelope);
        }

        debug!("❌ GoPlus: HTTP {}", status.as_u16());
        let remote = match check {
            EnvelopeCheck::Checked => Envelope::from_error_body(&body).and_then(|e| e.failure()),
            EnvelopeCheck::Skipped => None,
        };
        Err(remote.unwrap_or_else(|| GuardError::http_status(status)))
    }
}

/// Whether a call reads remote failures out of error-status bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnvelopeCheck {
    Checked,
    Skipped,
}
