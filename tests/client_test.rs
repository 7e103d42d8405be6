//! GoPlus client tests against an in-process mock of the service.
//!
//! Run with: cargo test --test client_test

mod common;

use common::{Canned, MockServer};
use goplus_guard::{AccessToken, AccessTokenRequest, ErrorCode, GoPlusClient, LookupPolicy};
use serde_json::json;

const OK_OBJECT: &str = "/api/v1/address_security/0xbad";

fn ok(result: serde_json::Value) -> Canned {
    Canned::json(json!({"code": 1, "message": "OK", "result": result}))
}

fn address_result() -> serde_json::Value {
    json!({
        "data_source": "",
        "honeypot_related_address": "0",
        "phishing_activities": "1",
        "cybercrime": "0",
        "contract_address": "0"
    })
}

// ============================================
// Authorization header
// ============================================

#[tokio::test]
async fn test_explicit_token_beats_default() {
    let server = MockServer::start(vec![(OK_OBJECT, ok(address_result()))]).await;
    let client = GoPlusClient::with_config(server.config().with_auth_token("default-token")).unwrap();

    client.address_security(1, "0xbad", Some("call-token")).await.unwrap();

    assert_eq!(server.last_request().authorization.as_deref(), Some("call-token"));
}

#[tokio::test]
async fn test_default_token_used_without_explicit() {
    let server = MockServer::start(vec![(OK_OBJECT, ok(address_result()))]).await;
    let client = GoPlusClient::with_config(server.config().with_auth_token("default-token")).unwrap();

    client.address_security(1, "0xbad", None).await.unwrap();

    assert_eq!(server.last_request().authorization.as_deref(), Some("default-token"));
}

#[tokio::test]
async fn test_empty_authorization_header_without_any_token() {
    let server = MockServer::start(vec![(OK_OBJECT, ok(address_result()))]).await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let report = client.address_security(1, "0xbad", None).await.unwrap();

    // Present but empty, not absent
    assert_eq!(server.last_request().authorization.as_deref(), Some(""));
    assert_eq!(report.flagged_categories(), vec!["phishing_activities"]);
}

#[tokio::test]
async fn test_rotated_default_token_applies_to_next_call() {
    let server = MockServer::start(vec![(OK_OBJECT, ok(address_result()))]).await;
    let mut client = GoPlusClient::with_config(server.config().with_auth_token("old")).unwrap();

    client.address_security(1, "0xbad", None).await.unwrap();
    client.set_auth_token("new");
    client.address_security(1, "0xbad", None).await.unwrap();

    let auths: Vec<_> = server
        .requests()
        .into_iter()
        .map(|r| r.authorization.unwrap_or_default())
        .collect();
    assert_eq!(auths, vec!["old".to_string(), "new".to_string()]);
}

// ============================================
// Supported chains
// ============================================

#[tokio::test]
async fn test_supported_chains_round_trips_result() {
    let server = MockServer::start(vec![(
        "/api/v1/supported_chains",
        ok(json!([{"id": "1", "name": "Ethereum"}])),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config().with_auth_token("t")).unwrap();

    let chains = client.supported_chains().await.unwrap();

    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].id, "1");
    assert_eq!(chains[0].name, "Ethereum");
    let request = server.last_request();
    assert_eq!(request.method, "GET");
    assert!(request.authorization.is_none());
}

#[tokio::test]
async fn test_supported_chains_skips_envelope_check() {
    let server = MockServer::start(vec![(
        "/api/v1/supported_chains",
        Canned::json(json!({
            "code": 2, "message": "partial", "msg": "degraded",
            "result": [{"id": "56", "name": "BSC"}]
        })),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let chains = client.supported_chains().await.unwrap();
    assert_eq!(chains[0].id, "56");
}

#[tokio::test]
async fn test_supported_chains_error_status_is_transport_error() {
    let server = MockServer::start(vec![(
        "/api/v1/supported_chains",
        Canned::with_status(500, json!({"message": "internal error"}).to_string()),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let err = client.supported_chains().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TransportStatus);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_supported_chains_ignores_envelope_on_error_status() {
    let server = MockServer::start(vec![(
        "/api/v1/supported_chains",
        Canned::with_status(
            503,
            json!({"code": 4029, "message": "limit", "msg": "request limit reached", "result": null})
                .to_string(),
        ),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let err = client.supported_chains().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TransportStatus);
    assert_eq!(err.remote_code(), None);
}

// ============================================
// Token security
// ============================================

#[tokio::test]
async fn test_token_security_lowercases_and_matches_key() {
    let server = MockServer::start(vec![(
        "/api/v1/token_security/1",
        ok(json!({"0xabc": {"is_honeypot": "1", "token_symbol": "HP"}})),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let report = client.token_security(1, "0xABC", None).await.unwrap();

    assert_eq!(report.address, "0xabc");
    assert!(report.is_honeypot());
    assert_eq!(report.token_symbol.as_deref(), Some("HP"));
    assert_eq!(
        server.last_request().query.as_deref(),
        Some("contract_addresses=0xabc")
    );
}

#[tokio::test]
async fn test_token_security_strict_policy_rejects_other_key() {
    let server = MockServer::start(vec![(
        "/api/v1/token_security/1",
        ok(json!({"0xdef": {"is_honeypot": "0"}})),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();
    assert_eq!(client.lookup_policy(), LookupPolicy::StrictKey);

    let err = client.token_security(1, "0xABC", None).await.unwrap_err();

    assert_eq!(err.to_string(), "Information not found");
    assert_eq!(err.code, ErrorCode::InformationNotFound);
}

#[tokio::test]
async fn test_token_security_first_entry_policy_takes_first_key() {
    let server = MockServer::start(vec![(
        "/api/v1/token_security/1",
        ok(json!({"0xdef": {"is_honeypot": "0"}})),
    )])
    .await;
    let config = server.config().with_lookup_policy(LookupPolicy::FirstEntry);
    let client = GoPlusClient::with_config(config).unwrap();

    let report = client.token_security(1, "0xABC", None).await.unwrap();

    assert_eq!(report.address, "0xdef");
    assert!(!report.is_honeypot());
}

#[tokio::test]
async fn test_token_security_array_result_means_no_audits() {
    let server = MockServer::start(vec![("/api/v1/token_security/56", ok(json!([])))]).await;

    let strict = GoPlusClient::with_config(server.config()).unwrap();
    let err = strict.token_security(56, "0xabc", None).await.unwrap_err();
    assert_eq!(err.to_string(), "Contract audits not detected");

    let legacy = GoPlusClient::with_config(
        server.config().with_lookup_policy(LookupPolicy::FirstEntry),
    )
    .unwrap();
    let err = legacy.token_security(56, "0xabc", None).await.unwrap_err();
    assert_eq!(err.to_string(), "No contract audits not detected");
}

// ============================================
// Access token
// ============================================

#[tokio::test]
async fn test_get_access_token() {
    let server = MockServer::start(vec![(
        "/api/v1/token",
        ok(json!({"access_token": "tok", "expires_in": 3600})),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config().with_auth_token("ignored")).unwrap();

    let request = AccessTokenRequest::new("app-key", 1_700_000_000, "signature");
    let token = client.get_access_token(&request).await.unwrap();

    assert_eq!(
        token,
        AccessToken { access_token: "tok".to_string(), expires_in: 3600 }
    );
    let recorded = server.last_request();
    assert_eq!(recorded.method, "POST");
    assert!(recorded.authorization.is_none());
    assert_eq!(
        recorded.body,
        Some(json!({"app_key": "app-key", "time": 1_700_000_000, "sign": "signature"}))
    );
}

// ============================================
// Remaining endpoints
// ============================================

#[tokio::test]
async fn test_input_decode_posts_body() {
    let server = MockServer::start(vec![(
        "/api/v1/abi/input_decode",
        ok(json!({
            "method": "approve",
            "params": [{"type": "address", "name": "spender", "input": "0xspender",
                        "address_info": [{"standard": null, "symbol": "", "name": "",
                                          "contract_name": "Drainer", "malicious_address": 1,
                                          "is_contract": 1}]}]
        })),
    )])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let decoded = client
        .input_decode(56, "0x095ea7b3", Some("0xtoken"), Some("tok"))
        .await
        .unwrap();

    assert_eq!(decoded.method, "approve");
    let info = decoded.params[0].address_info.as_ref().unwrap();
    assert_eq!(info[0].malicious_address, Some(1));

    let recorded = server.last_request();
    assert_eq!(recorded.authorization.as_deref(), Some("tok"));
    assert_eq!(
        recorded.body,
        Some(json!({"chain_id": "56", "contract_address": "0xtoken", "data": "0x095ea7b3"}))
    );
}

#[tokio::test]
async fn test_dapp_and_phishing_encode_site_url() {
    let server = MockServer::start(vec![
        (
            "/api/v1/phishing_site",
            ok(json!({"phishing_site": 1})),
        ),
        (
            "/api/v1/dapp_security",
            ok(json!({
                "project_name": "Example",
                "url": "https://app.example/?ref=a&b=c",
                "is_audit": 1,
                "audit_info": [{"audit_time": "2023", "audit_link": "l", "audit_firm": "f"}],
                "contracts_security": [{"chain_id": "1", "contracts": [{
                    "contract_address": "0xc", "is_open_source": 1, "creator_address": "0xd",
                    "malicious_contract": 0, "deployment_time": 1650000000, "malicious_creator": 0
                }]}]
            })),
        ),
    ])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();
    let site = "https://app.example/?ref=a&b=c";

    let phishing = client.phishing_site(site, None).await.unwrap();
    assert!(phishing.is_phishing());
    assert_eq!(
        server.last_request().query.as_deref(),
        Some("url=https%3A%2F%2Fapp.example%2F%3Fref%3Da%26b%3Dc")
    );

    let dapp = client.dapp_security(site, None).await.unwrap();
    assert_eq!(dapp.project_name.as_deref(), Some("Example"));
    assert_eq!(dapp.contracts_security[0].contracts[0].contract_address, "0xc");
}

#[tokio::test]
async fn test_approval_and_nft_v1_paths() {
    let server = MockServer::start(vec![
        (
            "/api/v1/approval_security/1",
            ok(json!({
                "contract_name": "Router", "tag": null, "is_contract": "1",
                "creator_address": "0xc", "deployed_time": 1600000000,
                "is_open_source": "1", "is_proxy": "0", "trust_list": "1",
                "doubt_list": "0", "malicious_behavior": []
            })),
        ),
        (
            "/api/v1/nft_security/1",
            ok(json!({
                "nft_name": "Apes", "nft_symbol": "APE", "nft_description": null,
                "nft_erc": "erc721", "nft_items": 10000, "nft_owner_number": 6000,
                "average_price_24h": 12.5, "nft_verified": 1, "same_nfts": [], "trust_list": 1
            })),
        ),
    ])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let approval = client
        .approval_security(1, &["0xspender", "0xother"], None)
        .await
        .unwrap();
    assert_eq!(approval.contract_name.as_deref(), Some("Router"));
    assert_eq!(
        server.last_request().query.as_deref(),
        Some("contract_addresses=0xspender%2C0xother")
    );

    let nft = client.nft_security(1, &["0xapes"], None).await.unwrap();
    assert_eq!(nft.nft_items, Some(10000));
    assert!(nft.nft_description.is_none());
}

#[tokio::test]
async fn test_v2_approval_scans() {
    let approval_entry = json!({
        "approved_contract": "0xspender",
        "approved_amount": "Unlimited",
        "approved_time": 1690000000,
        "initial_approval_time": 1680000000,
        "initial_approval_hash": "0xh0",
        "hash": "0xh1",
        "address_info": {
            "contract_name": "Drainer", "tag": null, "creator_address": "0xc",
            "is_contract": 1, "doubt_list": 1, "malicious_behavior": [],
            "deployed_time": 1600000000, "trust_list": 0, "is_open_source": 0
        }
    });
    let server = MockServer::start(vec![
        (
            "/api/v2/token_approval_security/1",
            ok(json!([{
                "token_address": "0xusdt", "chain_id": "1", "token_name": "Tether",
                "token_symbol": "USDT", "decimals": 6, "balance": "10",
                "is_open_source": 1, "malicious_address": 0, "malicious_behavior": [],
                "approved_list": [approval_entry.clone()]
            }])),
        ),
        (
            "/api/v2/nft721_approval_security/1",
            // Single object instead of a list
            ok(json!({
                "nft_address": "0xapes", "chain_id": "1", "nft_name": "Apes",
                "nft_symbol": "APE", "is_open_source": 1, "is_verified": 1,
                "malicious_address": 0, "malicious_behavior": [],
                "approved_list": [{
                    "approved_contract": "0xmarket", "initial_approval_time": 1,
                    "initial_approval_hash": "0x", "approved_time": 2, "hash": "0x",
                    "approved_for_all": 1, "approved_token_id": null, "address_info": null
                }]
            })),
        ),
        ("/api/v2/nft1155_approval_security/1", ok(json!([]))),
    ])
    .await;
    let client = GoPlusClient::with_config(server.config()).unwrap();

    let erc20 = client
        .erc20_approval_security(1, &["0xowner"], None)
        .await
        .unwrap();
    assert_eq!(erc20.len(), 1);
    let spender = erc20[0].approved_list[0].address_info.as_ref().unwrap();
    assert!(spender.is_suspicious());
    assert_eq!(server.last_request().query.as_deref(), Some("addresses=0xowner"));

    let erc721 = client
        .erc721_approval_security(1, &["0xowner"], None)
        .await
        .unwrap();
    assert_eq!(erc721.len(), 1);
    assert_eq!(erc721[0].approved_list[0].approved_for_all, Some(1));

    let erc1155 = client
        .erc1155_approval_security(1, &["0xowner"], None)
        .await
        .unwrap();
    assert!(erc1155.is_empty());
}
