#![allow(dead_code)]

// std
use std::{
	collections::BTreeMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};
// crates.io
use httpmock::MockServer;
use time::OffsetDateTime;
// self
use steam_auth_bridge::{
	auth::{AccountClaims, AccountId, SignedCredential},
	config::{ApiKey, LoginConfig},
	flows::SteamLogin,
	http::ReqwestHttpClient,
	openid::{AssertionVerifier, OPENID2_NS, VerificationOutcome, VerifierFuture},
	reqwest::{Client, redirect::Policy},
	signer::{SignerError, SignerFuture, TokenSigner},
	url::Url,
};

pub const REALM: &str = "https://verifysteam.example.run.app/";
pub const RETURN_TO: &str = "https://verifysteam.example.run.app/verifySteam/";
pub const STEAM_ID: &str = "76561198000000000";
pub const CLAIMED_ID: &str = "https://steamcommunity.com/openid/id/76561198000000000";
pub const OP_PATH: &str = "/openid/login";
pub const SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v2/";
pub const API_KEY: &str = "test-web-api-key";
/// Contains characters that must be percent-encoded in a query value.
pub const TOKEN: &str = "eyJhbGciOiJSUzI1NiJ9.eyJ1aWQiOiJzdGVhbTo3NiJ9+/=.c2ln";

pub fn url(value: &str) -> Url {
	Url::parse(value).expect("URL fixture should parse.")
}

/// Config pointing both outbound calls at `server`.
pub fn config(server: &MockServer, api_key: Option<&str>) -> LoginConfig {
	let mut builder = LoginConfig::builder(url(REALM))
		.op_endpoint(url(&server.url(OP_PATH)))
		.player_summaries_endpoint(url(&server.url(SUMMARIES_PATH)));

	if let Some(api_key) = api_key.and_then(ApiKey::new) {
		builder = builder.api_key(api_key);
	}

	builder.build().expect("Login config fixture should build.")
}

/// Builds a client that accepts the self-signed certificates served by `httpmock`.
pub fn test_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.redirect(Policy::none())
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn login(config: LoginConfig, signer: Arc<dyn TokenSigner>) -> SteamLogin {
	SteamLogin::with_http_client(config, signer, test_http_client())
}

pub fn fresh_nonce() -> String {
	let now = OffsetDateTime::now_utc();

	format!(
		"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z0abc",
		now.year(),
		u8::from(now.month()),
		now.day(),
		now.hour(),
		now.minute(),
		now.second()
	)
}

/// A well-formed positive assertion naming `op_endpoint` and `claimed_id`.
pub fn positive_assertion(op_endpoint: &str, claimed_id: &str) -> BTreeMap<String, String> {
	[
		("openid.ns", OPENID2_NS.to_owned()),
		("openid.mode", "id_res".to_owned()),
		("openid.op_endpoint", op_endpoint.to_owned()),
		("openid.claimed_id", claimed_id.to_owned()),
		("openid.identity", claimed_id.to_owned()),
		("openid.return_to", RETURN_TO.to_owned()),
		("openid.response_nonce", fresh_nonce()),
		("openid.assoc_handle", "1234567890".to_owned()),
		(
			"openid.signed",
			"signed,op_endpoint,claimed_id,identity,return_to,response_nonce,assoc_handle".to_owned(),
		),
		("openid.sig", "W0u5DRbtHE1GG0ZKXjerUZDUGmc=".to_owned()),
	]
	.into_iter()
	.map(|(key, value)| (key.to_owned(), value))
	.collect()
}

/// Verifier double returning a fixed outcome.
pub struct FixedVerifier {
	outcome: VerificationOutcome,
	calls: AtomicUsize,
}
impl FixedVerifier {
	pub fn new(outcome: VerificationOutcome) -> Arc<Self> {
		Arc::new(Self { outcome, calls: AtomicUsize::new(0) })
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}
impl AssertionVerifier for FixedVerifier {
	fn complete<'a>(
		&'a self,
		_query: &'a BTreeMap<String, String>,
		_return_to: &'a Url,
	) -> VerifierFuture<'a> {
		Box::pin(async move {
			self.calls.fetch_add(1, Ordering::SeqCst);

			self.outcome.clone()
		})
	}
}

/// Signer double that records every request and returns [`TOKEN`].
#[derive(Default)]
pub struct RecordingSigner {
	requests: Mutex<Vec<(AccountId, AccountClaims)>>,
}
impl RecordingSigner {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn requests(&self) -> Vec<(AccountId, AccountClaims)> {
		self.requests.lock().expect("Signer request log should not be poisoned.").clone()
	}
}
impl TokenSigner for RecordingSigner {
	fn create_token<'a>(
		&'a self,
		account: &'a AccountId,
		claims: &'a AccountClaims,
	) -> SignerFuture<'a> {
		Box::pin(async move {
			self.requests
				.lock()
				.expect("Signer request log should not be poisoned.")
				.push((account.clone(), claims.clone()));

			Ok(SignedCredential::new(TOKEN))
		})
	}
}

/// Signer double that always fails.
pub struct FailingSigner;
impl TokenSigner for FailingSigner {
	fn create_token<'a>(
		&'a self,
		_account: &'a AccountId,
		_claims: &'a AccountClaims,
	) -> SignerFuture<'a> {
		Box::pin(async { Err(SignerError::Backend { message: "quota exceeded".into() }) })
	}
}
