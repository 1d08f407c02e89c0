//! Stateless OpenID 2.0 verifier for Steam.
//!
//! Steam only supports direct verification: the relying party checks the positive assertion
//! locally (namespace, return-to, provider endpoint, signed-field coverage, nonce freshness) and
//! then echoes it back to the provider with `openid.mode=check_authentication`. The provider
//! validates the signature, enforces nonce single-use, and answers `is_valid:true|false`.
//! Assertions naming any endpoint other than the configured one are rejected before the network
//! call, which also pins which identities the provider may assert.

// crates.io
use time::{PrimitiveDateTime, macros::format_description};
// self
use crate::{
	_prelude::*,
	http::ReqwestHttpClient,
	openid::{
		AssertionError, AssertionVerifier, OPENID2_NS, OpenIdMessage, VerificationOutcome,
		VerifierFuture, parse_key_value_form,
	},
};

const ENDPOINT_LABEL: &str = "Steam OpenID endpoint";
const NONCE_SKEW: Duration = Duration::hours(5);
const NONCE_TIMESTAMP_LEN: usize = 20;
const REQUIRED_SIGNED_FIELDS: [&str; 6] =
	["op_endpoint", "return_to", "response_nonce", "assoc_handle", "claimed_id", "identity"];

/// [`AssertionVerifier`] backed by Steam's `check_authentication` endpoint.
#[derive(Clone, Debug)]
pub struct SteamOpenIdVerifier {
	http_client: ReqwestHttpClient,
	op_endpoint: Url,
}
impl SteamOpenIdVerifier {
	/// Creates a verifier that trusts assertions from `op_endpoint` only.
	pub fn new(http_client: ReqwestHttpClient, op_endpoint: Url) -> Self {
		Self { http_client, op_endpoint }
	}

	/// OpenID provider endpoint assertions must name.
	pub fn op_endpoint(&self) -> &Url {
		&self.op_endpoint
	}

	/// Verifies an inbound callback, dispatching on `openid.mode`.
	pub async fn verify(
		&self,
		query: &BTreeMap<String, String>,
		return_to: &Url,
	) -> VerificationOutcome {
		let message = OpenIdMessage::from_query(query);

		if message.get("ns") != Some(OPENID2_NS) {
			let found = message.get("ns").map(str::to_owned);

			return VerificationOutcome::failure(
				AssertionError::UnsupportedNamespace { found }.to_string(),
			);
		}

		match message.mode() {
			Some("id_res") => match self.verify_positive(&message, query, return_to).await {
				Ok(claimed_id) => VerificationOutcome::success(claimed_id),
				Err(e) => VerificationOutcome::failure(e.to_string()),
			},
			Some("cancel") => VerificationOutcome::cancel(),
			Some("setup_needed") => VerificationOutcome::setup_needed(),
			Some("error") => VerificationOutcome::failure(
				message.get("error").unwrap_or("Provider reported an unspecified error."),
			),
			other => VerificationOutcome::failure(
				AssertionError::InvalidMode { found: other.map(str::to_owned) }.to_string(),
			),
		}
	}

	async fn verify_positive(
		&self,
		message: &OpenIdMessage,
		query: &BTreeMap<String, String>,
		return_to: &Url,
	) -> Result<String, AssertionError> {
		check_return_to(message, query, return_to)?;
		self.check_op_endpoint(message)?;

		let claimed_id = message.require("claimed_id")?;

		message.require("identity")?;
		check_signed_fields(message)?;
		check_nonce(message.require("response_nonce")?, OffsetDateTime::now_utc())?;
		self.check_authentication(message).await?;

		tracing::debug!(claimed_id, "Steam confirmed the assertion signature.");

		Ok(claimed_id.to_owned())
	}

	fn check_op_endpoint(&self, message: &OpenIdMessage) -> Result<(), AssertionError> {
		let received = message.require("op_endpoint")?;

		match Url::parse(received) {
			Ok(url) if url == self.op_endpoint => Ok(()),
			_ => Err(AssertionError::EndpointMismatch { received: received.to_owned() }),
		}
	}

	async fn check_authentication(&self, message: &OpenIdMessage) -> Result<(), AssertionError> {
		let request = self
			.http_client
			.post(self.op_endpoint.clone())
			.form(&message.check_authentication_form());
		let response = self.http_client.fetch(ENDPOINT_LABEL, request).await?;
		let fields = parse_key_value_form(&String::from_utf8_lossy(&response.bytes));

		if fields.get("is_valid").map(String::as_str) == Some("true") {
			Ok(())
		} else {
			Err(AssertionError::SignatureRejected)
		}
	}
}
impl AssertionVerifier for SteamOpenIdVerifier {
	fn complete<'a>(
		&'a self,
		query: &'a BTreeMap<String, String>,
		return_to: &'a Url,
	) -> VerifierFuture<'a> {
		Box::pin(self.verify(query, return_to))
	}
}

fn check_return_to(
	message: &OpenIdMessage,
	query: &BTreeMap<String, String>,
	expected: &Url,
) -> Result<(), AssertionError> {
	let raw = message.require("return_to")?;
	let mismatch =
		|| AssertionError::ReturnToMismatch { expected: expected.to_string(), received: raw.into() };
	let received = Url::parse(raw).map_err(|_| mismatch())?;

	if received.scheme() != expected.scheme()
		|| received.host_str() != expected.host_str()
		|| received.port_or_known_default() != expected.port_or_known_default()
		|| received.path() != expected.path()
	{
		return Err(mismatch());
	}

	for (name, value) in received.query_pairs() {
		if query.get(name.as_ref()).map(String::as_str) != Some(value.as_ref()) {
			return Err(AssertionError::ReturnToArgument { name: name.into_owned() });
		}
	}

	Ok(())
}

fn check_signed_fields(message: &OpenIdMessage) -> Result<(), AssertionError> {
	let signed = message.signed_fields();

	match REQUIRED_SIGNED_FIELDS.into_iter().find(|field| !signed.contains(field)) {
		Some(field) => Err(AssertionError::UnsignedField { field }),
		None => Ok(()),
	}
}

fn check_nonce(nonce: &str, now: OffsetDateTime) -> Result<(), AssertionError> {
	let stamp = nonce.get(..NONCE_TIMESTAMP_LEN).ok_or(AssertionError::MalformedNonce)?;
	let issued_at = PrimitiveDateTime::parse(
		stamp,
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z"),
	)
	.map_err(|_| AssertionError::MalformedNonce)?
	.assume_utc();

	if (now - issued_at).abs() > NONCE_SKEW {
		return Err(AssertionError::StaleNonce { issued_at });
	}

	Ok(())
}
