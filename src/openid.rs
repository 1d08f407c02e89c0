//! OpenID 2.0 assertion handling for Steam sign-in.
//!
//! `verifier` defines [`AssertionVerifier`], the seam the login flow completes assertions
//! through. `steam` provides [`SteamOpenIdVerifier`], a stateless verifier that checks the
//! positive assertion locally and then confirms its signature with Steam via
//! `check_authentication`. `message` parses `openid.*` parameters and key-value form bodies, and
//! `outcome` models the verification result.

pub mod message;
pub mod outcome;
pub mod steam;
pub mod verifier;

pub use message::*;
pub use outcome::*;
pub use steam::*;
pub use verifier::*;

// self
use crate::{_prelude::*, config::LoginConfig, error::TransportError};

/// OpenID 2.0 namespace URI.
pub const OPENID2_NS: &str = "http://specs.openid.net/auth/2.0";
/// Identifier-select URI that lets the provider choose the identity.
pub const IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

/// Reasons a positive assertion failed local or direct verification.
#[derive(Debug, ThisError)]
pub enum AssertionError {
	/// The message is not an OpenID 2.0 message.
	#[error("Unsupported OpenID namespace: {found:?}.")]
	UnsupportedNamespace {
		/// Namespace received, if any.
		found: Option<String>,
	},
	/// The message does not carry a recognized `openid.mode`.
	#[error("Invalid openid.mode: {found:?}.")]
	InvalidMode {
		/// Mode received, if any.
		found: Option<String>,
	},
	/// A required field is missing.
	#[error("Missing required field openid.{field}.")]
	MissingField {
		/// Field name without the `openid.` prefix.
		field: &'static str,
	},
	/// `openid.return_to` does not match the expected return-to URL.
	#[error("Return-to URL {received} does not match the expected {expected}.")]
	ReturnToMismatch {
		/// Expected return-to URL.
		expected: String,
		/// Return-to URL carried in the assertion.
		received: String,
	},
	/// A query argument of `openid.return_to` is absent from the request or differs.
	#[error("Return-to argument `{name}` does not match the request.")]
	ReturnToArgument {
		/// Argument name.
		name: String,
	},
	/// The assertion names an OpenID provider other than Steam.
	#[error("Assertion names unexpected OP endpoint {received}.")]
	EndpointMismatch {
		/// Endpoint carried in the assertion.
		received: String,
	},
	/// A field that must be covered by the signature is not listed in `openid.signed`.
	#[error("Field openid.{field} is not covered by the signature.")]
	UnsignedField {
		/// Field name without the `openid.` prefix.
		field: &'static str,
	},
	/// `openid.response_nonce` does not start with a valid timestamp.
	#[error("Response nonce is malformed.")]
	MalformedNonce,
	/// `openid.response_nonce` is outside the accepted clock skew.
	#[error("Response nonce timestamp {issued_at} is outside the accepted skew.")]
	StaleNonce {
		/// Timestamp parsed from the nonce.
		issued_at: OffsetDateTime,
	},
	/// The provider did not confirm the signature.
	#[error("Steam rejected check_authentication.")]
	SignatureRejected,
	/// Direct verification could not reach the provider.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Builds the `checkid_setup` URL that starts a Steam sign-in for `config`.
///
/// The native client opens this URL in a browser tab; Steam later redirects to
/// [`LoginConfig::return_to`] with the assertion parameters.
pub fn authorization_url(config: &LoginConfig) -> Url {
	let mut url = config.op_endpoint.clone();

	url.query_pairs_mut()
		.clear()
		.append_pair("openid.ns", OPENID2_NS)
		.append_pair("openid.mode", "checkid_setup")
		.append_pair("openid.return_to", config.return_to.as_str())
		.append_pair("openid.realm", config.realm.as_str())
		.append_pair("openid.identity", IDENTIFIER_SELECT)
		.append_pair("openid.claimed_id", IDENTIFIER_SELECT);

	url
}
