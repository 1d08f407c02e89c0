//! Firebase custom-token signer backed by a service-account key.
//!
//! Custom tokens are RS256 JWTs whose issuer and subject are the service account. They target the
//! Identity Toolkit audience, live for one hour, and carry the account `uid` plus optional
//! developer `claims`. The client exchanges them with `signInWithCustomToken`.

// std
use std::path::Path;
// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	auth::{AccountClaims, AccountId, SignedCredential},
	error::ConfigError,
	signer::{SignerError, SignerFuture, TokenSigner},
};

/// Audience Firebase expects in custom tokens.
pub const FIREBASE_AUDIENCE: &str =
	"https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

const TOKEN_LIFETIME: Duration = Duration::hours(1);
const MAX_UID_LEN: usize = 128;
const RESERVED_CLAIMS: [&str; 16] = [
	"acr", "amr", "at_hash", "aud", "auth_time", "azp", "cnf", "c_hash", "exp", "firebase", "iat",
	"iss", "jti", "nbf", "nonce", "sub",
];

/// Fields read from a Google service-account JSON document.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
	/// Service account e-mail; used as issuer and subject.
	pub client_email: String,
	/// PEM-encoded RSA private key.
	pub private_key: String,
	/// Key identifier placed in the JWT `kid` header.
	#[serde(default)]
	pub private_key_id: Option<String>,
}
impl Debug for ServiceAccountKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceAccountKey")
			.field("client_email", &self.client_email)
			.field("private_key", &"<redacted>")
			.field("private_key_id", &self.private_key_id)
			.finish()
	}
}

#[derive(Serialize)]
struct CustomTokenPayload<'a> {
	iss: &'a str,
	sub: &'a str,
	aud: &'static str,
	iat: i64,
	exp: i64,
	uid: &'a str,
	#[serde(skip_serializing_if = "Map::is_empty")]
	claims: &'a Map<String, Value>,
}

/// [`TokenSigner`] that mints Firebase custom tokens locally.
#[derive(Clone)]
pub struct FirebaseTokenSigner {
	client_email: String,
	key_id: Option<String>,
	encoding_key: EncodingKey,
}
impl FirebaseTokenSigner {
	/// Builds a signer from a parsed service-account key.
	pub fn new(account: ServiceAccountKey) -> Result<Self, ConfigError> {
		let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
			.map_err(|source| ConfigError::ServiceAccountKey { source })?;

		Ok(Self { client_email: account.client_email, key_id: account.private_key_id, encoding_key })
	}

	/// Builds a signer from a service-account JSON document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);
		let account: ServiceAccountKey = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| ConfigError::ServiceAccountParse { source })?;

		Self::new(account)
	}

	/// Builds a signer from a service-account JSON file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let json = std::fs::read_to_string(path)?;

		Self::from_json(&json)
	}

	/// Service account e-mail used as issuer.
	pub fn client_email(&self) -> &str {
		&self.client_email
	}

	/// Signs a custom token for `uid` with arbitrary developer `claims`, issued at `issued_at`.
	pub fn sign_custom(
		&self,
		uid: &str,
		claims: &Map<String, Value>,
		issued_at: OffsetDateTime,
	) -> Result<SignedCredential, SignerError> {
		let len = uid.chars().count();

		if len == 0 || len > MAX_UID_LEN {
			return Err(SignerError::InvalidUid { len, max: MAX_UID_LEN });
		}
		if let Some(claim) = claims.keys().find(|key| RESERVED_CLAIMS.contains(&key.as_str())) {
			return Err(SignerError::ReservedClaim { claim: claim.clone() });
		}

		let iat = issued_at.unix_timestamp();
		let payload = CustomTokenPayload {
			iss: &self.client_email,
			sub: &self.client_email,
			aud: FIREBASE_AUDIENCE,
			iat,
			exp: iat + TOKEN_LIFETIME.whole_seconds(),
			uid,
			claims,
		};
		let mut header = Header::new(Algorithm::RS256);

		header.kid = self.key_id.clone();

		let token = jsonwebtoken::encode(&header, &payload, &self.encoding_key)?;

		Ok(SignedCredential::new(token))
	}

	fn sign_account(
		&self,
		account: &AccountId,
		claims: &AccountClaims,
	) -> Result<SignedCredential, SignerError> {
		let claims = serde_json::to_value(claims)?.as_object().cloned().unwrap_or_default();

		self.sign_custom(account, &claims, OffsetDateTime::now_utc())
	}
}
impl TokenSigner for FirebaseTokenSigner {
	fn create_token<'a>(
		&'a self,
		account: &'a AccountId,
		claims: &'a AccountClaims,
	) -> SignerFuture<'a> {
		Box::pin(async move { self.sign_account(account, claims) })
	}
}
impl Debug for FirebaseTokenSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FirebaseTokenSigner")
			.field("client_email", &self.client_email)
			.field("key_id", &self.key_id)
			.finish_non_exhaustive()
	}
}
