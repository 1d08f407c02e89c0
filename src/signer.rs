//! Credential signing contracts and the built-in Firebase custom-token signer.

pub mod firebase;

pub use firebase::*;

// self
use crate::{
	_prelude::*,
	auth::{AccountClaims, AccountId, SignedCredential},
};

/// Future returned by [`TokenSigner::create_token`].
pub type SignerFuture<'a> =
	Pin<Box<dyn Future<Output = Result<SignedCredential, SignerError>> + 'a + Send>>;

/// Mints a signed custom credential for an account.
///
/// The bridge treats the result as opaque; any error maps to the `token_creation_failed`
/// redirect.
pub trait TokenSigner
where
	Self: Send + Sync,
{
	/// Signs a credential for `account` embedding `claims`.
	fn create_token<'a>(
		&'a self,
		account: &'a AccountId,
		claims: &'a AccountClaims,
	) -> SignerFuture<'a>;
}

/// Error type produced by [`TokenSigner`] implementations.
#[derive(Debug, ThisError)]
pub enum SignerError {
	/// The account identifier is outside the signer's accepted length.
	#[error("Account identifier must be between 1 and {max} characters, got {len}.")]
	InvalidUid {
		/// Length of the rejected identifier.
		len: usize,
		/// Maximum permitted length.
		max: usize,
	},
	/// A developer claim collides with a reserved JWT/Firebase claim name.
	#[error("Claim `{claim}` is reserved and cannot be used as a developer claim.")]
	ReservedClaim {
		/// Offending claim name.
		claim: String,
	},
	/// Claims could not be serialized.
	#[error("Developer claims could not be serialized.")]
	Serialize(#[from] serde_json::Error),
	/// JWT encoding or signing failed.
	#[error("Token signing failed.")]
	Signing(#[from] jsonwebtoken::errors::Error),
	/// The signer emitted a token that is not valid UTF-8.
	#[error("Signer emitted a token that is not valid UTF-8.")]
	NonUtf8Token {
		/// Underlying decoding failure.
		#[source]
		source: std::string::FromUtf8Error,
	},
	/// Remote or backend signer failure (quota, transient outage).
	#[error("Signer backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
