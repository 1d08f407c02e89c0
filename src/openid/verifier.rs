//! Assertion verifier contract completing the OpenID exchange.

// self
use crate::{_prelude::*, openid::VerificationOutcome};

/// Future returned by [`AssertionVerifier::complete`].
pub type VerifierFuture<'a> = Pin<Box<dyn Future<Output = VerificationOutcome> + 'a + Send>>;

/// Completes the OpenID exchange for an inbound callback.
///
/// Implementations never fail outright: transport or validation problems surface as a
/// [`VerificationOutcome`] with [`super::VerificationStatus::Failure`] and a diagnostic message.
/// `return_to` must be exactly the URL registered under the realm, otherwise the assertion cannot
/// verify.
pub trait AssertionVerifier
where
	Self: Send + Sync,
{
	/// Verifies the assertion carried by `query` against the expected `return_to`.
	fn complete<'a>(
		&'a self,
		query: &'a BTreeMap<String, String>,
		return_to: &'a Url,
	) -> VerifierFuture<'a>;
}
