//! Signed credential wrapper that redacts the token from logs.

// self
use crate::{_prelude::*, signer::SignerError};

/// Opaque signed token handed to the native client.
///
/// The bridge never inspects the token; it only forwards it inside the success redirect.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedCredential(String);
impl SignedCredential {
	/// Wraps a textual token.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Wraps a token emitted as raw bytes, which must be UTF-8.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SignerError> {
		String::from_utf8(bytes)
			.map(Self)
			.map_err(|source| SignerError::NonUtf8Token { source })
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for SignedCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SignedCredential").field(&"<redacted>").finish()
	}
}
impl Display for SignedCredential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
