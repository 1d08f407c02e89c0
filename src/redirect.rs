//! Client redirects carrying either the signed token or an error code.

// self
use crate::{_prelude::*, auth::SignedCredential};

/// Error codes understood by the native client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
	/// Assertion verification did not succeed.
	Failed,
	/// The claimed identifier is not a Steam identity URL.
	BadId,
	/// The signer could not mint a token.
	TokenCreationFailed,
}
impl ErrorCode {
	/// Returns the wire value placed in the `error` query parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorCode::Failed => "failed",
			ErrorCode::BadId => "bad_id",
			ErrorCode::TokenCreationFailed => "token_creation_failed",
		}
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Terminal result of a login completion.
#[derive(Clone, PartialEq, Eq)]
pub enum RedirectResult {
	/// Login succeeded; `location` carries the `token` query parameter.
	Success {
		/// Client redirect with the percent-encoded token.
		location: Url,
	},
	/// Login failed; `location` carries the `error` query parameter.
	Failure {
		/// Reported error code.
		code: ErrorCode,
		/// Client redirect with the error code.
		location: Url,
	},
}
impl RedirectResult {
	/// Builds the success redirect for `token` under the client redirect base.
	pub fn success(client_redirect: &Url, token: &SignedCredential) -> Self {
		Self::Success { location: with_single_pair(client_redirect, "token", token.expose()) }
	}

	/// Builds the failure redirect for `code` under the client redirect base.
	pub fn failure(client_redirect: &Url, code: ErrorCode) -> Self {
		Self::Failure { code, location: with_single_pair(client_redirect, "error", code.as_str()) }
	}

	/// Redirect target to send in the `Location` header.
	pub fn location(&self) -> &Url {
		match self {
			Self::Success { location } | Self::Failure { location, .. } => location,
		}
	}

	/// Error code for failed logins.
	pub fn error_code(&self) -> Option<ErrorCode> {
		match self {
			Self::Success { .. } => None,
			Self::Failure { code, .. } => Some(*code),
		}
	}

	/// Returns `true` when the redirect carries a token.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}
}
impl Debug for RedirectResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Success { .. } => f.debug_tuple("Success").field(&"<redacted>").finish(),
			Self::Failure { code, location } => f
				.debug_struct("Failure")
				.field("code", code)
				.field("location", &location.as_str())
				.finish(),
		}
	}
}

fn with_single_pair(base: &Url, key: &str, value: &str) -> Url {
	let mut location = base.clone();

	location.query_pairs_mut().clear().append_pair(key, value);

	location
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn client() -> Url {
		Url::parse("monhunsetselector://auth").expect("Client redirect fixture should parse.")
	}

	#[test]
	fn failure_redirects_use_wire_codes() {
		for (code, expected) in [
			(ErrorCode::Failed, "monhunsetselector://auth?error=failed"),
			(ErrorCode::BadId, "monhunsetselector://auth?error=bad_id"),
			(ErrorCode::TokenCreationFailed, "monhunsetselector://auth?error=token_creation_failed"),
		] {
			let redirect = RedirectResult::failure(&client(), code);

			assert_eq!(redirect.location().as_str(), expected);
			assert_eq!(redirect.error_code(), Some(code));
			assert!(!redirect.is_success());
		}
	}

	#[test]
	fn success_redirect_percent_encodes_token() {
		let token = SignedCredential::new("a+b/c=d.e_f-g");
		let redirect = RedirectResult::success(&client(), &token);

		assert_eq!(redirect.location().as_str(), "monhunsetselector://auth?token=a%2Bb%2Fc%3Dd.e_f-g");
		assert!(redirect.is_success());
		assert_eq!(redirect.error_code(), None);

		let (key, value) = redirect
			.location()
			.query_pairs()
			.next()
			.expect("Success redirect should carry exactly one query pair.");

		assert_eq!(key, "token");
		assert_eq!(value, token.expose());
	}

	#[test]
	fn debug_output_hides_token() {
		let redirect = RedirectResult::success(&client(), &SignedCredential::new("secret-token"));

		assert!(!format!("{redirect:?}").contains("secret-token"));
	}
}
