//! Bridge-level error types shared across the login stages.

// self
use crate::{_prelude::*, openid::VerificationStatus, redirect::ErrorCode, signer::SignerError};

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bridge error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, unexpected HTTP status).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The OpenID provider did not return a positive, verifiable assertion.
	#[error("Steam assertion was not accepted ({status}): {message}.")]
	AssertionRejected {
		/// Status reported by the assertion verifier.
		status: VerificationStatus,
		/// Diagnostic message attached to the outcome.
		message: String,
	},
	/// The claimed identifier does not follow the Steam identity URL template.
	#[error("Claimed identifier `{claimed_id}` is not a Steam identity URL.")]
	BadIdentity {
		/// Claimed identifier returned by the provider.
		claimed_id: String,
	},
	/// The token signer refused or failed to mint a credential.
	#[error("Custom token could not be created.")]
	TokenCreation(#[from] SignerError),
}
impl Error {
	/// Maps the error onto the code sent back to the native client.
	///
	/// Configuration and transport failures never reach the client verbatim; they collapse into
	/// [`ErrorCode::Failed`] so the login fails closed.
	pub fn error_code(&self) -> ErrorCode {
		match self {
			Self::BadIdentity { .. } => ErrorCode::BadId,
			Self::TokenCreation(_) => ErrorCode::TokenCreationFailed,
			Self::Config(_) | Self::Transport(_) | Self::AssertionRejected { .. } =>
				ErrorCode::Failed,
		}
	}
}

/// Configuration and validation failures raised while assembling the bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL cannot be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Which setting failed to parse.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Realm and return-to URLs must use HTTPS.
	#[error("The {field} URL must use HTTPS: {url}.")]
	InsecureUrl {
		/// Which setting failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// OpenID requires the return-to URL to live under the realm.
	#[error("Return-to URL {return_to} is not covered by realm {realm}.")]
	ReturnToOutsideRealm {
		/// Configured realm.
		realm: String,
		/// Configured return-to URL.
		return_to: String,
	},
	/// The client redirect base must not carry its own query.
	#[error("Client redirect {url} must not contain a query string.")]
	ClientRedirectHasQuery {
		/// Offending client redirect URL.
		url: String,
	},
	/// A required environment variable is not set.
	#[error("Environment variable `{name}` is not set.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// The service account document could not be read.
	#[error("Service account could not be read.")]
	ServiceAccountIo(#[from] std::io::Error),
	/// The service account document is not valid JSON or misses fields.
	#[error("Service account JSON is malformed.")]
	ServiceAccountParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The service account private key is not a valid RSA PEM.
	#[error("Service account private key is not a valid RSA PEM.")]
	ServiceAccountKey {
		/// Underlying key parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, HTTP status).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint}.")]
	Network {
		/// Logical endpoint label.
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The endpoint answered with a non-success status.
	#[error("The {endpoint} responded with HTTP {status}.")]
	Status {
		/// Logical endpoint label.
		endpoint: &'static str,
		/// HTTP status code.
		status: u16,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	///
	/// Reqwest errors are stripped of their URL first, since query strings may carry the Web API
	/// key.
	pub fn network(endpoint: &'static str, src: ReqwestError) -> Self {
		Self::Network { endpoint, source: Box::new(src.without_url()) }
	}

	/// HTTP status attached to the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			Self::Network { .. } => None,
		}
	}
}
