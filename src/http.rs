//! Shared HTTP transport for the OpenID provider and Steam Web API calls.
//!
//! Both outbound calls go through one [`ReqwestHttpClient`] so callers can inject a custom
//! [`ReqwestClient`] (proxies, test certificates) once and have it reused by every stage.

// std
use std::ops::Deref;
// crates.io
use reqwest::{RequestBuilder, redirect::Policy};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Status and body captured from a successful response.
#[derive(Clone, Debug)]
pub struct ResponseBody {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub bytes: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Neither the OpenID direct verification nor the Web API lookup should follow redirects;
/// [`ReqwestHttpClient::new`] disables them. Configure any custom [`ReqwestClient`] the same way.
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Builds the default client with redirect following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends `request`, requiring a 2xx status, and returns the body.
	///
	/// `endpoint` is a human-readable label used in errors; it must never contain secrets.
	pub(crate) async fn fetch(
		&self,
		endpoint: &'static str,
		request: RequestBuilder,
	) -> Result<ResponseBody, TransportError> {
		let response =
			request.send().await.map_err(|err| TransportError::network(endpoint, err))?;
		let status = response.status();

		if !status.is_success() {
			return Err(TransportError::Status { endpoint, status: status.as_u16() });
		}

		let bytes = response.bytes().await.map_err(|err| TransportError::network(endpoint, err))?;

		Ok(ResponseBody { status: status.as_u16(), bytes: bytes.to_vec() })
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
