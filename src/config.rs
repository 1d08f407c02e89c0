//! Process-wide login configuration.
//!
//! [`LoginConfig`] is assembled once at start-up (see [`LoginConfig::from_env`]) and then shared
//! read-only by every login completion. It pins the OpenID realm and return-to URL registered with
//! Steam, the endpoints the bridge talks to, the client redirect base, and the optional Web API
//! key.

// self
use crate::{_prelude::*, error::ConfigError};

/// Steam's OpenID 2.0 provider endpoint.
pub const STEAM_OP_ENDPOINT: &str = "https://steamcommunity.com/openid/login";
/// Steam Web API player summaries endpoint.
pub const STEAM_PLAYER_SUMMARIES_ENDPOINT: &str =
	"https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v2/";
/// Default redirect base understood by the native client.
pub const DEFAULT_CLIENT_REDIRECT: &str = "monhunsetselector://auth";
/// Path joined onto the realm when no explicit return-to URL is configured.
pub const DEFAULT_RETURN_TO_PATH: &str = "verifySteam/";

/// Environment variable holding the OpenID realm.
pub const ENV_REALM: &str = "STEAM_AUTH_REALM";
/// Environment variable overriding the return-to URL.
pub const ENV_RETURN_TO: &str = "STEAM_AUTH_RETURN_TO";
/// Environment variable overriding the client redirect base.
pub const ENV_CLIENT_REDIRECT: &str = "STEAM_AUTH_CLIENT_REDIRECT";
/// Environment variable holding the Steam Web API key.
pub const ENV_API_KEY: &str = "STEAM_KEY";

/// Redacted Steam Web API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);
impl ApiKey {
	/// Wraps a key, treating an empty string as "not configured".
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.is_empty() { None } else { Some(Self(value)) }
	}

	/// Returns the raw key. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ApiKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ApiKey").field(&"<redacted>").finish()
	}
}

/// Immutable configuration shared by every login completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginConfig {
	/// OpenID realm registered with Steam.
	pub realm: Url,
	/// Return-to URL Steam redirects back to; must live under [`Self::realm`].
	pub return_to: Url,
	/// OpenID provider endpoint used for direct verification.
	pub op_endpoint: Url,
	/// Player summaries endpoint used for profile enrichment.
	pub player_summaries_endpoint: Url,
	/// Redirect base for the native client (e.g. `monhunsetselector://auth`).
	pub client_redirect: Url,
	/// Optional Steam Web API key; enrichment is skipped without it.
	pub api_key: Option<ApiKey>,
}
impl LoginConfig {
	/// Creates a new builder for the provided realm.
	pub fn builder(realm: Url) -> LoginConfigBuilder {
		LoginConfigBuilder::new(realm)
	}

	/// Loads the configuration from the process environment.
	///
	/// Reads [`ENV_REALM`] (required), [`ENV_RETURN_TO`], [`ENV_CLIENT_REDIRECT`] and
	/// [`ENV_API_KEY`].
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Loads the configuration through an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let realm = lookup(ENV_REALM).ok_or(ConfigError::MissingEnv { name: ENV_REALM })?;
		let mut builder = Self::builder(parse_url("realm", &realm)?);

		if let Some(return_to) = lookup(ENV_RETURN_TO) {
			builder = builder.return_to(parse_url("return_to", &return_to)?);
		}
		if let Some(client_redirect) = lookup(ENV_CLIENT_REDIRECT) {
			builder = builder.client_redirect(parse_url("client_redirect", &client_redirect)?);
		}
		if let Some(api_key) = lookup(ENV_API_KEY).and_then(ApiKey::new) {
			builder = builder.api_key(api_key);
		} else {
			tracing::warn!("{ENV_API_KEY} is not set; Steam profiles will use defaults.");
		}

		builder.build()
	}
}

/// Builder for [`LoginConfig`] values.
#[derive(Debug)]
pub struct LoginConfigBuilder {
	/// OpenID realm.
	pub realm: Url,
	/// Explicit return-to URL; defaults to the realm joined with [`DEFAULT_RETURN_TO_PATH`].
	pub return_to: Option<Url>,
	/// OpenID provider endpoint override.
	pub op_endpoint: Option<Url>,
	/// Player summaries endpoint override.
	pub player_summaries_endpoint: Option<Url>,
	/// Client redirect override.
	pub client_redirect: Option<Url>,
	/// Steam Web API key.
	pub api_key: Option<ApiKey>,
}
impl LoginConfigBuilder {
	/// Creates a new builder seeded with the provided realm.
	pub fn new(realm: Url) -> Self {
		Self {
			realm,
			return_to: None,
			op_endpoint: None,
			player_summaries_endpoint: None,
			client_redirect: None,
			api_key: None,
		}
	}

	/// Sets the return-to URL.
	pub fn return_to(mut self, url: Url) -> Self {
		self.return_to = Some(url);

		self
	}

	/// Overrides the OpenID provider endpoint.
	pub fn op_endpoint(mut self, url: Url) -> Self {
		self.op_endpoint = Some(url);

		self
	}

	/// Overrides the player summaries endpoint.
	pub fn player_summaries_endpoint(mut self, url: Url) -> Self {
		self.player_summaries_endpoint = Some(url);

		self
	}

	/// Overrides the client redirect base.
	pub fn client_redirect(mut self, url: Url) -> Self {
		self.client_redirect = Some(url);

		self
	}

	/// Sets the Steam Web API key.
	pub fn api_key(mut self, key: ApiKey) -> Self {
		self.api_key = Some(key);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<LoginConfig, ConfigError> {
		let return_to = match self.return_to {
			Some(url) => url,
			None => self
				.realm
				.join(DEFAULT_RETURN_TO_PATH)
				.map_err(|source| ConfigError::InvalidUrl { field: "return_to", source })?,
		};
		let op_endpoint = match self.op_endpoint {
			Some(url) => url,
			None => parse_url("op_endpoint", STEAM_OP_ENDPOINT)?,
		};
		let player_summaries_endpoint = match self.player_summaries_endpoint {
			Some(url) => url,
			None => parse_url("player_summaries_endpoint", STEAM_PLAYER_SUMMARIES_ENDPOINT)?,
		};
		let client_redirect = match self.client_redirect {
			Some(url) => url,
			None => parse_url("client_redirect", DEFAULT_CLIENT_REDIRECT)?,
		};
		let config = LoginConfig {
			realm: self.realm,
			return_to,
			op_endpoint,
			player_summaries_endpoint,
			client_redirect,
			api_key: self.api_key,
		};

		config.validate()?;

		Ok(config)
	}
}

impl LoginConfig {
	/// Validates invariants for the configuration.
	fn validate(&self) -> Result<(), ConfigError> {
		require_https("realm", &self.realm)?;
		require_https("return_to", &self.return_to)?;

		if !realm_covers(&self.realm, &self.return_to) {
			return Err(ConfigError::ReturnToOutsideRealm {
				realm: self.realm.to_string(),
				return_to: self.return_to.to_string(),
			});
		}
		if self.client_redirect.query().is_some() {
			return Err(ConfigError::ClientRedirectHasQuery {
				url: self.client_redirect.to_string(),
			});
		}

		Ok(())
	}
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
	Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })
}

fn require_https(field: &'static str, url: &Url) -> Result<(), ConfigError> {
	if url.scheme() != "https" {
		Err(ConfigError::InsecureUrl { field, url: url.to_string() })
	} else {
		Ok(())
	}
}

fn realm_covers(realm: &Url, return_to: &Url) -> bool {
	realm.scheme() == return_to.scheme()
		&& realm.host_str() == return_to.host_str()
		&& realm.port_or_known_default() == return_to.port_or_known_default()
		&& path_covers(realm.path(), return_to.path())
}

// The realm path must end on a segment boundary of the return-to path.
fn path_covers(realm: &str, return_to: &str) -> bool {
	match return_to.strip_prefix(realm) {
		Some(rest) => realm.ends_with('/') || rest.is_empty() || rest.starts_with('/'),
		None => false,
	}
}
