//! Best-effort profile enrichment from the Steam Web API.
//!
//! Identity verification must never depend on this lookup: [`ProfileEnricher::enrich`] always
//! returns a [`ProfileData`], degrading to defaults on a missing key, transport failure, non-2xx
//! status, or malformed body. [`ProfileEnricher::fetch_summary`] exposes the fallible lookup for
//! callers that want the error.

// self
use crate::{
	_prelude::*,
	auth::{DEFAULT_DISPLAY_NAME, ProfileData, SteamId},
	config::ApiKey,
	error::TransportError,
	http::ReqwestHttpClient,
};

const ENDPOINT_LABEL: &str = "Steam player summaries endpoint";

/// Failures raised while fetching a player summary.
#[derive(Debug, ThisError)]
pub enum EnrichmentError {
	/// The Web API could not be reached or answered with a non-success status.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The Web API answered with a body that does not match the player summaries shape.
	#[error("Player summaries response is malformed.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[derive(Debug, Deserialize)]
struct PlayerSummariesEnvelope {
	response: PlayerSummaries,
}

#[derive(Debug, Deserialize)]
struct PlayerSummaries {
	players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
	personaname: Option<String>,
	avatarfull: Option<String>,
	profileurl: Option<String>,
}
impl From<PlayerSummary> for ProfileData {
	fn from(player: PlayerSummary) -> Self {
		Self {
			display_name: player.personaname.unwrap_or_else(|| DEFAULT_DISPLAY_NAME.into()),
			avatar_url: player.avatarfull.unwrap_or_default(),
			profile_url: player.profileurl.unwrap_or_default(),
		}
	}
}

/// Looks up display profiles through `GetPlayerSummaries`.
#[derive(Clone, Debug)]
pub struct ProfileEnricher {
	http_client: ReqwestHttpClient,
	endpoint: Url,
}
impl ProfileEnricher {
	/// Creates an enricher that queries `endpoint`.
	pub fn new(http_client: ReqwestHttpClient, endpoint: Url) -> Self {
		Self { http_client, endpoint }
	}

	/// Returns the profile for `steam_id`, falling back to defaults on any failure.
	///
	/// Without an `api_key` no request is made.
	pub async fn enrich(&self, steam_id: &SteamId, api_key: Option<&ApiKey>) -> ProfileData {
		let Some(api_key) = api_key else {
			tracing::warn!("Steam Web API key is not configured; using the default profile.");

			return ProfileData::default();
		};

		match self.fetch_summary(steam_id, api_key).await {
			Ok(Some(profile)) => profile,
			Ok(None) => {
				tracing::warn!(%steam_id, "Steam returned no player summary; using the default profile.");

				ProfileData::default()
			},
			Err(e) => {
				tracing::warn!(%steam_id, error = %e, "Failed to fetch the Steam player summary.");

				ProfileData::default()
			},
		}
	}

	/// Fetches the first player summary for `steam_id`, if Steam returned one.
	pub async fn fetch_summary(
		&self,
		steam_id: &SteamId,
		api_key: &ApiKey,
	) -> Result<Option<ProfileData>, EnrichmentError> {
		let request = self
			.http_client
			.get(self.endpoint.clone())
			.query(&[("key", api_key.expose()), ("steamids", steam_id.as_ref())]);
		let response = self.http_client.fetch(ENDPOINT_LABEL, request).await?;

		parse_player_summaries(&response.bytes)
	}
}

fn parse_player_summaries(body: &[u8]) -> Result<Option<ProfileData>, EnrichmentError> {
	let mut deserializer = serde_json::Deserializer::from_slice(body);
	let envelope: PlayerSummariesEnvelope = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| EnrichmentError::Parse { source })?;

	Ok(envelope.response.players.into_iter().next().map(ProfileData::from))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn first_player_maps_known_fields() {
		let body = br#"{"response":{"players":[
			{"steamid":"1","personaname":"Alice","avatarfull":"http://x/a.jpg","profileurl":"http://steamcommunity.com/id/alice"},
			{"steamid":"2","personaname":"Bob"}
		]}}"#;
		let profile = parse_player_summaries(body)
			.expect("Well-formed summaries should parse.")
			.expect("First player should be returned.");

		assert_eq!(profile.display_name, "Alice");
		assert_eq!(profile.avatar_url, "http://x/a.jpg");
		assert_eq!(profile.profile_url, "http://steamcommunity.com/id/alice");
	}

	#[test]
	fn missing_fields_fall_back_individually() {
		let body = br#"{"response":{"players":[{"steamid":"1","avatarfull":"http://x/a.jpg","personaname":null}]}}"#;
		let profile = parse_player_summaries(body)
			.expect("Partial summaries should parse.")
			.expect("First player should be returned.");

		assert_eq!(profile.display_name, "Steam User");
		assert_eq!(profile.avatar_url, "http://x/a.jpg");
		assert_eq!(profile.profile_url, "");
	}

	#[test]
	fn empty_player_list_yields_none() {
		let profile = parse_player_summaries(br#"{"response":{"players":[]}}"#)
			.expect("Empty player lists should parse.");

		assert!(profile.is_none());
	}

	#[test]
	fn malformed_bodies_are_parse_errors() {
		let err = parse_player_summaries(br#"{"response":{}}"#)
			.expect_err("Missing players must be a parse error.");

		assert!(matches!(err, EnrichmentError::Parse { .. }));
		assert!(parse_player_summaries(b"<html>").is_err());
		assert!(parse_player_summaries(br#"{"response":{"players":"none"}}"#).is_err());
	}

	#[tokio::test]
	async fn missing_api_key_returns_defaults() {
		let enricher = ProfileEnricher::new(
			ReqwestHttpClient::with_client(ReqwestClient::new()),
			Url::parse("http://127.0.0.1:9/unreachable").expect("Endpoint fixture should parse."),
		);
		let steam_id = SteamId::new("1").expect("Steam fixture should be valid.");

		assert_eq!(enricher.enrich(&steam_id, None).await, ProfileData::default());
	}
}
