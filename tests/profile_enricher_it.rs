mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use steam_auth_bridge::{
	auth::{ProfileData, SteamId},
	config::ApiKey,
	profile::{EnrichmentError, ProfileEnricher},
};

fn enricher(server: &MockServer) -> ProfileEnricher {
	ProfileEnricher::new(test_http_client(), url(&server.url(SUMMARIES_PATH)))
}

fn steam_id() -> SteamId {
	SteamId::new(STEAM_ID).expect("Steam fixture should be valid.")
}

fn api_key() -> ApiKey {
	ApiKey::new(API_KEY).expect("API key fixture should be non-empty.")
}

#[tokio::test]
async fn summary_lookup_sends_key_and_steam_id() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(SUMMARIES_PATH)
				.query_param("key", API_KEY)
				.query_param("steamids", STEAM_ID);
			then.status(200).header("content-type", "application/json").body(
				r#"{"response":{"players":[{"personaname":"Alice","profileurl":"http://steamcommunity.com/id/alice"}]}}"#,
			);
		})
		.await;
	let profile = enricher(&server).enrich(&steam_id(), Some(&api_key())).await;

	mock.assert_async().await;

	assert_eq!(profile.display_name, "Alice");
	assert_eq!(profile.avatar_url, "");
	assert_eq!(profile.profile_url, "http://steamcommunity.com/id/alice");
}

#[tokio::test]
async fn non_success_status_surfaces_without_the_key() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(SUMMARIES_PATH);
			then.status(403).body("Forbidden");
		})
		.await;
	let err = enricher(&server)
		.fetch_summary(&steam_id(), &api_key())
		.await
		.expect_err("Forbidden responses should surface as errors.");

	mock.assert_async().await;

	match &err {
		EnrichmentError::Transport(transport) => assert_eq!(transport.status(), Some(403)),
		other => panic!("Expected a transport error, got {other:?}."),
	}

	assert!(!err.to_string().contains(API_KEY));
	assert!(!format!("{err:?}").contains(API_KEY));
}

#[tokio::test]
async fn unreachable_endpoint_degrades_to_defaults() {
	let enricher = ProfileEnricher::new(
		test_http_client(),
		url("http://127.0.0.1:9/ISteamUser/GetPlayerSummaries/v2/"),
	);
	let err = enricher
		.fetch_summary(&steam_id(), &api_key())
		.await
		.expect_err("Closed ports should surface as network errors.");

	assert!(matches!(&err, EnrichmentError::Transport(transport) if transport.status().is_none()));
	assert!(!format!("{err:?}").contains(API_KEY));
	assert_eq!(enricher.enrich(&steam_id(), Some(&api_key())).await, ProfileData::default());
}
