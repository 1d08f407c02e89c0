mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use steam_auth_bridge::openid::{SteamOpenIdVerifier, VerificationStatus};

fn verifier(server: &MockServer) -> SteamOpenIdVerifier {
	SteamOpenIdVerifier::new(test_http_client(), url(&server.url(OP_PATH)))
}

#[tokio::test]
async fn direct_verification_echoes_the_assertion() {
	let server = MockServer::start_async().await;
	let check = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(OP_PATH)
				.header("content-type", "application/x-www-form-urlencoded")
				.body_includes("openid.mode=check_authentication")
				.body_includes("openid.assoc_handle=1234567890")
				.body_includes("openid.sig=W0u5DRbtHE1GG0ZKXjerUZDUGmc%3D");
			then.status(200).body("ns:http://specs.openid.net/auth/2.0\nis_valid:true\n");
		})
		.await;
	let mut query = positive_assertion(&server.url(OP_PATH), CLAIMED_ID);

	query.insert("unrelated".into(), "ignored".into());

	let outcome = verifier(&server).verify(&query, &url(RETURN_TO)).await;

	check.assert_async().await;

	assert!(server.url(OP_PATH).starts_with("https://"));
	assert_eq!(outcome.status(), VerificationStatus::Success);
	assert_eq!(outcome.claimed_id(), Some(CLAIMED_ID));
}

#[tokio::test]
async fn invalid_signature_is_a_failure() {
	let server = MockServer::start_async().await;
	let check = server
		.mock_async(|when, then| {
			when.method(POST).path(OP_PATH);
			then.status(200).body("ns:http://specs.openid.net/auth/2.0\nis_valid:false\n");
		})
		.await;
	let outcome = verifier(&server)
		.verify(&positive_assertion(&server.url(OP_PATH), CLAIMED_ID), &url(RETURN_TO))
		.await;

	check.assert_async().await;

	assert_eq!(outcome.status(), VerificationStatus::Failure);
	assert!(outcome.claimed_id().is_none());
	assert!(outcome.message().is_some_and(|message| !message.is_empty()));
}

#[tokio::test]
async fn provider_errors_are_failures() {
	let server = MockServer::start_async().await;
	let check = server
		.mock_async(|when, then| {
			when.method(POST).path(OP_PATH);
			then.status(500).body("is_valid:true\n");
		})
		.await;
	let outcome = verifier(&server)
		.verify(&positive_assertion(&server.url(OP_PATH), CLAIMED_ID), &url(RETURN_TO))
		.await;

	check.assert_async().await;

	assert_eq!(outcome.status(), VerificationStatus::Failure);
	assert!(outcome.message().is_some_and(|message| message.contains("500")));
}

#[tokio::test]
async fn stale_nonce_is_rejected_before_verification() {
	let server = MockServer::start_async().await;
	let check = server
		.mock_async(|when, then| {
			when.method(POST).path(OP_PATH);
			then.status(200).body("is_valid:true\n");
		})
		.await;
	let mut query = positive_assertion(&server.url(OP_PATH), CLAIMED_ID);

	query.insert("openid.response_nonce".into(), "2001-01-01T00:00:00Zold".into());

	let outcome = verifier(&server).verify(&query, &url(RETURN_TO)).await;

	check.assert_calls_async(0).await;

	assert_eq!(outcome.status(), VerificationStatus::Failure);
}
