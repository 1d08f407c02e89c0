//! Callback completion: verify → extract → enrich → issue.
//!
//! Stages run strictly in sequence and every failure short-circuits into a client redirect.
//! Enrichment never fails the login. The API key and the signed token are never logged.

// self
use crate::{
	_prelude::*,
	auth::{AccountClaims, AccountId, ProfileData, SignedCredential, SteamId},
	flows::SteamLogin,
	identity,
	obs::{self, FlowOutcome, FlowSpan, FlowStage},
	openid::VerificationStatus,
	redirect::RedirectResult,
};

impl SteamLogin {
	/// Completes the callback carried by `query` and returns the client redirect.
	pub async fn complete(&self, query: &BTreeMap<String, String>) -> RedirectResult {
		const STAGE: FlowStage = FlowStage::Complete;

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);
		self.metrics.record_attempt();

		match self.authenticate(query).await {
			Ok(token) => {
				obs::record_flow_outcome(STAGE, FlowOutcome::Success);
				self.metrics.record_success();

				RedirectResult::success(&self.config.client_redirect, &token)
			},
			Err(e) => {
				let code = e.error_code();

				obs::record_flow_outcome(STAGE, FlowOutcome::Failure);
				self.metrics.record_failure(code);

				RedirectResult::failure(&self.config.client_redirect, code)
			},
		}
	}

	/// Completes the callback whose query string is carried by `callback`.
	pub async fn complete_url(&self, callback: &Url) -> RedirectResult {
		let query = callback.query_pairs().into_owned().collect::<BTreeMap<_, _>>();

		self.complete(&query).await
	}

	/// Runs every stage and returns the signed token or the first failure.
	pub async fn authenticate(&self, query: &BTreeMap<String, String>) -> Result<SignedCredential> {
		let claimed_id = self.verify(query).await?;
		let steam_id = self.extract(&claimed_id)?;
		let profile = self.enrich(&steam_id).await;

		self.create_credential(&steam_id, profile).await
	}

	/// Issues the client redirect for an already verified `steam_id`.
	pub async fn issue(&self, steam_id: &SteamId, profile: ProfileData) -> RedirectResult {
		match self.create_credential(steam_id, profile).await {
			Ok(token) => RedirectResult::success(&self.config.client_redirect, &token),
			Err(e) => RedirectResult::failure(&self.config.client_redirect, e.error_code()),
		}
	}

	/// Signs a custom token for `steam_id` embedding the `profile` claims.
	pub async fn create_credential(
		&self,
		steam_id: &SteamId,
		profile: ProfileData,
	) -> Result<SignedCredential> {
		const STAGE: FlowStage = FlowStage::Issue;

		let span = FlowSpan::new(STAGE);

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let account = AccountId::for_steam(steam_id);
		let claims = AccountClaims::new(steam_id, profile);
		let signed = span.instrument(self.signer.create_token(&account, &claims)).await;
		let _guard = span.entered();
		let result = match signed {
			Ok(token) => {
				tracing::info!(%account, "Issued a custom token.");

				Ok(token)
			},
			Err(e) => {
				tracing::error!(%account, error = %e, "Failed to create the custom token.");

				Err(Error::from(e))
			},
		};

		record_stage(STAGE, result)
	}

	async fn verify(&self, query: &BTreeMap<String, String>) -> Result<String> {
		const STAGE: FlowStage = FlowStage::Verify;

		let span = FlowSpan::new(STAGE);

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let outcome = span.instrument(self.verifier.complete(query, &self.config.return_to)).await;
		let _guard = span.entered();

		if outcome.status() != VerificationStatus::Success {
			tracing::warn!(
				status = %outcome.status(),
				detail = outcome.message().unwrap_or_default(),
				"Steam assertion was not accepted."
			);
		}

		record_stage(STAGE, outcome.into_claimed_id())
	}

	fn extract(&self, claimed_id: &str) -> Result<SteamId> {
		const STAGE: FlowStage = FlowStage::Extract;

		let _guard = FlowSpan::new(STAGE).entered();

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let result = identity::extract_steam_id(claimed_id).inspect_err(|_| {
			tracing::warn!(claimed_id, "Claimed identifier is not a Steam identity URL.");
		});

		record_stage(STAGE, result)
	}

	async fn enrich(&self, steam_id: &SteamId) -> ProfileData {
		const STAGE: FlowStage = FlowStage::Enrich;

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let profile = FlowSpan::new(STAGE)
			.instrument(self.enricher.enrich(steam_id, self.config.api_key.as_ref()))
			.await;

		obs::record_flow_outcome(STAGE, FlowOutcome::Success);

		profile
	}
}

fn record_stage<T>(stage: FlowStage, result: Result<T>) -> Result<T> {
	match &result {
		Ok(_) => obs::record_flow_outcome(stage, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(stage, FlowOutcome::Failure),
	}

	result
}
