//! Login orchestrator tying the four stages together.

mod callback;

// self
use crate::{
	_prelude::*,
	config::LoginConfig,
	http::ReqwestHttpClient,
	obs::LoginMetrics,
	openid::{self, AssertionVerifier, SteamOpenIdVerifier},
	profile::ProfileEnricher,
	signer::TokenSigner,
};

/// Completes Steam sign-ins and produces client redirects.
///
/// The login owns the shared configuration, the assertion verifier, the profile enricher, and the
/// token signer so a single value can serve every callback the process receives. All members are
/// immutable once built; concurrent completions share nothing else.
#[derive(Clone)]
pub struct SteamLogin {
	/// Immutable configuration shared by every completion.
	pub config: Arc<LoginConfig>,
	/// Verifier used to complete the OpenID exchange.
	pub verifier: Arc<dyn AssertionVerifier>,
	/// Best-effort profile lookup.
	pub enricher: ProfileEnricher,
	/// Signer that mints the custom token.
	pub signer: Arc<dyn TokenSigner>,
	/// Process-local completion counters.
	pub metrics: Arc<LoginMetrics>,
}
impl SteamLogin {
	/// Creates a login backed by the default reqwest transport.
	pub fn new(config: LoginConfig, signer: Arc<dyn TokenSigner>) -> Result<Self> {
		let http_client = ReqwestHttpClient::new()?;

		Ok(Self::with_http_client(config, signer, http_client))
	}

	/// Creates a login that reuses the caller-provided transport for both outbound calls.
	pub fn with_http_client(
		config: LoginConfig,
		signer: Arc<dyn TokenSigner>,
		http_client: ReqwestHttpClient,
	) -> Self {
		let verifier = SteamOpenIdVerifier::new(http_client.clone(), config.op_endpoint.clone());
		let enricher = ProfileEnricher::new(http_client, config.player_summaries_endpoint.clone());

		Self {
			config: Arc::new(config),
			verifier: Arc::new(verifier),
			enricher,
			signer,
			metrics: Default::default(),
		}
	}

	/// Replaces the assertion verifier.
	pub fn with_verifier(mut self, verifier: Arc<dyn AssertionVerifier>) -> Self {
		self.verifier = verifier;

		self
	}

	/// Shares an existing metrics recorder.
	pub fn with_metrics(mut self, metrics: Arc<LoginMetrics>) -> Self {
		self.metrics = metrics;

		self
	}

	/// Builds the Steam sign-in URL the native client should open.
	pub fn login_url(&self) -> Url {
		openid::authorization_url(&self.config)
	}
}
impl Debug for SteamLogin {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SteamLogin")
			.field("config", &self.config)
			.field("enricher", &self.enricher)
			.field("metrics", &self.metrics)
			.finish_non_exhaustive()
	}
}
