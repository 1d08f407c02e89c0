//! Completes a Steam callback end to end and prints the client redirect.
//!
//! ```sh
//! STEAM_AUTH_REALM=https://verifysteam.example.run.app/ \
//! STEAM_KEY=... \
//! GOOGLE_APPLICATION_CREDENTIALS=service_account.json \
//! cargo run --example verify_callback -- '<callback URL received from Steam>'
//! ```

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use tracing_subscriber::EnvFilter;
use url::Url;
// self
use steam_auth_bridge::{config::LoginConfig, flows::SteamLogin, signer::FirebaseTokenSigner};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let callback = std::env::args()
		.nth(1)
		.ok_or_else(|| eyre!("Pass the callback URL Steam redirected to as the first argument."))?;
	let callback = Url::parse(&callback)?;
	let credentials = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")?;
	let signer = FirebaseTokenSigner::from_file(credentials)?;
	let login = SteamLogin::new(LoginConfig::from_env()?, Arc::new(signer))?;
	let redirect = login.complete_url(&callback).await;

	match redirect.error_code() {
		None => println!("Login succeeded; redirecting the client with its token."),
		Some(code) => println!("Login failed with `{code}`; redirecting to {}.", redirect.location()),
	}

	Ok(())
}
