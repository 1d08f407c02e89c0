//! Prints the Steam sign-in URL a native client should open.
//!
//! Reads `STEAM_AUTH_REALM` (and optionally `STEAM_AUTH_RETURN_TO`) from the environment, falling
//! back to a demo realm.

// crates.io
use color_eyre::Result;
use url::Url;
// self
use steam_auth_bridge::{
	config::{ENV_REALM, LoginConfig},
	openid,
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let config = if std::env::var_os(ENV_REALM).is_some() {
		LoginConfig::from_env()?
	} else {
		LoginConfig::builder(Url::parse("https://verifysteam.example.run.app/")?).build()?
	};

	println!("Return-to: {}.", config.return_to);
	println!("Open {} to sign in with Steam.", openid::authorization_url(&config));

	Ok(())
}
