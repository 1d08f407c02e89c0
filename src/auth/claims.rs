//! Display profile data and the claims embedded into minted credentials.

// self
use crate::{_prelude::*, auth::SteamId};

/// Display name used when the Steam Web API cannot supply one.
pub const DEFAULT_DISPLAY_NAME: &str = "Steam User";

/// Best-effort display profile for a Steam user.
///
/// Every field has a usable default, so a missing or partial lookup never blocks a login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileData {
	/// Public persona name.
	pub display_name: String,
	/// Full-size avatar URL, or empty.
	pub avatar_url: String,
	/// Steam community profile URL, or empty.
	pub profile_url: String,
}
impl Default for ProfileData {
	fn default() -> Self {
		Self {
			display_name: DEFAULT_DISPLAY_NAME.into(),
			avatar_url: String::new(),
			profile_url: String::new(),
		}
	}
}

/// Developer claims attached to a custom token.
///
/// Field names match what the client reads back from the verified ID token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountClaims {
	/// Steam identifier the account was derived from.
	pub steam_id: SteamId,
	/// Display name.
	pub name: String,
	/// Avatar URL.
	pub picture: String,
	/// Steam community profile URL.
	pub profile_url: String,
}
impl AccountClaims {
	/// Builds the claims for `steam_id` from an already-defaulted profile.
	pub fn new(steam_id: &SteamId, profile: ProfileData) -> Self {
		let ProfileData { display_name, avatar_url, profile_url } = profile;

		Self { steam_id: steam_id.clone(), name: display_name, picture: avatar_url, profile_url }
	}
}
