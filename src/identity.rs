//! Steam identity extraction from OpenID claimed identifiers.

// std
use std::sync::LazyLock;
// crates.io
use regex::Regex;
// self
use crate::{_prelude::*, auth::SteamId};

// ASCII digits only; `\d` is Unicode-aware.
static STEAM_IDENTITY: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^https?://steamcommunity\.com/openid/id/([0-9]+)$")
		.expect("Steam identity pattern must compile.")
});

/// Recovers the [`SteamId`] from a verified claimed identifier.
///
/// The whole identifier must match `http(s)://steamcommunity.com/openid/id/<digits>`; anything
/// else (foreign host, extra path segments, trailing characters) is rejected with
/// [`Error::BadIdentity`].
pub fn extract_steam_id(claimed_id: &str) -> Result<SteamId> {
	let bad_identity = || Error::BadIdentity { claimed_id: claimed_id.to_owned() };
	let digits = STEAM_IDENTITY
		.captures(claimed_id)
		.and_then(|captures| captures.get(1))
		.ok_or_else(bad_identity)?;

	SteamId::new(digits.as_str()).map_err(|_| bad_identity())
}
