//! Strongly typed identifiers for Steam users and the accounts minted for them.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate(&value)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				$validate(s)?;

				Ok(Self(s.to_owned()))
			}
		}
	};
}

/// Namespace prefix applied to every account minted for a Steam identity.
pub const STEAM_ACCOUNT_PREFIX: &str = "steam:";

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (Steam, account).
		kind: &'static str,
	},
	/// The identifier contains a character outside its alphabet.
	#[error("{kind} identifier contains the invalid character {found:?}.")]
	InvalidCharacter {
		/// Kind of identifier (Steam, account).
		kind: &'static str,
		/// First offending character.
		found: char,
	},
	/// The account identifier is not in the Steam namespace.
	#[error("Account identifier must start with `{prefix}`.")]
	MissingPrefix {
		/// Required namespace prefix.
		prefix: &'static str,
	},
}

def_id! { SteamId, "64-bit Steam community identifier, kept as its decimal digits.", "Steam", validate_steam_id }
def_id! { AccountId, "Internal account identifier derived from a [`SteamId`].", "Account", validate_account_id }

impl SteamId {
	/// Creates a new Steam identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		value.as_ref().parse()
	}
}

impl AccountId {
	/// Derives the account identifier (`steam:<digits>`) for a verified Steam identity.
	pub fn for_steam(steam_id: &SteamId) -> Self {
		Self(format!("{STEAM_ACCOUNT_PREFIX}{steam_id}"))
	}

	/// Returns the Steam identifier this account was derived from.
	pub fn steam_id(&self) -> SteamId {
		SteamId(self.0[STEAM_ACCOUNT_PREFIX.len()..].to_owned())
	}
}

fn validate_steam_id(view: &str) -> Result<(), IdentifierError> {
	const KIND: &str = "Steam";

	if view.is_empty() {
		return Err(IdentifierError::Empty { kind: KIND });
	}
	if let Some(found) = view.chars().find(|c| !c.is_ascii_digit()) {
		return Err(IdentifierError::InvalidCharacter { kind: KIND, found });
	}

	Ok(())
}

fn validate_account_id(view: &str) -> Result<(), IdentifierError> {
	let digits = view
		.strip_prefix(STEAM_ACCOUNT_PREFIX)
		.ok_or(IdentifierError::MissingPrefix { prefix: STEAM_ACCOUNT_PREFIX })?;

	validate_steam_id(digits).map_err(|err| match err {
		IdentifierError::Empty { .. } => IdentifierError::Empty { kind: "Account" },
		IdentifierError::InvalidCharacter { found, .. } =>
			IdentifierError::InvalidCharacter { kind: "Account", found },
		other => other,
	})
}
