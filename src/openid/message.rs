//! Inbound `openid.*` arguments and the key-value form used by direct verification.

// self
use crate::{_prelude::*, openid::AssertionError};

const OPENID_PREFIX: &str = "openid.";

/// The `openid.*` arguments of an inbound assertion, keyed without the prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenIdMessage {
	args: BTreeMap<String, String>,
}
impl OpenIdMessage {
	/// Collects the `openid.*` arguments from request query parameters; others are ignored.
	pub fn from_query<'a, I>(query: I) -> Self
	where
		I: IntoIterator<Item = (&'a String, &'a String)>,
	{
		let args = query
			.into_iter()
			.filter_map(|(key, value)| {
				key.strip_prefix(OPENID_PREFIX).map(|field| (field.to_owned(), value.clone()))
			})
			.collect();

		Self { args }
	}

	/// Returns the value of `openid.<field>`.
	pub fn get(&self, field: &str) -> Option<&str> {
		self.args.get(field).map(String::as_str)
	}

	/// Returns `openid.<field>` or [`AssertionError::MissingField`].
	pub fn require(&self, field: &'static str) -> Result<&str, AssertionError> {
		self.get(field).ok_or(AssertionError::MissingField { field })
	}

	/// `openid.mode`.
	pub fn mode(&self) -> Option<&str> {
		self.get("mode")
	}

	/// Field names listed in `openid.signed`.
	pub fn signed_fields(&self) -> Vec<&str> {
		self.get("signed").map(|list| list.split(',').collect()).unwrap_or_default()
	}

	/// Form body for a `check_authentication` request: every argument echoed verbatim, with the
	/// mode replaced.
	pub fn check_authentication_form(&self) -> Vec<(String, String)> {
		self.args
			.iter()
			.map(|(field, value)| {
				let value = if field == "mode" { "check_authentication" } else { value.as_str() };

				(format!("{OPENID_PREFIX}{field}"), value.to_owned())
			})
			.collect()
	}
}

/// Parses an OpenID key-value form body (`key:value` per line).
///
/// Lines without a colon are skipped.
pub fn parse_key_value_form(body: &str) -> BTreeMap<String, String> {
	body.lines()
		.filter_map(|line| line.split_once(':'))
		.map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
		.collect()
}
