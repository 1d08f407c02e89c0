//! Verification status and outcome produced by an assertion verifier.

// self
use crate::_prelude::*;

/// Status of an assertion verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
	/// The assertion was verified; a claimed identifier is available.
	Success,
	/// The assertion was invalid or could not be verified.
	Failure,
	/// The user cancelled the sign-in at the provider.
	Cancel,
	/// The provider needs user interaction that an immediate request could not perform.
	SetupNeeded,
}
impl VerificationStatus {
	/// Returns a stable label suitable for log and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerificationStatus::Success => "success",
			VerificationStatus::Failure => "failure",
			VerificationStatus::Cancel => "cancel",
			VerificationStatus::SetupNeeded => "setup_needed",
		}
	}
}
impl Display for VerificationStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result of completing an OpenID assertion.
///
/// Constructors keep the shape consistent: only [`VerificationStatus::Success`] carries a
/// claimed identifier, every other status carries a diagnostic message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
	status: VerificationStatus,
	claimed_id: Option<String>,
	message: Option<String>,
}
impl VerificationOutcome {
	/// Verified assertion for `claimed_id`.
	pub fn success(claimed_id: impl Into<String>) -> Self {
		Self { status: VerificationStatus::Success, claimed_id: Some(claimed_id.into()), message: None }
	}

	/// Invalid or unverifiable assertion.
	pub fn failure(message: impl Into<String>) -> Self {
		Self { status: VerificationStatus::Failure, claimed_id: None, message: Some(message.into()) }
	}

	/// User cancelled at the provider.
	pub fn cancel() -> Self {
		Self {
			status: VerificationStatus::Cancel,
			claimed_id: None,
			message: Some("Sign-in was cancelled at the provider.".into()),
		}
	}

	/// Provider requires setup that an immediate request cannot perform.
	pub fn setup_needed() -> Self {
		Self {
			status: VerificationStatus::SetupNeeded,
			claimed_id: None,
			message: Some("Provider requires user setup.".into()),
		}
	}

	/// Verification status.
	pub fn status(&self) -> VerificationStatus {
		self.status
	}

	/// Claimed identifier for successful outcomes.
	pub fn claimed_id(&self) -> Option<&str> {
		self.claimed_id.as_deref()
	}

	/// Diagnostic message for unsuccessful outcomes.
	pub fn message(&self) -> Option<&str> {
		self.message.as_deref()
	}

	/// Converts the outcome into the claimed identifier or [`Error::AssertionRejected`].
	pub fn into_claimed_id(self) -> Result<String> {
		match (self.status, self.claimed_id) {
			(VerificationStatus::Success, Some(claimed_id)) => Ok(claimed_id),
			(status, _) => Err(Error::AssertionRejected {
				status,
				message: self.message.unwrap_or_else(|| "No claimed identifier.".into()),
			}),
		}
	}
}
