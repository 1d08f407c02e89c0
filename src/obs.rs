//! Observability helpers for the login flow.
//!
//! - Every stage runs inside a `tracing` span named `steam_auth.flow` with a `stage` field.
//! - Enable `metrics` to increment the `steam_auth_flow_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.
//! - [`LoginMetrics`] keeps process-local counters regardless of features.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Login stages observed by the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowStage {
	/// Whole login completion.
	Complete,
	/// Assertion verification.
	Verify,
	/// Steam ID extraction.
	Extract,
	/// Profile enrichment.
	Enrich,
	/// Credential issuance.
	Issue,
}
impl FlowStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowStage::Complete => "complete",
			FlowStage::Verify => "verify",
			FlowStage::Extract => "extract",
			FlowStage::Enrich => "enrich",
			FlowStage::Issue => "issue",
		}
	}
}
impl Display for FlowStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure reported to the client.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
