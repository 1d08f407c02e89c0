// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	obs::{FlowOutcome, FlowStage},
	redirect::ErrorCode,
};

/// Records a stage outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(stage: FlowStage, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"steam_auth_flow_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}

/// Thread-safe counters for login completions.
#[derive(Debug, Default)]
pub struct LoginMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	failed: AtomicU64,
	bad_id: AtomicU64,
	token_creation_failed: AtomicU64,
}
impl LoginMetrics {
	/// Returns the total number of login completions attempted.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of completions that issued a credential.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of completions that redirected with `code`.
	pub fn failures(&self, code: ErrorCode) -> u64 {
		self.counter(code).load(Ordering::Relaxed)
	}

	/// Returns the number of completions that failed for any reason.
	pub fn total_failures(&self) -> u64 {
		[ErrorCode::Failed, ErrorCode::BadId, ErrorCode::TokenCreationFailed]
			.into_iter()
			.map(|code| self.failures(code))
			.sum()
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self, code: ErrorCode) {
		self.counter(code).fetch_add(1, Ordering::Relaxed);
	}

	fn counter(&self, code: ErrorCode) -> &AtomicU64 {
		match code {
			ErrorCode::Failed => &self.failed,
			ErrorCode::BadId => &self.bad_id,
			ErrorCode::TokenCreationFailed => &self.token_creation_failed,
		}
	}
}
