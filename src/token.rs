//! Access-token cache with single-flight refresh.
//!
//! [`TokenProvider`] memoizes one kind of access token. Readers that find a usable token
//! return after a read lock and never wait on refreshes. When the cached token is missing
//! or inside the safety margin, callers queue on an async guard so exactly one refresh
//! reaches the identity endpoint; everyone queued behind it receives that refresh's
//! outcome, including its [`AuthError`] when it fails and its token when that token is
//! already inside the margin. A failed refresh never touches the cached value.

mod exchange;
mod metrics;

pub use metrics::RefreshMetrics;

pub(crate) use exchange::exchange;

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenKind},
	error::AuthError,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Memoized access token of a single [`TokenKind`].
#[derive(Debug)]
pub struct TokenProvider {
	kind: TokenKind,
	safety_margin: Duration,
	cached: RwLock<Option<AccessToken>>,
	last_outcome: Mutex<Option<Result<AccessToken, AuthError>>>,
	generation: AtomicU64,
	singleflight: AsyncMutex<()>,
	metrics: RefreshMetrics,
}
impl TokenProvider {
	/// Creates an empty provider for `kind`; negative margins clamp to zero.
	pub fn new(kind: TokenKind, safety_margin: Duration) -> Self {
		Self {
			kind,
			safety_margin: if safety_margin.is_negative() { Duration::ZERO } else { safety_margin },
			cached: RwLock::new(None),
			last_outcome: Mutex::new(None),
			generation: AtomicU64::new(0),
			singleflight: AsyncMutex::new(()),
			metrics: RefreshMetrics::default(),
		}
	}

	/// Token kind served by this provider.
	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	/// Safety margin applied to cached tokens.
	pub fn safety_margin(&self) -> Duration {
		self.safety_margin
	}

	/// Refresh counters.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	/// Returns the cached token regardless of freshness.
	pub fn cached(&self) -> Option<AccessToken> {
		self.cached.read().clone()
	}

	/// Returns the cached token if it is usable at `instant`.
	pub fn usable_at(&self, instant: OffsetDateTime) -> Option<AccessToken> {
		self.cached
			.read()
			.as_ref()
			.filter(|token| token.is_usable_at(instant, self.safety_margin))
			.cloned()
	}

	/// Installs an externally obtained token, replacing any cached one.
	pub fn prime(&self, token: AccessToken) {
		*self.cached.write() = Some(token);
	}

	/// Drops the cached token so the next request refreshes; returns the dropped value.
	pub fn invalidate(&self) -> Option<AccessToken> {
		*self.last_outcome.lock() = None;

		self.cached.write().take()
	}

	/// Returns a usable token, running `refresh` only when nothing usable is cached.
	///
	/// At most one `refresh` runs at a time per provider. Callers that queued behind a
	/// refresh reuse its result instead of starting their own.
	pub async fn get_with<F, Fut>(&self, refresh: F) -> Result<AccessToken, AuthError>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<AccessToken, AuthError>>,
	{
		if let Some(token) = self.usable_at(OffsetDateTime::now_utc()) {
			self.record_cache_hit();

			return Ok(token);
		}

		let observed = self.generation.load(Ordering::Acquire);
		let _singleflight = self.singleflight.lock().await;

		if let Some(token) = self.usable_at(OffsetDateTime::now_utc()) {
			self.record_cache_hit();

			return Ok(token);
		}
		if self.generation.load(Ordering::Acquire) != observed {
			let outcome = self.last_outcome.lock().clone();

			if let Some(outcome) = outcome {
				if outcome.is_ok() {
					self.record_cache_hit();
				}

				return outcome;
			}
		}

		let span = CallSpan::new(CallKind::Token, self.kind.operation());

		obs::record_call_outcome(CallKind::Token, self.kind.operation(), CallOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span.instrument(refresh()).await;

		match &result {
			Ok(token) => {
				*self.cached.write() = Some(token.clone());

				self.metrics.record_success();
				obs::record_call_outcome(
					CallKind::Token,
					self.kind.operation(),
					CallOutcome::Success,
				);
			},
			Err(err) => {
				self.metrics.record_failure();
				obs::record_call_outcome(
					CallKind::Token,
					self.kind.operation(),
					CallOutcome::Failure,
				);
				#[cfg(feature = "tracing")]
				tracing::warn!(kind = self.kind.as_str(), error = %err, "token refresh failed");
			},
		}

		*self.last_outcome.lock() = Some(result.clone());

		self.generation.fetch_add(1, Ordering::AcqRel);

		result
	}

	fn record_cache_hit(&self) {
		self.metrics.record_cache_hit();
		obs::record_call_outcome(CallKind::Token, self.kind.operation(), CallOutcome::CacheHit);
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::AtomicUsize;
	// crates.io
	use tokio::{task::JoinSet, time};
	// self
	use super::*;

	const MARGIN: Duration = Duration::seconds(30);

	fn token(value: &str, expires_in: Duration) -> AccessToken {
		AccessToken::new(TokenKind::Tenant, value, OffsetDateTime::now_utc(), expires_in)
	}

	fn rejected() -> AuthError {
		AuthError::Rejected { code: 10014, message: "app secret invalid".into() }
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_requests_share_one_refresh() {
		let provider = Arc::new(TokenProvider::new(TokenKind::Tenant, MARGIN));
		let calls = Arc::new(AtomicUsize::new(0));
		let mut tasks = JoinSet::new();

		for _ in 0..16 {
			let provider = provider.clone();
			let calls = calls.clone();

			tasks.spawn(async move {
				provider
					.get_with(|| async move {
						calls.fetch_add(1, Ordering::SeqCst);
						time::sleep(std::time::Duration::from_millis(100)).await;

						Ok(token("T1", Duration::seconds(7200)))
					})
					.await
			});
		}

		while let Some(joined) = tasks.join_next().await {
			let token = joined
				.expect("Token task should not panic.")
				.expect("Every concurrent caller should receive the refreshed token.");

			assert_eq!(token.secret(), "T1");
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(provider.metrics().attempts(), 1);
		assert_eq!(provider.metrics().successes(), 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn waiters_receive_a_refreshed_token_shorter_than_the_margin() {
		let provider = Arc::new(TokenProvider::new(TokenKind::Tenant, MARGIN));
		let calls = Arc::new(AtomicUsize::new(0));
		let mut tasks = JoinSet::new();

		for _ in 0..8 {
			let provider = provider.clone();
			let calls = calls.clone();

			tasks.spawn(async move {
				provider
					.get_with(|| async move {
						calls.fetch_add(1, Ordering::SeqCst);
						time::sleep(std::time::Duration::from_millis(100)).await;

						Ok(token("SHORT", Duration::seconds(10)))
					})
					.await
			});
		}

		while let Some(joined) = tasks.join_next().await {
			let token = joined
				.expect("Token task should not panic.")
				.expect("Every waiter should receive the short-lived token.");

			assert_eq!(token.secret(), "SHORT");
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(provider.metrics().attempts(), 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn concurrent_requests_replace_a_stale_token_once() {
		let provider = Arc::new(TokenProvider::new(TokenKind::Tenant, MARGIN));
		let calls = Arc::new(AtomicUsize::new(0));
		let mut tasks = JoinSet::new();

		provider.prime(token("T0", Duration::seconds(10)));

		for _ in 0..8 {
			let provider = provider.clone();
			let calls = calls.clone();

			tasks.spawn(async move {
				provider
					.get_with(|| async move {
						calls.fetch_add(1, Ordering::SeqCst);
						time::sleep(std::time::Duration::from_millis(100)).await;

						Ok(token("T1", Duration::seconds(7200)))
					})
					.await
			});
		}

		while let Some(joined) = tasks.join_next().await {
			let token = joined
				.expect("Token task should not panic.")
				.expect("Every caller should receive the replacement token.");

			assert_eq!(token.secret(), "T1");
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(provider.cached().expect("Replacement should be cached.").secret(), "T1");
	}

	#[tokio::test]
	async fn invalidate_discards_the_shared_outcome() {
		let provider = TokenProvider::new(TokenKind::Tenant, MARGIN);

		provider
			.get_with(|| async { Ok(token("SHORT", Duration::seconds(10))) })
			.await
			.expect("Initial refresh should succeed.");
		provider.invalidate();

		let token = provider
			.get_with(|| async { Ok(token("NEXT", Duration::hours(2))) })
			.await
			.expect("Refresh after invalidation should succeed.");

		assert_eq!(token.secret(), "NEXT");
		assert_eq!(provider.metrics().attempts(), 2);
	}

	#[tokio::test]
	async fn fresh_cached_token_skips_refresh() {
		let provider = TokenProvider::new(TokenKind::Tenant, MARGIN);
		let counter = AtomicUsize::new(0);
		let calls = &counter;

		provider.prime(token("cached", Duration::hours(1)));

		let token = provider
			.get_with(move || async move {
				calls.fetch_add(1, Ordering::SeqCst);

				Ok(token("unexpected", Duration::hours(2)))
			})
			.await
			.expect("Fresh cached token should be returned.");

		assert_eq!(token.secret(), "cached");
		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(provider.metrics().cache_hits(), 1);
		assert_eq!(provider.metrics().attempts(), 0);
	}

	#[tokio::test]
	async fn token_inside_margin_triggers_exactly_one_refresh() {
		let provider = TokenProvider::new(TokenKind::Tenant, MARGIN);
		let counter = AtomicUsize::new(0);
		let calls = &counter;
		let refresh = move || async move {
			calls.fetch_add(1, Ordering::SeqCst);

			Ok(token("T2", Duration::seconds(7200)))
		};

		provider.prime(token("T1", Duration::seconds(10)));

		let first = provider.get_with(refresh).await.expect("Stale token should be refreshed.");
		let second = provider.get_with(refresh).await.expect("Refreshed token should be reused.");

		assert_eq!(first.secret(), "T2");
		assert_eq!(second.secret(), "T2");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn failed_refresh_keeps_previous_token() {
		let provider = TokenProvider::new(TokenKind::Tenant, MARGIN);

		provider.prime(token("OLD", Duration::seconds(5)));

		let err = provider
			.get_with(|| async { Err(rejected()) })
			.await
			.expect_err("Refresh failure must surface to the caller.");

		assert!(matches!(err, AuthError::Rejected { code: 10014, .. }));
		assert_eq!(
			provider.cached().expect("Previous token must stay cached after a failure.").secret(),
			"OLD"
		);
		assert_eq!(provider.metrics().failures(), 1);
	}

	#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
	async fn waiters_share_a_failed_refresh() {
		let provider = Arc::new(TokenProvider::new(TokenKind::Tenant, MARGIN));
		let calls = Arc::new(AtomicUsize::new(0));
		let mut tasks = JoinSet::new();

		for _ in 0..8 {
			let provider = provider.clone();
			let calls = calls.clone();

			tasks.spawn(async move {
				provider
					.get_with(|| async move {
						calls.fetch_add(1, Ordering::SeqCst);
						time::sleep(std::time::Duration::from_millis(100)).await;

						Err(rejected())
					})
					.await
			});
		}

		while let Some(joined) = tasks.join_next().await {
			let err = joined
				.expect("Token task should not panic.")
				.expect_err("Every waiter should observe the shared failure.");

			assert!(matches!(err, AuthError::Rejected { code: 10014, .. }));
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(provider.cached().is_none());
	}

	#[tokio::test]
	async fn later_callers_retry_after_a_failure() {
		let provider = TokenProvider::new(TokenKind::Tenant, MARGIN);
		let _ = provider.get_with(|| async { Err(rejected()) }).await;
		let token = provider
			.get_with(|| async { Ok(token("T3", Duration::hours(2))) })
			.await
			.expect("A caller arriving after a failure should start a new refresh.");

		assert_eq!(token.secret(), "T3");
		assert_eq!(provider.metrics().attempts(), 2);
	}

	#[tokio::test]
	async fn invalidate_forces_the_next_refresh() {
		let provider = TokenProvider::new(TokenKind::App, MARGIN);

		provider.prime(token("A1", Duration::hours(2)));

		let dropped = provider.invalidate().expect("Primed token should be dropped.");
		let token = provider
			.get_with(|| async { Ok(token("A2", Duration::hours(2))) })
			.await
			.expect("Invalidated provider should refresh.");

		assert_eq!(dropped.secret(), "A1");
		assert_eq!(token.secret(), "A2");
	}

	#[test]
	fn negative_margin_clamps_to_zero() {
		let provider = TokenProvider::new(TokenKind::Tenant, Duration::seconds(-1));

		assert_eq!(provider.safety_margin(), Duration::ZERO);
		assert_eq!(provider.kind(), TokenKind::Tenant);
	}
}
