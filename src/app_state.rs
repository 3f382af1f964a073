// =============================================================================
// Application State — shared, read-only after startup
// =============================================================================
//
// Everything a request handler needs: config, the symbol resolver, the two
// HTTP clients and the credentials. The only mutable parts are atomic
// counters surfaced by the health endpoint and the set of in-flight reply
// tasks, which shutdown drains; no per-user or per-query state is retained.
// =============================================================================

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::config::{BotConfig, Credentials};
use crate::line::LineClient;
use crate::resolver::SymbolResolver;
use crate::twse::TwseClient;

/// Central application state shared across handlers via `Arc<AppState>`.
pub struct AppState {
    pub config: BotConfig,
    pub resolver: SymbolResolver,
    pub twse: TwseClient,
    pub line: LineClient,
    pub credentials: Credentials,

    started_at: Instant,
    queries_served: AtomicU64,
    queries_failed: AtomicU64,
    replies: Mutex<JoinSet<()>>,
}

/// Counter snapshot for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Counters {
    pub uptime_secs: u64,
    pub queries_served: u64,
    pub queries_failed: u64,
}

impl AppState {
    pub fn new(config: BotConfig, credentials: Credentials) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let resolver = SymbolResolver::new(&config.aliases);
        debug!(aliases = resolver.len(), "symbol resolver ready");
        let twse = TwseClient::new(&config.twse_base_url, timeout, config.history_months)?;
        let line = LineClient::new(
            &config.line_api_base_url,
            credentials.channel_access_token.clone(),
            timeout,
        )?;

        Ok(Self {
            config,
            resolver,
            twse,
            line,
            credentials,
            started_at: Instant::now(),
            queries_served: AtomicU64::new(0),
            queries_failed: AtomicU64::new(0),
            replies: Mutex::new(JoinSet::new()),
        })
    }

    /// Run a chat reply in the background, tracked so shutdown can wait for it.
    pub async fn spawn_reply<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut replies = self.replies.lock().await;
        while replies.try_join_next().is_some() {}
        replies.spawn(task);
    }

    /// Wait up to `grace` for in-flight replies; abort whatever is left.
    /// Returns how many replies were still pending when the drain started.
    pub async fn drain_replies(&self, grace: Duration) -> usize {
        let mut replies = self.replies.lock().await;
        while replies.try_join_next().is_some() {}
        let pending = replies.len();

        let joined = tokio::time::timeout(grace, async {
            while let Some(res) = replies.join_next().await {
                if let Err(e) = res {
                    warn!(error = %e, "reply task ended abnormally");
                }
            }
        })
        .await;

        if joined.is_err() {
            warn!(remaining = replies.len(), "reply drain timed out, aborting");
            replies.abort_all();
            while replies.join_next().await.is_some() {}
        }
        pending
    }

    pub fn record_served(&self) {
        self.queries_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn counters(&self) -> Counters {
        Counters {
            uptime_secs: self.started_at.elapsed().as_secs(),
            queries_served: self.queries_served.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_defaults() {
        let state = AppState::new(BotConfig::default(), Credentials::default()).unwrap();
        assert_eq!(state.resolver.len(), 5);
        assert!(!state.line.is_configured());
    }

    #[test]
    fn counters_increment() {
        let state = AppState::new(BotConfig::default(), Credentials::default()).unwrap();
        state.record_served();
        state.record_served();
        state.record_failed();
        let c = state.counters();
        assert_eq!(c.queries_served, 2);
        assert_eq!(c.queries_failed, 1);
    }

    #[tokio::test]
    async fn drain_waits_for_in_flight_replies() {
        use std::sync::atomic::AtomicBool;
        use std::sync::Arc;

        let state = AppState::new(BotConfig::default(), Credentials::default()).unwrap();
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        state
            .spawn_reply(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                flag.store(true, Ordering::SeqCst);
            })
            .await;

        let pending = state.drain_replies(Duration::from_secs(5)).await;
        assert_eq!(pending, 1);
        assert!(done.load(Ordering::SeqCst));
        assert_eq!(state.drain_replies(Duration::from_secs(1)).await, 0);
    }

    #[tokio::test]
    async fn drain_gives_up_after_grace() {
        let state = AppState::new(BotConfig::default(), Credentials::default()).unwrap();
        state.spawn_reply(std::future::pending::<()>()).await;

        let pending = state.drain_replies(Duration::from_millis(20)).await;
        assert_eq!(pending, 1);
        assert_eq!(state.drain_replies(Duration::from_millis(20)).await, 0);
    }
}
