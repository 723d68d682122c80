//! Bot Runtime Service
//!
//! Drives a [`Bot`] through its lifecycle: drain control messages, poll
//! market data, invoke the tick hook, publish the resulting intents, and
//! emit heartbeats, until a stop is requested or the consecutive-error
//! threshold is reached.
//!
//! The loop runs in whichever task awaits [`BotRuntime::run`]. Other
//! tasks interact with it only through a [`RuntimeHandle`], whose stop
//! methods funnel into the same one-shot [`StopSignal`] the loop polls.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tokio_util::sync::CancellationToken;

use crate::application::bot::{Bot, BotContext, BotError};
use crate::application::ports::{
    ControlChannelPort, HeartbeatError, MarketDataError, PublishError,
};
use crate::application::services::stop_signal::StopSignal;
use crate::domain::heartbeat::{HeartbeatPayload, HeartbeatStats};
use crate::domain::runtime::{RuntimePhase, RuntimeStats, StopReason};

/// Tunables governing the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Target spacing between cycle starts.
    pub poll_interval: Duration,
    /// Spacing between heartbeats. The first heartbeat is emitted on the
    /// first cycle.
    pub heartbeat_interval: Duration,
    /// Failed cycles in a row before the runtime stops itself.
    /// Zero disables the threshold.
    pub max_consecutive_errors: u32,
    /// How long [`RuntimeHandle::stop`] waits before logging that
    /// shutdown is slow. Advisory: the call keeps waiting afterwards.
    pub graceful_shutdown_timeout: Duration,
}

impl RuntimeConfig {
    /// Lower bound applied to `poll_interval` at loop entry.
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);
    /// Lower bound applied to `heartbeat_interval` at loop entry.
    pub const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(100);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            heartbeat_interval: Duration::from_secs(5),
            max_consecutive_errors: 5,
            graceful_shutdown_timeout: Duration::from_secs(5),
        }
    }
}

/// Fatal runtime error.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The start hook failed. The stop hook still ran before this was
    /// returned.
    #[error("Bot start hook failed: {source}")]
    StartFailed {
        /// The hook's error.
        #[source]
        source: BotError,
    },
}

/// One cycle's failure, from whichever step broke.
#[derive(Debug, thiserror::Error)]
enum CycleError {
    #[error(transparent)]
    Fetch(#[from] MarketDataError),
    #[error(transparent)]
    Tick(#[from] BotError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error(transparent)]
    Heartbeat(#[from] HeartbeatError),
}

/// Cloneable view of a running [`BotRuntime`].
///
/// Handles stay valid after the runtime finishes; observers see the
/// final stats and phase.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    stats: Arc<RwLock<RuntimeStats>>,
    phase: Arc<AtomicU8>,
    stop: StopSignal,
    finished: CancellationToken,
    graceful_shutdown_timeout: Duration,
}

impl RuntimeHandle {
    /// Request a stop with the default `external-request` reason and
    /// wait for shutdown to complete.
    pub async fn stop(&self) {
        self.stop_with_reason(StopReason::external_request()).await;
    }

    /// Request a stop and wait for shutdown to complete.
    ///
    /// The first stop request wins the recorded reason; later callers
    /// still wait, they just don't change it. If shutdown takes longer
    /// than the configured graceful timeout a warning is logged and the
    /// call keeps waiting.
    pub async fn stop_with_reason(&self, reason: StopReason) {
        let _ = self.stop.request(reason);
        if timeout(self.graceful_shutdown_timeout, self.finished.cancelled())
            .await
            .is_err()
        {
            tracing::warn!(
                timeout_secs = self.graceful_shutdown_timeout.as_secs_f64(),
                "Graceful shutdown timeout elapsed, still waiting"
            );
            self.finished.cancelled().await;
        }
    }

    /// Request a stop without waiting for shutdown.
    ///
    /// Returns `true` if this call recorded the stop reason.
    pub fn request_stop(&self, reason: StopReason) -> bool {
        self.stop.request(reason)
    }

    /// Wait until the runtime has fully shut down.
    pub async fn finished(&self) {
        self.finished.cancelled().await;
    }

    /// Whether the runtime has fully shut down.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.is_cancelled()
    }

    /// Snapshot of the runtime counters.
    #[must_use]
    pub fn stats(&self) -> RuntimeStats {
        self.stats.read().clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RuntimePhase {
        RuntimePhase::from(self.phase.load(Ordering::SeqCst))
    }

    /// The recorded stop reason, once a stop has been requested.
    #[must_use]
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop.reason()
    }
}

/// Lifecycle orchestrator for a single bot instance.
///
/// [`run`](Self::run) consumes the runtime, so an instance drives
/// exactly one lifecycle; restarting means building a fresh one. All
/// collaborator calls happen sequentially inside the loop task, which
/// is the only writer of the stats.
pub struct BotRuntime<B: Bot> {
    bot: B,
    ctx: BotContext,
    config: RuntimeConfig,
    stats: Arc<RwLock<RuntimeStats>>,
    phase: Arc<AtomicU8>,
    stop: StopSignal,
    finished: CancellationToken,
    signals_installed: bool,
}

impl<B: Bot> BotRuntime<B> {
    /// Create a runtime with default configuration.
    #[must_use]
    pub fn new(bot: B, ctx: BotContext) -> Self {
        Self::with_config(bot, ctx, RuntimeConfig::default())
    }

    /// Create a runtime with explicit configuration.
    #[must_use]
    pub fn with_config(bot: B, ctx: BotContext, config: RuntimeConfig) -> Self {
        Self {
            bot,
            ctx,
            config,
            stats: Arc::new(RwLock::new(RuntimeStats::new())),
            phase: Arc::new(AtomicU8::new(RuntimePhase::Starting as u8)),
            stop: StopSignal::new(),
            finished: CancellationToken::new(),
            signals_installed: false,
        }
    }

    /// Create a handle for stopping and observing this runtime.
    ///
    /// Take handles before calling [`run`](Self::run); they stay valid
    /// after the runtime finishes.
    #[must_use]
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            stats: Arc::clone(&self.stats),
            phase: Arc::clone(&self.phase),
            stop: self.stop.clone(),
            finished: self.finished.clone(),
            graceful_shutdown_timeout: self.config.graceful_shutdown_timeout,
        }
    }

    /// Snapshot of the runtime counters.
    #[must_use]
    pub fn stats(&self) -> RuntimeStats {
        self.stats.read().clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RuntimePhase {
        RuntimePhase::from(self.phase.load(Ordering::SeqCst))
    }

    /// Drive the bot until a stop condition is reached.
    ///
    /// Installs signal handlers, runs the start hook, then iterates
    /// until the stop latch trips. The shutdown sequence (stop hook,
    /// final log, finished latch) always runs, including when the start
    /// hook fails; in that case the failure is returned after shutdown
    /// completes.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.install_signal_handlers();
        tracing::info!(bot_id = %self.ctx.bot_id, "Bot runtime starting");

        if let Err(err) = self.bot.on_start(&self.ctx).await {
            tracing::error!(error = %err, "Bot start hook failed");
            let _ = self.stop.request(StopReason::start_failed());
            self.shutdown().await;
            return Err(RuntimeError::StartFailed { source: err });
        }

        self.advance_phase(RuntimePhase::Running);
        self.main_loop().await;
        self.shutdown().await;
        Ok(())
    }

    /// Spawn a task that converts SIGINT/SIGTERM into stop requests.
    ///
    /// Installation is best effort: if the process cannot register a
    /// handler the runtime still works, it just cannot be stopped by
    /// that signal. The task exits once the runtime finishes.
    fn install_signal_handlers(&mut self) {
        if self.signals_installed {
            return;
        }
        self.signals_installed = true;

        let stop = self.stop.clone();
        let finished = self.finished.clone();
        tokio::spawn(async move {
            tokio::select! {
                reason = signal_reason() => {
                    tracing::info!(reason = %reason, "Shutdown signal received");
                    let _ = stop.request(reason);
                }
                () = finished.cancelled() => {}
            }
        });
    }

    async fn main_loop(&mut self) {
        let poll_interval = self.config.poll_interval.max(RuntimeConfig::MIN_POLL_INTERVAL);
        let heartbeat_interval = self
            .config
            .heartbeat_interval
            .max(RuntimeConfig::MIN_HEARTBEAT_INTERVAL);
        // Due immediately: the first cycle always emits a heartbeat.
        let mut next_heartbeat = Instant::now();

        while !self.stop.is_requested() {
            let cycle_started = Instant::now();

            if let Some(channel) = self.ctx.control.clone() {
                self.drain_control(channel.as_ref()).await;
                if self.stop.is_requested() {
                    break;
                }
            }

            match self.run_cycle().await {
                Ok(()) => self.stats.write().record_tick(),
                Err(err) => {
                    if self.record_failure(&err) {
                        break;
                    }
                }
            }

            // Heartbeats run even after a failed (non-escalated) cycle.
            let now = Instant::now();
            if self.ctx.heartbeat.is_some() && now >= next_heartbeat {
                let outcome = self.emit_heartbeat().await;
                next_heartbeat = now + heartbeat_interval;
                if let Err(err) = outcome {
                    if self.record_failure(&CycleError::Heartbeat(err)) {
                        break;
                    }
                }
            }

            let sleep_for = poll_interval.saturating_sub(cycle_started.elapsed());
            tokio::select! {
                () = self.stop.requested() => {}
                () = sleep(sleep_for) => {}
            }
        }
    }

    /// Fetch, tick, publish. Counts each intent as it is forwarded, so
    /// a mid-sequence publish failure still leaves the earlier intents
    /// counted.
    async fn run_cycle(&mut self) -> Result<(), CycleError> {
        let snapshot = self.ctx.market_data.fetch().await?;
        let intents = self.bot.on_tick(&snapshot, &self.ctx).await?;

        for intent in intents {
            self.ctx.orders.publish(intent).await?;
            self.stats.write().record_published();
        }
        Ok(())
    }

    /// Drain pending control messages with non-blocking receives.
    ///
    /// Every message reaches the event hook, stop commands included.
    /// A stop command trips the latch and ends the drain; a receive
    /// error ends the drain for this cycle without counting toward the
    /// error threshold.
    async fn drain_control(&mut self, channel: &dyn ControlChannelPort) {
        loop {
            match channel.receive(Duration::ZERO).await {
                Ok(Some(message)) => {
                    if let Err(err) = self.bot.on_event(&message, &self.ctx).await {
                        tracing::warn!(
                            error = %err,
                            kind = %message.kind,
                            "Bot event hook failed"
                        );
                    }
                    if message.is_stop_command() {
                        let reason = message.stop_reason();
                        tracing::info!(reason = %reason, "Stop command received");
                        let _ = self.stop.request(reason);
                        break;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "Control channel receive failed");
                    break;
                }
            }
        }
    }

    /// Build and publish one heartbeat.
    ///
    /// The attempt timestamp is recorded before publishing, so even a
    /// failing sink shows when the runtime last tried.
    async fn emit_heartbeat(&self) -> Result<(), HeartbeatError> {
        let Some(sink) = &self.ctx.heartbeat else {
            return Ok(());
        };

        let status = self.bot.health().await;
        let stats = HeartbeatStats::from(&*self.stats.read());
        let payload = HeartbeatPayload {
            bot_id: self.ctx.bot_id.clone(),
            account_id: self.ctx.account_id.clone(),
            status,
            stats,
        };

        self.stats.write().record_heartbeat(Utc::now());
        sink.publish(payload).await
    }

    /// Record a failed cycle; returns `true` when the threshold was
    /// reached and the stop latch has been tripped.
    fn record_failure(&self, err: &CycleError) -> bool {
        let streak = self.stats.write().record_failure(err);
        tracing::warn!(error = %err, consecutive_errors = streak, "Bot cycle failed");

        let max = self.config.max_consecutive_errors;
        if max > 0 && streak >= max {
            tracing::error!(count = streak, "Consecutive error threshold reached, stopping");
            let _ = self.stop.request(StopReason::max_errors());
            return true;
        }
        false
    }

    /// Stop hook, final log, latches. Runs exactly once per lifecycle.
    async fn shutdown(&mut self) {
        self.advance_phase(RuntimePhase::Stopping);
        let reason = self.stop.reason().unwrap_or_default();

        if let Err(err) = self.bot.on_stop(&reason, &self.ctx).await {
            tracing::warn!(error = %err, "Bot stop hook failed");
        }

        tracing::info!(bot_id = %self.ctx.bot_id, reason = %reason, "Bot runtime stopped");
        self.advance_phase(RuntimePhase::Stopped);
        self.finished.cancel();
    }

    /// Phases only move forward; `fetch_max` makes out-of-order calls
    /// harmless.
    fn advance_phase(&self, phase: RuntimePhase) {
        self.phase.fetch_max(phase as u8, Ordering::SeqCst);
    }
}

/// Resolve when the process receives a shutdown signal.
async fn signal_reason() -> StopReason {
    tokio::select! {
        reason = sigint_reason() => reason,
        reason = sigterm_reason() => reason,
    }
}

async fn sigint_reason() -> StopReason {
    match tokio::signal::ctrl_c().await {
        Ok(()) => StopReason::signal("sigint"),
        Err(err) => {
            tracing::debug!(error = %err, "Ctrl+C handler unavailable");
            std::future::pending().await
        }
    }
}

#[cfg(unix)]
async fn sigterm_reason() -> StopReason {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
            StopReason::signal("sigterm")
        }
        Err(err) => {
            tracing::debug!(error = %err, "SIGTERM handler unavailable");
            std::future::pending().await
        }
    }
}

#[cfg(not(unix))]
async fn sigterm_reason() -> StopReason {
    std::future::pending().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HeartbeatPort, MarketDataPort, StaticMarketDataFeed};
    use crate::domain::market_data::MarketSnapshot;
    use crate::domain::shared::{AccountId, BotId};
    use crate::domain::trading::OrderIntent;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use rust_decimal::Decimal;

    const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Bot that does nothing each tick.
    struct IdleBot;

    #[async_trait]
    impl Bot for IdleBot {
        async fn on_tick(
            &mut self,
            _snapshot: &MarketSnapshot,
            _ctx: &BotContext,
        ) -> Result<Vec<OrderIntent>, BotError> {
            Ok(Vec::new())
        }
    }

    /// Bot that records the stop reason it was handed.
    struct StopRecorder {
        fail_start: bool,
        stop_reasons: Arc<Mutex<Vec<String>>>,
    }

    impl StopRecorder {
        fn new(fail_start: bool) -> (Self, Arc<Mutex<Vec<String>>>) {
            let reasons = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    fail_start,
                    stop_reasons: Arc::clone(&reasons),
                },
                reasons,
            )
        }
    }

    #[async_trait]
    impl Bot for StopRecorder {
        async fn on_start(&mut self, _ctx: &BotContext) -> Result<(), BotError> {
            if self.fail_start {
                return Err(BotError::strategy("config missing"));
            }
            Ok(())
        }

        async fn on_tick(
            &mut self,
            _snapshot: &MarketSnapshot,
            _ctx: &BotContext,
        ) -> Result<Vec<OrderIntent>, BotError> {
            Ok(Vec::new())
        }

        async fn on_stop(
            &mut self,
            reason: &StopReason,
            _ctx: &BotContext,
        ) -> Result<(), BotError> {
            self.stop_reasons.lock().push(reason.as_str().to_string());
            Ok(())
        }
    }

    /// Feed whose fetch always fails.
    struct BrokenFeed;

    #[async_trait]
    impl MarketDataPort for BrokenFeed {
        async fn fetch(&self) -> Result<MarketSnapshot, MarketDataError> {
            Err(MarketDataError::DataUnavailable {
                message: "feed offline".to_string(),
            })
        }
    }

    /// Sink whose publish always fails.
    struct BrokenSink;

    #[async_trait]
    impl HeartbeatPort for BrokenSink {
        async fn publish(&self, _payload: HeartbeatPayload) -> Result<(), HeartbeatError> {
            Err(HeartbeatError::ConnectionError {
                message: "sink offline".to_string(),
            })
        }
    }

    fn test_ctx() -> BotContext {
        BotContext::new(BotId::new("bot-1"), AccountId::new("acct-1"))
    }

    fn fast_config(max_consecutive_errors: u32) -> RuntimeConfig {
        RuntimeConfig {
            poll_interval: Duration::from_millis(1),
            heartbeat_interval: Duration::from_millis(1),
            max_consecutive_errors,
            graceful_shutdown_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn config_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.heartbeat_interval, Duration::from_secs(5));
        assert_eq!(config.max_consecutive_errors, 5);
        assert_eq!(config.graceful_shutdown_timeout, Duration::from_secs(5));
    }

    #[test]
    fn new_runtime_is_starting_with_zeroed_stats() {
        let runtime = BotRuntime::new(IdleBot, test_ctx());
        assert_eq!(runtime.phase(), RuntimePhase::Starting);
        assert_eq!(runtime.stats(), RuntimeStats::new());

        let handle = runtime.handle();
        assert_eq!(handle.phase(), RuntimePhase::Starting);
        assert!(!handle.is_finished());
        assert_eq!(handle.stop_reason(), None);
    }

    #[tokio::test]
    async fn start_hook_failure_still_runs_shutdown() {
        let (bot, reasons) = StopRecorder::new(true);
        let runtime = BotRuntime::new(bot, test_ctx());
        let handle = runtime.handle();

        let result = tokio::time::timeout(TEST_TIMEOUT, runtime.run())
            .await
            .expect("run should finish");

        assert!(matches!(result, Err(RuntimeError::StartFailed { .. })));
        assert_eq!(*reasons.lock(), vec!["start-failed".to_string()]);
        assert_eq!(handle.phase(), RuntimePhase::Stopped);
        assert!(handle.is_finished());
        assert_eq!(handle.stop_reason().unwrap().as_str(), "start-failed");
    }

    #[tokio::test]
    async fn consecutive_fetch_failures_stop_the_runtime() {
        let (bot, reasons) = StopRecorder::new(false);
        let ctx = test_ctx()
            .with_market_data(Arc::new(BrokenFeed))
            .without_heartbeat();
        let runtime = BotRuntime::with_config(bot, ctx, fast_config(2));
        let handle = runtime.handle();

        let result = tokio::time::timeout(TEST_TIMEOUT, runtime.run())
            .await
            .expect("run should finish");
        assert!(result.is_ok());

        let stats = handle.stats();
        assert_eq!(stats.consecutive_errors, 2);
        assert_eq!(stats.ticks, 0);
        assert!(stats.last_error.unwrap().contains("feed offline"));
        assert_eq!(handle.stop_reason().unwrap().as_str(), "max-errors");
        assert_eq!(*reasons.lock(), vec!["max-errors".to_string()]);
    }

    #[tokio::test]
    async fn heartbeat_failure_counts_toward_threshold() {
        let ctx = test_ctx().with_heartbeat(Arc::new(BrokenSink));
        let runtime = BotRuntime::with_config(IdleBot, ctx, fast_config(1));
        let handle = runtime.handle();

        tokio::time::timeout(TEST_TIMEOUT, runtime.run())
            .await
            .expect("run should finish")
            .expect("run should succeed");

        let stats = handle.stats();
        assert_eq!(stats.ticks, 1, "the tick itself succeeded");
        assert_eq!(stats.consecutive_errors, 1);
        assert!(stats.last_error.unwrap().contains("sink offline"));
        assert!(stats.last_heartbeat_at.is_some());
        assert_eq!(handle.stop_reason().unwrap().as_str(), "max-errors");
    }

    #[tokio::test]
    async fn zero_threshold_disables_escalation() {
        let ctx = test_ctx()
            .with_market_data(Arc::new(BrokenFeed))
            .without_heartbeat();
        let runtime = BotRuntime::with_config(IdleBot, ctx, fast_config(0));
        let handle = runtime.handle();

        let task = tokio::spawn(runtime.run());
        // Let several failing cycles pass (poll floor is 50ms).
        sleep(Duration::from_millis(220)).await;

        assert!(!handle.is_finished());
        assert!(handle.stats().consecutive_errors >= 2);

        handle.stop().await;
        tokio::time::timeout(TEST_TIMEOUT, task)
            .await
            .expect("run should finish")
            .expect("task should not panic")
            .expect("run should succeed");
        assert_eq!(handle.stop_reason().unwrap().as_str(), "external-request");
    }

    #[tokio::test]
    async fn handle_stop_blocks_until_stop_hook_ran() {
        let (bot, reasons) = StopRecorder::new(false);
        let ctx = test_ctx().with_market_data(Arc::new(StaticMarketDataFeed::new(
            MarketSnapshot::quote("VN30", Decimal::ONE),
        )));
        let runtime = BotRuntime::new(bot, ctx);
        let handle = runtime.handle();

        let task = tokio::spawn(runtime.run());

        tokio::time::timeout(TEST_TIMEOUT, handle.stop())
            .await
            .expect("stop should unblock");

        // By the time stop() returns the stop hook has run.
        assert_eq!(*reasons.lock(), vec!["external-request".to_string()]);
        assert!(handle.is_finished());
        assert_eq!(handle.phase(), RuntimePhase::Stopped);

        task.await.expect("task should not panic").expect("run should succeed");
    }

    #[tokio::test]
    async fn stop_requested_before_run_prevents_all_cycles() {
        let (bot, reasons) = StopRecorder::new(false);
        let runtime = BotRuntime::new(bot, test_ctx());
        let handle = runtime.handle();

        assert!(handle.request_stop(StopReason::new("pre-run")));
        assert!(!handle.request_stop(StopReason::new("too-late")));

        tokio::time::timeout(TEST_TIMEOUT, runtime.run())
            .await
            .expect("run should finish")
            .expect("run should succeed");

        assert_eq!(handle.stats().ticks, 0);
        assert_eq!(handle.stop_reason().unwrap().as_str(), "pre-run");
        assert_eq!(*reasons.lock(), vec!["pre-run".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_stops_record_one_reason_and_all_unblock() {
        let runtime = BotRuntime::new(IdleBot, test_ctx());
        let handle_a = runtime.handle();
        let handle_b = runtime.handle();

        let task = tokio::spawn(runtime.run());

        tokio::time::timeout(TEST_TIMEOUT, async {
            tokio::join!(
                handle_a.stop_with_reason(StopReason::new("alpha")),
                handle_b.stop_with_reason(StopReason::new("beta")),
            )
        })
        .await
        .expect("both stops should unblock");

        let reason = handle_a.stop_reason().unwrap();
        assert!(reason.as_str() == "alpha" || reason.as_str() == "beta");
        assert!(handle_a.is_finished());

        tokio::time::timeout(TEST_TIMEOUT, task)
            .await
            .expect("run should finish")
            .expect("task should not panic")
            .expect("run should succeed");
    }
}
