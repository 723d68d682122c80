//! Bot Runtime Binary
//!
//! Runs a demo momentum bot against an in-process sawtooth price feed.
//! Order intents go to stdout, heartbeats go to the log. Stop with
//! Ctrl+C.
//!
//! # Usage
//!
//! ```bash
//! BOT_ID=demo-bot BOT_ACCOUNT_ID=demo-account cargo run --bin bot-runtime
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `BOT_ID`: Unique bot instance identifier
//! - `BOT_ACCOUNT_ID`: Account the bot trades under
//!
//! ## Optional
//! - `BOT_SYMBOL`: Symbol quoted by the demo feed (default: VN30)
//! - `BOT_POLL_INTERVAL_MS`: Cycle spacing in milliseconds (default: 1000)
//! - `BOT_HEARTBEAT_INTERVAL_MS`: Heartbeat spacing in milliseconds (default: 5000)
//! - `BOT_MAX_CONSECUTIVE_ERRORS`: Failed cycles before self-stop, 0 disables (default: 5)
//! - `BOT_SHUTDOWN_TIMEOUT_SECS`: Graceful shutdown warning threshold (default: 5)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use bot_runtime::{
    AccountId, Bot, BotContext, BotError, BotId, BotRuntime, HealthReport, LogHeartbeatSink,
    MarketSnapshot, OrderIntent, OrderSide, QueueMarketDataFeed, RuntimeHandle, RuntimeSettings,
    StateStoreError, StopReason,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    init_tracing();

    tracing::info!("Starting bot runtime");

    let settings = RuntimeSettings::from_env()?;
    log_config(&settings);

    run_demo(settings).await?;

    tracing::info!("Bot runtime exited");
    Ok(())
}

/// Demo strategy: buy one unit when the price rises, sell one unit when
/// it falls. The last seen price survives restarts through the state
/// store.
struct MomentumBot {
    symbol: String,
    last_price: Option<Decimal>,
}

#[async_trait]
impl Bot for MomentumBot {
    async fn on_start(&mut self, ctx: &BotContext) -> Result<(), BotError> {
        if let Some(value) = ctx.state.get("last_price").await? {
            self.last_price = serde_json::from_value(value).ok();
        }
        tracing::info!(symbol = %self.symbol, "Momentum bot started");
        Ok(())
    }

    async fn on_tick(
        &mut self,
        snapshot: &MarketSnapshot,
        ctx: &BotContext,
    ) -> Result<Vec<OrderIntent>, BotError> {
        let Some(price) = snapshot.price else {
            return Ok(Vec::new());
        };
        let symbol = snapshot
            .symbol
            .clone()
            .unwrap_or_else(|| self.symbol.clone());

        let intents = match self.last_price {
            Some(previous) if price > previous => {
                vec![OrderIntent::new(symbol, OrderSide::Buy, Decimal::ONE)]
            }
            Some(previous) if price < previous => {
                vec![OrderIntent::new(symbol, OrderSide::Sell, Decimal::ONE)]
            }
            _ => Vec::new(),
        };

        self.last_price = Some(price);
        let encoded = serde_json::to_value(price).map_err(StateStoreError::from)?;
        ctx.state.set("last_price", encoded).await?;

        Ok(intents)
    }

    async fn on_stop(&mut self, reason: &StopReason, _ctx: &BotContext) -> Result<(), BotError> {
        tracing::info!(reason = %reason, "Momentum bot stopped");
        Ok(())
    }

    async fn health(&self) -> HealthReport {
        self.last_price.map_or_else(HealthReport::healthy, |price| {
            HealthReport::healthy()
                .with_detail("last_price", serde_json::Value::String(price.to_string()))
        })
    }
}

/// Wire the demo bot to in-process connectors and run it to completion.
async fn run_demo(settings: RuntimeSettings) -> anyhow::Result<()> {
    let feed = Arc::new(QueueMarketDataFeed::new());
    let ctx = BotContext::new(
        BotId::new(settings.bot_id.clone()),
        AccountId::new(settings.account_id.clone()),
    )
    .with_market_data(feed.clone())
    .with_heartbeat(Arc::new(LogHeartbeatSink::new()));

    let bot = MomentumBot {
        symbol: settings.symbol.clone(),
        last_price: None,
    };
    let runtime = BotRuntime::with_config(bot, ctx, settings.runtime.clone());
    let handle = runtime.handle();

    spawn_feeder(feed, handle, settings.symbol, settings.runtime.poll_interval);

    runtime.run().await?;
    Ok(())
}

/// Push a sawtooth quote stream into the feed until the runtime stops.
fn spawn_feeder(
    feed: Arc<QueueMarketDataFeed>,
    handle: RuntimeHandle,
    symbol: String,
    interval: Duration,
) {
    tokio::spawn(async move {
        let lower = Decimal::from(95);
        let upper = Decimal::from(105);
        let mut price = Decimal::from(100);
        let mut step = Decimal::ONE;

        loop {
            feed.push(MarketSnapshot::quote(symbol.clone(), price));

            if price >= upper {
                step = -Decimal::ONE;
            } else if price <= lower {
                step = Decimal::ONE;
            }
            price += step;

            tokio::select! {
                () = handle.finished() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }
    });
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_err() {
        load_dotenv_from_ancestors();
    }
}

/// Walk up from the working directory looking for a .env file.
fn load_dotenv_from_ancestors() {
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "bot_runtime=info"
                    .parse()
                    .expect("static directive 'bot_runtime=info' is valid"),
            ),
        )
        .init();
}

/// Log the parsed configuration.
fn log_config(settings: &RuntimeSettings) {
    tracing::info!(
        bot_id = %settings.bot_id,
        account_id = %settings.account_id,
        symbol = %settings.symbol,
        poll_interval_ms = settings.runtime.poll_interval.as_millis() as u64,
        heartbeat_interval_ms = settings.runtime.heartbeat_interval.as_millis() as u64,
        max_consecutive_errors = settings.runtime.max_consecutive_errors,
        "Configuration loaded"
    );
}
