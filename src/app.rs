// src/app.rs
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::info;

use crate::application::{StorePoller, WatchCycle};
use crate::config::Config;
use crate::infrastructure::{
    HttpStatsSource, JsonFileHistoryStore, LogNotifier, Notifier, TelegramNotifier,
};

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
    /// Log alerts instead of sending them
    pub dry_run: bool,
    /// Run a single cycle and exit
    pub once: bool,
}

impl AppCfg {
    pub fn from_config(config: Config, dry_run: bool, once: bool) -> Result<Self> {
        config
            .validate(!dry_run)
            .context("validate configuration")?;
        Ok(Self { config, dry_run, once })
    }
}

/// Wire the production adapters into a watch cycle
pub fn build_cycle(app_cfg: &AppCfg) -> Result<WatchCycle> {
    let config = &app_cfg.config;

    let source = HttpStatsSource::new(config.request_timeout()).context("build HTTP client")?;
    let history_store = JsonFileHistoryStore::new(&config.history_path);
    let notifier: Arc<dyn Notifier> = if app_cfg.dry_run {
        Arc::new(LogNotifier)
    } else {
        Arc::new(
            TelegramNotifier::new(&config.telegram, config.request_timeout())
                .context("build Telegram client")?,
        )
    };

    Ok(WatchCycle::new(
        config.stores.clone(),
        StorePoller::new(Arc::new(source)),
        Arc::new(history_store),
        notifier,
    ))
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("🚀 Starting floor watcher");
    info!(
        "Watching {} store(s), {} collection(s), history in {}",
        app_cfg.config.stores.len(),
        app_cfg.config.stores.iter().map(|s| s.slugs.len()).sum::<usize>(),
        app_cfg.config.history_path
    );
    for store in &app_cfg.config.stores {
        info!("   - {}: {}", store.label(), store.slugs.join(", "));
    }

    let cycle = build_cycle(&app_cfg)?;

    if app_cfg.once {
        let summary = cycle.run_cycle().await;
        info!("Single cycle done: {:?}", summary);
        return Ok(());
    }

    let shutdown = listen_for_shutdown(shutdown_signal());
    let cycles = run_until(&cycle, app_cfg.config.poll_interval(), shutdown).await;
    info!("🛑 Stopped after {} cycle(s)", cycles);
    Ok(())
}

/// Run cycles back to back with `interval` of sleep in between until `shutdown` resolves.
///
/// A cycle in flight always completes so alerts and history stay in step.
pub async fn run_until<F>(cycle: &WatchCycle, interval: Duration, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut cycles = 0;

    loop {
        cycle.run_cycle().await;
        cycles += 1;

        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    cycles
}

/// Start watching for `signal` right away on its own task.
///
/// The returned future resolves once the signal has fired, even if that happened
/// before it was first polled. `ctrl_c` only installs its handler when polled, so
/// it must not wait for the loop to reach its first sleep.
pub fn listen_for_shutdown<S>(signal: S) -> impl Future<Output = ()>
where
    S: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        signal.await;
        let _ = tx.send(());
    });
    async move {
        if rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
