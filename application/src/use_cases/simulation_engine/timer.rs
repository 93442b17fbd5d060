//! Auto-mode round timer
//!
//! A supervised background task owned by the engine. It runs one round per
//! tick while the simulation is running in auto mode. A tick that finds a
//! round already in flight is skipped, never queued.

use super::EngineInner;
use super::round::RoundSource;
use crate::ports::ai_client::AiDecisionClient;
use boardroom_domain::SimulationState;
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Cancellation handle for a running timer task
pub(super) struct TimerHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
    period: Duration,
}

impl TimerHandle {
    /// Stop future ticks. An in-flight round still completes.
    pub(super) fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait for the task to finish
    pub(super) async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.task.await
            && e.is_panic()
        {
            error!("Round timer panicked: {}", e);
        }
    }

    pub(super) fn period(&self) -> Duration {
        self.period
    }
}

/// Spawn the timer. The first tick fires one full period from now.
pub(super) fn spawn<C: AiDecisionClient + 'static>(
    engine: Weak<EngineInner<C>>,
    period: Duration,
) -> TimerHandle {
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let task = tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => break,
                _ = interval.tick() => {}
            }

            let Some(engine) = engine.upgrade() else {
                break;
            };
            tick(&engine, &cancelled).await;
        }

        debug!("Round timer stopped");
    });

    TimerHandle {
        token,
        task,
        period,
    }
}

async fn tick<C: AiDecisionClient + 'static>(
    engine: &EngineInner<C>,
    cancelled: &CancellationToken,
) {
    let Ok(_gate) = engine.round_gate.try_lock() else {
        warn!("Round still in flight, skipping timer tick");
        return;
    };

    {
        // Timers are cancelled under the control lock, so a superseded timer
        // sees its token cancelled here even if the state is Running again.
        let control = engine.control.lock().await;
        if cancelled.is_cancelled() {
            debug!("Timer tick dropped after cancellation");
            return;
        }
        if control.state != SimulationState::Running || !control.mode.is_auto() {
            debug!("Timer tick ignored in state {} ({})", control.state, control.mode);
            return;
        }
    }

    if let Err(e) = engine.run_round(RoundSource::Timer).await {
        error!("Timed round failed: {}", e);
    }
}
