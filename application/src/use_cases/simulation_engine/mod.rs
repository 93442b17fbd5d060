//! Simulation engine
//!
//! Owns the simulation lifecycle, advances rounds manually or on a timer,
//! and keeps the append-only decision and event logs.
//!
//! # Locking
//!
//! | Lock | Guards |
//! |------|--------|
//! | `round_gate` | at most one round in flight; reset waits on it |
//! | `control` | state, mode, phase, config, timer handle |
//! | `world` | round counter, entity store, logs |
//!
//! Locks are always taken in the order `round_gate`, `control`, `world`.
//! The engine is a cheap [`Clone`] handle; every clone drives the same
//! simulation.

pub mod error;
mod queries;
mod round;
mod timer;
pub mod views;

#[cfg(test)]
mod testing;

use self::error::EngineError;
use self::round::RoundSource;
use self::timer::TimerHandle;
use crate::config::EngineOptions;
use crate::ports::ai_client::AiDecisionClient;
use crate::ports::audit_logger::{AuditLogger, AuditRecord, NoAuditLogger};
use crate::ports::progress::{NoProgress, RoundProgressNotifier};
use crate::use_cases::run_decision::DecisionVotingUseCase;
use boardroom_domain::{
    ConfigUpdate, DecisionLog, DecisionTrigger, EntityStore, EventLog, EventType,
    LifecycleCommand, PopulationSeed, RoundPhase, SimulationConfig, SimulationEvent,
    SimulationMode, SimulationState, SimulationSummary, VoteInterpreter,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Lifecycle and configuration state
struct ControlState {
    state: SimulationState,
    mode: SimulationMode,
    phase: RoundPhase,
    config: SimulationConfig,
    timer: Option<TimerHandle>,
}

/// Simulation data published by rounds
struct World {
    current_round: u64,
    last_round_time: Option<DateTime<Utc>>,
    store: EntityStore,
    decisions: DecisionLog,
    events: EventLog,
}

impl World {
    fn seeded(config: &SimulationConfig) -> Self {
        Self {
            current_round: 0,
            last_round_time: None,
            store: PopulationSeed::new(config.seeded_companies()).build(),
            decisions: DecisionLog::new(),
            events: EventLog::new(),
        }
    }
}

pub(crate) struct EngineInner<C: AiDecisionClient + 'static> {
    client: Arc<C>,
    voting: DecisionVotingUseCase<C>,
    trigger: Arc<dyn DecisionTrigger>,
    options: EngineOptions,
    progress: Arc<dyn RoundProgressNotifier>,
    audit: Arc<dyn AuditLogger>,
    round_gate: Mutex<()>,
    control: Mutex<ControlState>,
    world: RwLock<World>,
}

/// Handle to a running simulation
pub struct SimulationEngine<C: AiDecisionClient + 'static> {
    inner: Arc<EngineInner<C>>,
}

impl<C: AiDecisionClient + 'static> Clone for SimulationEngine<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Builder for [`SimulationEngine`]
pub struct SimulationEngineBuilder<C: AiDecisionClient + 'static> {
    client: Arc<C>,
    config: SimulationConfig,
    mode: SimulationMode,
    options: EngineOptions,
    trigger: Option<Arc<dyn DecisionTrigger>>,
    interpreter: Option<Arc<dyn VoteInterpreter>>,
    progress: Arc<dyn RoundProgressNotifier>,
    audit: Arc<dyn AuditLogger>,
}

impl<C: AiDecisionClient + 'static> SimulationEngineBuilder<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            config: SimulationConfig::default(),
            mode: SimulationMode::default(),
            options: EngineOptions::default(),
            trigger: None,
            interpreter: None,
            progress: Arc::new(NoProgress),
            audit: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_mode(mut self, mode: SimulationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the trigger built from the options
    pub fn with_trigger(mut self, trigger: Arc<dyn DecisionTrigger>) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn with_interpreter(mut self, interpreter: Arc<dyn VoteInterpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn RoundProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Build the engine in the `Idle` state with a freshly seeded population
    pub fn build(self) -> SimulationEngine<C> {
        let trigger = self.trigger.unwrap_or_else(|| self.options.trigger.build());

        let mut voting =
            DecisionVotingUseCase::new(Arc::clone(&self.client)).with_rule(self.options.quorum_rule);
        if let Some(interpreter) = self.interpreter {
            voting = voting.with_interpreter(interpreter);
        }

        let world = World::seeded(&self.config);
        info!(
            "Simulation engine ready: {} companies, {} employees, trigger {}",
            world.store.company_count(),
            world.store.employee_count(),
            trigger.name()
        );

        SimulationEngine {
            inner: Arc::new(EngineInner {
                client: self.client,
                voting,
                trigger,
                options: self.options,
                progress: self.progress,
                audit: self.audit,
                round_gate: Mutex::new(()),
                control: Mutex::new(ControlState {
                    state: SimulationState::Idle,
                    mode: self.mode,
                    phase: RoundPhase::Idle,
                    config: self.config,
                    timer: None,
                }),
                world: RwLock::new(world),
            }),
        }
    }
}

impl<C: AiDecisionClient + 'static> SimulationEngine<C> {
    pub fn builder(client: Arc<C>) -> SimulationEngineBuilder<C> {
        SimulationEngineBuilder::new(client)
    }

    // ==================== Lifecycle ====================

    /// Start from `Idle` or `Stopped`; begins the timer in auto mode
    pub async fn start(&self) -> Result<SimulationState, EngineError> {
        let mut control = self.inner.control.lock().await;
        control.state = control.state.apply(LifecycleCommand::Start)?;
        if control.mode.is_auto() {
            self.start_timer(&mut control);
        }
        self.lifecycle_event(&control, EventType::SimulationStarted, "Simulation started")
            .await;
        Ok(control.state)
    }

    /// Pause a running simulation; an in-flight round still completes
    pub async fn pause(&self) -> Result<SimulationState, EngineError> {
        let mut control = self.inner.control.lock().await;
        control.state = control.state.apply(LifecycleCommand::Pause)?;
        Self::stop_timer(&mut control);
        self.lifecycle_event(&control, EventType::SimulationPaused, "Simulation paused")
            .await;
        Ok(control.state)
    }

    /// Resume a paused simulation; the timer restarts from a full interval
    pub async fn resume(&self) -> Result<SimulationState, EngineError> {
        let mut control = self.inner.control.lock().await;
        control.state = control.state.apply(LifecycleCommand::Resume)?;
        if control.mode.is_auto() {
            self.start_timer(&mut control);
        }
        self.lifecycle_event(&control, EventType::SimulationResumed, "Simulation resumed")
            .await;
        Ok(control.state)
    }

    /// Stop the simulation, keeping its data. Stopping twice is a no-op.
    pub async fn stop(&self) -> Result<SimulationState, EngineError> {
        let mut control = self.inner.control.lock().await;
        self.stop_locked(&mut control).await?;
        Ok(control.state)
    }

    /// Return to `Idle` with round 0, empty logs and a re-seeded population.
    ///
    /// Waits for an in-flight round to finish first.
    pub async fn reset(&self) -> Result<SimulationState, EngineError> {
        let _gate = self.inner.round_gate.lock().await;
        let mut control = self.inner.control.lock().await;

        Self::stop_timer(&mut control);
        control.state = control.state.apply(LifecycleCommand::Reset)?;
        control.phase = RoundPhase::Idle;

        *self.inner.world.write().await = World::seeded(&control.config);
        self.inner.client.reset_stats();

        info!("Simulation reset");
        self.inner.audit.log(AuditRecord::new(
            "lifecycle",
            json!({ "command": "reset", "state": control.state }),
        ));
        Ok(control.state)
    }

    /// Run one round now. Valid while running or paused.
    ///
    /// Returns the events produced by this round only.
    pub async fn execute_round(&self) -> Result<Vec<SimulationEvent>, EngineError> {
        let _gate = self.inner.round_gate.lock().await;
        self.inner.run_round(RoundSource::Manual).await
    }

    /// Switch between auto and manual rounds without changing the state
    pub async fn set_mode(&self, mode: SimulationMode) -> Result<SimulationMode, EngineError> {
        let mut control = self.inner.control.lock().await;
        if control.mode == mode {
            return Ok(mode);
        }

        control.mode = mode;
        if control.state == SimulationState::Running {
            if mode.is_auto() {
                self.start_timer(&mut control);
            } else {
                Self::stop_timer(&mut control);
            }
        }

        self.lifecycle_event(
            &control,
            EventType::ModeChanged,
            &format!("Mode changed to {}", mode),
        )
        .await;
        Ok(mode)
    }

    /// Parse and apply a mode given as text (`auto` or `manual`)
    pub async fn set_mode_str(&self, mode: &str) -> Result<SimulationMode, EngineError> {
        let mode: SimulationMode = mode.parse()?;
        self.set_mode(mode).await
    }

    /// Apply a configuration update field by field.
    ///
    /// In-range fields are applied even when others are rejected. A changed
    /// round interval restarts a running timer.
    pub async fn update_config(
        &self,
        update: ConfigUpdate,
    ) -> Result<SimulationConfig, EngineError> {
        let mut control = self.inner.control.lock().await;
        let previous_interval = control.config.round_interval;
        let errors = control.config.apply(&update);

        if control.config.round_interval != previous_interval && control.timer.is_some() {
            debug!(
                "Round interval changed from {}s to {}s, restarting timer",
                previous_interval, control.config.round_interval
            );
            Self::stop_timer(&mut control);
            self.start_timer(&mut control);
        }

        self.inner.audit.log(AuditRecord::new(
            "config_updated",
            json!({
                "update": update,
                "config": control.config,
                "rejected": errors,
            }),
        ));

        if errors.is_empty() {
            Ok(control.config.clone())
        } else {
            Err(EngineError::ConfigOutOfRange(errors))
        }
    }

    /// Stop the simulation if needed and summarise it
    pub async fn end(&self) -> Result<SimulationSummary, EngineError> {
        {
            let mut control = self.inner.control.lock().await;
            if control.state.allows_round() {
                self.stop_locked(&mut control).await?;
            }
        }
        Ok(self.summary().await)
    }

    /// Cancel the timer and wait for it to finish
    pub async fn shutdown(&self) {
        let timer = self.inner.control.lock().await.timer.take();
        if let Some(timer) = timer {
            timer.shutdown().await;
        }
        debug!("Simulation engine shut down");
    }

    // ==================== Internals ====================

    async fn stop_locked(&self, control: &mut ControlState) -> Result<(), EngineError> {
        let previous = control.state;
        control.state = control.state.apply(LifecycleCommand::Stop)?;
        Self::stop_timer(control);
        if previous != SimulationState::Stopped {
            self.lifecycle_event(control, EventType::SimulationStopped, "Simulation stopped")
                .await;
        }
        Ok(())
    }

    fn start_timer(&self, control: &mut ControlState) {
        if control.timer.is_none() {
            let period = control.config.round_interval_duration();
            debug!("Starting round timer every {:?}", period);
            control.timer = Some(timer::spawn(Arc::downgrade(&self.inner), period));
        }
    }

    fn stop_timer(control: &mut ControlState) {
        if let Some(timer) = control.timer.take() {
            debug!("Cancelling round timer ({:?})", timer.period());
            timer.cancel();
        }
    }

    async fn lifecycle_event(
        &self,
        control: &ControlState,
        event_type: EventType,
        description: &str,
    ) {
        let mut world = self.inner.world.write().await;
        let event = SimulationEvent::new(event_type, world.current_round, description).with_data(
            json!({
                "state": control.state,
                "mode": control.mode,
            }),
        );

        info!("{} (round {})", description, world.current_round);
        self.inner.audit.log(AuditRecord::new(
            "lifecycle",
            json!({
                "event": event.event_type,
                "state": control.state,
                "mode": control.mode,
                "round": world.current_round,
            }),
        ));
        world.events.append(event);
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MockClient;
    use super::*;
    use boardroom_domain::DecisionStatus;
    use std::collections::HashSet;
    use std::time::Duration;

    fn manual_engine(client: MockClient) -> SimulationEngine<MockClient> {
        SimulationEngine::builder(Arc::new(client)).build()
    }

    fn auto_engine(client: MockClient, interval: u64) -> SimulationEngine<MockClient> {
        SimulationEngine::builder(Arc::new(client))
            .with_mode(SimulationMode::Auto)
            .with_config(SimulationConfig {
                round_interval: interval,
                ..SimulationConfig::default()
            })
            .build()
    }

    async fn completed_rounds(engine: &SimulationEngine<MockClient>) -> Vec<u64> {
        engine
            .recent_events(1000)
            .await
            .into_iter()
            .filter(|e| e.event_type == EventType::RoundCompleted)
            .map(|e| e.round)
            .collect()
    }

    #[tokio::test]
    async fn test_manual_round_with_three_companies() {
        let engine = manual_engine(MockClient::approving());
        assert_eq!(engine.companies().await.len(), 3);

        engine.start().await.unwrap();
        let events = engine.execute_round().await.unwrap();

        let status = engine.status().await;
        assert_eq!(status.current_round, 1);
        assert_eq!(status.current_phase, RoundPhase::Idle);
        assert!(status.last_round_time.is_some());

        let decisions = engine.recent_decisions(100, None).await.unwrap();
        for company in engine.companies().await {
            assert!(
                decisions
                    .iter()
                    .any(|d| d.company_id == company.id && d.status().is_terminal())
            );
        }

        // Only this round's events, not the earlier start event
        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.round == 1));
        assert!(events.iter().all(|e| !e.event_type.is_lifecycle()));
        assert_eq!(
            events.last().map(|e| &e.event_type),
            Some(&EventType::RoundCompleted)
        );
    }

    #[tokio::test]
    async fn test_execute_round_guards() {
        let engine = manual_engine(MockClient::approving());
        assert!(matches!(
            engine.execute_round().await,
            Err(EngineError::InvalidTransition { .. })
        ));

        engine.start().await.unwrap();
        engine.pause().await.unwrap();
        // A manual round may be forced while paused
        engine.execute_round().await.unwrap();
        assert_eq!(engine.status().await.state, SimulationState::Paused);

        engine.stop().await.unwrap();
        assert!(engine.execute_round().await.is_err());
        assert_eq!(engine.status().await.current_round, 1);
    }

    #[tokio::test]
    async fn test_invalid_transitions_leave_state_unchanged() {
        let engine = manual_engine(MockClient::approving());

        let err = engine.pause().await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot pause while simulation is idle");
        assert!(err.is_client_error());
        assert!(engine.resume().await.is_err());
        assert!(engine.stop().await.is_err());
        assert_eq!(engine.status().await.state, SimulationState::Idle);

        engine.start().await.unwrap();
        assert!(engine.start().await.is_err());
        assert!(engine.resume().await.is_err());
        assert_eq!(engine.status().await.state, SimulationState::Running);
    }

    #[tokio::test]
    async fn test_stop_twice_appends_one_event() {
        let engine = manual_engine(MockClient::approving());
        engine.start().await.unwrap();

        assert_eq!(engine.stop().await.unwrap(), SimulationState::Stopped);
        assert_eq!(engine.stop().await.unwrap(), SimulationState::Stopped);

        let stops = engine
            .recent_events(100)
            .await
            .iter()
            .filter(|e| e.event_type == EventType::SimulationStopped)
            .count();
        assert_eq!(stops, 1);
    }

    #[tokio::test]
    async fn test_rounds_are_monotonic_until_reset() {
        let engine = manual_engine(MockClient::approving());
        engine.start().await.unwrap();

        for expected in 1..=3 {
            engine.execute_round().await.unwrap();
            assert_eq!(engine.status().await.current_round, expected);
        }

        assert_eq!(engine.reset().await.unwrap(), SimulationState::Idle);
        let status = engine.status().await;
        assert_eq!(status.current_round, 0);
        assert!(status.last_round_time.is_none());
        assert!(engine.recent_events(100).await.is_empty());
        assert!(engine.recent_decisions(100, None).await.unwrap().is_empty());
        assert_eq!(engine.stats().await.ai.total_calls, 0);

        // Baseline population again
        let stats = engine.stats().await;
        assert_eq!(stats.total_companies, 3);
        assert_eq!(stats.total_employees, 13);

        // Restart after reset counts from 1 again
        engine.start().await.unwrap();
        engine.execute_round().await.unwrap();
        assert_eq!(engine.status().await.current_round, 1);
    }

    #[tokio::test]
    async fn test_decision_invariants_hold_over_many_rounds() {
        let engine = manual_engine(MockClient::mixed());
        engine.start().await.unwrap();
        for _ in 0..8 {
            engine.execute_round().await.unwrap();
        }

        let decisions = engine.recent_decisions(1000, None).await.unwrap();
        assert!(!decisions.is_empty());
        for decision in decisions {
            let tally = decision.tally();
            assert_eq!(tally.total() as usize, decision.voters().len());
            assert!(decision.completed_at().is_some());
            match decision.status() {
                DecisionStatus::Approved => {
                    assert!(tally.votes_for > tally.votes_against);
                    assert!(!decision.voters().is_empty());
                }
                DecisionStatus::Expired => {
                    assert!(decision.voters().is_empty() || decision.all_calls_failed());
                }
                DecisionStatus::Rejected => {}
                other => panic!("non-terminal decision in log: {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_failing_client_expires_decisions_without_failing_round() {
        let engine = manual_engine(MockClient::failing());
        engine.start().await.unwrap();
        engine.execute_round().await.unwrap();

        let decisions = engine.recent_decisions(100, None).await.unwrap();
        assert_eq!(decisions.len(), 3);
        assert!(
            decisions
                .iter()
                .all(|d| d.status() == DecisionStatus::Expired)
        );
        assert_eq!(engine.status().await.state, SimulationState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_mode_runs_rounds_on_interval() {
        let engine = auto_engine(MockClient::approving(), 10);
        engine.start().await.unwrap();

        tokio::time::sleep(Duration::from_secs(25)).await;

        let rounds = completed_rounds(&engine).await;
        assert!((1..=3).contains(&rounds.len()), "rounds: {rounds:?}");
        let unique: HashSet<_> = rounds.iter().collect();
        assert_eq!(unique.len(), rounds.len());
        assert_eq!(engine.status().await.current_round, rounds.len() as u64);

        engine.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_rounds_never_overlap() {
        let client = MockClient::approving().with_delay(Duration::from_secs(15));
        let engine = auto_engine(client.clone(), 10);
        engine.start().await.unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(!client.overlapped());
        let rounds = completed_rounds(&engine).await;
        assert!(!rounds.is_empty());
        assert!(rounds.len() <= 6);
        let unique: HashSet<_> = rounds.iter().collect();
        assert_eq!(unique.len(), rounds.len());

        engine.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_suspends_timer() {
        let engine = auto_engine(MockClient::approving(), 10);
        engine.start().await.unwrap();
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(engine.status().await.current_round, 1);

        engine.pause().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(engine.status().await.current_round, 1);

        // Resume restarts from a full interval
        engine.resume().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.status().await.current_round, 1);
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(engine.status().await.current_round, 2);

        engine.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_mode_starts_and_cancels_timer() {
        let engine = manual_engine(MockClient::approving());
        engine
            .update_config(ConfigUpdate::default().with_round_interval(10))
            .await
            .unwrap();
        engine.start().await.unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(engine.status().await.current_round, 0);

        engine.set_mode(SimulationMode::Auto).await.unwrap();
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(engine.status().await.current_round, 1);
        assert_eq!(engine.status().await.state, SimulationState::Running);

        engine.set_mode(SimulationMode::Manual).await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(engine.status().await.current_round, 1);

        let mode_changes = engine
            .recent_events(100)
            .await
            .iter()
            .filter(|e| e.event_type == EventType::ModeChanged)
            .count();
        assert_eq!(mode_changes, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_update_restarts_timer() {
        let engine = auto_engine(MockClient::approving(), 30);
        engine.start().await.unwrap();

        tokio::time::sleep(Duration::from_secs(5)).await;
        engine
            .update_config(ConfigUpdate::default().with_round_interval(10))
            .await
            .unwrap();

        // Next tick 10s after the update rather than 30s after start
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(engine.status().await.current_round, 1);

        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_invalid_mode_is_rejected() {
        let engine = manual_engine(MockClient::approving());
        let err = engine.set_mode_str("turbo").await.unwrap_err();
        assert_eq!(err, EngineError::InvalidMode("turbo".to_string()));
        assert_eq!(engine.status().await.mode, SimulationMode::Manual);

        assert_eq!(
            engine.set_mode_str("auto").await.unwrap(),
            SimulationMode::Auto
        );
    }

    #[tokio::test]
    async fn test_step_interval_below_range_is_rejected() {
        let engine = manual_engine(MockClient::approving());
        let update: ConfigUpdate = serde_json::from_str(r#"{"step_interval": 5}"#).unwrap();

        let err = engine.update_config(update).await.unwrap_err();
        let EngineError::ConfigOutOfRange(errors) = err else {
            panic!("expected ConfigOutOfRange");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].min, 10);
        assert_eq!(engine.status().await.config, SimulationConfig::default());
    }

    #[tokio::test]
    async fn test_partial_config_update_applies_valid_fields() {
        let engine = manual_engine(MockClient::approving());
        let update = ConfigUpdate::default()
            .with_base_funding_rate(2000)
            .with_decision_timeout(5);

        assert!(engine.update_config(update).await.is_err());
        let config = engine.status().await.config;
        assert_eq!(config.base_funding_rate, 2000);
        assert_eq!(config.decision_timeout, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_waits_for_in_flight_round() {
        let client = MockClient::approving().with_delay(Duration::from_secs(5));
        let engine = manual_engine(client);
        engine.start().await.unwrap();

        let round = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });
        // Let the round take the gate
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        engine.reset().await.unwrap();
        assert!(round.await.unwrap().is_ok());

        // The round finished and published before reset cleared it
        let status = engine.status().await;
        assert_eq!(status.current_round, 0);
        assert_eq!(status.state, SimulationState::Idle);
        assert!(engine.recent_decisions(10, None).await.unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_readers_see_pre_round_state_mid_round() {
        let client = MockClient::approving().with_delay(Duration::from_secs(5));
        let engine = manual_engine(client);
        engine.start().await.unwrap();
        let funds_before: Vec<_> = engine.companies().await.iter().map(|c| c.funds).collect();

        let round = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let status = engine.status().await;
        assert_eq!(status.current_round, 0);
        assert_ne!(status.current_phase, RoundPhase::Idle);
        assert!(engine.recent_decisions(10, None).await.unwrap().is_empty());
        let funds_mid: Vec<_> = engine.companies().await.iter().map(|c| c.funds).collect();
        assert_eq!(funds_mid, funds_before);

        round.await.unwrap().unwrap();
        assert_eq!(engine.status().await.current_round, 1);
        assert_eq!(engine.recent_decisions(10, None).await.unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_mid_round_lets_round_finish() {
        let client = MockClient::approving().with_delay(Duration::from_secs(5));
        let engine = manual_engine(client);
        engine.start().await.unwrap();

        let round = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(engine.stop().await.unwrap(), SimulationState::Stopped);
        assert_eq!(engine.status().await.current_round, 0);

        let events = round.await.unwrap().unwrap();
        assert!(events.iter().any(|e| e.event_type == EventType::RoundCompleted));

        let status = engine.status().await;
        assert_eq!(status.state, SimulationState::Stopped);
        assert_eq!(status.current_round, 1);
        assert_eq!(status.current_phase, RoundPhase::Idle);
        assert_eq!(engine.recent_decisions(10, None).await.unwrap().len(), 3);
        assert!(engine.execute_round().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_mid_round_lets_round_finish() {
        let client = MockClient::approving().with_delay(Duration::from_secs(5));
        let engine = manual_engine(client);
        engine.start().await.unwrap();

        let round = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(engine.pause().await.unwrap(), SimulationState::Paused);
        round.await.unwrap().unwrap();

        let status = engine.status().await;
        assert_eq!(status.state, SimulationState::Paused);
        assert_eq!(status.current_round, 1);
        assert_eq!(completed_rounds(&engine).await, vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_manual_rounds_run_one_after_another() {
        let client = MockClient::approving().with_delay(Duration::from_secs(5));
        let engine = manual_engine(client.clone());
        engine.start().await.unwrap();

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });
        let second = tokio::spawn({
            let engine = engine.clone();
            async move { engine.execute_round().await }
        });

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert!(!client.overlapped());
        let mut rounds = completed_rounds(&engine).await;
        rounds.sort_unstable();
        assert_eq!(rounds, vec![1, 2]);
        assert_eq!(engine.status().await.current_round, 2);
        assert_eq!(engine.recent_decisions(10, None).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_failed_round_stops_engine_and_publishes_nothing() {
        let engine = manual_engine(MockClient::approving());
        engine.start().await.unwrap();
        let events_before = engine.recent_events(100).await.len();

        let err = engine.inner.abort_round(1, "store corrupted".to_string()).await;

        assert_eq!(err, EngineError::RoundExecution("store corrupted".to_string()));
        assert!(!err.is_client_error());
        let status = engine.status().await;
        assert_eq!(status.state, SimulationState::Stopped);
        assert_eq!(status.current_phase, RoundPhase::Idle);
        assert_eq!(status.current_round, 0);
        assert_eq!(engine.recent_events(100).await.len(), events_before);
    }

    #[tokio::test]
    async fn test_end_stops_and_summarises() {
        let engine = manual_engine(MockClient::approving());
        engine.start().await.unwrap();
        engine.execute_round().await.unwrap();
        engine.execute_round().await.unwrap();

        let summary = engine.end().await.unwrap();
        assert_eq!(summary.total_rounds, 2);
        assert_eq!(summary.companies.len(), 3);
        assert_eq!(summary.leaderboard.len(), 3);
        assert_eq!(summary.stats.total_decisions, 6);
        assert_eq!(engine.status().await.state, SimulationState::Stopped);

        // Ending again keeps the simulation stopped
        assert!(engine.end().await.is_ok());
    }

    #[tokio::test]
    async fn test_lifecycle_events_are_logged() {
        let engine = manual_engine(MockClient::approving());
        engine.start().await.unwrap();
        engine.pause().await.unwrap();
        engine.resume().await.unwrap();
        engine.stop().await.unwrap();

        let kinds: Vec<_> = engine
            .recent_events(10)
            .await
            .into_iter()
            .rev()
            .map(|e| e.event_type)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventType::SimulationStarted,
                EventType::SimulationPaused,
                EventType::SimulationResumed,
                EventType::SimulationStopped,
            ]
        );
    }
}
