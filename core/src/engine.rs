//! The game engine: single owner of one profile's live game.
//!
//! ORDER OF OPERATIONS (fixed):
//!   open:   load save -> catch up offline time -> evaluate achievements
//!   submit: catch up to `now` -> apply command -> settle thresholds
//!           -> evaluate achievements -> persist on significant changes
//!   tick:   catch up to `now` -> evaluate achievements -> autosave
//!
//! RULES:
//!   - The engine is the only writer of its state. Commands apply in the
//!     order they are submitted.
//!   - Offline catch-up completes inside `open`, before any command can
//!     be submitted.
//!   - Every accepted command, decline and crossing is recorded in the
//!     event log.

use crate::{
    achievement_subsystem, career_subsystem,
    command::PlayerCommand,
    config::{AchievementConfig, GameConfig},
    error::{Decline, IdleResult},
    event::{event_type_name, EventLogEntry, GameEvent},
    ledger_subsystem,
    prestige_subsystem::{self, PrestigeFlow, PrestigePreview},
    save_codec::{self, LoadOrigin},
    scheduler_subsystem,
    settings::{Settings, Tab},
    simulation_subsystem::{self, Crossing},
    state::GameState,
    store::{GameStore, SlotWrite},
    types::{EpochMs, ProfileId},
};

/// Autosave cadence for `tick`.
pub const AUTOSAVE_INTERVAL_MS: u64 = 30_000;

/// What became of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Vec<GameEvent>),
    Declined(Decline),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn decline(&self) -> Option<&Decline> {
        match self {
            Self::Declined(d) => Some(d),
            Self::Accepted(_) => None,
        }
    }
}

pub struct GameEngine {
    pub profile_id: ProfileId,
    config:         GameConfig,
    state:          GameState,
    settings:       Settings,
    prestige:       PrestigeFlow,
    last_saved_ms:  EpochMs,
    store:          GameStore,
}

impl GameEngine {
    /// Load `profile_id` from `store` (creating it if needed) and catch
    /// the game up to `now`.
    pub fn open(
        store: GameStore,
        profile_id: &str,
        config: GameConfig,
        now: EpochMs,
    ) -> IdleResult<Self> {
        store.ensure_profile(profile_id, profile_id, now)?;
        let raw = store.read_save(profile_id)?;
        let loaded = save_codec::load(raw.as_deref(), now)?;
        let settings = store.read_settings(profile_id)?;

        let (origin, from_version) = match &loaded.origin {
            LoadOrigin::Empty => ("empty", None),
            LoadOrigin::Malformed { .. } => ("malformed", None),
            LoadOrigin::Restored { from_version } => ("restored", Some(*from_version)),
        };

        let mut engine = Self {
            profile_id: profile_id.to_string(),
            config,
            state: loaded.into_state(),
            settings,
            prestige: PrestigeFlow::default(),
            last_saved_ms: now,
            store,
        };
        log::info!(
            "profile={profile_id} opened ({origin}), last simulated at {}",
            engine.state.simulated_at_ms
        );
        engine.record(
            "save",
            now,
            &GameEvent::SaveLoaded { at_ms: now, origin: origin.to_string(), from_version },
        )?;

        engine.catch_up(now)?;
        engine.evaluate_achievements(now)?;
        Ok(engine)
    }

    /// Fresh in-memory engine on the built-in economy (used in tests).
    pub fn build_test(profile_id: &str, now: EpochMs) -> IdleResult<Self> {
        let store = GameStore::in_memory()?;
        store.migrate()?;
        Self::open(store, profile_id, GameConfig::builtin(), now)
    }

    // ── Read access ────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prestige_flow(&self) -> &PrestigeFlow {
        &self.prestige
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn preview_prestige(&self, now: EpochMs) -> PrestigePreview {
        prestige_subsystem::preview(&self.config, &self.state, now)
    }

    pub fn visible_tabs(&self) -> Vec<Tab> {
        self.settings.visible_tabs()
    }

    pub fn visible_achievements(&self) -> Vec<&AchievementConfig> {
        achievement_subsystem::visible_achievements(
            &self.config,
            &self.state,
            self.settings.hide_completed_achievements,
        )
    }

    /// Every logged event for this profile, oldest first.
    pub fn event_log(&self) -> IdleResult<Vec<EventLogEntry>> {
        self.store.events_for_profile(&self.profile_id)
    }

    // ── Time ───────────────────────────────────────────────────

    /// Advance the live game to `now`. Autosaves on a cadence.
    pub fn tick(&mut self, now: EpochMs) -> IdleResult<Vec<GameEvent>> {
        let mut events = self.advance_to(now)?;
        events.extend(self.evaluate_achievements(now)?);
        if now.saturating_sub(self.last_saved_ms) >= AUTOSAVE_INTERVAL_MS {
            events.push(self.persist(now)?);
        }
        Ok(events)
    }

    /// Offline catch-up, clamped to the configured cap. Time beyond the
    /// cap is skipped, not credited.
    fn catch_up(&mut self, now: EpochMs) -> IdleResult<()> {
        let elapsed_ms = now.saturating_sub(self.state.simulated_at_ms);
        if elapsed_ms == 0 {
            return Ok(());
        }
        let capped_ms = self
            .config
            .offline
            .max_catch_up_ms
            .map_or(elapsed_ms, |cap| elapsed_ms.min(cap));
        if capped_ms < elapsed_ms {
            log::info!("offline catch-up capped: {elapsed_ms}ms elapsed, simulating {capped_ms}ms");
            self.state.simulated_at_ms = now - capped_ms;
        }

        let report = simulation_subsystem::advance_detailed(&self.config, &self.state, capped_ms);
        self.state = report.state;
        for (at, crossing) in &report.crossings {
            self.record_crossing(*at, crossing)?;
        }
        self.record(
            "simulation",
            now,
            &GameEvent::CatchUpApplied {
                at_ms: now,
                elapsed_ms,
                capped_ms,
                segments: report.segments,
            },
        )?;
        Ok(())
    }

    fn advance_to(&mut self, now: EpochMs) -> IdleResult<Vec<GameEvent>> {
        if now <= self.state.simulated_at_ms {
            return Ok(Vec::new());
        }
        let elapsed = now - self.state.simulated_at_ms;
        let report = simulation_subsystem::advance_detailed(&self.config, &self.state, elapsed);
        self.state = report.state;

        let mut events = Vec::with_capacity(report.crossings.len());
        for (at, crossing) in &report.crossings {
            events.push(self.record_crossing(*at, crossing)?);
        }
        Ok(events)
    }

    // ── Commands ───────────────────────────────────────────────

    /// Apply one player command at `now`. A decline leaves the game
    /// untouched apart from the log entry recording it.
    pub fn submit(&mut self, command: PlayerCommand, now: EpochMs) -> IdleResult<Outcome> {
        let mut events = self.advance_to(now)?;

        if command.is_settings() {
            events.push(self.apply_settings(&command, now)?);
            return Ok(Outcome::Accepted(events));
        }

        let applied = match self.apply(&command, now) {
            Ok(applied) => applied,
            Err(decline) => {
                log::warn!("now={now} {} declined: {decline}", command.name());
                self.record(
                    "engine",
                    now,
                    &GameEvent::CommandDeclined {
                        at_ms:   now,
                        command: command.name().to_string(),
                        kind:    decline.kind().to_string(),
                        reason:  decline.to_string(),
                    },
                )?;
                return Ok(Outcome::Declined(decline));
            }
        };
        for (subsystem, event) in applied.staged {
            self.record(subsystem, now, &event)?;
            events.push(event);
        }

        for crossing in simulation_subsystem::settle(&self.config, &mut self.state) {
            events.push(self.record_crossing(now, &crossing)?);
        }
        events.extend(self.evaluate_achievements(now)?);

        if applied.significant {
            events.push(self.persist(now)?);
        }
        Ok(Outcome::Accepted(events))
    }

    /// Apply a game command. Returns the events to log on success.
    fn apply(&mut self, command: &PlayerCommand, now: EpochMs) -> Result<Applied, Decline> {
        let mut staged: Vec<(&'static str, GameEvent)> = Vec::new();
        let mut significant = false;

        match command {
            PlayerCommand::Purchase { entity_id } => {
                let receipt = ledger_subsystem::purchase(&self.config, &self.state, entity_id, now)?;
                self.state = receipt.state;
                staged.push((
                    "ledger",
                    GameEvent::Purchased {
                        at_ms:     now,
                        entity_id: entity_id.clone(),
                        resource:  receipt.price.resource.name().to_string(),
                        amount:    receipt.price.amount,
                        owned:     ledger_subsystem::owned_count(&self.config, &self.state, entity_id),
                    },
                ));
                if let Some(d) = receipt.discovery {
                    staged.push((
                        "catalog",
                        GameEvent::CatalogDiscovered {
                            at_ms:          now,
                            entry_id:       d.entry_id,
                            tiers_unlocked: d.tiers_unlocked,
                        },
                    ));
                }
            }
            PlayerCommand::TakeSession => {
                let before = self.state.therapist_career.level;
                let payout = career_subsystem::session_payout(&self.config.career, &self.state.therapist_career);
                self.state = career_subsystem::take_session(&self.config, &self.state, now)?;
                let after = self.state.therapist_career.level;
                staged.push((
                    "career",
                    GameEvent::SessionTaken { at_ms: now, payout_cents: payout, level: after },
                ));
                for level in (before + 1)..=after {
                    staged.push(("career", GameEvent::CareerLevelUp { at_ms: now, level }));
                }
            }
            PlayerCommand::StartEvent { event_id } => {
                self.state = scheduler_subsystem::start_event(&self.config, &self.state, event_id, now)?;
                staged.push((
                    "scheduler",
                    GameEvent::EventStarted { at_ms: now, event_id: event_id.clone() },
                ));
            }
            PlayerCommand::RequestPrestige { skip_confirmation } => {
                match self.prestige.request(&self.config, &self.state, now, *skip_confirmation) {
                    Some(next) => {
                        self.state = next;
                        significant = true;
                        staged.push(("prestige", self.committed_event(now)));
                    }
                    None => {
                        let points_to_gain =
                            prestige_subsystem::points_for(&self.config, self.state.nostalgia_enjoyment_earned_cents);
                        staged.push(("prestige", GameEvent::PrestigeRequested { at_ms: now, points_to_gain }));
                    }
                }
            }
            PlayerCommand::ConfirmPrestige => {
                self.state = self.prestige.confirm(&self.config, &self.state, now)?;
                significant = true;
                staged.push(("prestige", self.committed_event(now)));
            }
            PlayerCommand::CancelPrestige => {
                if !self.prestige.is_pending() {
                    return Err(Decline::NoPendingPrestige);
                }
                self.prestige.cancel();
                staged.push(("prestige", GameEvent::PrestigeCancelled { at_ms: now }));
            }
            PlayerCommand::BuyNostalgiaUnlock { unlock_id } => {
                self.state = prestige_subsystem::buy_unlock(&self.config, &self.state, unlock_id, now)?;
                significant = true;
                let cost = self.state.nostalgia_unlocks.get(unlock_id).map_or(0, |p| p.cost_points);
                staged.push((
                    "prestige",
                    GameEvent::NostalgiaUnlockBought { at_ms: now, unlock_id: unlock_id.clone(), cost },
                ));
            }
            PlayerCommand::RefundNostalgiaUnlock { unlock_id } => {
                self.state = prestige_subsystem::refund_unlock(&self.config, &self.state, unlock_id)?;
                significant = true;
                staged.push((
                    "prestige",
                    GameEvent::NostalgiaUnlockRefunded { at_ms: now, unlock_id: unlock_id.clone() },
                ));
            }
            PlayerCommand::ResetGame => {
                log::warn!("now={now} profile={} full game reset", self.profile_id);
                self.state = GameState::fresh(now);
                self.prestige = PrestigeFlow::Idle;
                significant = true;
                staged.push(("engine", GameEvent::GameReset { at_ms: now }));
            }
            PlayerCommand::CycleTheme
            | PlayerCommand::SetHideCompletedAchievements { .. }
            | PlayerCommand::HideTab { .. }
            | PlayerCommand::ShowTab { .. }
            | PlayerCommand::DismissCoachmark { .. } => {}
        }

        Ok(Applied { staged, significant })
    }

    fn committed_event(&self, now: EpochMs) -> GameEvent {
        GameEvent::PrestigeCommitted {
            at_ms:         now,
            points_gained: self.state.nostalgia_last_gain,
            resets:        self.state.nostalgia_resets,
        }
    }

    fn apply_settings(&mut self, command: &PlayerCommand, now: EpochMs) -> IdleResult<GameEvent> {
        let field = match command {
            PlayerCommand::CycleTheme => {
                self.settings.cycle_theme();
                "themeMode"
            }
            PlayerCommand::SetHideCompletedAchievements { hide } => {
                self.settings.hide_completed_achievements = *hide;
                "hideCompletedAchievements"
            }
            PlayerCommand::HideTab { tab } => {
                self.settings.hide_tab(*tab);
                "hiddenTabs"
            }
            PlayerCommand::ShowTab { tab } => {
                self.settings.show_tab(*tab);
                "hiddenTabs"
            }
            PlayerCommand::DismissCoachmark { coachmark_id } => {
                self.settings.dismiss_coachmark(coachmark_id);
                "coachmarksDismissed"
            }
            _ => "none",
        };
        self.store.write_settings(&self.profile_id, &self.settings, now)?;
        let event = GameEvent::SettingsChanged { at_ms: now, field: field.to_string() };
        self.record("settings", now, &event)?;
        Ok(event)
    }

    // ── Persistence ────────────────────────────────────────────

    /// Write the save now.
    pub fn persist(&mut self, now: EpochMs) -> IdleResult<GameEvent> {
        let SlotWrite { bytes } = self.store.write_save(&self.profile_id, &self.state, now)?;
        self.last_saved_ms = now;
        log::info!("profile={} saved at {now} ({bytes} bytes)", self.profile_id);
        let event = GameEvent::Saved { at_ms: now, bytes };
        self.record("save", now, &event)?;
        Ok(event)
    }

    // ── Event recording ────────────────────────────────────────

    fn evaluate_achievements(&mut self, now: EpochMs) -> IdleResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        for achievement_id in achievement_subsystem::apply(&self.config, &mut self.state) {
            let event = GameEvent::AchievementUnlocked { at_ms: now, achievement_id };
            self.record("achievements", now, &event)?;
            events.push(event);
        }
        Ok(events)
    }

    fn record_crossing(&self, at_ms: EpochMs, crossing: &Crossing) -> IdleResult<GameEvent> {
        let (subsystem, event) = match crossing {
            Crossing::CareerLevelUp { level } => {
                ("career", GameEvent::CareerLevelUp { at_ms, level: *level })
            }
            Crossing::MilestoneReached { milestone_id } => (
                "achievements",
                GameEvent::MilestoneReached { at_ms, milestone_id: milestone_id.clone() },
            ),
            Crossing::EventPhaseChanged { event_id, transition } => (
                "scheduler",
                GameEvent::EventPhaseChanged {
                    at_ms:    transition.at_ms,
                    event_id: event_id.clone(),
                    from:     transition.from.name().to_string(),
                    to:       transition.to.name().to_string(),
                },
            ),
        };
        self.record(subsystem, at_ms, &event)?;
        Ok(event)
    }

    fn record(&self, subsystem: &str, at_ms: EpochMs, event: &GameEvent) -> IdleResult<()> {
        let entry = EventLogEntry {
            id:         None,
            profile_id: self.profile_id.clone(),
            at_ms,
            subsystem:  subsystem.to_string(),
            event_type: event_type_name(event).to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }
}

/// Events produced by an accepted game command, not yet logged.
struct Applied {
    staged:      Vec<(&'static str, GameEvent)>,
    significant: bool,
}
