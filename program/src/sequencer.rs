// Live Draw Engine - Draw sequencer
use std::collections::BTreeMap;

use solana_program::msg;

use crate::error::DrawError;
use crate::participants::normalize;
use crate::random::RandomSource;
use crate::registry::RaffleLifecycleGateway;
use crate::scheduler::{DrawTimer, ManualScheduler, Scheduler, TimerHandle, TimerKind};
use crate::selector::select_winners;
use crate::state::{DrawConfig, DrawPhase, DrawView, Raffle};

/// One run of the mixing and revealing sequence for a single raffle
#[derive(Debug)]
pub struct DrawSession {
    id: u64,
    raffle: Raffle,
    phase: DrawPhase,
    /// Computed once at start, never modified
    full_winners: Vec<String>,
    /// Always a prefix of `full_winners` in normal operation
    revealed: Vec<String>,
    pending_timers: BTreeMap<TimerKind, TimerHandle>,
}

impl DrawSession {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn raffle(&self) -> &Raffle {
        &self.raffle
    }

    pub fn phase(&self) -> DrawPhase {
        self.phase
    }

    pub fn full_winners(&self) -> &[String] {
        &self.full_winners
    }

    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    fn is_complete(&self) -> bool {
        self.phase == DrawPhase::Revealing && self.revealed.len() == self.full_winners.len()
    }
}

/// Live draw state machine: `Idle -> Mixing -> Revealing -> Closed`.
///
/// Winners are picked synchronously when a draw starts; the reveal is then
/// staged through timers owned by the current session. Starting a new draw
/// or closing the current one cancels every timer of the session, and
/// timers stamped with an older session id are ignored if they still
/// arrive.
pub struct DrawSequencer<R: RandomSource, G: RaffleLifecycleGateway, S: Scheduler> {
    config: DrawConfig,
    rng: R,
    gateway: G,
    scheduler: S,
    session: Option<DrawSession>,
    /// Phase reported when no session is running
    resting_phase: DrawPhase,
    next_session_id: u64,
}

impl<R: RandomSource, G: RaffleLifecycleGateway, S: Scheduler> DrawSequencer<R, G, S> {
    pub fn new(rng: R, gateway: G, scheduler: S) -> Self {
        Self {
            config: DrawConfig::default(),
            rng,
            gateway,
            scheduler,
            session: None,
            resting_phase: DrawPhase::Idle,
            next_session_id: 1,
        }
    }

    pub fn with_config(config: DrawConfig, rng: R, gateway: G, scheduler: S) -> Result<Self, DrawError> {
        config.validate()?;
        let mut sequencer = Self::new(rng, gateway, scheduler);
        sequencer.config = config;
        Ok(sequencer)
    }

    /// Start a live draw, superseding any running one
    pub fn start_live_draw(&mut self, raffle: &Raffle) {
        if self.session.is_some() {
            msg!("Superseding running live draw");
            self.cancel_session();
        }

        let session_id = self.next_session_id;
        self.next_session_id += 1;

        if let Err(e) = self.gateway.mark_finished(&raffle.id) {
            msg!("Could not mark raffle {} finished: {}", raffle.id, e);
        }

        let participants = normalize(&raffle.participants);
        let requested = raffle.winners_count as usize;
        let full_winners = select_winners(&participants, requested, &mut self.rng);
        if full_winners.len() < requested {
            msg!(
                "Raffle {} asks for {} winners but has {} participants",
                raffle.id,
                requested,
                participants.len()
            );
        }

        let mut raffle = raffle.clone();
        raffle.finished = true;

        let mut session = DrawSession {
            id: session_id,
            raffle,
            phase: DrawPhase::Mixing,
            full_winners,
            revealed: Vec::new(),
            pending_timers: BTreeMap::new(),
        };

        let handle = self.scheduler.schedule(
            self.config.stage_delay_ms,
            DrawTimer {
                session: session_id,
                kind: TimerKind::BeginReveal,
            },
        );
        session.pending_timers.insert(TimerKind::BeginReveal, handle);

        msg!(
            "Live draw {} started for raffle {} with {} winners",
            session_id,
            session.raffle.id,
            session.full_winners.len()
        );
        self.session = Some(session);
    }

    /// Start a live draw for a raffle looked up through the gateway
    pub fn start_live_draw_by_id(&mut self, raffle_id: &str) -> Result<(), DrawError> {
        let raffle = self
            .gateway
            .find(raffle_id)
            .ok_or_else(|| DrawError::RaffleNotFound(raffle_id.to_string()))?;
        self.start_live_draw(&raffle);
        Ok(())
    }

    /// Cancel the current live draw. No-op without a running session.
    pub fn close_live_draw(&mut self) {
        if self.session.is_none() {
            return;
        }
        self.cancel_session();
        self.resting_phase = DrawPhase::Closed;
        msg!("Live draw closed");
    }

    fn cancel_session(&mut self) {
        if let Some(session) = self.session.take() {
            for (_, handle) in session.pending_timers {
                self.scheduler.cancel(handle);
            }
        }
    }

    /// Apply a fired timer
    pub fn on_timer(&mut self, timer: DrawTimer) {
        let session = match self.session.as_mut() {
            Some(session) if session.id == timer.session => session,
            _ => {
                msg!("Dropping stale timer from live draw {}", timer.session);
                return;
            }
        };

        if let Some(handle) = session.pending_timers.remove(&timer.kind) {
            self.scheduler.release(handle);
        }

        match timer.kind {
            TimerKind::BeginReveal => {
                if session.phase != DrawPhase::Mixing {
                    return;
                }
                session.phase = DrawPhase::Revealing;

                // All reveals hang off this instant so delays never accumulate
                let offsets = self.config.reveal_schedule(session.full_winners.len());
                for (index, offset) in offsets.into_iter().enumerate() {
                    let kind = TimerKind::Reveal { index };
                    let handle = self.scheduler.schedule(
                        offset,
                        DrawTimer {
                            session: session.id,
                            kind,
                        },
                    );
                    session.pending_timers.insert(kind, handle);
                }
                msg!("Live draw {} revealing winners", session.id);
            }
            TimerKind::Reveal { index } => {
                if session.phase != DrawPhase::Revealing {
                    return;
                }
                let winner = match session.full_winners.get(index) {
                    Some(winner) => winner,
                    None => return,
                };
                if session.revealed.contains(winner) {
                    return;
                }
                session.revealed.push(winner.clone());
                msg!(
                    "Live draw {} revealed winner {} of {}",
                    session.id,
                    session.revealed.len(),
                    session.full_winners.len()
                );
            }
        }

        if session.is_complete() {
            msg!("Live draw {} revealed all winners", session.id);
        }
    }

    pub fn phase(&self) -> DrawPhase {
        self.session
            .as_ref()
            .map(DrawSession::phase)
            .unwrap_or(self.resting_phase)
    }

    /// True once every drawn winner is on screen
    pub fn is_complete(&self) -> bool {
        self.session.as_ref().map_or(false, DrawSession::is_complete)
    }

    pub fn session(&self) -> Option<&DrawSession> {
        self.session.as_ref()
    }

    pub fn revealed_winners(&self) -> &[String] {
        self.session.as_ref().map(DrawSession::revealed).unwrap_or(&[])
    }

    pub fn full_winner_count(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.full_winners.len())
    }

    /// Timers the current session still waits on
    pub fn pending_timers(&self) -> usize {
        self.session.as_ref().map_or(0, |session| session.pending_timers.len())
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> DrawView {
        let session = match self.session.as_ref() {
            Some(session) => session,
            None => return DrawView::default(),
        };

        let message = match session.phase {
            DrawPhase::Mixing => self.config.mixing_message.clone(),
            DrawPhase::Revealing => self.config.drawing_message.clone(),
            DrawPhase::Idle | DrawPhase::Closed => String::new(),
        };

        DrawView {
            open: session.phase.is_open(),
            message,
            winners: session.revealed.clone(),
            raffle: Some(session.raffle.clone()),
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<R: RandomSource, G: RaffleLifecycleGateway> DrawSequencer<R, G, ManualScheduler> {
    /// Move the simulated clock forward, firing every timer that falls due
    pub fn advance(&mut self, ms: u64) {
        let until_ms = self.scheduler.now_ms().saturating_add(ms);
        while let Some(timer) = self.scheduler.pop_due(until_ms) {
            self.on_timer(timer);
        }
        self.scheduler.advance_to(until_ms);
    }
}

impl<R: RandomSource, G: RaffleLifecycleGateway, S: Scheduler> Drop for DrawSequencer<R, G, S> {
    fn drop(&mut self) {
        self.cancel_session();
    }
}
