// Live Draw Engine - State
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::DrawError;

/// Mixing animation length before the first reveal
pub const STAGE_DELAY_MS: u64 = 800;
/// Spacing between two reveals
pub const REVEAL_INTERVAL_MS: u64 = 700;
pub const MIXING_MESSAGE: &str = "Shuffling participants...";
pub const DRAWING_MESSAGE: &str = "Drawing winners...";

/// Raffle status as seen by the public listing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleStatus {
    /// Raffle is open and has not been drawn
    Active,
    /// A live draw has been started for the raffle
    Finished,
}

/// Raffle record handed over by the CRUD layer
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Raffle {
    /// Opaque unique identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Draw date as entered by the administrator
    pub date: String,
    /// Prize list, one entry per winner slot
    pub prizes: Vec<String>,
    /// Raw participant roster (may contain duplicates and padding)
    pub participants: Vec<String>,
    /// Number of winners to draw
    pub winners_count: u32,
    /// Set once a live draw has started
    pub finished: bool,
}

impl Raffle {
    /// Create a new, unfinished raffle
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        participants: Vec<String>,
        winners_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into().trim().to_string(),
            date: String::new(),
            prizes: Vec::new(),
            participants,
            winners_count: winners_count.max(1),
            finished: false,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_prizes(mut self, prizes: Vec<String>) -> Self {
        self.prizes = prizes;
        self
    }

    pub fn status(&self) -> RaffleStatus {
        if self.finished {
            RaffleStatus::Finished
        } else {
            RaffleStatus::Active
        }
    }
}

/// Phase of a draw session
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawPhase {
    /// No session has been started yet
    Idle,
    /// Participants are being shuffled on screen
    Mixing,
    /// Winners are being revealed one by one
    Revealing,
    /// The session was closed by the caller
    Closed,
}

impl DrawPhase {
    pub fn is_open(self) -> bool {
        matches!(self, DrawPhase::Mixing | DrawPhase::Revealing)
    }
}

/// Snapshot read by the presentation layer after each transition
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct DrawView {
    /// Whether the live draw modal is shown
    pub open: bool,
    /// Mixing or drawing status text, empty when closed
    pub message: String,
    /// Winners revealed so far, in reveal order
    pub winners: Vec<String>,
    /// Raffle being drawn
    pub raffle: Option<Raffle>,
}

/// Timing and copy of the live draw
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DrawConfig {
    pub stage_delay_ms: u64,
    pub reveal_interval_ms: u64,
    pub mixing_message: String,
    pub drawing_message: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            stage_delay_ms: STAGE_DELAY_MS,
            reveal_interval_ms: REVEAL_INTERVAL_MS,
            mixing_message: MIXING_MESSAGE.to_string(),
            drawing_message: DRAWING_MESSAGE.to_string(),
        }
    }
}

impl DrawConfig {
    /// Decode a host-supplied config and validate it
    pub fn unpack(input: &[u8]) -> Result<Self, DrawError> {
        let config = Self::try_from_slice(input)
            .map_err(|e| DrawError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DrawError> {
        if self.mixing_message.trim().is_empty() {
            return Err(DrawError::InvalidConfig("mixing message is empty".to_string()));
        }
        if self.drawing_message.trim().is_empty() {
            return Err(DrawError::InvalidConfig("drawing message is empty".to_string()));
        }
        Ok(())
    }

    /// Offsets of each reveal from the start of the revealing phase
    pub fn reveal_schedule(&self, winners: usize) -> Vec<u64> {
        (0..winners as u64)
            .map(|index| self.reveal_interval_ms.saturating_mul(index))
            .collect()
    }

    /// Time from `start` until the last winner is on screen
    pub fn total_duration_ms(&self, winners: usize) -> u64 {
        let last_reveal = self.reveal_schedule(winners).last().copied().unwrap_or(0);
        self.stage_delay_ms.saturating_add(last_reveal)
    }
}
