// Live Draw Engine - Raffle lifecycle
use solana_program::msg;

use crate::error::DrawError;
use crate::state::Raffle;

/// Boundary to the raffle store owned by the surrounding application
pub trait RaffleLifecycleGateway {
    /// Flag the raffle as finished. The sequencer does not wait on or react to the result.
    fn mark_finished(&mut self, raffle_id: &str) -> Result<(), DrawError>;

    /// Look a raffle up by id
    fn find(&self, raffle_id: &str) -> Option<Raffle>;
}

/// In-memory raffle list, in creation order
#[derive(Clone, Debug, Default)]
pub struct RaffleRegistry {
    raffles: Vec<Raffle>,
}

impl RaffleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raffle: Raffle) -> Result<(), DrawError> {
        if raffle.id.trim().is_empty() {
            return Err(DrawError::EmptyRaffleId);
        }
        if self.get(&raffle.id).is_some() {
            return Err(DrawError::DuplicateRaffle(raffle.id));
        }

        msg!("Raffle registered with ID: {}", raffle.id);
        self.raffles.push(raffle);
        Ok(())
    }

    pub fn get(&self, raffle_id: &str) -> Option<&Raffle> {
        self.raffles.iter().find(|raffle| raffle.id == raffle_id)
    }

    /// Raffles still open for a draw
    pub fn active(&self) -> impl Iterator<Item = &Raffle> {
        self.raffles.iter().filter(|raffle| !raffle.finished)
    }

    pub fn finished(&self) -> impl Iterator<Item = &Raffle> {
        self.raffles.iter().filter(|raffle| raffle.finished)
    }

    pub fn len(&self) -> usize {
        self.raffles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raffles.is_empty()
    }
}

impl RaffleLifecycleGateway for RaffleRegistry {
    fn mark_finished(&mut self, raffle_id: &str) -> Result<(), DrawError> {
        let raffle = self
            .raffles
            .iter_mut()
            .find(|raffle| raffle.id == raffle_id)
            .ok_or_else(|| DrawError::RaffleNotFound(raffle_id.to_string()))?;

        raffle.finished = true;
        Ok(())
    }

    fn find(&self, raffle_id: &str) -> Option<Raffle> {
        self.get(raffle_id).cloned()
    }
}
