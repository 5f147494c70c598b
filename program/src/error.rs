// Live Draw Engine - Errors
use solana_program::msg;
use thiserror::Error;

/// Errors raised at the boundaries of the draw engine.
///
/// The draw itself never fails: degenerate raffles produce short or empty
/// winner lists. These variants cover command decoding, configuration and
/// the raffle lifecycle collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Command bytes could not be decoded
    #[error("Invalid draw command")]
    InvalidCommand,

    /// Draw configuration rejected
    #[error("Invalid draw config: {0}")]
    InvalidConfig(String),

    #[error("Raffle not found: {0}")]
    RaffleNotFound(String),

    #[error("Raffle already registered: {0}")]
    DuplicateRaffle(String),

    #[error("Raffle id must not be empty")]
    EmptyRaffleId,

    /// Borsh encoding failed
    #[error("Encoding failed: {0}")]
    Encoding(String),
}

impl DrawError {
    pub fn log(&self) {
        msg!(&self.to_string());
    }
}
