// Live Draw Engine - Commands
use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::DrawError;
use crate::state::Raffle;

/// Commands a host sends to the draw engine, borsh encoded
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Start a live draw for the given raffle, superseding any running one
    StartLiveDraw { raffle: Raffle },

    /// Start a live draw for a raffle looked up through the lifecycle gateway
    StartLiveDrawById { raffle_id: String },

    /// Cancel the current live draw
    CloseLiveDraw,
}

impl DrawCommand {
    /// Unpacks a byte buffer into a DrawCommand
    pub fn unpack(input: &[u8]) -> Result<Self, DrawError> {
        Self::try_from_slice(input).map_err(|_| DrawError::InvalidCommand)
    }

    pub fn pack(&self) -> Result<Vec<u8>, DrawError> {
        self.try_to_vec().map_err(|e| DrawError::Encoding(e.to_string()))
    }
}
