// Live Draw Engine - Command processor
use borsh::BorshSerialize;
use solana_program::msg;

use crate::{
    error::DrawError,
    instruction::DrawCommand,
    random::RandomSource,
    registry::RaffleLifecycleGateway,
    scheduler::Scheduler,
    sequencer::DrawSequencer,
};

/// Applies byte-encoded commands from a host onto a sequencer.
pub struct Processor {}

impl Processor {
    /// Process a live draw command
    pub fn process<R, G, S>(
        sequencer: &mut DrawSequencer<R, G, S>,
        input: &[u8],
    ) -> Result<(), DrawError>
    where
        R: RandomSource,
        G: RaffleLifecycleGateway,
        S: Scheduler,
    {
        let command = DrawCommand::unpack(input).map_err(|e| {
            e.log();
            e
        })?;

        match command {
            DrawCommand::StartLiveDraw { raffle } => {
                msg!("Command: Start Live Draw");
                sequencer.start_live_draw(&raffle);
                Ok(())
            }
            DrawCommand::StartLiveDrawById { raffle_id } => {
                msg!("Command: Start Live Draw By Id");
                sequencer.start_live_draw_by_id(&raffle_id)
            }
            DrawCommand::CloseLiveDraw => {
                msg!("Command: Close Live Draw");
                sequencer.close_live_draw();
                Ok(())
            }
        }
    }

    /// Borsh encoding of the current view, for hosts across a byte boundary
    pub fn view_bytes<R, G, S>(sequencer: &DrawSequencer<R, G, S>) -> Result<Vec<u8>, DrawError>
    where
        R: RandomSource,
        G: RaffleLifecycleGateway,
        S: Scheduler,
    {
        sequencer
            .view()
            .try_to_vec()
            .map_err(|e| DrawError::Encoding(e.to_string()))
    }
}
