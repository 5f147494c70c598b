// Live Draw Engine
// Winner selection and staged reveal for raffle live draws

// Core modules
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

// Draw engine
pub mod participants;
pub mod random;
pub mod scheduler;
pub mod selector;
pub mod sequencer;

// Host integration
pub mod registry;
pub mod runner;

pub use error::DrawError;
pub use participants::{normalize, NormalizedParticipants};
pub use random::{RandomSource, SeededRandom, SystemRandom};
pub use registry::{RaffleLifecycleGateway, RaffleRegistry};
pub use scheduler::{DrawTimer, ManualScheduler, Scheduler, TimerHandle, TimerKind, TokioScheduler};
pub use selector::select_winners;
pub use sequencer::{DrawSequencer, DrawSession};
pub use state::{DrawConfig, DrawPhase, DrawView, Raffle, RaffleStatus};
