// Live Draw Engine - Tokio runner
use tokio::sync::{mpsc, watch};

use crate::{
    error::DrawError,
    random::RandomSource,
    registry::RaffleLifecycleGateway,
    scheduler::{DrawTimer, TokioScheduler},
    sequencer::DrawSequencer,
    state::{DrawConfig, DrawView, Raffle},
};

/// Drives a sequencer on tokio timers and publishes each new view.
///
/// Every call that changes the draw state pushes a fresh [`DrawView`] to
/// subscribers. Must be created and used inside a tokio runtime.
pub struct LiveDrawRunner<R: RandomSource, G: RaffleLifecycleGateway> {
    sequencer: DrawSequencer<R, G, TokioScheduler>,
    fired: mpsc::UnboundedReceiver<DrawTimer>,
    views: watch::Sender<DrawView>,
    // Held so publishing never fails for lack of subscribers
    views_rx: watch::Receiver<DrawView>,
}

impl<R: RandomSource, G: RaffleLifecycleGateway> LiveDrawRunner<R, G> {
    pub fn new(config: DrawConfig, rng: R, gateway: G) -> Result<Self, DrawError> {
        let (scheduler, fired) = TokioScheduler::new();
        let sequencer = DrawSequencer::with_config(config, rng, gateway, scheduler)?;
        let (views, views_rx) = watch::channel(DrawView::default());
        Ok(Self {
            sequencer,
            fired,
            views,
            views_rx,
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<DrawView> {
        self.views_rx.clone()
    }

    pub fn start_live_draw(&mut self, raffle: &Raffle) {
        self.sequencer.start_live_draw(raffle);
        self.publish();
    }

    pub fn close_live_draw(&mut self) {
        self.sequencer.close_live_draw();
        self.publish();
    }

    /// Wait for the next timer, apply it and return the resulting view
    pub async fn step(&mut self) -> Option<DrawView> {
        let timer = self.fired.recv().await?;
        self.sequencer.on_timer(timer);
        Some(self.publish())
    }

    /// Drive the current session until every winner is revealed.
    ///
    /// Returns immediately when no draw is running.
    pub async fn run_until_complete(&mut self) -> DrawView {
        while self.sequencer.phase().is_open() && !self.sequencer.is_complete() {
            if self.step().await.is_none() {
                break;
            }
        }
        self.sequencer.view()
    }

    pub fn sequencer(&self) -> &DrawSequencer<R, G, TokioScheduler> {
        &self.sequencer
    }

    fn publish(&self) -> DrawView {
        let view = self.sequencer.view();
        let _ = self.views.send(view.clone());
        view
    }
}
