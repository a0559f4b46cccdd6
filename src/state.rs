use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;

use crate::analysis::color::ColorRamp;
use crate::config::Config;
use crate::services::evaluator::EvaluatorClient;

#[derive(Clone)]
pub struct AppState {
    evaluator: Arc<EvaluatorClient>,
    ramp: Arc<ColorRamp>,
    config: Arc<Config>,
    shutdown_tx: broadcast::Sender<()>,
    started_at: Instant,
}

impl AppState {
    pub fn new(
        evaluator: Arc<EvaluatorClient>,
        ramp: Arc<ColorRamp>,
        config: &Config,
        shutdown_tx: broadcast::Sender<()>,
    ) -> Self {
        Self {
            evaluator,
            ramp,
            config: Arc::new(config.clone()),
            shutdown_tx,
            started_at: Instant::now(),
        }
    }

    pub fn evaluator(&self) -> &EvaluatorClient {
        &self.evaluator
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use crate::analysis::color::{ColorRamp, Rgb};
    use crate::config::Config;
    use crate::services::evaluator::EvaluatorClient;

    use super::*;

    fn test_state() -> (AppState, broadcast::Sender<()>) {
        let config = Config::from_env();
        let evaluator = Arc::new(EvaluatorClient::new(&config.evaluator));
        let ramp = Arc::new(
            ColorRamp::build(
                config.ramp.stops,
                Rgb::parse(&config.ramp.low).unwrap(),
                Rgb::parse(&config.ramp.high).unwrap(),
            )
            .unwrap(),
        );
        let (tx, _) = broadcast::channel(4);
        let state = AppState::new(evaluator, ramp, &config, tx.clone());
        (state, tx)
    }

    #[tokio::test]
    async fn shutdown_receiver_can_clone() {
        let (state, tx) = test_state();
        let mut rx1 = state.shutdown_rx();
        let mut rx2 = state.shutdown_rx();
        tx.send(()).unwrap();
        rx1.recv().await.unwrap();
        rx2.recv().await.unwrap();
    }

    #[tokio::test]
    async fn ramp_is_shared_and_sized() {
        let (state, _tx) = test_state();
        assert_eq!(state.ramp().len(), state.config().ramp.stops);
    }
}
