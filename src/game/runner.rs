//! Fixed timestep driver
//!
//! Hosts call `advance` once per frame with the elapsed wall time; the runner
//! turns that into whole `SIM_DT` steps.

use rand::Rng;

use super::session::{MazeSession, TickOutcome};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::physics::PhysicsWorld;

/// Longest frame we try to catch up on (seconds)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct Runner {
    accumulator: f32,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step `session` for `frame_dt` seconds of wall time
    pub fn advance<W: PhysicsWorld, R: Rng>(
        &mut self,
        session: &mut MazeSession<W, R>,
        frame_dt: f32,
    ) -> TickOutcome {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut outcome = TickOutcome::default();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            outcome.merge(session.tick(SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::debug!("Dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        outcome
    }

    /// Leftover time not yet simulated
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::physics::SimWorld;

    fn session() -> MazeSession<SimWorld, rand_pcg::Pcg32> {
        let config = GameConfig::default().with_seed(3);
        let world = SimWorld::from_config(&config);
        MazeSession::from_config(config, world).unwrap()
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut session = session();
        let mut runner = Runner::new();

        let outcome = runner.advance(&mut session, SIM_DT * 0.5);
        assert_eq!(outcome.steps, 0);

        let outcome = runner.advance(&mut session, SIM_DT * 0.6);
        assert_eq!(outcome.steps, 1);
        assert!(runner.backlog() < SIM_DT);
    }

    #[test]
    fn test_caps_substeps() {
        let mut session = session();
        let mut runner = Runner::new();

        let outcome = runner.advance(&mut session, 5.0);
        assert!(outcome.steps <= MAX_SUBSTEPS);
        assert!(runner.backlog() < SIM_DT);
    }

    #[test]
    fn test_ignores_negative_time() {
        let mut session = session();
        let mut runner = Runner::new();
        assert_eq!(runner.advance(&mut session, -1.0).steps, 0);
        assert_eq!(runner.backlog(), 0.0);
    }
}
