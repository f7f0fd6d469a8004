//! One play session: a maze, its physics bodies and the win state
//!
//! Everything the game mutates lives in `MazeSession`, so a restart is just a
//! rebuild of this value's contents and tests can run sessions side by side.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::Control;
use super::layout::{Layout, Rect};
use crate::config::GameConfig;
use crate::error::Result;
use crate::maze::Maze;
use crate::maze::generator::generate_from_random_start;
use crate::physics::{BodyDesc, BodyId, CollisionPair, Label, PhysicsWorld};

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ball is loose in the maze
    Playing,
    /// Ball reached the goal
    Won,
}

/// Visibility of the host UI elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    /// "You won" banner
    pub winner_visible: bool,
    /// Restart button
    pub restart_visible: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Physics steps taken
    pub steps: u32,
    /// Collision-start pairs reported
    pub collisions: usize,
    /// A ball/goal contact triggered the win path
    pub won: bool,
}

impl TickOutcome {
    pub fn merge(&mut self, other: TickOutcome) {
        self.steps += other.steps;
        self.collisions += other.collisions;
        self.won |= other.won;
    }
}

/// Bodies created for one maze
struct Built {
    maze: Maze,
    ball: BodyId,
    goal: BodyId,
}

fn static_rect(label: Label, rect: Rect) -> BodyDesc {
    BodyDesc::rectangle(label, rect.center.x, rect.center.y, rect.size.x, rect.size.y)
}

/// A maze game bound to a physics world and a random source
pub struct MazeSession<W: PhysicsWorld, R: Rng> {
    config: GameConfig,
    layout: Layout,
    world: W,
    rng: R,
    maze: Maze,
    ball: BodyId,
    goal: BodyId,
    phase: Phase,
    ui: UiState,
    /// Number of mazes built so far (1 after `new`)
    generation: u32,
}

impl<W: PhysicsWorld> MazeSession<W, Pcg32> {
    /// Session driven by a `Pcg32` seeded from `config.seed` or entropy
    pub fn from_config(config: GameConfig, world: W) -> Result<Self> {
        let seed = config.resolved_seed();
        log::info!("Session seed: {}", seed);
        Self::new(config, world, Pcg32::seed_from_u64(seed))
    }
}

impl<W: PhysicsWorld, R: Rng> MazeSession<W, R> {
    /// Validate `config`, generate the first maze and populate `world`
    pub fn new(config: GameConfig, mut world: W, mut rng: R) -> Result<Self> {
        config.validate()?;
        let layout = Layout::from_config(&config);
        let built = Self::build(&layout, &mut world, &mut rng)?;

        Ok(Self {
            config,
            layout,
            world,
            rng,
            maze: built.maze,
            ball: built.ball,
            goal: built.goal,
            phase: Phase::Playing,
            ui: UiState::default(),
            generation: 1,
        })
    }

    /// Discard every body, generate a fresh maze and rebuild the world
    pub fn restart(&mut self) -> Result<()> {
        let built = Self::build(&self.layout, &mut self.world, &mut self.rng)?;
        self.maze = built.maze;
        self.ball = built.ball;
        self.goal = built.goal;
        self.phase = Phase::Playing;
        self.ui = UiState::default();
        self.generation += 1;
        log::info!("Restarted (maze #{})", self.generation);
        Ok(())
    }

    fn build(layout: &Layout, world: &mut W, rng: &mut R) -> Result<Built> {
        world.clear();
        world.set_gravity(Vec2::ZERO);

        let maze = generate_from_random_start(layout.rows, layout.cols, rng)?;
        log::info!(
            "Generated {}x{} maze from {} ({} passages)",
            maze.rows(),
            maze.cols(),
            maze.start(),
            maze.passage_count()
        );

        for rect in layout.borders() {
            world.add(static_rect(Label::Border, rect));
        }
        let mut walls = 0;
        for slot in maze.closed_walls() {
            world.add(static_rect(Label::Wall, layout.wall_rect(slot)));
            walls += 1;
        }
        let goal = world.add(static_rect(Label::Goal, layout.goal_rect()));

        let start = layout.ball_start();
        let ball = world.add(BodyDesc::circle(
            Label::Ball,
            start.x,
            start.y,
            layout.ball_radius(),
        ));

        log::debug!("Placed {} walls, goal #{}, ball #{}", walls, goal.0, ball.0);
        Ok(Built { maze, ball, goal })
    }

    /// Nudge the ball's velocity
    pub fn apply_control(&mut self, control: Control) -> bool {
        let vel = self.world.velocity(self.ball).unwrap_or(Vec2::ZERO);
        self.world
            .set_velocity(self.ball, control.apply(vel, self.config.velocity_step))
    }

    /// Handle a DOM keydown by `keyCode`, falling back to the `key` name;
    /// `false` if the key is not a control
    pub fn apply_key(&mut self, code: u32, key: &str) -> bool {
        match Control::from_key_code(code).or_else(|| Control::from_key(key)) {
            Some(control) => self.apply_control(control),
            None => false,
        }
    }

    /// Run win detection over collision-start pairs
    ///
    /// Each `{ball, goal}` pair triggers the win path once. Returns how many
    /// pairs did.
    pub fn handle_collisions(&mut self, pairs: &[CollisionPair]) -> usize {
        let mut wins = 0;
        for pair in pairs {
            if pair.is_between(Label::Ball, Label::Goal) {
                self.win();
                wins += 1;
            }
        }
        wins
    }

    /// Show the banner and restart button, switch on gravity, drop the walls
    fn win(&mut self) {
        self.phase = Phase::Won;
        self.ui.winner_visible = true;
        self.ui.restart_visible = true;
        self.world
            .set_gravity(Vec2::new(0.0, self.config.win_gravity));

        let walls: Vec<BodyId> = self
            .world
            .bodies()
            .iter()
            .filter(|b| b.label == Label::Wall)
            .map(|b| b.id)
            .collect();
        for &id in &walls {
            self.world.set_static(id, false);
        }
        log::info!("Goal reached! Released {} walls", walls.len());
    }

    /// Advance the world by one step and process its collisions
    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let pairs = self.world.step(dt);
        let wins = self.handle_collisions(&pairs);
        TickOutcome {
            steps: 1,
            collisions: pairs.len(),
            won: wins > 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn ball(&self) -> BodyId {
        self.ball
    }

    pub fn goal(&self) -> BodyId {
        self.goal
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ball centre, if the ball exists
    pub fn ball_position(&self) -> Option<Vec2> {
        self.world.body(self.ball).map(|b| b.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::physics::SimWorld;

    fn small_config() -> GameConfig {
        GameConfig {
            cells_horizontal: 4,
            cells_vertical: 3,
            width: 400.0,
            height: 300.0,
            seed: Some(2024),
            ..GameConfig::default()
        }
    }

    fn session_with(config: GameConfig) -> MazeSession<SimWorld, Pcg32> {
        let world = SimWorld::from_config(&config);
        MazeSession::from_config(config, world).unwrap()
    }

    fn session() -> MazeSession<SimWorld, Pcg32> {
        session_with(small_config())
    }

    fn count(session: &MazeSession<SimWorld, Pcg32>, label: Label) -> usize {
        session
            .world()
            .bodies()
            .iter()
            .filter(|b| b.label == label)
            .count()
    }

    fn ball_goal_pair(session: &MazeSession<SimWorld, Pcg32>, ball_first: bool) -> CollisionPair {
        let (a, la, b, lb) = if ball_first {
            (session.ball(), Label::Ball, session.goal(), Label::Goal)
        } else {
            (session.goal(), Label::Goal, session.ball(), Label::Ball)
        };
        CollisionPair {
            body_a: a,
            label_a: la,
            body_b: b,
            label_b: lb,
        }
    }

    #[test]
    fn test_new_session_populates_world() {
        let session = session();
        let maze = session.maze();
        assert!(maze.verify().is_ok());

        // 3x4 grid: 3*3 vertical + 2*4 horizontal slots, 11 of them opened
        let closed = 3 * 3 + 2 * 4 - (3 * 4 - 1);
        assert_eq!(count(&session, Label::Wall), closed);
        assert_eq!(count(&session, Label::Border), 4);
        assert_eq!(count(&session, Label::Goal), 1);
        assert_eq!(count(&session, Label::Ball), 1);

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.ui(), UiState::default());
        assert_eq!(session.world().gravity(), Vec2::ZERO);
        assert_eq!(session.ball_position(), Some(Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = session();
        let b = session();
        assert_eq!(a.maze(), b.maze());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            cells_horizontal: 0,
            ..small_config()
        };
        assert!(MazeSession::from_config(config, SimWorld::default()).is_err());
    }

    #[test]
    fn test_controls_change_velocity() {
        let mut session = session();
        let step = session.config().velocity_step;
        assert!(session.apply_control(Control::Right));
        assert!(session.apply_control(Control::Right));
        assert!(session.apply_key(87, "w"));
        assert!(!session.apply_key(13, "Enter"));

        let vel = session.world().velocity(session.ball()).unwrap();
        assert_eq!(vel, Vec2::new(2.0 * step, -step));
    }

    #[test]
    fn test_key_name_used_when_code_unknown() {
        let mut session = session();
        let step = session.config().velocity_step;
        // Some layouts report keyCode 0 for arrows
        assert!(session.apply_key(0, "ArrowLeft"));
        assert!(session.apply_key(0, "S"));
        assert!(!session.apply_key(0, "Unidentified"));

        let vel = session.world().velocity(session.ball()).unwrap();
        assert_eq!(vel, Vec2::new(-step, step));
    }

    #[test]
    fn test_air_friction_reaches_world() {
        let velocity_after_tick = |air_friction: f32| {
            let mut session = session_with(GameConfig {
                air_friction,
                ..small_config()
            });
            session.apply_control(Control::Right);
            session.tick(SIM_DT);
            session.world().velocity(session.ball()).unwrap()
        };

        let free = velocity_after_tick(0.0);
        let damped = velocity_after_tick(0.5);
        assert_ne!(free, damped);
        assert!((free.x - 60.0).abs() < 1e-4);
        assert!((damped.x - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_ball_goal_collision_wins_in_either_order() {
        for ball_first in [true, false] {
            let mut session = session();
            let pair = ball_goal_pair(&session, ball_first);
            assert_eq!(session.handle_collisions(&[pair]), 1);

            assert_eq!(session.phase(), Phase::Won);
            assert!(session.ui().winner_visible);
            assert!(session.ui().restart_visible);
            assert!(session.world().gravity().y > 0.0);
            assert!(
                session
                    .world()
                    .bodies()
                    .iter()
                    .filter(|b| b.label == Label::Wall)
                    .all(|b| !b.is_static)
            );
            // Borders and goal stay put
            assert!(
                session
                    .world()
                    .bodies()
                    .iter()
                    .filter(|b| matches!(b.label, Label::Border | Label::Goal))
                    .all(|b| b.is_static)
            );
        }
    }

    #[test]
    fn test_ball_wall_collision_never_wins() {
        let mut session = session();
        let wall = session
            .world()
            .bodies()
            .iter()
            .find(|b| b.label == Label::Wall)
            .map(|b| b.id)
            .unwrap();
        let pair = CollisionPair {
            body_a: session.ball(),
            label_a: Label::Ball,
            body_b: wall,
            label_b: Label::Wall,
        };
        assert_eq!(session.handle_collisions(&[pair, pair]), 0);
        assert_eq!(session.phase(), Phase::Playing);
        assert!(!session.ui().winner_visible);
        assert_eq!(session.world().gravity(), Vec2::ZERO);
    }

    #[test]
    fn test_rolling_into_goal_wins_once() {
        // Single row corridor: the ball can roll straight to the goal
        let config = GameConfig {
            cells_horizontal: 3,
            cells_vertical: 1,
            width: 300.0,
            height: 100.0,
            seed: Some(9),
            ..GameConfig::default()
        };
        let mut session = session_with(config);
        assert_eq!(session.maze().passage_count(), 2);

        for _ in 0..5 {
            session.apply_control(Control::Right);
        }
        let mut total = TickOutcome::default();
        for _ in 0..600 {
            total.merge(session.tick(SIM_DT));
            if session.phase() == Phase::Won {
                break;
            }
        }
        assert!(total.won);
        assert_eq!(session.phase(), Phase::Won);

        // Resting against the goal is not a fresh pair
        for _ in 0..30 {
            let outcome = session.tick(SIM_DT);
            assert!(!outcome.won);
        }
    }

    #[test]
    fn test_restart_discards_old_bodies() {
        let mut session = session();
        let old_ids: Vec<BodyId> = session.world().bodies().iter().map(|b| b.id).collect();
        let pair = ball_goal_pair(&session, true);
        session.handle_collisions(&[pair]);

        session.restart().unwrap();

        assert_eq!(session.generation(), 2);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.ui(), UiState::default());
        assert_eq!(session.world().gravity(), Vec2::ZERO);
        assert!(
            session
                .world()
                .bodies()
                .iter()
                .all(|b| !old_ids.contains(&b.id))
        );
        assert_eq!(count(&session, Label::Ball), 1);
        assert_eq!(count(&session, Label::Goal), 1);
        assert_eq!(count(&session, Label::Border), 4);
        assert!(
            session
                .world()
                .bodies()
                .iter()
                .filter(|b| b.label == Label::Wall)
                .all(|b| b.is_static)
        );
        assert!(session.maze().verify().is_ok());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session();
        let b = session();
        a.apply_control(Control::Down);
        assert_eq!(b.world().velocity(b.ball()), Some(Vec2::ZERO));
    }
}
