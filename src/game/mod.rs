//! Game adapter: maze -> physics bodies, keys -> velocity, contacts -> win

pub mod input;
pub mod layout;
pub mod runner;
pub mod session;

pub use input::Control;
pub use layout::{Layout, Rect};
pub use runner::Runner;
pub use session::{MazeSession, Phase, TickOutcome, UiState};
