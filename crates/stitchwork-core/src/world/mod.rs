//! Room geometry, RNG and the session state

pub mod rng;
pub mod room;
pub mod state;

pub use rng::{session_rng, SimRng};
pub use room::Room;
pub use state::{FrameReport, SimulationState};
