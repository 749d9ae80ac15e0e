pub mod creature;
pub mod input;
pub mod parts;

pub use creature::{Creature, CreatureSnapshot};
pub use input::{Direction, InputState};
pub use parts::{BodyPart, PartSet, UnlockEffect};
