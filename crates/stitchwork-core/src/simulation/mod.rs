//! Per-frame systems - movement, discovery, speech bubbles

pub mod events;
pub mod movement;
pub mod notifications;
pub mod progression;

pub use events::{EventSink, NoopEvents, SimEvent};
pub use movement::{MoveOutcome, MovementSystem};
pub use notifications::{Notification, NotificationManager};
pub use progression::ProgressionSystem;
