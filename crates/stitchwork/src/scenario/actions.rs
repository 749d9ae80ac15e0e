//! Actions a scenario can perform

use serde::{Deserialize, Serialize};

use super::verification::VerificationCondition;

/// Externally tagged in RON: `WaitFrames(frames: 20)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioAction {
    /// Change the viewport, regenerating the room
    Resize { width: f32, height: f32 },

    /// Place the creature's frame origin without any containment check
    Teleport { x: f32, y: f32 },

    /// Press a key (DOM key name, e.g. `"w"` or `"ArrowLeft"`)
    Hold { key: String },

    /// Release a key
    Release { key: String },

    /// Release every held key
    ReleaseAll,

    /// Run frames with the current input
    WaitFrames { frames: u32 },

    /// Run frames until a condition passes
    WaitUntil {
        condition: VerificationCondition,
        timeout_frames: u32,
    },

    /// Render the current state to a PNG
    Screenshot { filename: String },

    /// Write a message to the execution log
    Log { message: String },
}
