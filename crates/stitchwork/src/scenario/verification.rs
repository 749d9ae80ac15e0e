//! Verification conditions and state checks for scenarios

use serde::{Deserialize, Serialize};
use stitchwork_core::entity::BodyPart;
use stitchwork_core::items::ItemId;
use stitchwork_core::SimulationState;

/// Conditions that can be verified against simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === CREATURE CHECKS ===
    /// Every corner of the declared frame is inside the room
    CreatureInRoom,

    /// Creature frame origin (with tolerance)
    CreaturePosition { x: f32, y: f32, tolerance: f32 },

    PartUnlocked { part: BodyPart },

    CanHop { expected: bool },

    // === ITEM CHECKS ===
    ItemDiscovered { item: ItemId },

    ItemCollected { item: ItemId },

    /// Number of live speech bubbles
    NotificationCount { expected: usize },

    // === LOGICAL OPERATORS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// Any condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must NOT pass
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>,
}

impl VerificationCondition {
    /// Evaluate condition against simulation state
    pub fn evaluate(&self, state: &SimulationState) -> VerificationResult {
        match self {
            VerificationCondition::CreatureInRoom => {
                let frame = state.creature.frame_at(state.creature.position);
                let passed = state.room().contains_all(&frame.corners());

                VerificationResult {
                    passed,
                    message: format!(
                        "Creature frame {:?}..{:?} {} the room",
                        frame.min,
                        frame.max,
                        if passed { "inside" } else { "outside" }
                    ),
                    actual_value: Some(format!("{:?}", state.creature.position)),
                }
            }

            VerificationCondition::CreaturePosition { x, y, tolerance } => {
                let pos = state.creature.position;
                let dist = ((pos.x - x).powi(2) + (pos.y - y).powi(2)).sqrt();
                let passed = dist <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "Creature position: expected ({}, {}) ±{}, got ({:.1}, {:.1}), distance {:.1}",
                        x, y, tolerance, pos.x, pos.y, dist
                    ),
                    actual_value: Some(format!("({:.1}, {:.1})", pos.x, pos.y)),
                }
            }

            VerificationCondition::PartUnlocked { part } => {
                let passed = state.creature.has_part(*part);

                VerificationResult {
                    passed,
                    message: format!(
                        "Part {:?} {}",
                        part,
                        if passed { "attached" } else { "missing" }
                    ),
                    actual_value: Some(format!("{:?}", state.creature.parts())),
                }
            }

            VerificationCondition::CanHop { expected } => {
                let actual = state.creature.can_hop();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!("Can hop: expected {}, got {}", expected, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::ItemDiscovered { item } => {
                let actual = state.items.get(*item).map(|i| i.is_discovered());

                VerificationResult {
                    passed: actual == Some(true),
                    message: format!("Item {} discovered: {:?}", item, actual),
                    actual_value: actual.map(|a| a.to_string()),
                }
            }

            VerificationCondition::ItemCollected { item } => {
                let actual = state.items.get(*item).map(|i| i.is_collected());

                VerificationResult {
                    passed: actual == Some(true),
                    message: format!("Item {} collected: {:?}", item, actual),
                    actual_value: actual.map(|a| a.to_string()),
                }
            }

            VerificationCondition::NotificationCount { expected } => {
                let actual = state.notifications.active_count();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!("Live bubbles: expected {}, got {}", expected, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::All { conditions } => {
                let results: Vec<_> = conditions.iter().map(|c| c.evaluate(state)).collect();
                let passed = results.iter().all(|r| r.passed);

                VerificationResult {
                    passed,
                    message: format!("All of [{}]", join_messages(&results)),
                    actual_value: None,
                }
            }

            VerificationCondition::Any { conditions } => {
                let results: Vec<_> = conditions.iter().map(|c| c.evaluate(state)).collect();
                let passed = results.iter().any(|r| r.passed);

                VerificationResult {
                    passed,
                    message: format!("Any of [{}]", join_messages(&results)),
                    actual_value: None,
                }
            }

            VerificationCondition::Not { condition } => {
                let inner = condition.evaluate(state);

                VerificationResult {
                    passed: !inner.passed,
                    message: format!("Not ({})", inner.message),
                    actual_value: inner.actual_value,
                }
            }
        }
    }
}

fn join_messages(results: &[VerificationResult]) -> String {
    results
        .iter()
        .map(|r| r.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
