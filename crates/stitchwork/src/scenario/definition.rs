//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Fixed seed so bubble text and decor are reproducible
    #[serde(default)]
    pub seed: Option<u64>,

    /// Initial setup actions (run before main scenario)
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Main scenario actions
    pub actions: Vec<ScenarioAction>,

    /// Verification checks to run after scenario
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        Self::from_ron(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))
    }

    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stitchwork_core::items::ItemId;

    #[test]
    fn test_scenario_file_round_trip() {
        let scenario = ScenarioDefinition {
            name: "Leg pickup".to_string(),
            description: "Walk down onto the leg".to_string(),
            seed: Some(3),
            setup: vec![ScenarioAction::Teleport { x: 250.0, y: 410.0 }],
            actions: vec![
                ScenarioAction::Hold {
                    key: "s".to_string(),
                },
                ScenarioAction::WaitFrames { frames: 20 },
            ],
            verify: vec![VerificationCondition::ItemCollected {
                item: ItemId::LegLeft,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leg.ron");
        scenario.to_file(&path).unwrap();
        let loaded = ScenarioDefinition::from_file(&path).unwrap();

        assert_eq!(loaded.name, scenario.name);
        assert_eq!(loaded.seed, Some(3));
        assert_eq!(loaded.actions.len(), 2);
        assert_eq!(loaded.verify.len(), 1);
    }

    #[test]
    fn test_optional_sections_default() {
        let scenario = ScenarioDefinition::from_ron(
            r#"(name: "Idle", actions: [WaitFrames(frames: 10)])"#,
        )
        .unwrap();

        assert!(scenario.setup.is_empty());
        assert!(scenario.verify.is_empty());
        assert_eq!(scenario.seed, None);
    }

    #[test]
    fn test_bundled_scenario_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/leg_pickup.ron");
        let scenario = ScenarioDefinition::from_file(path).unwrap();
        assert!(!scenario.verify.is_empty());
    }
}
