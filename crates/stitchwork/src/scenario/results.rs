//! Execution results and reporting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::verification::VerificationResult;

/// Timing for a scenario execution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    /// Average time per simulated frame (milliseconds)
    pub avg_frame_time_ms: f64,

    /// Peak frame time (milliseconds)
    pub peak_frame_time_ms: f64,
}

impl PerformanceMetrics {
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Avg frame: {:.3}ms | Peak: {:.3}ms",
            self.total_duration_ms, self.avg_frame_time_ms, self.peak_frame_time_ms
        )
    }
}

/// Report from scenario execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub scenario_name: String,

    /// Timestamp (RFC 3339)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    pub frames_executed: u64,

    pub actions_executed: usize,

    /// Items discovered during the run, in discovery order
    pub discovered: Vec<String>,

    /// Verification failures (empty if all passed)
    pub verification_failures: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    /// Screenshot file paths
    pub screenshots: Vec<String>,

    pub performance: PerformanceMetrics,
}

impl ExecutionReport {
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            frames_executed: 0,
            actions_executed: 0,
            discovered: Vec::new(),
            verification_failures: Vec::new(),
            log: Vec::new(),
            screenshots: Vec::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Check if all verifications passed
    pub fn success(&self) -> bool {
        self.verification_failures.is_empty()
    }

    /// Save report to RON file
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize execution report to RON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!(
                "Failed to write execution report: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }

    /// Load report from RON file
    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON report: {}", path.as_ref().display()))?;

        Ok(report)
    }
}
