//! Scenario execution engine

use anyhow::{bail, Result};
use glam::Vec2;
use stitchwork_core::SimConfig;
use web_time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::ExecutionReport;
use super::verification::VerificationCondition;
use crate::app::App;
use crate::render::PixelRenderer;

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Enable screenshot capture
    pub capture_screenshots: bool,

    /// Screenshot output directory
    pub screenshot_dir: String,

    /// Initial viewport
    pub width: u32,
    pub height: u32,

    /// Log every action as it runs
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            capture_screenshots: false,
            screenshot_dir: "screenshots".to_string(),
            width: 800,
            height: 600,
            verbose: false,
        }
    }
}

/// Executes scenario actions against a game session
pub struct ScenarioExecutor {
    config: ScenarioExecutorConfig,

    /// Current viewport, changed by `Resize`
    viewport: (u32, u32),

    /// Action execution log
    log: Vec<String>,

    screenshots: Vec<String>,

    /// Names of items discovered so far
    discovered: Vec<String>,

    /// Frame timings (milliseconds)
    frame_times: Vec<f64>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            viewport: (config.width, config.height),
            config,
            log: Vec::new(),
            screenshots: Vec::new(),
            discovered: Vec::new(),
            frame_times: Vec::new(),
        }
    }

    /// Build a fresh session for `scenario`; its seed overrides the config's
    pub fn session(&self, scenario: &ScenarioDefinition, sim: &SimConfig) -> Result<App> {
        let mut sim = sim.clone();
        if scenario.seed.is_some() {
            sim.rng_seed = scenario.seed;
        }
        Ok(App::new(
            self.config.width as f32,
            self.config.height as f32,
            sim,
        )?)
    }

    /// Execute a complete scenario
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        app: &mut App,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let start_frame = app.state().frame();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.viewport = (self.config.width, self.config.height);
        self.log.clear();
        self.screenshots.clear();
        self.discovered.clear();
        self.frame_times.clear();

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        for (phase, actions) in [("setup", &scenario.setup), ("main", &scenario.actions)] {
            if actions.is_empty() {
                continue;
            }
            self.log(&format!("Running {} {} actions", actions.len(), phase));
            for (idx, action) in actions.iter().enumerate() {
                if let Err(e) = self.execute_action(action, app) {
                    let msg = format!("{} action {} failed: {}", phase, idx, e);
                    self.log(&msg);
                    report.log = self.log.clone();
                    return Err(anyhow::anyhow!(msg));
                }
            }
        }
        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(app.state());
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }

        report.frames_executed = app.state().frame() - start_frame;
        report.discovered = self.discovered.clone();
        report.screenshots = self.screenshots.clone();
        report.passed = report.verification_failures.is_empty();

        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        if !self.frame_times.is_empty() {
            let total: f64 = self.frame_times.iter().sum();
            report.performance.avg_frame_time_ms = total / self.frame_times.len() as f64;
            report.performance.peak_frame_time_ms =
                self.frame_times.iter().copied().fold(0.0, f64::max);
        }

        self.log(&format!(
            "Scenario complete: {} ({} frames, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            report.frames_executed,
            report.performance.total_duration_ms
        ));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, app: &mut App) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Frame {}] {:?}", app.state().frame(), action));
        }

        match action {
            ScenarioAction::Resize { width, height } => {
                app.resize(*width, *height);
                self.viewport = (width.round() as u32, height.round() as u32);
                self.log(&format!("  Resized to {}x{}", width, height));
            }

            ScenarioAction::Teleport { x, y } => {
                app.state_mut().creature.position = Vec2::new(*x, *y);
                self.log(&format!("  Teleported creature to ({}, {})", x, y));
            }

            ScenarioAction::Hold { key } => {
                if !app.key_down(key) {
                    bail!("Key '{}' does not move the creature", key);
                }
            }

            ScenarioAction::Release { key } => {
                if !app.key_up(key) {
                    bail!("Key '{}' does not move the creature", key);
                }
            }

            ScenarioAction::ReleaseAll => app.state_mut().input.release_all(),

            ScenarioAction::WaitFrames { frames } => {
                self.simulate_frames(app, *frames);
                self.log(&format!("  Waited {} frames", frames));
            }

            ScenarioAction::WaitUntil {
                condition,
                timeout_frames,
            } => {
                self.wait_until(app, condition, *timeout_frames)?;
            }

            ScenarioAction::Screenshot { filename } => {
                if self.config.capture_screenshots {
                    self.capture_screenshot(app, filename)?;
                } else {
                    self.log(&format!("  Screenshot capture disabled: {}", filename));
                }
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  [USER] {}", message));
            }
        }

        Ok(())
    }

    fn wait_until(
        &mut self,
        app: &mut App,
        condition: &VerificationCondition,
        timeout_frames: u32,
    ) -> Result<()> {
        for waited in 0..=timeout_frames {
            if condition.evaluate(app.state()).passed {
                self.log(&format!("  Condition met after {} frames", waited));
                return Ok(());
            }
            if waited < timeout_frames {
                self.simulate_frames(app, 1);
            }
        }
        bail!(
            "Timed out after {} frames waiting for {:?}",
            timeout_frames,
            condition
        )
    }

    fn simulate_frames(&mut self, app: &mut App, frames: u32) {
        for _ in 0..frames {
            let frame_start = Instant::now();
            let report = app.step();
            self.frame_times
                .push(frame_start.elapsed().as_secs_f64() * 1000.0);

            for id in report.discovered {
                if let Some(item) = app.state().items.get(id) {
                    let name = item.name.to_string();
                    self.log(&format!("  [Frame {}] Discovered {}", report.frame, name));
                    self.discovered.push(name);
                }
            }
        }
    }

    /// Render the room view to `screenshot_dir/filename`
    fn capture_screenshot(&mut self, app: &App, filename: &str) -> Result<()> {
        let (width, height) = self.viewport;
        let mut renderer = PixelRenderer::new(width as usize, height as usize);
        app.draw(&mut renderer);

        std::fs::create_dir_all(&self.config.screenshot_dir)?;
        let path = format!("{}/{}", self.config.screenshot_dir, filename);
        renderer.save_png(&path)?;

        self.screenshots.push(path.clone());
        self.log(&format!("  Screenshot saved: {}", path));
        Ok(())
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::VerificationCondition as Check;
    use stitchwork_core::entity::BodyPart;
    use stitchwork_core::items::ItemId;

    fn run(scenario: &ScenarioDefinition) -> Result<ExecutionReport> {
        let mut executor = ScenarioExecutor::new();
        let mut app = executor.session(scenario, &SimConfig::default())?;
        executor.execute_scenario(scenario, &mut app)
    }

    fn leg_pickup() -> ScenarioDefinition {
        ScenarioDefinition {
            name: "Leg pickup".to_string(),
            description: String::new(),
            seed: Some(9),
            setup: vec![ScenarioAction::Teleport { x: 250.0, y: 410.0 }],
            actions: vec![
                ScenarioAction::Hold {
                    key: "s".to_string(),
                },
                ScenarioAction::WaitUntil {
                    condition: Check::ItemCollected {
                        item: ItemId::LegLeft,
                    },
                    timeout_frames: 20,
                },
                ScenarioAction::ReleaseAll,
            ],
            verify: vec![
                Check::PartUnlocked {
                    part: BodyPart::LegLeft,
                },
                Check::CanHop { expected: true },
                Check::NotificationCount { expected: 1 },
                Check::CreatureInRoom,
            ],
        }
    }

    #[test]
    fn test_leg_pickup_passes() {
        let report = run(&leg_pickup()).unwrap();

        assert!(report.passed, "{:?}", report.verification_failures);
        assert_eq!(report.discovered, vec!["A Leg".to_string()]);
        assert!(report.frames_executed > 0);
        assert!(report.frames_executed <= 20);
    }

    #[test]
    fn test_failed_check_reported() {
        let mut scenario = leg_pickup();
        scenario.verify = vec![Check::CanHop { expected: false }];

        let report = run(&scenario).unwrap();

        assert!(!report.passed);
        assert_eq!(report.verification_failures.len(), 1);
    }

    #[test]
    fn test_wait_until_times_out() {
        let scenario = ScenarioDefinition {
            name: "Never".to_string(),
            description: String::new(),
            seed: Some(1),
            setup: vec![],
            actions: vec![ScenarioAction::WaitUntil {
                condition: Check::CanHop { expected: true },
                timeout_frames: 5,
            }],
            verify: vec![],
        };

        assert!(run(&scenario).is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let scenario = ScenarioDefinition {
            name: "Bad key".to_string(),
            description: String::new(),
            seed: Some(1),
            setup: vec![],
            actions: vec![ScenarioAction::Hold {
                key: "q".to_string(),
            }],
            verify: vec![],
        };

        assert!(run(&scenario).is_err());
    }

    #[test]
    fn test_screenshot_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
            capture_screenshots: true,
            screenshot_dir: dir.path().display().to_string(),
            width: 320,
            height: 240,
            ..Default::default()
        });
        let scenario = ScenarioDefinition {
            name: "Shot".to_string(),
            description: String::new(),
            seed: Some(2),
            setup: vec![],
            actions: vec![
                ScenarioAction::WaitFrames { frames: 2 },
                ScenarioAction::Screenshot {
                    filename: "room.png".to_string(),
                },
            ],
            verify: vec![],
        };
        let mut app = executor.session(&scenario, &SimConfig::default()).unwrap();

        let report = executor.execute_scenario(&scenario, &mut app).unwrap();

        assert_eq!(report.screenshots.len(), 1);
        assert!(dir.path().join("room.png").exists());
    }
}
