//! Scripted headless runs
//!
//! A scenario is a RON file with a list of actions (key holds, waits,
//! teleports, resizes, screenshots) and a list of checks evaluated against the
//! simulation afterwards. Used for regression runs and for capturing
//! screenshots without a browser.

pub mod actions;
pub mod definition;
pub mod executor;
pub mod results;
pub mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::ExecutionReport;
pub use verification::{VerificationCondition, VerificationResult};
