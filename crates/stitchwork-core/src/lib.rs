//! # Stitchwork core
//!
//! Frame-driven simulation for a stitched-together creature exploring an
//! octagonal surgery room. Everything here is host-independent: the browser
//! build and the headless scenario runner drive the same [`SimulationState`].

pub mod config;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod items;
pub mod simulation;
pub mod world;

pub use config::SimConfig;
pub use error::{Result, StitchError};
pub use world::SimulationState;

