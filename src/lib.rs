//! # dalysim - Intervention Impact Simulation Engine
//!
//! dalysim estimates how much disease burden, in Disability-Adjusted Life
//! Years (DALYs), a combination of health interventions would avert against a
//! fixed epidemiological baseline.
//!
//! The model is closed-form: each enabled lever multiplies one or more risk or
//! severity modifiers by `(1 - efficacy)`, the modifiers scale three
//! disease-stage buckets, and the result is decomposed into reporting views.
//! There is no stochastic or time-stepped simulation.
//!
//! ## Core Concepts
//!
//! - **Calibration**: baseline burden, stage shares, efficacies, and weights
//! - **InterventionSelection**: which of the five levers are enabled
//! - **Modifiers**: running products of `(1 - efficacy)` per risk dimension
//! - **SimulationResult**: baseline, simulated, and averted burden with breakdowns
//!
//! ## Usage
//!
//! ```rust
//! use dalysim::{CalibrationStore, Intervention, InterventionSelection, SimulationEngine};
//!
//! // Falls back to embedded defaults when the file is absent.
//! let calibration = CalibrationStore::new("data/processed/model_constants.json").load();
//! let engine = SimulationEngine::new(calibration);
//!
//! let selection = InterventionSelection::none()
//!     .with(Intervention::CleanAir)
//!     .with(Intervention::AcuteTreatment);
//! let result = engine.simulate(&selection);
//! assert!(result.dalys_averted > 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calibration;
pub mod config;
pub mod engine;
pub mod error;
pub mod intervention;
pub mod request;
pub mod result;

// Re-export primary types at crate root for convenience
pub use calibration::{
    AgeProportions, BreakdownShares, Calibration, CalibrationSource, CalibrationStore, Efficacies,
};
pub use config::Config;
pub use engine::{simulate, Modifiers, ScenarioOutcome, SimulationEngine, StageBuckets};
pub use error::{CalibrationError, DalyError, DalyResult, RequestError, ValidationError};
pub use intervention::{Intervention, InterventionSelection};
pub use request::SimulationRequest;
pub use result::{AgeBreakdown, DalyBreakdown, SimulationResult};
