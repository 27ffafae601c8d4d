//! Per-unit stance controllers for VANGUARD.
//!
//! A stance controller is a pure function of a dispatched unit and the
//! nearby enemy snapshot: it picks the unit's combat configuration and any
//! local target order. No cache or controller state is involved.

pub mod registry;
pub mod siege;
pub mod valkyrie;

pub use vanguard_core as core;
pub use registry::{controller_for, StanceController};
