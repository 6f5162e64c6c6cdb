//! Simulation engine tests.



/// Edge detector transitions.
pub mod edge;

/// Property tests across the engine.
pub mod properties;
