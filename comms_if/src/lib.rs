//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the software: the
//! equipment message types exchanged with the robot's collaborating
//! services, the console command tokens, and the networking layer they
//! travel over.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Console command token definitions
pub mod tc;

/// Message definitions for equipment (scan stream, velocity sink, navigation
/// service)
pub mod eqpt;

/// Network module
pub mod net;
