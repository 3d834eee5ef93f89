//! Tuned constants shared across the portfolio room workspace.
//!
//! Values here were tuned by eye against the room model and have no derived
//! meaning; callers read them through config structs so tests can override them.

/// Interactive-object classifier thresholds and score weights.
pub mod classifier;

/// Camera poses, orbit limits and transition offsets.
pub mod camera;

/// Boot, shutdown and desktop reveal timings.
pub mod sequencer;

/// Desktop shell layout and colours.
pub mod desktop;

/// Asset paths relative to the asset root.
pub mod path;
