//! Loading pipeline for the room.
//!
//! Manifest first, then the room model and environment map in parallel.
//! The room is indexed into a scene graph and classified once every mesh
//! has bounds.

/// Environment map loading with fallback lighting.
pub mod environment;

/// Site manifest loading; starts the model and environment loads.
pub mod manifest_loader;

/// Loading milestones for state transitions and host page progress.
pub mod progress;

/// Room model spawning, scene graph indexing and classification.
pub mod room_loader;
