//! Scene indexing and pointer interaction for the room model.
//!
//! Provides the scene graph built from the loaded model, the heuristic that
//! picks the interactive computer out of it, and ray-based hit testing.

/// Heuristic classifier that tags the interactive object.
///
/// Scores table-height meshes by name keywords, screen-like proportions,
/// ideal height and size, with a relaxed fallback band.
pub mod classifier;

/// Pointer hit testing against the scene graph.
pub mod picking;

/// Ray construction and ray/AABB intersection utilities.
///
/// Slab method raycast against world-space bounds.
pub mod ray;

/// Arena scene graph with world bounds and parent links.
pub mod scene_graph;
