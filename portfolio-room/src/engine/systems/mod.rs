//! Runtime systems for room interaction and host page diagnostics.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Click-to-enter hit testing in the room view.
pub mod room_click;

/// View mode change notifications for the host page.
pub mod view_notifications;
