//! Room camera: orbit controls and animated flights to and from the computer.
//!
//! Orbit input is only honoured in the room view. Transitions disable it,
//! tween the camera with a quadratic ease while re-aiming at the destination
//! every frame, and hand control back to orbit at the end of the return flight.

/// Target pose computation and time-based camera tweens.
pub mod transition;

/// Viewport camera resource and controller system for scene navigation.
pub mod viewport_camera;
