use bevy::math::curve::{Curve, EaseFunction, EasingCurve};
use bevy::prelude::*;
use constants::camera::*;

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        Self { position, look_at }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.look_at, Vec3::Y)
    }
}

/// Pose framing whatever was clicked.
///
/// With an interactive object the camera backs off `OBJECT_VIEW_DISTANCE`
/// from its center; without one it frames the raw click point using the
/// closer fallback distance and lower lift.
pub fn compute_target_pose(camera_position: Vec3, object_center: Option<Vec3>, click_point: Vec3) -> CameraPose {
    let (focus, distance, lift) = match object_center {
        Some(center) => (center, OBJECT_VIEW_DISTANCE, OBJECT_VIEW_HEIGHT_OFFSET),
        None => (click_point, CLICK_VIEW_DISTANCE, CLICK_VIEW_HEIGHT_OFFSET),
    };
    let direction = (focus - camera_position).normalize_or(Vec3::NEG_Z);
    CameraPose {
        position: focus - direction * distance + Vec3::Y * lift,
        look_at: focus,
    }
}

/// Time-based camera move that re-aims at the destination every frame.
#[derive(Debug, Clone)]
pub struct CameraTween {
    from: Vec3,
    to: CameraPose,
    elapsed: f32,
    duration: f32,
    curve: EasingCurve<f32>,
}

impl CameraTween {
    pub fn new(from: Vec3, to: CameraPose, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
            curve: EasingCurve::new(0.0, 1.0, EaseFunction::QuadraticInOut),
        }
    }

    /// Step the tween and return the pose for this frame.
    pub fn advance(&mut self, delta_secs: f32) -> CameraPose {
        self.elapsed = (self.elapsed + delta_secs).min(self.duration);
        let eased = self.curve.sample_clamped(self.elapsed / self.duration);
        CameraPose {
            position: self.from.lerp(self.to.position, eased),
            look_at: self.to.look_at,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
