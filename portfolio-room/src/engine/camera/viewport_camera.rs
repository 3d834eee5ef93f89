use super::transition::{CameraPose, CameraTween};
use crate::engine::core::view_state::{StageAction, ViewStateMachine};
use bevy::input::mouse::MouseScrollUnit;
use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};
use constants::camera::*;

/// Orbit controls for the room view.
#[derive(Resource, Debug, Clone)]
pub struct ViewportCamera {
    pub focus_point: Vec3,
    pub radius: f32,
    /// Rotation about world Y.
    pub yaw: f32,
    /// Angle down from world up.
    pub polar: f32,
    pub enabled: bool,
}

impl ViewportCamera {
    pub fn from_pose(pose: CameraPose) -> Self {
        let offset = pose.position - pose.look_at;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            focus_point: pose.look_at,
            radius,
            yaw: offset.x.atan2(offset.z),
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            enabled: true,
        }
    }

    pub fn pose(&self) -> CameraPose {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let offset = Vec3::new(
            self.radius * sin_polar * self.yaw.sin(),
            self.radius * cos_polar,
            self.radius * sin_polar * self.yaw.cos(),
        );
        CameraPose::new(self.focus_point + offset, self.focus_point)
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_ROTATE_SPEED;
        self.polar = (self.polar - delta.y * ORBIT_ROTATE_SPEED).clamp(0.01, ORBIT_MAX_POLAR_ANGLE);
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - scroll * ORBIT_ZOOM_SPEED;
        self.radius = (self.radius * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::from_pose(CameraPose::new(HOME_CAMERA_POSITION, HOME_CAMERA_TARGET))
    }
}

/// In-flight camera transition, if any.
#[derive(Resource, Default)]
pub struct CameraTransition {
    pub tween: Option<CameraTween>,
}

/// Fired once a camera transition reaches its destination.
#[derive(Event)]
pub struct CameraArrived;

pub fn camera_controller(
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut orbit: ResMut<ViewportCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    view: Res<ViewStateMachine>,
    time: Res<Time>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll_accum: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();

    if !orbit.enabled || !view.mode().accepts_orbit_input() {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        orbit.rotate(mouse_delta);
    }
    if scroll_accum.abs() > f32::EPSILON {
        orbit.zoom(scroll_accum);
    }

    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    // Frame-rate independent damping toward the orbit pose.
    let blend = 1.0 - (1.0 - ORBIT_DAMPING).powf(time.delta_secs() * 60.0);
    let target = orbit.pose();
    camera_transform.translation = camera_transform.translation.lerp(target.position, blend);
    let aimed = Transform::from_translation(camera_transform.translation).looking_at(target.look_at, Vec3::Y);
    camera_transform.rotation = camera_transform.rotation.slerp(aimed.rotation, blend.max(0.5));
}

/// Step the active camera tween, aiming at the destination every frame.
pub fn drive_camera_transition(
    mut transition: ResMut<CameraTransition>,
    mut camera_query: Query<&mut Transform, With<Camera3d>>,
    mut arrived: EventWriter<CameraArrived>,
    time: Res<Time>,
) {
    let Some(tween) = transition.tween.as_mut() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let pose = tween.advance(time.delta_secs());
    *camera_transform = pose.transform();

    if tween.is_finished() {
        transition.tween = None;
        arrived.write(CameraArrived);
    }
}

/// Hand camera arrivals to the state machine and apply its follow-up.
pub fn handle_camera_arrival(
    mut events: EventReader<CameraArrived>,
    mut view: ResMut<ViewStateMachine>,
    mut actions: EventWriter<StageActionEvent>,
) {
    for _ in events.read() {
        if let Some(action) = view.on_camera_arrived() {
            actions.write(StageActionEvent(action));
        }
    }
}

/// A follow-up produced by the view state machine.
#[derive(Event, Debug, Clone, Copy)]
pub struct StageActionEvent(pub StageAction);

/// Start tweens and toggle orbit input for camera-related stage actions.
pub fn apply_camera_actions(
    mut events: EventReader<StageActionEvent>,
    mut transition: ResMut<CameraTransition>,
    mut orbit: ResMut<ViewportCamera>,
    camera_query: Query<&Transform, With<Camera3d>>,
) {
    for StageActionEvent(action) in events.read() {
        match *action {
            StageAction::MoveCamera(pose) => {
                let from = camera_query
                    .single()
                    .map(|t| t.translation)
                    .unwrap_or(pose.position);
                orbit.enabled = false;
                transition.tween = Some(CameraTween::new(from, pose, TRANSITION_DURATION));
                info!("Camera moving to {:?}", pose.position);
            }
            StageAction::EnableOrbit => {
                if let Ok(transform) = camera_query.single() {
                    let look_at = transition_look_at(transform, orbit.focus_point);
                    *orbit = ViewportCamera::from_pose(CameraPose::new(transform.translation, look_at));
                }
                orbit.enabled = true;
                info!("Orbit controls enabled");
            }
            _ => {}
        }
    }
}

/// Point along the camera's forward axis at the old orbit distance.
fn transition_look_at(transform: &Transform, previous_focus: Vec3) -> Vec3 {
    let distance = transform.translation.distance(previous_focus).max(ORBIT_MIN_DISTANCE);
    transform.translation + transform.forward().as_vec3() * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_matches_the_pose_it_came_from() {
        let pose = CameraPose::new(Vec3::new(4.5, 3.2, 5.5), Vec3::new(0.0, 1.0, 0.0));
        let orbit = ViewportCamera::from_pose(pose);
        assert!(orbit.pose().position.abs_diff_eq(pose.position, 1e-4));
        assert_eq!(orbit.pose().look_at, pose.look_at);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut orbit = ViewportCamera::default();
        for _ in 0..200 {
            orbit.zoom(1.0);
        }
        assert_eq!(orbit.radius, ORBIT_MIN_DISTANCE);
        for _ in 0..200 {
            orbit.zoom(-1.0);
        }
        assert_eq!(orbit.radius, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn camera_never_dips_below_the_floor_plane_of_the_target() {
        let mut orbit = ViewportCamera::default();
        orbit.rotate(Vec2::new(0.0, -100_000.0));
        assert!(orbit.pose().position.y > orbit.focus_point.y);
    }
}
