use bevy::math::Vec3;

/// Camera position at page load; captured as the home pose.
pub const HOME_CAMERA_POSITION: Vec3 = Vec3::new(4.5, 3.2, 5.5);
/// Point the camera orbits and looks at in the room.
pub const HOME_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Distance kept from the interactive object's center when zooming in.
pub const OBJECT_VIEW_DISTANCE: f32 = 1.0;
/// Eye-level lift applied on the object-centered path.
pub const OBJECT_VIEW_HEIGHT_OFFSET: f32 = 0.1;
/// Distance kept from the raw click point on the fallback path.
pub const CLICK_VIEW_DISTANCE: f32 = 0.8;
/// Vertical lift applied on the fallback path.
pub const CLICK_VIEW_HEIGHT_OFFSET: f32 = 0.05;

/// Seconds for either camera transition.
pub const TRANSITION_DURATION: f32 = 1.5;

pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ORBIT_MAX_DISTANCE: f32 = 15.0;
/// Largest angle from straight up, keeps the camera above the floor.
pub const ORBIT_MAX_POLAR_ANGLE: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;
/// Fraction of the remaining distance closed per 1/60 s.
pub const ORBIT_DAMPING: f32 = 0.05;
