use bevy::color::Color;

pub const TASKBAR_HEIGHT: f32 = 44.0;
pub const TITLE_BAR_HEIGHT: f32 = 30.0;

/// Restored size of a freshly opened window.
pub const DEFAULT_WINDOW_WIDTH: f32 = 720.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 480.0;
/// Offset between successively opened restored windows.
pub const WINDOW_CASCADE_STEP: f32 = 28.0;
pub const WINDOW_CASCADE_LIMIT: usize = 8;

pub const DESKTOP_BACKGROUND: Color = Color::srgb(0.07, 0.20, 0.32);
pub const WINDOW_BACKGROUND: Color = Color::srgb(0.95, 0.95, 0.96);
pub const TITLE_BAR_ACTIVE: Color = Color::srgb(0.16, 0.36, 0.70);
pub const TITLE_BAR_INACTIVE: Color = Color::srgb(0.45, 0.48, 0.54);
pub const TASKBAR_BACKGROUND: Color = Color::srgb(0.10, 0.11, 0.13);
pub const TASKBAR_ENTRY: Color = Color::srgb(0.22, 0.24, 0.28);
pub const TASKBAR_ENTRY_ACTIVE: Color = Color::srgb(0.30, 0.34, 0.40);
pub const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
pub const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);
pub const OVERLAY_BACKGROUND: Color = Color::srgb(0.0, 0.0, 0.0);
pub const PROGRESS_FILL: Color = Color::srgb(0.20, 0.62, 0.95);
