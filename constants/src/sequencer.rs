/// Boot progress fill duration in seconds.
pub const BOOT_PROGRESS_DURATION: f32 = 2.0;
/// Boot overlay fade-out duration.
pub const BOOT_FADE_DURATION: f32 = 0.5;

/// Shutdown overlay hold before fading.
pub const SHUTDOWN_DWELL_DURATION: f32 = 1.2;
pub const SHUTDOWN_FADE_DURATION: f32 = 0.8;

/// Desktop overlay fade in after boot, and fade out before shutdown.
pub const DESKTOP_FADE_DURATION: f32 = 0.5;

pub const CLOCK_TICK_SECONDS: f32 = 1.0;
pub const NOTIFICATION_DISMISS_SECONDS: f32 = 5.0;
