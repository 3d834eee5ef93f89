/// Open interval of world-space center heights considered "on the table".
pub const TABLE_HEIGHT_MIN: f32 = 0.5;
pub const TABLE_HEIGHT_MAX: f32 = 1.8;

/// Narrower band rewarded with `IDEAL_HEIGHT_SCORE`.
pub const IDEAL_HEIGHT_MIN: f32 = 0.7;
pub const IDEAL_HEIGHT_MAX: f32 = 1.5;

/// Relaxed table band used when no candidate qualifies under the strict rule.
pub const FALLBACK_HEIGHT_MIN: f32 = 0.6;
pub const FALLBACK_HEIGHT_MAX: f32 = 1.6;

/// A wide extent must exceed the vertical extent by this factor.
pub const SCREEN_ASPECT_RATIO: f32 = 1.5;
/// Minimum wide extent for the aspect rule.
pub const SCREEN_MIN_EXTENT: f32 = 0.3;
/// Both horizontal extents of a flat panel must exceed this.
pub const PANEL_MIN_EXTENT: f32 = 0.2;
/// The vertical extent of a flat panel must stay below this.
pub const PANEL_MAX_THICKNESS: f32 = 0.1;
/// Horizontal extent rewarded with `LARGE_EXTENT_SCORE`.
pub const LARGE_EXTENT: f32 = 0.4;

pub const NAME_MATCH_SCORE: u32 = 10;
pub const SCREEN_LIKE_SCORE: u32 = 5;
pub const IDEAL_HEIGHT_SCORE: u32 = 3;
pub const LARGE_EXTENT_SCORE: u32 = 2;

/// Case-insensitive substrings that mark a mesh as the computer.
pub const NAME_KEYWORDS: &[&str] = &[
    "computer", "monitor", "screen", "pc", "laptop", "desktop", "display",
];
