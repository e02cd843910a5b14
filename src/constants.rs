//! Fixed layout table for the 256x64 panel. Everything the composer draws is
//! positioned from here so frames are reproducible bit-for-bit.

/// The total width of the panel in pixels.
pub const DISPLAY_WIDTH: u32 = 256;
/// The total height of the panel in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

/// Default render tick rate, frames per second.
pub const DISPLAY_FPS: u32 = 20;

/// Horizontal scroll speed for overflowing text fields.
pub const SCROLL_PX_PER_SEC: f64 = 50.0;
/// Pause before an overflowing field starts to scroll, letting the start of
/// the text be read.
pub const PRE_ROLL_SECS: f64 = 5.0;
/// Blank gap appended after the text before it wraps back around.
pub const MARQUEE_GAP_PX: u32 = 50;

/// Status (play/pause) icon position, top-left corner.
pub const STATUS_ICON_X: i32 = 4;
pub const STATUS_ICON_Y: i32 = 4;

/// Shuffle icon, top-right.
pub const SHUFFLE_ICON_X: i32 = 236;
pub const SHUFFLE_ICON_Y: i32 = 2;
/// Repeat icon, directly below shuffle.
pub const REPEAT_ICON_X: i32 = 236;
pub const REPEAT_ICON_Y: i32 = 22;

/// Title field viewport: x 55..225, top row.
pub const TITLE_VIEWPORT_X: i32 = 55;
pub const TITLE_VIEWPORT_Y: i32 = 0;
pub const TITLE_VIEWPORT_WIDTH: u32 = 170;

/// Artist field viewport, below the title.
pub const ARTIST_VIEWPORT_X: i32 = 55;
pub const ARTIST_VIEWPORT_Y: i32 = 30;
pub const ARTIST_VIEWPORT_WIDTH: u32 = 170;

/// Track progress bar geometry.
pub const PROGRESS_BAR_X: i32 = 5;
pub const PROGRESS_BAR_WIDTH: u32 = 245;
pub const PROGRESS_BAR_Y: i32 = 55;
pub const PROGRESS_BAR_THICKNESS: u32 = 5;

/// Banner shown when the status source goes dark or hands us garbage.
pub const ERROR_BANNER_TEXT: &str = "No status";
/// Externally driven service-lifecycle banners.
pub const STARTING_BANNER_TEXT: &str = "Starting...";
pub const STOPPING_BANNER_TEXT: &str = "Stopping...";
