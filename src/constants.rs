//! Global constants for the ProtoCalc plate-map engine

/// Maximum number of undo snapshots kept per plate
pub const MAX_UNDO_HISTORY: usize = 50;

/// Width:height ratio of the whole plate drawing area, independent of plate shape
pub const PLATE_ASPECT_RATIO: f32 = 1.5;

/// Maximum length (in characters) of a legend label
pub const MAX_LEGEND_LABEL_LEN: usize = 30;

/// Pointer travel (screen pixels) before a press on a well turns into a drag
pub const MIN_DRAG_DISTANCE: f32 = 4.0;

/// Sentinel color meaning "no color"
pub const TRANSPARENT: &str = "transparent";

/// Storage keys shared with the rest of the app
pub mod storage_keys {
    /// Flat array of user-added hex colors, shared across plates
    pub const CUSTOM_COLOR_PRESETS: &str = "protocalc_custom_color_presets";
    /// Last visited navigation path
    pub const LAST_ROUTE: &str = "lastRoute";
    /// Active navbar tab
    pub const ACTIVE_NAVBAR_TAB: &str = "activeNavbarTab";
    /// Light/dark theme
    pub const THEME: &str = "theme";
    /// Application configuration document
    pub const CONFIG: &str = "protocalc_config";
}
