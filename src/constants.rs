//! Application constants and configuration

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "Feed Container";

/// Route on which the inline search bar is never shown
pub const FINDER_ROUTE: &str = "/posts/finder";
pub const HOME_ROUTE: &str = "/";

/// Query parameter marking the post-onboarding welcome transition
pub const WELCOME_QUERY_PARAM: &str = "welcome";

pub const DEFAULT_WEBAPP_URL: &str = "https://app.daily.dev/";
pub const DEFAULT_SUGGESTIONS_URL: &str = "https://api.daily.dev/search/suggestions";

/// Upper bound on cards per row in grid mode
pub const MAX_COLUMNS: u8 = 7;

/// Root font size used to convert pixels to rem
pub const ROOT_FONT_PX: f32 = 16.0;
