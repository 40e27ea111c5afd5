use ratatui::style::Color;

// Storage keys
pub const LINKS_KEY: &str = "links";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const DEFAULT_DARK_MODE: bool = true;

// Storage location
pub const STORE_FILE_NAME: &str = "quick_links.json";
pub const LOG_FILE_NAME: &str = "quick_links.log";
pub const DATA_DIR_ENV: &str = "QUICK_LINKS_DATA_DIR";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Copied-link notice
pub const NOTICE_DURATION_MS: u64 = 5000;

// Channel capacity
pub const CHANNEL_CAPACITY: usize = 10;

// Event polling
pub const EVENT_POLL_TIMEOUT_MS: u64 = 10;

// Theme variables
pub const DARK_BACKGROUND: Color = Color::Black;
pub const DARK_PRIMARY: Color = Color::White;
pub const DARK_TOGGLE_LEFT: u16 = 1;
pub const LIGHT_BACKGROUND: Color = Color::White;
pub const LIGHT_PRIMARY: Color = Color::Black;
pub const LIGHT_TOGGLE_LEFT: u16 = 5;

// UI layout constants
pub const TOGGLE_WIDTH: u16 = 7;
pub const HEADER_HEIGHT: u16 = 3;
pub const NOTICE_HEIGHT: u16 = 1;
pub const ROW_HEIGHT: u16 = 3;
pub const ADD_BUTTON_HEIGHT: u16 = 3;
pub const ADD_BUTTON_WIDTH: u16 = 15;
pub const ROW_BUTTON_WIDTH: u16 = 8;
pub const ROW_BUTTON_COUNT: u16 = 3;

pub const TITLE: &str = "Quick Links";
pub const ADD_LABEL: &str = "Add Link!";
