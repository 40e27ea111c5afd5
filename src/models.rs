use crate::constants::{
    DARK_BACKGROUND, DARK_PRIMARY, DARK_TOGGLE_LEFT, LIGHT_BACKGROUND, LIGHT_PRIMARY,
    LIGHT_TOGGLE_LEFT,
};

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Visual properties swapped as one unit when the theme flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeVariables {
    pub background: Color,
    pub primary: Color,
    /// Offset of the toggle indicator inside its track, in cells.
    pub toggle_left: u16,
}

impl ThemeVariables {
    pub const DARK: Self = Self {
        background: DARK_BACKGROUND,
        primary: DARK_PRIMARY,
        toggle_left: DARK_TOGGLE_LEFT,
    };

    pub const LIGHT: Self = Self {
        background: LIGHT_BACKGROUND,
        primary: LIGHT_PRIMARY,
        toggle_left: LIGHT_TOGGLE_LEFT,
    };

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }
}

/// "Copied ..." line shown after a copy.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CopiedNotice {
    pub link: String,
    pub visible: bool,
    /// Bumped on every copy; a hide carrying an older generation is ignored.
    pub generation: u64,
}

/// What a row asks its owner to do.
#[derive(Clone, Debug, PartialEq)]
pub enum RowAction {
    Copy(usize),
    Launch(usize),
    Remove(usize),
    Update(usize, String),
}

/// Messages delivered to the main loop from spawned tasks.
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    NoticeExpired(u64),
}
