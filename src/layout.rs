//! Popup geometry. The renderer and the mouse handler both go through
//! [`popup_layout`], so a click always lands on what was drawn there.

use crate::constants::{
    ADD_BUTTON_HEIGHT, ADD_BUTTON_WIDTH, HEADER_HEIGHT, NOTICE_HEIGHT, ROW_BUTTON_COUNT,
    ROW_BUTTON_WIDTH, ROW_HEIGHT, TOGGLE_WIDTH,
};

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    pub field: Rect,
    pub copy: Rect,
    pub launch: Rect,
    pub remove: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PopupLayout {
    pub header: Rect,
    pub toggle: Rect,
    pub notice: Rect,
    pub list: Rect,
    /// `(link index, row geometry)` for the rows that fit on screen.
    pub rows: Vec<(usize, RowLayout)>,
    pub add_button: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    Toggle,
    Add,
    Field(usize),
    Copy(usize),
    Launch(usize),
    Remove(usize),
}

pub fn popup_layout(area: Rect, link_count: usize, selected: usize) -> PopupLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),     // Title + toggle
            Constraint::Length(NOTICE_HEIGHT),     // Copied notice
            Constraint::Min(0),                    // Rows
            Constraint::Length(ADD_BUTTON_HEIGHT), // Add button
        ])
        .split(area);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(TOGGLE_WIDTH + 2)])
        .split(chunks[0]);

    let list = chunks[2];
    let visible = (list.height / ROW_HEIGHT) as usize;
    let first = if visible > 0 && selected >= visible {
        selected + 1 - visible
    } else {
        0
    };
    let rows = (first..link_count)
        .take(visible)
        .enumerate()
        .map(|(slot, index)| {
            let area = Rect {
                x: list.x,
                y: list.y + slot as u16 * ROW_HEIGHT,
                width: list.width,
                height: ROW_HEIGHT,
            };
            (index, split_row(area))
        })
        .collect();

    let add_row = chunks[3];
    let add_width = ADD_BUTTON_WIDTH.min(add_row.width);
    let add_button = Rect {
        x: add_row.x + (add_row.width - add_width) / 2,
        y: add_row.y,
        width: add_width,
        height: add_row.height,
    };

    PopupLayout {
        header: header_chunks[0],
        toggle: header_chunks[1],
        notice: chunks[1],
        list,
        rows,
        add_button,
    }
}

/// Text field on the left, three fixed-width buttons on the right.
pub fn split_row(area: Rect) -> RowLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ROW_BUTTON_WIDTH),
            Constraint::Length(ROW_BUTTON_WIDTH),
            Constraint::Length(ROW_BUTTON_WIDTH),
        ])
        .split(area);
    debug_assert_eq!(chunks.len(), 1 + ROW_BUTTON_COUNT as usize);

    RowLayout {
        field: chunks[0],
        copy: chunks[1],
        launch: chunks[2],
        remove: chunks[3],
    }
}

impl PopupLayout {
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let pos = Position::new(column, row);
        if self.toggle.contains(pos) {
            return Some(Hit::Toggle);
        }
        if self.add_button.contains(pos) {
            return Some(Hit::Add);
        }
        self.rows.iter().find_map(|(index, layout)| {
            if layout.field.contains(pos) {
                Some(Hit::Field(*index))
            } else if layout.copy.contains(pos) {
                Some(Hit::Copy(*index))
            } else if layout.launch.contains(pos) {
                Some(Hit::Launch(*index))
            } else if layout.remove.contains(pos) {
                Some(Hit::Remove(*index))
            } else {
                None
            }
        })
    }
}
