use crate::app::App;
use crate::constants::{ADD_LABEL, TITLE};
use crate::layout::{RowLayout, popup_layout, split_row};
use crate::models::{InputMode, ThemeVariables};

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub fn ui(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = app.theme;
    let base = Style::default().bg(theme.background).fg(theme.primary);

    f.render_widget(Clear, area);
    f.render_widget(Block::default().style(base), area);

    let layout = popup_layout(area, app.links.len(), app.selected);

    // 1. HEADER
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .style(base)
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).style(base));
    f.render_widget(title, layout.header);
    f.render_widget(ThemeToggle { theme }, layout.toggle);

    // 2. COPIED NOTICE
    let notice_text = if app.notice.visible {
        format!("Copied {}", app.notice.link)
    } else {
        String::new()
    };
    f.render_widget(
        Paragraph::new(notice_text)
            .style(base.add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center),
        layout.notice,
    );

    // 3. ROWS
    if app.links.is_empty() {
        f.render_widget(
            Paragraph::new("No links yet. Press 'a' to add one.")
                .style(base)
                .alignment(Alignment::Center),
            layout.list,
        );
    }
    let editing = app.input_mode == InputMode::Editing;
    for (index, row_area) in &layout.rows {
        let link = &app.links[*index];
        let selected = *index == app.selected;
        let row = LinkRow {
            id: *index,
            link,
            selected,
            editing: editing && selected,
            theme,
        };
        let area = Rect {
            x: row_area.field.x,
            y: row_area.field.y,
            width: row_area.remove.x + row_area.remove.width - row_area.field.x,
            height: row_area.field.height,
        };
        f.render_widget(row, area);

        if editing && selected {
            f.set_cursor_position(cursor_position(row_area, link));
        }
    }

    // 4. ADD BUTTON
    f.render_widget(button(ADD_LABEL, base, false), layout.add_button);
}

/// Where the terminal cursor sits while a field is being edited.
fn cursor_position(row: &RowLayout, link: &str) -> (u16, u16) {
    let inner_width = row.field.width.saturating_sub(2);
    let text_width = display_width(link);
    let column = text_width.min(inner_width.saturating_sub(1));
    (row.field.x + 1 + column, row.field.y + 1)
}

fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn button(label: &str, style: Style, highlight: bool) -> Paragraph<'_> {
    let border = if highlight {
        BorderType::Thick
    } else {
        BorderType::Rounded
    };
    Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border)
                .style(style),
        )
}

/// One link: an editable field and the copy / open / remove buttons.
pub struct LinkRow<'a> {
    pub id: usize,
    pub link: &'a str,
    pub selected: bool,
    pub editing: bool,
    pub theme: ThemeVariables,
}

impl Widget for LinkRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let row = split_row(area);
        let base = Style::default()
            .bg(self.theme.background)
            .fg(self.theme.primary);

        let border_style = if self.editing {
            base.fg(Color::Yellow)
        } else if self.selected {
            base.add_modifier(Modifier::BOLD)
        } else {
            base
        };

        // Keep the tail of long links in view.
        let inner_width = row.field.width.saturating_sub(2);
        let overflow = display_width(self.link).saturating_sub(inner_width.saturating_sub(1));
        Paragraph::new(self.link)
            .style(base)
            .scroll((0, overflow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(if self.selected {
                        BorderType::Thick
                    } else {
                        BorderType::Plain
                    })
                    .border_style(border_style)
                    .title(format!(" {} ", self.id + 1)),
            )
            .render(row.field, buf);

        button("Copy", base, self.selected).render(row.copy, buf);
        button("Open", base, self.selected).render(row.launch, buf);
        button("Remove", base, self.selected).render(row.remove, buf);
    }
}

/// Track with a knob whose offset comes from the theme variables.
pub struct ThemeToggle {
    pub theme: ThemeVariables,
}

impl Widget for ThemeToggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let base = Style::default()
            .bg(self.theme.background)
            .fg(self.theme.primary);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(base);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }
        let knob_x = inner.x + self.theme.toggle_left.min(inner.width - 1);
        let knob = Rect {
            x: knob_x,
            y: inner.y,
            width: 1,
            height: 1,
        };
        Paragraph::new("●").style(base).render(knob, buf);
    }
}
