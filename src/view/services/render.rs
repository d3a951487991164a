//! Services page renderer
//!
//! Renders the page header, search line, service list and footer buttons,
//! plus the restart notice overlay when raised.

use super::layout::ServicesLayout;
use super::state::{FocusPanel, ServicesPageState};
use crate::view::controls::{render_toggle_row, ToggleColors};
use crate::view::theme::Theme;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Render the services page into the given area
pub fn render_services_page(
    frame: &mut Frame,
    area: Rect,
    state: &mut ServicesPageState,
    theme: &Theme,
) -> ServicesLayout {
    let title = if state.changed {
        " Context Menu Services • (modified) "
    } else {
        " Context Menu Services "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_fg))
        .style(Style::default().bg(theme.bg));
    frame.render_widget(block, area);

    let inner = Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );

    let mut layout = ServicesLayout::new(area);

    let chunks = Layout::vertical([
        Constraint::Length(2), // intro label
        Constraint::Length(1), // search line
        Constraint::Length(1), // spacing
        Constraint::Min(1),    // list
        Constraint::Length(1), // footer
    ])
    .split(inner);

    render_intro(frame, chunks[0], theme);
    render_search_line(frame, chunks[1], state, theme, &mut layout);
    render_list(frame, chunks[3], state, theme, &mut layout);
    render_footer(frame, chunks[4], state, theme, &mut layout);

    if state.notice.is_some() {
        render_notice(frame, area, state, theme, &mut layout);
    }

    layout
}

fn render_intro(frame: &mut Frame, area: Rect, theme: &Theme) {
    let intro = Paragraph::new("Select which services should be shown in the context menu:")
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: true });
    frame.render_widget(intro, area);
}

fn render_search_line(
    frame: &mut Frame,
    area: Rect,
    state: &ServicesPageState,
    theme: &Theme,
    layout: &mut ServicesLayout,
) {
    layout.search_area = area;

    let focused = state.focus_panel == FocusPanel::Search;
    let prompt_style = if focused {
        Style::default().fg(theme.search_fg)
    } else {
        Style::default().fg(theme.muted_fg)
    };

    let mut spans = vec![Span::styled("Search: ", prompt_style)];
    if state.filter.is_empty() && !focused {
        spans.push(Span::styled(
            "Search...",
            Style::default().fg(theme.muted_fg),
        ));
    } else {
        spans.push(Span::styled(
            state.filter.clone(),
            Style::default().fg(theme.fg),
        ));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(theme.search_fg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    state: &mut ServicesPageState,
    theme: &Theme,
    layout: &mut ServicesLayout,
) {
    layout.list_area = area;
    state.viewport_height = area.height as usize;
    state.ensure_visible();
    state.update_focus_states();

    let colors = ToggleColors::from_theme(theme);

    if state.visible_len() == 0 {
        let empty = if state.filter.is_empty() {
            "No services installed."
        } else {
            "No services match the search."
        };
        frame.render_widget(
            Paragraph::new(empty).style(Style::default().fg(theme.muted_fg)),
            area,
        );
        return;
    }

    let first = state.scroll_offset;
    let last = (first + area.height as usize).min(state.visible_len());
    for (line, position) in (first..last).enumerate() {
        let Some(row) = state.visible_row(position) else {
            break;
        };
        let row_area = Rect::new(area.x, area.y + line as u16, area.width, 1);
        let glyph = icon_glyph(&row.icon);
        let row_layout = render_toggle_row(frame, row_area, &row.toggle, glyph, &colors);
        layout.add_row(position, row_layout);
    }
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &ServicesPageState,
    theme: &Theme,
    layout: &mut ServicesLayout,
) {
    let focused = state.focus_panel == FocusPanel::Footer;
    let buttons = ["[ Restore Defaults ]", "[ Apply ]"];

    let mut x = area.x;
    for (idx, text) in buttons.iter().enumerate() {
        let width = text.len() as u16;
        if x + width > area.x + area.width {
            break;
        }
        let button_area = Rect::new(x, area.y, width, 1);
        let style = if focused && state.footer_button_index == idx {
            Style::default()
                .fg(theme.button_focused_fg)
                .bg(theme.button_focused_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.button_fg)
        };
        frame.render_widget(Paragraph::new(*text).style(style), button_area);

        match idx {
            0 => layout.defaults_button_area = button_area,
            _ => layout.apply_button_area = button_area,
        }
        x += width + 2;
    }
}

fn render_notice(
    frame: &mut Frame,
    area: Rect,
    state: &ServicesPageState,
    theme: &Theme,
    layout: &mut ServicesLayout,
) {
    let Some(notice) = &state.notice else {
        return;
    };

    let width = 56.min(area.width.saturating_sub(4));
    let height = 7.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let notice_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, notice_area);
    let block = Block::default()
        .title(" Information ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.notice_border_fg))
        .style(Style::default().bg(theme.notice_bg));
    frame.render_widget(block, notice_area);

    let inner = Rect::new(
        notice_area.x + 2,
        notice_area.y + 1,
        notice_area.width.saturating_sub(4),
        notice_area.height.saturating_sub(2),
    );
    let message = Paragraph::new(notice.message.as_str())
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: true });
    frame.render_widget(
        message,
        Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(2)),
    );

    // Buttons on the last inner line
    let button_y = inner.y + inner.height.saturating_sub(1);
    let buttons = ["[ OK ]", "[ Don't Show Again ]"];
    let mut x = inner.x;
    for (idx, text) in buttons.iter().enumerate() {
        let width = text.len() as u16;
        if x + width > inner.x + inner.width {
            break;
        }
        let button_area = Rect::new(x, button_y, width, 1);
        let style = if notice.selected == idx {
            Style::default()
                .fg(theme.button_focused_fg)
                .bg(theme.button_focused_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.button_fg)
        };
        frame.render_widget(Paragraph::new(*text).style(style), button_area);

        match idx {
            0 => layout.notice_ok_area = Some(button_area),
            _ => layout.notice_suppress_area = Some(button_area),
        }
        x += width + 2;
    }
}

/// Glyph shown in place of the desktop icon
fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "edit-delete" => "✘",
        "edit-copy" => "⧉",
        "code-class" => "⎇",
        "utilities-terminal" => "❯",
        _ => "•",
    }
}
