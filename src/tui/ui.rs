//! UI rendering for the TUI.

use std::path::Path;
use std::str::FromStr;

use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::app::{App, Mode, ARROW_COLUMN};
use crate::tree::{ArrowIcon, Border, TreeElement, MENU_ENTRY_SIZE};

/// Layout pixels covered by one terminal column.
const PIXELS_PER_COLUMN: i32 = 7;

/// Split the screen into header, outline and footer.
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Outline
            Constraint::Length(2), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Screen area rows are drawn in.
pub fn tree_area(area: Rect) -> Rect {
    outline_block().inner(layout(area)[1])
}

fn outline_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let [header, tree, footer] = layout(frame.area());

    render_header(app, frame, header);
    render_tree_area(app, frame, tree);
    render_footer(app, frame, footer);

    // Render overlays based on mode
    match app.mode {
        Mode::Menu => render_menu(app, frame),
        Mode::Rename => render_rename_overlay(app, frame),
        Mode::Help => render_help_overlay(frame),
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let file = app
        .path
        .file_name()
        .map(Path::new)
        .unwrap_or(&app.path)
        .display()
        .to_string();

    let tab = app.editor.tabs.selected().map(|tab| {
        let object = tab
            .object
            .and_then(|id| app.editor.graph.get(id))
            .map(|o| o.name.as_str())
            .unwrap_or("-");
        format!("{}: {}", tab.kind, object)
    });

    let header_text = match tab {
        Some(tab) => format!(" {}  {} objects  │  {}", file, app.editor.graph.len(), tab),
        None => format!(" {}  {} objects", file, app.editor.graph.len()),
    };

    let block = Block::default()
        .title(" Scene Outliner ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &App, frame: &mut Frame, area: Rect) {
    let block = outline_block();
    let rows = app.outliner.visible_rows();

    if rows.is_empty() {
        let paragraph = Paragraph::new("Nothing to show")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = app.config.row_lines.max(1);
    let cursor = app.cursor_row();

    for (i, element) in rows
        .into_iter()
        .skip(app.scroll)
        .take(app.page_rows())
        .enumerate()
    {
        let top = inner.y + i as u16 * lines;
        let height = lines.min(inner.bottom().saturating_sub(top));
        if height == 0 {
            break;
        }
        let row_area = Rect::new(inner.x, top, inner.width, height);
        let is_cursor = cursor == Some(element.id());
        render_row(app, frame, element, row_area, is_cursor);
    }
}

/// Parse a `#rrggbb` theme color.
fn theme_color(value: &str) -> Option<Color> {
    Color::from_str(value).ok()
}

fn icon_glyph(icon: &str) -> &'static str {
    let stem = Path::new(icon)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    match stem {
        "program" => "◆",
        "scene" => "◎",
        "container" => "▣",
        "cube" => "■",
        "script" => "λ",
        "particles" => "✶",
        "point" => "☀",
        "camera" => "◫",
        "physics" => "⊕",
        _ => "•",
    }
}

fn render_row(app: &App, frame: &mut Frame, element: &TreeElement, area: Rect, is_cursor: bool) {
    let row = element.row();
    let theme = &app.editor.theme;

    let background = if app.editor.is_object_selected(element.object()) {
        theme_color(&theme.selected_color)
    } else {
        row.background.as_deref().and_then(theme_color)
    };
    let mut base = Style::default();
    if let Some(bg) = background {
        base = base.bg(bg);
    }
    let drop_color = theme_color(&theme.drop_border_color).unwrap_or(Color::Gray);

    frame.render_widget(Block::default().style(base), area);

    // Drop position decoration
    let border_style = base.fg(drop_color);
    match row.border {
        Border::None => {}
        Border::Full if area.height >= 3 => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border_style);
            frame.render_widget(block, area);
        }
        Border::Top | Border::Full => {
            let edge = Paragraph::new("▔".repeat(area.width as usize)).style(border_style);
            frame.render_widget(edge, Rect::new(area.x, area.y, area.width, 1));
        }
        Border::Bottom => {
            let edge = Paragraph::new("▁".repeat(area.width as usize)).style(border_style);
            frame.render_widget(edge, Rect::new(area.x, area.bottom() - 1, area.width, 1));
        }
    }

    let indent = "  ".repeat(element.level());
    let arrow = if row.arrow.displayed {
        match row.arrow.icon {
            ArrowIcon::Expanded => "▼",
            ArrowIcon::Collapsed => "►",
        }
    } else {
        " "
    };
    let arrow_style = if row.arrow.highlighted {
        base.fg(Color::White)
    } else {
        base.fg(Color::DarkGray)
    };
    let mut label_style = base.fg(Color::White);
    if is_cursor {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(indent, base),
        Span::styled(arrow, arrow_style),
        Span::styled(" ", base),
        Span::styled(icon_glyph(&row.icon), base.fg(Color::Cyan)),
        Span::styled(" ", base),
        Span::styled(row.label.clone(), label_style),
    ];
    if area.height < 3 {
        let marker = match row.border {
            Border::None => None,
            Border::Top => Some("  ⤒"),
            Border::Bottom => Some("  ⤓"),
            Border::Full => Some("  ⇥"),
        };
        if let Some(marker) = marker {
            spans.push(Span::styled(marker, border_style));
        }
    }

    let column = area.x.saturating_add(ARROW_COLUMN as u16).min(area.right());
    let content = Rect::new(
        column,
        area.y + area.height / 2,
        area.width.saturating_sub(2),
        1,
    );
    frame.render_widget(Paragraph::new(Line::from(spans)), content);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Navigate  [Space] Fold  [Enter] Open  [m] Menu  [F2] Rename  [s] Save  [?] Help  [q] Quit"
        }
        Mode::Menu => "[↑↓] Choose  [Enter] Run  [Esc] Close",
        Mode::Rename => "[Enter] Confirm  [Esc] Cancel",
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Screen rectangle for a context menu with `entries` entries.
fn menu_area(app: &App, frame_area: Rect, entries: usize) -> Option<Rect> {
    let state = app.menu.as_ref()?;
    let (entry_width, _) = MENU_ENTRY_SIZE;
    let width = (entry_width / PIXELS_PER_COLUMN) as u16 + 2;
    let height = entries as u16 + 2;

    let rows = app.row_ids();
    let index = rows.iter().position(|id| *id == state.row)?;
    let lines = app.config.row_lines.max(1);
    let line = index.checked_sub(app.scroll)? as u16 * lines + lines / 2 + 1;

    let x = app.tree_area.x + (state.menu.x / PIXELS_PER_COLUMN).max(0) as u16;
    let y = app.tree_area.y + line;

    Some(Rect {
        x: x.min(frame_area.width.saturating_sub(width)),
        y: y.min(frame_area.height.saturating_sub(height)),
        width: width.min(frame_area.width),
        height: height.min(frame_area.height),
    })
}

fn render_menu(app: &App, frame: &mut Frame) {
    let Some(state) = app.menu.as_ref() else {
        return;
    };
    let Some(area) = menu_area(app, frame.area(), state.menu.entries.len()) else {
        return;
    };

    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = state
        .menu
        .entries
        .iter()
        .map(|action| ListItem::new(action.to_string()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_rename_overlay(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Position at bottom, above footer
    let input_area = Rect {
        x: 2,
        y: area.height.saturating_sub(6),
        width: area.width.saturating_sub(4).min(60),
        height: 3,
    };

    // Clear background
    frame.render_widget(Clear, input_area);

    let block = Block::default()
        .title(" Rename object ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(app.rename_input.as_str())
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, input_area);

    // Show cursor position
    frame.set_cursor_position(Position::new(
        input_area.x + app.rename_input.chars().count() as u16 + 1, // +1 for border
        input_area.y + 1,
    ));
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Near full-screen overlay
    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 24u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 g / G      Go to top / bottom
 Space/Tab  Fold or unfold

 ACTIONS
 ─────────────────────────────────
 Enter      Open the object's editor
 m          Context menu
 F2         Rename
 s          Save project

 MOUSE
 ─────────────────────────────────
 Click      Select, arrow folds
 Dbl-click  Open the object's editor
 Right      Context menu
 Drag       Move above, below or inside
 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
