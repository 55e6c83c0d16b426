//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::{App, Mode};
use crate::editor::MouseButton;
use crate::tree::MenuAction;

/// Poll for and handle events with a timeout.
///
/// Returns `Ok(true)` if an event was handled, `Ok(false)` if timeout expired.
pub fn handle_events(app: &mut App, timeout: Duration) -> std::io::Result<bool> {
    if event::poll(timeout)? {
        match event::read()? {
            Event::Key(key) => {
                handle_key_event(app, key);
                return Ok(true);
            }
            Event::Mouse(mouse) if app.config.mouse => {
                handle_mouse_event(app, mouse);
                return Ok(true);
            }
            _ => {}
        }
    }
    Ok(false)
}

/// Handle a single key event.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Mode-specific handling
    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Menu => handle_menu_mode(app, key),
        Mode::Rename => handle_rename_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    app.status_message = None;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(isize::MAX),
        KeyCode::PageUp => app.move_cursor(-(app.page_rows() as isize)),
        KeyCode::PageDown => app.move_cursor(app.page_rows() as isize),

        // Fold
        KeyCode::Char(' ') | KeyCode::Tab => {
            if let Some(row) = app.cursor_row() {
                app.toggle_row(row);
            }
        }

        // Actions
        KeyCode::Enter => {
            if let Some(row) = app.cursor_row() {
                app.open_row(row);
            }
        }
        KeyCode::Char('m') => {
            if let Some(row) = app.cursor_row() {
                app.open_menu(row);
            }
        }
        KeyCode::F(2) => {
            if let Some(row) = app.cursor_row() {
                app.open_menu(row);
                app.menu = app.menu.take().map(|mut state| {
                    state.selected = state
                        .menu
                        .entries
                        .iter()
                        .position(|a| *a == MenuAction::Rename)
                        .unwrap_or(0);
                    state
                });
                app.activate_menu();
            }
        }
        KeyCode::Char('s') => app.save(),

        // Help
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
        }

        _ => {}
    }
}

fn handle_menu_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_menu(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_menu(1),
        KeyCode::Enter => app.activate_menu(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => app.close_menu(),
        _ => {}
    }
}

fn handle_rename_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_rename(),
        KeyCode::Enter => app.confirm_rename(),
        KeyCode::Backspace => {
            app.rename_input.pop();
        }
        KeyCode::Char(c) => app.rename_input.push(c),
        _ => {}
    }
}

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

/// Handle a single mouse event.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Normal {
        if app.mode == Mode::Menu && matches!(mouse.kind, MouseEventKind::Down(_)) {
            app.close_menu();
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(button) => {
            app.mouse_down(mouse.column, mouse.row, map_button(button));
        }
        MouseEventKind::Up(button) => {
            app.mouse_up(mouse.column, mouse.row, map_button(button));
        }
        MouseEventKind::Drag(event::MouseButton::Left) => {
            app.mouse_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Moved => app.mouse_move(mouse.column, mouse.row),
        MouseEventKind::ScrollUp => app.scroll_by(-1),
        MouseEventKind::ScrollDown => app.scroll_by(1),
        _ => {}
    }
}

fn map_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::editor::Editor;
    use crate::scene::sample_project;
    use ratatui::layout::Rect;
    use std::path::PathBuf;

    fn app() -> App {
        let editor = Editor::new(sample_project().unwrap());
        let mut app = App::new(PathBuf::from("game.json"), editor, &Config::default());
        app.set_tree_area(Rect::new(0, 0, 40, 30));
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_on_q() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_on_ctrl_c_in_any_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [Mode::Normal, Mode::Menu, Mode::Rename, Mode::Help] {
            let mut app = app();
            app.mode = mode;
            handle_key_event(&mut app, ctrl_c);
            assert!(app.should_quit, "{mode:?}");
        }
    }

    #[test]
    fn test_space_folds_cursor_row() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.row_ids().len(), 1);
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.row_ids().len(), 9);
    }

    #[test]
    fn test_menu_open_and_close() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('m')));
        assert_eq!(app.mode, Mode::Menu);
        assert!(app.menu.is_some());

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.menu.is_none());
    }

    #[test]
    fn test_rename_flow() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::F(2)));
        assert_eq!(app.mode, Mode::Rename);
        assert_eq!(app.rename_input, "scene");

        for _ in 0..5 {
            handle_key_event(&mut app, key(KeyCode::Backspace));
        }
        for c in "level".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Normal);
        let scene = app.editor.graph.scenes().next().unwrap();
        assert_eq!(app.editor.graph.get(scene).unwrap().name, "level");
        let row = app.cursor_row().unwrap();
        assert_eq!(app.outliner.element(row).unwrap().row().label, "level");
    }

    #[test]
    fn test_rename_escape_keeps_name() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::F(2)));
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        handle_key_event(&mut app, key(KeyCode::Esc));

        let scene = app.editor.graph.scenes().next().unwrap();
        assert_eq!(app.editor.graph.get(scene).unwrap().name, "scene");
    }

    #[test]
    fn test_enter_opens_editor() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Down));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.editor.tabs.len(), 1);
        assert_eq!(app.status_message.as_deref(), Some("Opened Scene editor"));

        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.editor.tabs.len(), 1, "tab is reused");
    }

    #[test]
    fn test_help_mode() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.mode, Mode::Help);
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_click_arrow_folds() {
        let mut app = app();
        // scene row arrow: column 3, lines 3..6
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(event::MouseButton::Left), 3, 4));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Up(event::MouseButton::Left), 3, 4));
        assert_eq!(app.row_ids().len(), 2);
    }

    #[test]
    fn test_drag_sun_below_controller() {
        let mut app = app();
        // rows: program, scene, camera, sun, props, crate, ball, sparks, controller
        let sun_line = 3 * 3 + 1;
        let controller_bottom = 8 * 3 + 2;

        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(event::MouseButton::Left), 8, sun_line));
        assert!(app.editor.mouse.left);
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(event::MouseButton::Left), 8, 20));
        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Drag(event::MouseButton::Left), 8, controller_bottom),
        );
        handle_mouse_event(
            &mut app,
            mouse(MouseEventKind::Up(event::MouseButton::Left), 8, controller_bottom),
        );

        assert!(!app.editor.mouse.left);
        assert!(app.editor.drag_buffer.is_empty());
        let labels: Vec<_> = app
            .outliner
            .visible_rows()
            .iter()
            .map(|e| e.row().label.clone())
            .collect();
        assert_eq!(labels.last().map(String::as_str), Some("sun"));
        assert_eq!(labels.len(), 9);
    }

    #[test]
    fn test_drag_scene_is_refused() {
        let mut app = app();
        handle_mouse_event(&mut app, mouse(MouseEventKind::Down(event::MouseButton::Left), 8, 4));
        handle_mouse_event(&mut app, mouse(MouseEventKind::Drag(event::MouseButton::Left), 8, 10));
        assert!(app.drag.is_none());
        assert!(app.editor.drag_buffer.is_empty());
    }
}
