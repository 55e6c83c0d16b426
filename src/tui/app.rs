//! Application state for the TUI.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::{Config, TuiConfig};
use crate::editor::{Editor, KeyState, MouseButton, ObjectIcons, Theme};
use crate::error::Result;
use crate::scene::{load_project, save_project};
use crate::tree::{
    ContextMenu, DataTransfer, DropOutcome, FixedAnswer, LayoutMetrics, MenuAction, Outliner,
    RowId,
};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Context menu open.
    Menu,
    /// Typing a new object name.
    Rename,
    /// Help overlay mode.
    Help,
}

/// A context menu opened on a row.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub row: RowId,
    pub menu: ContextMenu,
    /// Highlighted entry.
    pub selected: usize,
}

/// A mouse drag in progress.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub source: RowId,
    pub transfer: DataTransfer,
    /// Row currently under the pointer.
    pub over: Option<RowId>,
}

/// Pointer position resolved to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub row: RowId,
    /// Row-local y in layout pixels.
    pub local_y: i32,
    pub on_arrow: bool,
}

/// Column of the fold arrow at level 0, relative to the outline area.
pub const ARROW_COLUMN: usize = 1;

/// Layout y of a terminal line inside the outline.
///
/// Each row spans `row_lines` terminal lines; a line maps to the middle of
/// its slice of the row, so with three lines per row the top, middle and
/// bottom lines fall into the above, inside and below drop zones.
pub fn pointer_y(line: usize, row_lines: u16, row_height: i32) -> i32 {
    let lines = i32::from(row_lines.max(1));
    let line = line as i32;
    let index = line / lines;
    let offset = line % lines;
    index * row_height + offset * row_height / lines + row_height / (2 * lines)
}

/// Main application state for the TUI.
pub struct App {
    /// Project file being edited.
    pub path: PathBuf,

    pub editor: Editor,

    pub outliner: Outliner,

    pub config: TuiConfig,

    /// Current UI mode.
    pub mode: Mode,

    pub menu: Option<MenuState>,

    /// Rename input.
    pub rename_input: String,
    rename_row: Option<RowId>,

    /// Keyboard cursor, an index into the visible rows.
    pub cursor: usize,

    /// First visible row.
    pub scroll: usize,

    /// Screen area of the outline, set before each draw.
    pub tree_area: Rect,

    pub hovered: Option<RowId>,
    pressed: Option<RowId>,
    pub drag: Option<DragSession>,
    last_click: Option<(RowId, Instant)>,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App showing `editor`'s whole program.
    pub fn new(path: PathBuf, editor: Editor, config: &Config) -> Self {
        let mut outliner = Outliner::new(LayoutMetrics::from(&config.outliner));
        outliner.attach(editor.graph.root());

        let mut app = Self {
            path,
            editor,
            outliner,
            config: config.tui.clone(),
            mode: Mode::Normal,
            menu: None,
            rename_input: String::new(),
            rename_row: None,
            cursor: 0,
            scroll: 0,
            tree_area: Rect::default(),
            hovered: None,
            pressed: None,
            drag: None,
            last_click: None,
            should_quit: false,
            status_message: None,
        };
        app.refresh();
        app
    }

    /// Load a project file.
    pub fn open(path: PathBuf, config: &Config) -> Result<Self> {
        let graph = load_project(&path)?;
        let editor = Editor::new(graph)
            .with_theme(Theme::from(&config.theme))
            .with_icons(ObjectIcons::with_overrides(&config.icons));
        Ok(Self::new(path, editor, config))
    }

    /// Apply pending view requests and keep the cursor on the selection.
    pub fn refresh(&mut self) {
        if self.outliner.process(&mut self.editor) {
            if let Some(id) = self.hovered {
                if self.outliner.element(id).is_none() {
                    self.hovered = None;
                }
            }
        }

        let rows = self.row_ids();
        if let Some(selected) = self.editor.selected() {
            let found = rows.iter().position(|id| {
                self.outliner.element(*id).and_then(|e| e.object()) == Some(selected)
            });
            if let Some(index) = found {
                self.cursor = index;
            }
        }
        self.cursor = self.cursor.min(rows.len().saturating_sub(1));
        self.keep_cursor_visible();
    }

    /// Ids of the displayed rows, top to bottom.
    pub fn row_ids(&self) -> Vec<RowId> {
        self.outliner.visible_rows().iter().map(|e| e.id()).collect()
    }

    pub fn cursor_row(&self) -> Option<RowId> {
        self.row_ids().get(self.cursor).copied()
    }

    /// Rows that fit in the outline area.
    pub fn page_rows(&self) -> usize {
        (usize::from(self.tree_area.height) / usize::from(self.config.row_lines.max(1))).max(1)
    }

    pub fn set_tree_area(&mut self, area: Rect) {
        self.tree_area = area;
        self.keep_cursor_visible();
    }

    fn keep_cursor_visible(&mut self) {
        let page = self.page_rows();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + page {
            self.scroll = self.cursor + 1 - page;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.row_ids().len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let rows = self.row_ids();
        if rows.is_empty() {
            return;
        }
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(rows.len() - 1);
        self.select_row(rows[self.cursor]);
    }

    pub fn select_row(&mut self, row: RowId) {
        if let Some(element) = self.outliner.element(row) {
            element.click(&mut self.editor);
        }
        if let Some(index) = self.row_ids().iter().position(|id| *id == row) {
            self.cursor = index;
        }
        self.keep_cursor_visible();
    }

    pub fn toggle_row(&mut self, row: RowId) {
        if let Some((element, container)) = self.outliner.split_mut(row) {
            element.toggle_fold(&mut self.editor.graph, container);
        }
        self.refresh();
    }

    /// Double-click behavior: open the object's editor tab.
    pub fn open_row(&mut self, row: RowId) {
        let tab = self
            .outliner
            .element(row)
            .and_then(|e| e.double_click(&mut self.editor));
        self.status_message = match tab.and_then(|id| self.editor.tabs.tab(id)) {
            Some(tab) => Some(format!("Opened {}", tab.kind)),
            None => Some("No editor for this object".to_string()),
        };
    }

    pub fn open_menu(&mut self, row: RowId) {
        let metrics = *self.outliner.metrics();
        let Some(element) = self.outliner.element(row) else {
            return;
        };
        let x = element.row().label_left;
        let y = element.row().position.y + metrics.row_height / 2;

        if let Some(menu) = element.context_menu(&self.editor.graph, x, y) {
            self.select_row(row);
            self.menu = Some(MenuState {
                row,
                menu,
                selected: 0,
            });
            self.mode = Mode::Menu;
        }
    }

    pub fn close_menu(&mut self) {
        self.menu = None;
        self.mode = Mode::Normal;
    }

    pub fn move_menu(&mut self, delta: isize) {
        if let Some(state) = self.menu.as_mut() {
            let last = state.menu.entries.len().saturating_sub(1);
            state.selected = state.selected.saturating_add_signed(delta).min(last);
        }
    }

    /// Run the highlighted menu entry. Rename switches to text input first.
    pub fn activate_menu(&mut self) {
        let Some(state) = self.menu.take() else {
            return;
        };
        self.mode = Mode::Normal;
        let Some(action) = state.menu.entries.get(state.selected).copied() else {
            return;
        };

        if action == MenuAction::Rename {
            self.rename_input = self
                .editor
                .graph
                .get(state.menu.object)
                .map(|o| o.name.clone())
                .unwrap_or_default();
            self.rename_row = Some(state.row);
            self.mode = Mode::Rename;
            return;
        }
        self.run_action(state.row, action, None);
    }

    pub fn confirm_rename(&mut self) {
        self.mode = Mode::Normal;
        let name = std::mem::take(&mut self.rename_input);
        if let Some(row) = self.rename_row.take() {
            self.run_action(row, MenuAction::Rename, Some(name));
        }
    }

    pub fn cancel_rename(&mut self) {
        self.mode = Mode::Normal;
        self.rename_input.clear();
        self.rename_row = None;
    }

    fn run_action(&mut self, row: RowId, action: MenuAction, answer: Option<String>) {
        let Some(element) = self.outliner.element(row) else {
            return;
        };
        let mut prompt = FixedAnswer(answer);
        match element.activate(action, &mut self.editor, &mut prompt) {
            Ok(()) => self.status_message = Some(action.to_string()),
            Err(err) => {
                tracing::warn!(error = %err, %action, "Menu action failed");
                self.status_message = Some(err.to_string());
            }
        }
        self.refresh();
    }

    pub fn save(&mut self) {
        self.status_message = Some(match save_project(&self.path, &self.editor.graph) {
            Ok(()) => format!("Saved {}", self.path.display()),
            Err(err) => {
                tracing::warn!(error = %err, "Save failed");
                err.to_string()
            }
        });
    }

    /// Resolve a terminal cell to the row under it.
    pub fn pointer_at(&self, column: u16, row: u16) -> Option<Pointer> {
        let area = self.tree_area;
        if column < area.x
            || row < area.y
            || column >= area.x + area.width
            || row >= area.y + area.height
        {
            return None;
        }

        let lines = usize::from(self.config.row_lines.max(1));
        let line = usize::from(row - area.y) + self.scroll * lines;
        let y = pointer_y(line, self.config.row_lines, self.outliner.metrics().row_height);
        let hit = self.outliner.hit_test(y)?;
        let element = self.outliner.element(hit.row)?;
        let on_arrow = element.row().arrow.displayed
            && usize::from(column - area.x) == ARROW_COLUMN + element.level() * 2;

        Some(Pointer {
            row: hit.row,
            local_y: hit.local_y,
            on_arrow,
        })
    }

    pub fn mouse_down(&mut self, column: u16, row: u16, button: MouseButton) {
        self.editor.mouse.update_key(button, KeyState::Down);
        let Some(pointer) = self.pointer_at(column, row) else {
            return;
        };

        match button {
            MouseButton::Left if pointer.on_arrow => self.toggle_row(pointer.row),
            MouseButton::Left => {
                self.select_row(pointer.row);
                self.pressed = Some(pointer.row);

                let now = Instant::now();
                let window = Duration::from_millis(self.config.double_click_ms);
                match self.last_click {
                    Some((last, at)) if last == pointer.row && now.duration_since(at) <= window => {
                        self.last_click = None;
                        self.open_row(pointer.row);
                    }
                    _ => self.last_click = Some((pointer.row, now)),
                }
            }
            MouseButton::Right => self.open_menu(pointer.row),
            MouseButton::Middle => {}
        }
    }

    /// Pointer moved with the left button held.
    pub fn mouse_drag(&mut self, column: u16, row: u16) {
        if self.drag.is_none() {
            let Some(source) = self.pressed else {
                return;
            };
            let mut transfer = DataTransfer::new();
            let started = self.outliner.element(source).is_some_and(|e| {
                e.on_drag_start(&self.editor.graph, &mut self.editor.drag_buffer, &mut transfer)
            });
            if !started {
                self.pressed = None;
                return;
            }
            self.drag = Some(DragSession {
                source,
                transfer,
                over: None,
            });
        }

        let metrics = *self.outliner.metrics();
        let target = self.pointer_at(column, row);
        let Some(session) = self.drag.as_mut() else {
            return;
        };

        if session.over != target.map(|p| p.row) {
            if let Some(previous) = session.over.take() {
                if let Some(element) = self.outliner.element_mut(previous) {
                    element.on_drag_leave();
                }
            }
        }
        if let Some(pointer) = target {
            session.over = Some(pointer.row);
            if let Some(element) = self.outliner.element_mut(pointer.row) {
                element.on_drag_over(pointer.local_y, &metrics);
            }
        }
    }

    pub fn mouse_up(&mut self, column: u16, row: u16, button: MouseButton) {
        self.editor.mouse.update_key(button, KeyState::Up);
        self.pressed = None;
        if button != MouseButton::Left {
            return;
        }
        let Some(session) = self.drag.take() else {
            return;
        };

        let outcome = match self.pointer_at(column, row) {
            Some(pointer) => self.outliner.split_mut(pointer.row).map(|(element, container)| {
                element.on_drop(
                    pointer.local_y,
                    &session.transfer,
                    &mut self.editor.drag_buffer,
                    &mut self.editor.graph,
                    container,
                )
            }),
            None => None,
        };
        if let Some(over) = session.over {
            if let Some(element) = self.outliner.element_mut(over) {
                element.on_drag_leave();
            }
        }
        if let Some(element) = self.outliner.element_mut(session.source) {
            element.on_drag_end(
                &session.transfer,
                &mut self.editor.drag_buffer,
                &mut self.editor.mouse,
            );
        }

        self.status_message = match outcome {
            Some(DropOutcome::Moved { zone, .. }) => Some(format!("Moved ({zone:?})")),
            Some(DropOutcome::Rejected(reason)) => Some(format!("Drop rejected: {reason:?}")),
            None => None,
        };
        self.refresh();
    }

    /// Pointer moved with no button held.
    pub fn mouse_move(&mut self, column: u16, row: u16) {
        let pointer = self.pointer_at(column, row);
        let target = pointer.map(|p| p.row);

        if self.hovered != target {
            if let Some(previous) = self.hovered.take() {
                if let Some(element) = self.outliner.element_mut(previous) {
                    element.arrow_leave();
                    element.pointer_leave(&self.editor);
                }
            }
            if let Some(row) = target {
                if let Some(element) = self.outliner.element_mut(row) {
                    element.pointer_enter(&self.editor.theme);
                }
                self.hovered = Some(row);
            }
        }

        if let Some(pointer) = pointer {
            if let Some(element) = self.outliner.element_mut(pointer.row) {
                if pointer.on_arrow {
                    element.arrow_enter();
                } else {
                    element.arrow_leave();
                }
            }
        }
    }
}
