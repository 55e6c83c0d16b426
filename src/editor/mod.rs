//! Shared editor state consumed by outliner rows.

pub mod drag_buffer;
pub mod icons;
pub mod tabs;

pub use drag_buffer::DragBuffer;
pub use icons::ObjectIcons;
pub use tabs::{EditorKind, TabId, TabManager};

use crate::config::ThemeConfig;
use crate::error::{Result, SceneError};
use crate::scene::{ObjectId, ObjectKind, SceneGraph};

/// Row colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub button_over_color: String,
    pub button_light_color: String,
    pub selected_color: String,
    pub drop_border_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from(&ThemeConfig::default())
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        Self {
            button_over_color: config.button_over_color.clone(),
            button_light_color: config.button_light_color.clone(),
            selected_color: config.selected_color.clone(),
            drop_border_color: config.drop_border_color.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Down,
    Up,
}

/// Pointer button state tracked by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl MouseState {
    pub fn update_key(&mut self, button: MouseButton, state: KeyState) {
        let pressed = state == KeyState::Down;
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
        }
    }
}

/// Application-wide state shared by every row of the outliner.
#[derive(Debug)]
pub struct Editor {
    pub graph: SceneGraph,
    pub theme: Theme,
    pub icons: ObjectIcons,
    pub tabs: TabManager,
    pub drag_buffer: DragBuffer,
    pub mouse: MouseState,
    selected: Option<ObjectId>,
    clipboard: Option<String>,
    scene: Option<ObjectId>,
    views_dirty: bool,
}

impl Editor {
    pub fn new(graph: SceneGraph) -> Self {
        let scene = graph.scenes().next();
        Self {
            graph,
            theme: Theme::default(),
            icons: ObjectIcons::default(),
            tabs: TabManager::new(),
            drag_buffer: DragBuffer::new(),
            mouse: MouseState::default(),
            selected: None,
            clipboard: None,
            scene,
            views_dirty: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_icons(mut self, icons: ObjectIcons) -> Self {
        self.icons = icons;
        self
    }

    pub fn select_object(&mut self, object: Option<ObjectId>) {
        tracing::trace!(?object, "Select object");
        self.selected = object;
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Whether `object` is the current selection. `None` is never selected.
    pub fn is_object_selected(&self, object: Option<ObjectId>) -> bool {
        object.is_some() && object == self.selected
    }

    /// Scene receiving new objects.
    pub fn current_scene(&self) -> Option<ObjectId> {
        self.scene.filter(|s| self.graph.contains(*s))
    }

    pub fn set_current_scene(&mut self, scene: ObjectId) {
        self.scene = Some(scene);
    }

    /// Ask every object view to refresh on its next pass.
    pub fn update_object_views(&mut self) {
        self.views_dirty = true;
    }

    /// Consume the pending refresh flag.
    pub fn take_views_dirty(&mut self) -> bool {
        std::mem::take(&mut self.views_dirty)
    }

    pub fn delete_object(&mut self, object: ObjectId) -> Result<()> {
        let removed = self.graph.remove(object)?;
        tracing::debug!(%object, name = %removed.name, "Deleted object");

        if self
            .selected
            .is_some_and(|selected| !self.graph.contains(selected))
        {
            self.selected = None;
        }
        let graph = &self.graph;
        self.tabs.close_for(|id| graph.contains(id));
        self.update_object_views();
        Ok(())
    }

    pub fn copy_object(&mut self, object: ObjectId) -> Result<()> {
        self.clipboard = Some(self.graph.serialize(object)?);
        Ok(())
    }

    pub fn cut_object(&mut self, object: ObjectId) -> Result<()> {
        self.copy_object(object)?;
        self.delete_object(object)
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    /// Insert a fresh copy of the clipboard under `target`.
    pub fn paste_object(&mut self, target: ObjectId) -> Result<ObjectId> {
        let json = self.clipboard.as_deref().ok_or(SceneError::EmptyClipboard)?;
        let mut data = SceneGraph::deserialize(json)?;
        data.regenerate_ids();
        let id = self.graph.insert(target, data)?;
        tracing::debug!(%id, %target, "Pasted object");
        self.update_object_views();
        Ok(id)
    }

    /// Create an object in the current scene.
    pub fn add_to_scene(&mut self, name: impl Into<String>, kind: ObjectKind) -> Result<ObjectId> {
        let scene = self.current_scene().ok_or(SceneError::NoScene)?;
        let id = self.graph.spawn(scene, name, kind)?;
        self.update_object_views();
        Ok(id)
    }
}
