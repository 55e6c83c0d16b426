//! A single node of the outline tree.

use crate::editor::{Editor, ObjectIcons, Theme};
use crate::scene::{ObjectId, SceneGraph, SceneObject};

use super::container::Container;
use super::drag::DropZone;
use super::row::{ArrowIcon, LayoutMetrics, Point, Row, RowId};

/// A row of the outliner and the subtree below it.
///
/// Elements own their children. The parent link `up` only records the
/// parent's row id, and container access is passed in by the caller.
#[derive(Debug)]
pub struct TreeElement {
    row: Row,
    mounted: bool,
    visible: bool,
    folded: bool,
    object: Option<ObjectId>,
    level: usize,
    up: Option<RowId>,
    children: Vec<TreeElement>,
    pub(super) drop_zone: DropZone,
}

impl TreeElement {
    /// Build an empty row, mounted on `container` when one is given.
    pub fn new(container: Option<&mut Container>) -> Self {
        let row = Row::new();
        let mounted = match container {
            Some(container) => {
                container.mount(row.id);
                true
            }
            None => false,
        };
        Self {
            row,
            mounted,
            visible: true,
            folded: false,
            object: None,
            level: 0,
            up: None,
            children: Vec::new(),
            drop_zone: DropZone::None,
        }
    }

    pub fn id(&self) -> RowId {
        self.row.id
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub(super) fn row_mut(&mut self) -> &mut Row {
        &mut self.row
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn folded(&self) -> bool {
        self.folded
    }

    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn up(&self) -> Option<RowId> {
        self.up
    }

    pub fn children(&self) -> &[TreeElement] {
        &self.children
    }

    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    /// Attach a domain object, copying its current name, icon and fold flag.
    pub fn set_object(&mut self, object: &SceneObject, icons: &ObjectIcons) {
        self.object = Some(object.id);
        self.folded = object.folded;

        self.set_icon(icons.get(&object.kind));
        self.set_label(&object.name);
        self.row.arrow.icon = ArrowIcon::for_folded(object.folded);
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.row.icon = icon.into();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.row.label = label.into();
    }

    fn new_child(&self, container: &mut Container) -> TreeElement {
        let mut child = TreeElement::new(self.mounted.then_some(container));
        child.up = Some(self.row.id);
        child.level = self.level + 1;
        child
    }

    fn push_child(&mut self, child: TreeElement) -> &mut TreeElement {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a child row showing `object`.
    pub fn add_object(
        &mut self,
        container: &mut Container,
        object: &SceneObject,
        icons: &ObjectIcons,
    ) -> &mut TreeElement {
        let mut child = self.new_child(container);
        child.set_object(object, icons);
        self.push_child(child)
    }

    /// Append a structural child row with no object attached.
    pub fn add(
        &mut self,
        container: &mut Container,
        label: Option<&str>,
        icon: Option<&str>,
    ) -> &mut TreeElement {
        let mut child = self.new_child(container);
        if let Some(label) = label {
            child.set_label(label);
        }
        if let Some(icon) = icon {
            child.set_icon(icon);
        }
        self.push_child(child)
    }

    /// Detach this row and its whole subtree from the display.
    pub fn destroy(&mut self, container: &mut Container) {
        if let Err(err) = container.detach(self.row.id) {
            tracing::trace!(row = ?err.0, "Row already detached");
        }
        self.mounted = false;
        self.row.displayed = false;

        for child in &mut self.children {
            child.destroy(container);
        }
    }

    /// Flip the fold flag, as a click on the arrow does.
    pub fn toggle_fold(&mut self, graph: &mut SceneGraph, container: &mut Container) {
        self.folded = !self.folded;
        self.update_folded_state(graph, container);
    }

    /// Push the fold flag to the object, swap the arrow, request a relayout.
    pub fn update_folded_state(&mut self, graph: &mut SceneGraph, container: &mut Container) {
        if let Some(object) = self.object.and_then(|id| graph.get_mut(id)) {
            object.folded = self.folded;
        }

        self.row.arrow.icon = ArrowIcon::for_folded(self.folded);
        container.update_child_position();
    }

    /// Request a full refresh when the container shows a scene.
    pub fn update_scene_data(&self, container: &mut Container) {
        if container.scene.is_some() {
            container.update_view();
        }
    }

    pub fn set_visibility(&mut self, visible: bool) {
        self.visible = visible;
        self.row.displayed = visible;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.row.position = Point { x, y };
    }

    /// Lay out this row and, when visible, every child below it.
    pub fn update_interface(&mut self, graph: &SceneGraph, metrics: &LayoutMetrics) {
        if !self.visible {
            self.row.displayed = false;
            return;
        }

        self.row.displayed = true;
        let offset = self.level as i32 * metrics.indent;

        let has_children = match self.object {
            Some(id) => !graph.object_is_empty(id),
            None => !self.children.is_empty(),
        };
        self.row.arrow.displayed = has_children;
        if has_children {
            self.row.arrow.left = metrics.arrow_left + offset;
        }

        self.row.icon_left = metrics.icon_left + offset;
        self.row.label_left = metrics.label_left + offset;
        self.row.size.height = metrics.row_height;

        for child in &mut self.children {
            child.update_interface(graph, metrics);
        }
    }

    pub fn click(&self, editor: &mut Editor) {
        editor.select_object(self.object);
    }

    pub fn pointer_enter(&mut self, theme: &Theme) {
        self.row.background = Some(theme.button_over_color.clone());
    }

    pub fn pointer_leave(&mut self, editor: &Editor) {
        if !editor.is_object_selected(self.object) {
            self.row.background = Some(editor.theme.button_light_color.clone());
        }
    }

    pub fn arrow_enter(&mut self) {
        self.row.arrow.highlighted = true;
    }

    pub fn arrow_leave(&mut self) {
        self.row.arrow.highlighted = false;
    }

    pub fn find(&self, id: RowId) -> Option<&TreeElement> {
        if self.row.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: RowId) -> Option<&mut TreeElement> {
        if self.row.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// This element and all descendants, parents first.
    pub fn preorder(&self) -> Vec<&TreeElement> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a TreeElement>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }

    /// Visit this element and its descendants, parents first, passing
    /// whether any ancestor is folded.
    pub(super) fn visit_mut(
        &mut self,
        under_fold: bool,
        f: &mut impl FnMut(&mut TreeElement, bool),
    ) {
        f(self, under_fold);
        let hide = under_fold || self.folded;
        for child in &mut self.children {
            child.visit_mut(hide, f);
        }
    }
}
