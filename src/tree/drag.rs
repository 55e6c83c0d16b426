//! Per-row drag and drop.
//!
//! A row being dragged stages its object in the [`DragBuffer`] and writes the
//! object id into the [`DataTransfer`]. Rows under the pointer classify the
//! pointer's row-local y into a [`DropZone`] and draw a matching border. On
//! drop the target pops the object from the buffer and moves it in the scene
//! graph: before or after the target for [`DropZone::Above`] and
//! [`DropZone::Below`], as its last child for [`DropZone::Inside`].

use std::collections::HashMap;

use crate::editor::{DragBuffer, KeyState, MouseButton, MouseState};
use crate::scene::{ObjectId, SceneGraph};

use super::container::Container;
use super::element::TreeElement;
use super::row::{Border, LayoutMetrics};

/// Transfer key holding the dragged object id.
pub const UUID_KEY: &str = "uuid";

/// Where a drop would land relative to the row under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DropZone {
    #[default]
    None = 0,
    Above = 1,
    Below = 2,
    Inside = 3,
}

impl DropZone {
    /// Classify a row-local pointer y.
    pub fn classify(y: i32, metrics: &LayoutMetrics) -> Self {
        if y < metrics.drop_above {
            DropZone::Above
        } else if y > metrics.drop_below {
            DropZone::Below
        } else {
            DropZone::Inside
        }
    }

    pub fn border(self) -> Border {
        match self {
            DropZone::None => Border::None,
            DropZone::Above => Border::Top,
            DropZone::Below => Border::Bottom,
            DropZone::Inside => Border::Full,
        }
    }
}

/// Payload carried by the platform during a drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    data: HashMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, key: &str, value: impl Into<String>) {
        self.data.insert(key.to_string(), value.into());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    fn dragged_object(&self) -> Option<ObjectId> {
        self.get_data(UUID_KEY).and_then(ObjectId::parse)
    }
}

/// Why a drop left the scene untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// Nothing staged in the drag buffer under the transferred id.
    NotBuffered,
    /// The target row is structural and has no object.
    NoTarget,
    /// The dragged object no longer exists.
    Vanished,
    /// Dropped onto itself.
    SelfDrop,
    /// Dropped onto one of its own descendants.
    Cycle,
    /// Ordered insertion next to a program child, or next to the root.
    Unordered,
    /// The pointer was over no drop zone.
    NoZone,
    /// The scene graph refused the move.
    Refused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Moved { object: ObjectId, zone: DropZone },
    Rejected(DropRejection),
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved { .. })
    }
}

impl TreeElement {
    fn clear_border(&mut self) {
        self.row_mut().set_border(Border::None);
    }

    /// Stage this row's object for dragging. Scenes cannot be dragged.
    pub fn on_drag_start(
        &self,
        graph: &SceneGraph,
        buffer: &mut DragBuffer,
        transfer: &mut DataTransfer,
    ) -> bool {
        let Some(object) = self.object().and_then(|id| graph.get(id)) else {
            return false;
        };
        if object.kind.is_scene() {
            return false;
        }

        transfer.set_data(UUID_KEY, object.id.to_string());
        buffer.push_drag_element(object.id);
        tracing::trace!(object = %object.id, "Drag start");
        true
    }

    /// Track the pointer over this row. Returns whether the decoration changed.
    pub fn on_drag_over(&mut self, y: i32, metrics: &LayoutMetrics) -> bool {
        let zone = DropZone::classify(y, metrics);
        if zone == self.drop_zone {
            return false;
        }

        tracing::trace!(row = ?self.id(), ?zone, "Drag over");
        self.drop_zone = zone;
        self.row_mut().set_border(zone.border());
        true
    }

    pub fn on_drag_leave(&mut self) {
        self.clear_border();
        self.drop_zone = DropZone::None;
    }

    /// Move the dragged object relative to this row.
    pub fn on_drop(
        &mut self,
        y: i32,
        transfer: &DataTransfer,
        buffer: &mut DragBuffer,
        graph: &mut SceneGraph,
        container: &mut Container,
    ) -> DropOutcome {
        self.clear_border();
        self.drop_zone = DropZone::None;

        let outcome = self.apply_drop(y, transfer, buffer, graph, &container.metrics);
        match outcome {
            DropOutcome::Moved { object, zone } => {
                tracing::debug!(%object, ?zone, "Dropped object");
                self.update_scene_data(container);
            }
            DropOutcome::Rejected(reason) => {
                tracing::debug!(?reason, "Drop rejected");
            }
        }
        outcome
    }

    fn apply_drop(
        &self,
        y: i32,
        transfer: &DataTransfer,
        buffer: &mut DragBuffer,
        graph: &mut SceneGraph,
        metrics: &LayoutMetrics,
    ) -> DropOutcome {
        use DropRejection::*;

        let Some(dragged) = transfer
            .dragged_object()
            .and_then(|id| buffer.pop_drag_element(id))
        else {
            return DropOutcome::Rejected(NotBuffered);
        };
        let Some(target) = self.object() else {
            return DropOutcome::Rejected(NoTarget);
        };
        if !graph.contains(dragged) {
            return DropOutcome::Rejected(Vanished);
        }
        if dragged == target {
            return DropOutcome::Rejected(SelfDrop);
        }
        if graph.is_ancestor_of(dragged, target) {
            return DropOutcome::Rejected(Cycle);
        }

        let zone = DropZone::classify(y, metrics);
        let result = match zone {
            DropZone::Above | DropZone::Below => {
                let Some(parent) = graph.parent(target) else {
                    return DropOutcome::Rejected(Unordered);
                };
                if graph.get(parent).is_some_and(|p| p.kind.is_program()) {
                    return DropOutcome::Rejected(Unordered);
                }
                if zone == DropZone::Above {
                    graph.add_above(parent, dragged, target)
                } else {
                    graph.add_below(parent, dragged, target)
                }
            }
            DropZone::Inside => graph.add(target, dragged),
            // classify always picks a zone inside the row
            DropZone::None => return DropOutcome::Rejected(NoZone),
        };

        match result {
            Ok(()) => DropOutcome::Moved {
                object: dragged,
                zone,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Scene refused drop");
                DropOutcome::Rejected(Refused)
            }
        }
    }

    /// Finish a drag gesture on the source row.
    pub fn on_drag_end(
        &mut self,
        transfer: &DataTransfer,
        buffer: &mut DragBuffer,
        mouse: &mut MouseState,
    ) {
        self.clear_border();
        self.drop_zone = DropZone::None;

        if let Some(id) = transfer.dragged_object() {
            buffer.pop_drag_element(id);
        }

        // Native drags swallow the button release
        mouse.update_key(MouseButton::Left, KeyState::Up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ObjectIcons;
    use crate::scene::ObjectKind;
    use crate::tree::container::ViewRequest;

    struct Fixture {
        graph: SceneGraph,
        container: Container,
        buffer: DragBuffer,
        scene: ObjectId,
        a: ObjectId,
        b: ObjectId,
        c: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut graph = SceneGraph::new("program");
        let scene = graph.spawn(graph.root(), "scene", ObjectKind::Scene).unwrap();
        let a = graph.spawn(scene, "a", ObjectKind::Group).unwrap();
        let b = graph.spawn(scene, "b", ObjectKind::Group).unwrap();
        let c = graph.spawn(a, "c", ObjectKind::Light).unwrap();
        let mut container = Container::default();
        container.scene = Some(graph.root());
        Fixture {
            graph,
            container,
            buffer: DragBuffer::new(),
            scene,
            a,
            b,
            c,
        }
    }

    fn row_for(f: &mut Fixture, id: ObjectId) -> TreeElement {
        let mut element = TreeElement::new(Some(&mut f.container));
        element.set_object(f.graph.get(id).unwrap(), &ObjectIcons::default());
        element
    }

    fn start_drag(f: &mut Fixture, id: ObjectId) -> DataTransfer {
        let source = row_for(f, id);
        let mut transfer = DataTransfer::new();
        assert!(source.on_drag_start(&f.graph, &mut f.buffer, &mut transfer));
        transfer
    }

    #[test]
    fn classify_zones() {
        let metrics = LayoutMetrics::default();
        assert_eq!(DropZone::classify(0, &metrics), DropZone::Above);
        assert_eq!(DropZone::classify(4, &metrics), DropZone::Above);
        assert_eq!(DropZone::classify(5, &metrics), DropZone::Inside);
        assert_eq!(DropZone::classify(15, &metrics), DropZone::Inside);
        assert_eq!(DropZone::classify(16, &metrics), DropZone::Below);
    }

    #[test]
    fn classify_always_picks_a_zone() {
        let metrics = LayoutMetrics::default();
        for y in -10..40 {
            assert_ne!(DropZone::classify(y, &metrics), DropZone::None, "y = {y}");
        }
    }

    #[test]
    fn zone_codes() {
        assert_eq!(DropZone::None as u8, 0);
        assert_eq!(DropZone::Above as u8, 1);
        assert_eq!(DropZone::Below as u8, 2);
        assert_eq!(DropZone::Inside as u8, 3);
    }

    #[test]
    fn scenes_cannot_be_dragged() {
        let mut f = fixture();
        let scene = f.scene;
        let row = row_for(&mut f, scene);
        let mut transfer = DataTransfer::new();
        assert!(!row.on_drag_start(&f.graph, &mut f.buffer, &mut transfer));
        assert!(f.buffer.is_empty());
        assert!(transfer.get_data(UUID_KEY).is_none());
    }

    #[test]
    fn drag_start_stages_object() {
        let mut f = fixture();
        let b = f.b;
        let transfer = start_drag(&mut f, b);
        assert!(f.buffer.contains(b));
        assert_eq!(transfer.get_data(UUID_KEY), Some(b.to_string().as_str()));
    }

    #[test]
    fn drag_over_writes_only_on_zone_change() {
        let mut f = fixture();
        let b = f.b;
        let mut row = row_for(&mut f, b);
        let metrics = LayoutMetrics::default();

        assert!(row.on_drag_over(2, &metrics));
        assert!(!row.on_drag_over(3, &metrics));
        assert!(!row.on_drag_over(1, &metrics));
        assert_eq!(row.row().border_writes(), 1);
        assert_eq!(row.row().border, Border::Top);

        assert!(row.on_drag_over(10, &metrics));
        assert_eq!(row.row().border, Border::Full);
        assert!(row.on_drag_over(18, &metrics));
        assert_eq!(row.row().border, Border::Bottom);
        assert_eq!(row.row().border_writes(), 3);
    }

    #[test]
    fn drag_leave_resets() {
        let mut f = fixture();
        let b = f.b;
        let mut row = row_for(&mut f, b);
        let metrics = LayoutMetrics::default();
        row.on_drag_over(10, &metrics);
        row.on_drag_leave();
        assert_eq!(row.drop_zone(), DropZone::None);
        assert_eq!(row.row().border, Border::None);

        // Same zone again after leaving counts as a change
        assert!(row.on_drag_over(10, &metrics));
    }

    #[test]
    fn drop_inside_reparents() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        let transfer = start_drag(&mut f, b);
        let mut target = row_for(&mut f, a);

        let outcome = target.on_drop(10, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);

        assert_eq!(
            outcome,
            DropOutcome::Moved {
                object: b,
                zone: DropZone::Inside
            }
        );
        assert_eq!(f.graph.parent(b), Some(a));
        assert!(f.buffer.is_empty());
        assert_eq!(f.container.pending(), &[ViewRequest::Refresh]);
    }

    #[test]
    fn drop_above_and_below_reorder() {
        let mut f = fixture();
        let (scene, a, b) = (f.scene, f.a, f.b);

        let transfer = start_drag(&mut f, b);
        let mut target = row_for(&mut f, a);
        let outcome = target.on_drop(1, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);
        assert!(outcome.is_moved());
        assert_eq!(f.graph.children(scene), &[b, a]);

        let transfer = start_drag(&mut f, b);
        let outcome = target.on_drop(19, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);
        assert!(outcome.is_moved());
        assert_eq!(f.graph.children(scene), &[a, b]);
    }

    #[test]
    fn drop_without_buffer_entry_is_rejected() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        let mut transfer = DataTransfer::new();
        transfer.set_data(UUID_KEY, b.to_string());
        let mut target = row_for(&mut f, a);

        let outcome = target.on_drop(10, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);

        assert_eq!(outcome, DropOutcome::Rejected(DropRejection::NotBuffered));
        assert_eq!(f.graph.parent(b), Some(f.scene));
        assert!(f.container.pending().is_empty());
    }

    #[test]
    fn drop_on_self_is_rejected() {
        let mut f = fixture();
        let a = f.a;
        let transfer = start_drag(&mut f, a);
        let mut target = row_for(&mut f, a);

        let outcome = target.on_drop(10, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);

        assert_eq!(outcome, DropOutcome::Rejected(DropRejection::SelfDrop));
        assert!(f.container.pending().is_empty());
    }

    #[test]
    fn drop_on_descendant_is_rejected_in_every_zone() {
        let mut f = fixture();
        let (a, c) = (f.a, f.c);
        for y in [1, 10, 19] {
            let transfer = start_drag(&mut f, a);
            let mut target = row_for(&mut f, c);
            let outcome =
                target.on_drop(y, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);
            assert_eq!(outcome, DropOutcome::Rejected(DropRejection::Cycle));
        }
        assert_eq!(f.graph.parent(c), Some(a));
        assert_eq!(f.graph.parent(a), Some(f.scene));
        assert!(f.container.pending().is_empty());
    }

    #[test]
    fn ordered_drop_next_to_scene_is_rejected() {
        let mut f = fixture();
        let (scene, b) = (f.scene, f.b);
        let transfer = start_drag(&mut f, b);
        let mut target = row_for(&mut f, scene);

        let outcome = target.on_drop(1, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);

        assert_eq!(outcome, DropOutcome::Rejected(DropRejection::Unordered));
        assert_eq!(f.graph.parent(b), Some(scene));
    }

    #[test]
    fn drop_on_structural_row_is_rejected() {
        let mut f = fixture();
        let b = f.b;
        let transfer = start_drag(&mut f, b);
        let mut target = TreeElement::new(Some(&mut f.container));

        let outcome = target.on_drop(10, &transfer, &mut f.buffer, &mut f.graph, &mut f.container);
        assert_eq!(outcome, DropOutcome::Rejected(DropRejection::NoTarget));
    }

    #[test]
    fn drag_end_cleans_up() {
        let mut f = fixture();
        let b = f.b;
        let transfer = start_drag(&mut f, b);
        let mut source = row_for(&mut f, b);
        let mut mouse = MouseState {
            left: true,
            ..MouseState::default()
        };
        source.on_drag_over(10, &LayoutMetrics::default());

        source.on_drag_end(&transfer, &mut f.buffer, &mut mouse);

        assert!(f.buffer.is_empty());
        assert!(!mouse.left);
        assert_eq!(source.row().border, Border::None);
        assert_eq!(source.drop_zone(), DropZone::None);
    }
}
