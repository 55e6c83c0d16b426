//! The outline panel: builds rows from the scene and lays them out.

use crate::editor::Editor;
use crate::scene::{ObjectId, SceneGraph};

use super::container::{Container, ViewRequest};
use super::element::TreeElement;
use super::row::{LayoutMetrics, RowId};

/// Row under a panel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub row: RowId,
    /// Pointer y relative to the row's top edge.
    pub local_y: i32,
}

/// Outline of one object's subtree.
#[derive(Debug, Default)]
pub struct Outliner {
    pub container: Container,
    root: Option<TreeElement>,
}

impl Outliner {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            container: Container::new(metrics),
            root: None,
        }
    }

    /// Show `object` and its subtree on the next refresh.
    pub fn attach(&mut self, object: ObjectId) {
        self.container.scene = Some(object);
        self.container.update_view();
    }

    pub fn root(&self) -> Option<&TreeElement> {
        self.root.as_ref()
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.container.metrics
    }

    /// Destroy every row and rebuild the tree from the scene graph.
    pub fn update_view(&mut self, editor: &Editor) {
        if let Some(mut root) = self.root.take() {
            root.destroy(&mut self.container);
        }

        let Some(object) = self.container.scene.and_then(|id| editor.graph.get(id)) else {
            tracing::debug!("Nothing to show");
            return;
        };

        let mut root = TreeElement::new(Some(&mut self.container));
        root.set_object(object, &editor.icons);
        build_children(&mut root, &mut self.container, editor);
        tracing::debug!(rows = self.container.mounted_count(), "Rebuilt outline");

        self.root = Some(root);
        self.update_child_position(&editor.graph);
    }

    /// Hide rows under folded elements, stack visible rows, lay them out.
    pub fn update_child_position(&mut self, graph: &SceneGraph) {
        let metrics = self.container.metrics;
        let Some(root) = self.root.as_mut() else {
            return;
        };

        let mut index = 0;
        root.visit_mut(false, &mut |element, under_fold| {
            element.set_visibility(!under_fold);
            if !under_fold {
                element.set_position(0, index * metrics.row_height);
                index += 1;
            }
        });
        root.update_interface(graph, &metrics);
    }

    /// Apply pending container requests and editor refreshes.
    ///
    /// Returns whether anything was redone.
    pub fn process(&mut self, editor: &mut Editor) -> bool {
        let requests = self.container.take_requests();
        let refresh = editor.take_views_dirty() || requests.contains(&ViewRequest::Refresh);

        if refresh {
            self.update_view(editor);
            // The rebuild ran its own layout pass
            self.container.take_requests();
            true
        } else if requests.contains(&ViewRequest::Relayout) {
            self.update_child_position(&editor.graph);
            true
        } else {
            false
        }
    }

    /// Displayed rows from top to bottom.
    pub fn visible_rows(&self) -> Vec<&TreeElement> {
        self.root
            .as_ref()
            .map(|root| {
                root.preorder()
                    .into_iter()
                    .filter(|e| e.row().displayed)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Row covering panel coordinate `y`.
    pub fn hit_test(&self, y: i32) -> Option<Hit> {
        let height = self.container.metrics.row_height;
        self.visible_rows().into_iter().find_map(|e| {
            let top = e.row().position.y;
            (top <= y && y < top + height).then_some(Hit {
                row: e.id(),
                local_y: y - top,
            })
        })
    }

    pub fn element(&self, id: RowId) -> Option<&TreeElement> {
        self.root.as_ref()?.find(id)
    }

    pub fn element_mut(&mut self, id: RowId) -> Option<&mut TreeElement> {
        self.root.as_mut()?.find_mut(id)
    }

    /// An element together with the container, for handlers that need both.
    pub fn split_mut(&mut self, id: RowId) -> Option<(&mut TreeElement, &mut Container)> {
        let element = self.root.as_mut()?.find_mut(id)?;
        Some((element, &mut self.container))
    }

    /// The row showing `object`, if any.
    pub fn row_for_object(&self, object: ObjectId) -> Option<RowId> {
        self.root
            .as_ref()?
            .preorder()
            .into_iter()
            .find(|e| e.object() == Some(object))
            .map(TreeElement::id)
    }
}

fn build_children(element: &mut TreeElement, container: &mut Container, editor: &Editor) {
    let Some(id) = element.object() else {
        return;
    };
    for child_id in editor.graph.children(id) {
        if let Some(child) = editor.graph.get(*child_id) {
            let row = element.add_object(container, child, &editor.icons);
            build_children(row, container, editor);
        }
    }
}
