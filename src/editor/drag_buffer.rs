//! Staging area for objects being dragged between rows.

use std::collections::HashSet;

use crate::scene::ObjectId;

/// Objects picked up by a drag gesture, keyed by identifier.
///
/// One buffer lives for the whole editor session and is handed to every row
/// by reference.
#[derive(Debug, Default, Clone)]
pub struct DragBuffer {
    elements: HashSet<ObjectId>,
}

impl DragBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_drag_element(&mut self, id: ObjectId) {
        self.elements.insert(id);
    }

    /// Remove and return a staged object.
    pub fn pop_drag_element(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.elements.take(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.elements.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
