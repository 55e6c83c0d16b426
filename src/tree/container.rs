//! Display region that rows mount into, and the requests they raise.

use std::collections::HashSet;

use crate::scene::ObjectId;

use super::row::{LayoutMetrics, RowId};

/// Work a row asks its container to do on the next pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRequest {
    /// Recompute positions of visible rows.
    Relayout,
    /// Rebuild the whole tree from the scene.
    Refresh,
}

/// Row was not attached to this container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotMounted(pub RowId);

/// Mount point for rows plus the pending layout requests.
#[derive(Debug, Default)]
pub struct Container {
    /// Object whose subtree the container shows.
    pub scene: Option<ObjectId>,
    pub metrics: LayoutMetrics,
    mounted: HashSet<RowId>,
    requests: Vec<ViewRequest>,
}

impl Container {
    pub fn new(metrics: LayoutMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    pub(crate) fn mount(&mut self, row: RowId) {
        self.mounted.insert(row);
    }

    pub(crate) fn detach(&mut self, row: RowId) -> Result<(), NotMounted> {
        if self.mounted.remove(&row) {
            Ok(())
        } else {
            Err(NotMounted(row))
        }
    }

    pub fn is_mounted(&self, row: RowId) -> bool {
        self.mounted.contains(&row)
    }

    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    pub fn update_child_position(&mut self) {
        self.request(ViewRequest::Relayout);
    }

    pub fn update_view(&mut self) {
        self.request(ViewRequest::Refresh);
    }

    fn request(&mut self, request: ViewRequest) {
        if !self.requests.contains(&request) {
            self.requests.push(request);
        }
    }

    pub fn pending(&self) -> &[ViewRequest] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<ViewRequest> {
        std::mem::take(&mut self.requests)
    }
}
