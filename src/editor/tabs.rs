//! Editor tabs opened from the outliner.

use std::fmt;

use crate::scene::{ObjectId, ObjectKind};

/// The editor a tab hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Script,
    Scene,
    Particle,
}

impl EditorKind {
    /// The editor that opens for an object kind, if any.
    pub fn for_object(kind: &ObjectKind) -> Option<Self> {
        match kind {
            ObjectKind::Script { .. } => Some(EditorKind::Script),
            ObjectKind::Scene => Some(EditorKind::Scene),
            ObjectKind::ParticleEmitter { .. } => Some(EditorKind::Particle),
            _ => None,
        }
    }
}

impl fmt::Display for EditorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditorKind::Script => "Script editor",
            EditorKind::Scene => "Scene editor",
            EditorKind::Particle => "Particle editor",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: TabId,
    pub kind: EditorKind,
    pub object: Option<ObjectId>,
}

impl Tab {
    pub fn attach(&mut self, object: ObjectId) {
        self.object = Some(object);
    }
}

/// Open editor tabs and which one has focus.
#[derive(Debug, Default)]
pub struct TabManager {
    tabs: Vec<Tab>,
    selected: Option<TabId>,
    next_id: usize,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the tab of `kind` already showing `object`.
    pub fn get_tab(&self, kind: EditorKind, object: ObjectId) -> Option<TabId> {
        self.tabs
            .iter()
            .find(|t| t.kind == kind && t.object == Some(object))
            .map(|t| t.id)
    }

    pub fn add_tab(&mut self, kind: EditorKind, select_immediately: bool) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        self.tabs.push(Tab {
            id,
            kind,
            object: None,
        });
        if select_immediately {
            self.selected = Some(id);
        }
        id
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub fn select(&mut self, id: TabId) {
        if self.tab(id).is_some() {
            self.selected = Some(id);
        }
    }

    pub fn selected(&self) -> Option<&Tab> {
        self.selected.and_then(|id| self.tab(id))
    }

    /// Close every tab attached to an object that no longer exists.
    pub fn close_for(&mut self, mut exists: impl FnMut(ObjectId) -> bool) {
        self.tabs
            .retain(|t| t.object.map_or(true, |object| exists(object)));
        if let Some(selected) = self.selected {
            if self.tab(selected).is_none() {
                self.selected = self.tabs.last().map(|t| t.id);
            }
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
