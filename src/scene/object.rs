//! Scene objects and their kinds.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::physics::PhysicsShape;

/// Stable identifier of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// Geometry attached to a mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    Plane { width: f32, height: f32 },
    /// Arbitrary vertex soup.
    Buffer { vertices: Vec<[f32; 3]> },
}

/// What a scene object is, with the data specific to that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Top level container holding every scene.
    Program,
    Scene,
    Group,
    Mesh { geometry: Geometry },
    Script { code: String },
    ParticleEmitter { particle_count: u32 },
    Light,
    Camera,
    Physics { shapes: Vec<PhysicsShape> },
}

impl ObjectKind {
    /// Type name used for icon lookup and display.
    pub fn type_name(&self) -> &'static str {
        match self {
            ObjectKind::Program => "Program",
            ObjectKind::Scene => "Scene",
            ObjectKind::Group => "Group",
            ObjectKind::Mesh { .. } => "Mesh",
            ObjectKind::Script { .. } => "Script",
            ObjectKind::ParticleEmitter { .. } => "ParticleEmitter",
            ObjectKind::Light => "Light",
            ObjectKind::Camera => "Camera",
            ObjectKind::Physics { .. } => "Physics",
        }
    }

    pub fn is_program(&self) -> bool {
        matches!(self, ObjectKind::Program)
    }

    pub fn is_scene(&self) -> bool {
        matches!(self, ObjectKind::Scene)
    }
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    /// Persisted fold flag shown by the outliner.
    pub folded: bool,
    pub matrix_auto_update: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            kind,
            folded: false,
            matrix_auto_update: true,
            cast_shadow: false,
            receive_shadow: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Serialized form of an object and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    pub id: ObjectId,
    pub name: String,
    #[serde(flatten)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub folded: bool,
    #[serde(default = "default_true")]
    pub matrix_auto_update: bool,
    #[serde(default)]
    pub cast_shadow: bool,
    #[serde(default)]
    pub receive_shadow: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ObjectData>,
}

fn default_true() -> bool {
    true
}

impl ObjectData {
    /// Give every node of this subtree a fresh identifier.
    pub fn regenerate_ids(&mut self) {
        self.traverse_mut(&mut |node| node.id = ObjectId::new());
    }

    /// Visit this node and all descendants, parents first.
    pub fn traverse_mut(&mut self, f: &mut impl FnMut(&mut ObjectData)) {
        f(self);
        for child in &mut self.children {
            child.traverse_mut(f);
        }
    }

    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ObjectData::count).sum::<usize>()
    }
}
