//! Scene object model shown by the outliner.

pub mod file;
pub mod graph;
pub mod object;
pub mod physics;

pub use file::{load_project, sample_project, save_project};
pub use graph::SceneGraph;
pub use object::{Geometry, ObjectData, ObjectId, ObjectKind, SceneObject};
pub use physics::PhysicsShape;
