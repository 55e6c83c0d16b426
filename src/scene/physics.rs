//! Physics shapes derived from object geometry.

use serde::{Deserialize, Serialize};

use super::object::{Geometry, ObjectKind, SceneObject};

/// Collision shape of a physics object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PhysicsShape {
    Box { half_extents: [f32; 3] },
    Sphere { radius: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32 },
    ConvexPolyhedron { vertices: Vec<[f32; 3]> },
}

impl PhysicsShape {
    /// Derive a shape matching the object's geometry.
    ///
    /// Only meshes carry geometry; every other kind yields `None`.
    pub fn from_object(object: &SceneObject) -> Option<Self> {
        match &object.kind {
            ObjectKind::Mesh { geometry } => Some(Self::from_geometry(geometry)),
            _ => None,
        }
    }

    pub fn from_geometry(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Box {
                width,
                height,
                depth,
            } => PhysicsShape::Box {
                half_extents: [width / 2.0, height / 2.0, depth / 2.0],
            },
            Geometry::Sphere { radius } => PhysicsShape::Sphere { radius: *radius },
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => PhysicsShape::Cylinder {
                radius_top: *radius_top,
                radius_bottom: *radius_bottom,
                height: *height,
            },
            // A plane becomes a flat box
            Geometry::Plane { width, height } => PhysicsShape::Box {
                half_extents: [width / 2.0, height / 2.0, 0.0],
            },
            Geometry::Buffer { vertices } => PhysicsShape::ConvexPolyhedron {
                vertices: vertices.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_geometry_uses_half_extents() {
        let shape = PhysicsShape::from_geometry(&Geometry::Box {
            width: 2.0,
            height: 4.0,
            depth: 6.0,
        });
        assert_eq!(
            shape,
            PhysicsShape::Box {
                half_extents: [1.0, 2.0, 3.0]
            }
        );
    }

    #[test]
    fn sphere_keeps_radius() {
        let shape = PhysicsShape::from_geometry(&Geometry::Sphere { radius: 1.5 });
        assert_eq!(shape, PhysicsShape::Sphere { radius: 1.5 });
    }

    #[test]
    fn non_mesh_has_no_shape() {
        let light = SceneObject::new("sun", ObjectKind::Light);
        assert!(PhysicsShape::from_object(&light).is_none());

        let mesh = SceneObject::new(
            "ball",
            ObjectKind::Mesh {
                geometry: Geometry::Sphere { radius: 1.0 },
            },
        );
        assert!(PhysicsShape::from_object(&mesh).is_some());
    }
}
