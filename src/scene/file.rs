//! Project files: a program tree stored as JSON.

use std::fs;
use std::path::Path;

use crate::error::{OutlinerError, Result};

use super::graph::SceneGraph;
use super::object::{Geometry, ObjectData, ObjectKind};

/// Load a project file into a scene graph.
pub fn load_project(path: &Path) -> Result<SceneGraph> {
    let content = fs::read_to_string(path).map_err(|source| OutlinerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data: ObjectData =
        serde_json::from_str(&content).map_err(|source| OutlinerError::Project {
            path: path.to_path_buf(),
            source,
        })?;

    if !data.kind.is_program() {
        tracing::warn!(
            path = %path.display(),
            kind = data.kind.type_name(),
            "Project root is not a program"
        );
    }

    tracing::debug!(path = %path.display(), objects = data.count(), "Loaded project");
    Ok(SceneGraph::from_data(data)?)
}

/// Write a scene graph to a project file.
pub fn save_project(path: &Path, graph: &SceneGraph) -> Result<()> {
    let data = graph.to_data()?;
    let json = serde_json::to_string_pretty(&data).map_err(|source| OutlinerError::Project {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| OutlinerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), objects = graph.len(), "Saved project");
    Ok(())
}

/// A small program with one scene exercising every object kind.
pub fn sample_project() -> Result<SceneGraph> {
    let mut graph = SceneGraph::new("program");
    let scene = graph.spawn(graph.root(), "scene", ObjectKind::Scene)?;
    graph.spawn(scene, "camera", ObjectKind::Camera)?;
    graph.spawn(scene, "sun", ObjectKind::Light)?;

    let props = graph.spawn(scene, "props", ObjectKind::Group)?;
    graph.spawn(
        props,
        "crate",
        ObjectKind::Mesh {
            geometry: Geometry::Box {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
        },
    )?;
    graph.spawn(
        props,
        "ball",
        ObjectKind::Mesh {
            geometry: Geometry::Sphere { radius: 0.5 },
        },
    )?;

    graph.spawn(
        scene,
        "sparks",
        ObjectKind::ParticleEmitter {
            particle_count: 256,
        },
    )?;
    graph.spawn(
        scene,
        "controller",
        ObjectKind::Script {
            code: "function update() {}".to_string(),
        },
    )?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;
    use crate::scene::ObjectId;
    use tempfile::TempDir;

    #[test]
    fn sample_has_one_scene() {
        let graph = sample_project().unwrap();
        assert_eq!(graph.scenes().count(), 1);
        assert_eq!(graph.len(), 9);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("project.json");
        let graph = sample_project().unwrap();

        save_project(&path, &graph).unwrap();
        let loaded = load_project(&path).unwrap();

        assert_eq!(loaded.len(), graph.len());
        assert_eq!(loaded.root(), graph.root());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_project(Path::new("/nonexistent/project.json")).unwrap_err();
        assert!(matches!(err, OutlinerError::Io { .. }));
    }

    #[test]
    fn load_garbage_is_project_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, OutlinerError::Project { .. }));
    }

    #[test]
    fn load_repeated_ids_is_scene_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repeated.json");
        let id = ObjectId::new();
        let json = format!(
            r#"{{"id":"{id}","name":"program","type":"program",
                "children":[{{"id":"{id}","name":"scene","type":"scene"}}]}}"#
        );
        fs::write(&path, json).unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(matches!(
            err,
            OutlinerError::Scene(SceneError::DuplicateId(repeated)) if repeated == id
        ));
    }
}
