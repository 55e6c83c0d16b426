//! Icon registry keyed by object kind.

use std::collections::HashMap;

use crate::scene::ObjectKind;

/// Fallback for kinds with no registered icon.
pub const DEFAULT_ICON: &str = "icons/misc/object.png";

/// Maps object type names to icon resource identifiers.
#[derive(Debug, Clone)]
pub struct ObjectIcons {
    icons: HashMap<String, String>,
}

impl Default for ObjectIcons {
    fn default() -> Self {
        let icons = [
            ("Program", "icons/misc/program.png"),
            ("Scene", "icons/misc/scene.png"),
            ("Group", "icons/misc/container.png"),
            ("Mesh", "icons/models/cube.png"),
            ("Script", "icons/script/script.png"),
            ("ParticleEmitter", "icons/effects/particles.png"),
            ("Light", "icons/lights/point.png"),
            ("Camera", "icons/camera/camera.png"),
            ("Physics", "icons/misc/physics.png"),
        ]
        .into_iter()
        .map(|(kind, icon)| (kind.to_string(), icon.to_string()))
        .collect();

        Self { icons }
    }
}

impl ObjectIcons {
    /// Default registry with user overrides applied on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut registry = Self::default();
        for (kind, icon) in overrides {
            registry.icons.insert(kind.clone(), icon.clone());
        }
        registry
    }

    pub fn get(&self, kind: &ObjectKind) -> &str {
        self.icons
            .get(kind.type_name())
            .map(String::as_str)
            .unwrap_or(DEFAULT_ICON)
    }
}
