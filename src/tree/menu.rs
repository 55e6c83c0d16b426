//! Context menu and editor shortcuts of a row.

use std::fmt;

use crate::editor::{Editor, EditorKind, TabId};
use crate::error::{Result, SceneError};
use crate::scene::{ObjectId, ObjectKind, PhysicsShape, SceneGraph};

use super::element::TreeElement;

/// Menu entry width and height.
pub const MENU_ENTRY_SIZE: (i32, i32) = (140, 20);

/// Asks the user for a line of text.
pub trait Prompt {
    /// `None` when the user cancels.
    fn ask(&mut self, title: &str, initial: &str) -> Option<String>;
}

/// A prompt that always gives the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixedAnswer(pub Option<String>);

impl Prompt for FixedAnswer {
    fn ask(&mut self, _title: &str, _initial: &str) -> Option<String> {
        self.0.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenEditor(EditorKind),
    Rename,
    Delete,
    AddPhysics,
    SetStatic,
    SetDynamic,
    EnableShadows,
    DisableShadows,
    Duplicate,
    Copy,
    Cut,
    Paste,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::OpenEditor(kind) => return fmt::Display::fmt(kind, f),
            MenuAction::Rename => "Rename",
            MenuAction::Delete => "Delete",
            MenuAction::AddPhysics => "Add physics",
            MenuAction::SetStatic => "Set static",
            MenuAction::SetDynamic => "Set dynamic",
            MenuAction::EnableShadows => "Enable shadows",
            MenuAction::DisableShadows => "Disable shadows",
            MenuAction::Duplicate => "Duplicate",
            MenuAction::Copy => "Copy",
            MenuAction::Cut => "Cut",
            MenuAction::Paste => "Paste",
        };
        f.write_str(label)
    }
}

/// Entries offered for an object kind, in display order.
pub fn menu_entries(kind: &ObjectKind) -> Vec<MenuAction> {
    let program = kind.is_program();
    let scene = kind.is_scene();

    let mut entries = Vec::new();
    if let Some(editor) = EditorKind::for_object(kind) {
        entries.push(MenuAction::OpenEditor(editor));
    }
    entries.push(MenuAction::Rename);
    if !program {
        entries.push(MenuAction::Delete);
    }
    if !scene && !program {
        entries.extend([
            MenuAction::AddPhysics,
            MenuAction::SetStatic,
            MenuAction::SetDynamic,
            MenuAction::EnableShadows,
            MenuAction::DisableShadows,
            MenuAction::Duplicate,
            MenuAction::Copy,
            MenuAction::Cut,
        ]);
    }
    if !program {
        entries.push(MenuAction::Paste);
    }
    entries
}

/// A context menu opened on a row.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    pub object: ObjectId,
    pub x: i32,
    pub y: i32,
    pub entries: Vec<MenuAction>,
}

/// Focus the editor tab for `object`, opening one if needed.
pub fn open_editor(editor: &mut Editor, kind: EditorKind, object: ObjectId) -> TabId {
    let tab = match editor.tabs.get_tab(kind, object) {
        Some(tab) => tab,
        None => {
            let tab = editor.tabs.add_tab(kind, true);
            if let Some(t) = editor.tabs.tab_mut(tab) {
                t.attach(object);
            }
            tab
        }
    };
    editor.tabs.select(tab);
    tab
}

impl TreeElement {
    /// Build the context menu for a right click at `(x, y)`.
    pub fn context_menu(&self, graph: &SceneGraph, x: i32, y: i32) -> Option<ContextMenu> {
        let object = graph.get(self.object()?)?;
        Some(ContextMenu {
            object: object.id,
            x: x - 5,
            y: y - 5,
            entries: menu_entries(&object.kind),
        })
    }

    /// Open the editor matching the object's kind, if it has one.
    pub fn double_click(&self, editor: &mut Editor) -> Option<TabId> {
        let id = self.object()?;
        let kind = EditorKind::for_object(&editor.graph.get(id)?.kind)?;
        Some(open_editor(editor, kind, id))
    }

    /// Run a context menu entry against this row's object.
    pub fn activate(
        &self,
        action: MenuAction,
        editor: &mut Editor,
        prompt: &mut dyn Prompt,
    ) -> Result<()> {
        let Some(id) = self.object() else {
            return Ok(());
        };
        let object = editor.graph.get(id).ok_or(SceneError::UnknownObject(id))?;
        tracing::debug!(%id, %action, "Menu action");

        match action {
            MenuAction::OpenEditor(kind) => {
                open_editor(editor, kind, id);
            }
            MenuAction::Rename => {
                let current = object.name.clone();
                if let Some(name) = prompt.ask("Rename object", &current) {
                    if !name.is_empty() {
                        if let Some(object) = editor.graph.get_mut(id) {
                            object.name = name;
                        }
                        editor.update_object_views();
                    }
                }
            }
            MenuAction::Delete => editor.delete_object(id)?,
            MenuAction::AddPhysics => {
                let name = object.name.clone();
                let shapes = PhysicsShape::from_object(object).into_iter().collect();
                editor.add_to_scene(name, ObjectKind::Physics { shapes })?;
            }
            MenuAction::SetStatic | MenuAction::SetDynamic => {
                editor
                    .graph
                    .set_matrix_auto_update(id, action == MenuAction::SetDynamic)?;
                editor.update_object_views();
            }
            MenuAction::EnableShadows | MenuAction::DisableShadows => {
                let enabled = action == MenuAction::EnableShadows;
                editor.graph.set_shadow_casting(id, enabled)?;
                editor.graph.set_shadow_receiving(id, enabled)?;
                editor.update_object_views();
            }
            MenuAction::Duplicate => {
                editor.graph.duplicate(id)?;
                editor.update_object_views();
            }
            MenuAction::Copy => editor.copy_object(id)?,
            MenuAction::Cut => editor.cut_object(id)?,
            MenuAction::Paste => {
                editor.paste_object(id)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Geometry;
    use crate::tree::Container;

    struct Fixture {
        editor: Editor,
        container: Container,
        scene: ObjectId,
        mesh: ObjectId,
        script: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut graph = SceneGraph::new("program");
        let scene = graph.spawn(graph.root(), "scene", ObjectKind::Scene).unwrap();
        let mesh = graph
            .spawn(
                scene,
                "crate",
                ObjectKind::Mesh {
                    geometry: Geometry::Box {
                        width: 2.0,
                        height: 2.0,
                        depth: 2.0,
                    },
                },
            )
            .unwrap();
        graph.spawn(mesh, "lid", ObjectKind::Group).unwrap();
        let script = graph
            .spawn(scene, "logic", ObjectKind::Script { code: String::new() })
            .unwrap();
        Fixture {
            editor: Editor::new(graph),
            container: Container::default(),
            scene,
            mesh,
            script,
        }
    }

    fn row_for(f: &mut Fixture, id: ObjectId) -> TreeElement {
        let mut element = TreeElement::new(Some(&mut f.container));
        element.set_object(f.editor.graph.get(id).unwrap(), &f.editor.icons);
        element
    }

    #[test]
    fn program_menu() {
        assert_eq!(menu_entries(&ObjectKind::Program), vec![MenuAction::Rename]);
    }

    #[test]
    fn scene_menu() {
        assert_eq!(
            menu_entries(&ObjectKind::Scene),
            vec![
                MenuAction::OpenEditor(EditorKind::Scene),
                MenuAction::Rename,
                MenuAction::Delete,
                MenuAction::Paste,
            ]
        );
    }

    #[test]
    fn object_menu_has_object_operations() {
        let entries = menu_entries(&ObjectKind::Light);
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0], MenuAction::Rename);
        assert!(entries.contains(&MenuAction::Duplicate));
        assert_eq!(entries.last(), Some(&MenuAction::Paste));
    }

    #[test]
    fn labels() {
        assert_eq!(MenuAction::AddPhysics.to_string(), "Add physics");
        assert_eq!(
            MenuAction::OpenEditor(EditorKind::Particle).to_string(),
            "Particle editor"
        );
    }

    #[test]
    fn no_menu_without_object() {
        let f = fixture();
        let row = TreeElement::new(None);
        assert!(row.context_menu(&f.editor.graph, 10, 10).is_none());
    }

    #[test]
    fn menu_is_offset_from_pointer() {
        let mut f = fixture();
        let mesh = f.mesh;
        let row = row_for(&mut f, mesh);
        let menu = row.context_menu(&f.editor.graph, 100, 50).unwrap();
        assert_eq!((menu.x, menu.y), (95, 45));
        assert_eq!(menu.object, mesh);
    }

    #[test]
    fn open_editor_reuses_tab() {
        let mut f = fixture();
        let script = f.script;
        let row = row_for(&mut f, script);

        let first = row.double_click(&mut f.editor).unwrap();
        let second = row.double_click(&mut f.editor).unwrap();

        assert_eq!(first, second);
        assert_eq!(f.editor.tabs.len(), 1);
        assert_eq!(f.editor.tabs.selected().unwrap().object, Some(script));
    }

    #[test]
    fn double_click_on_mesh_does_nothing() {
        let mut f = fixture();
        let mesh = f.mesh;
        let row = row_for(&mut f, mesh);
        assert!(row.double_click(&mut f.editor).is_none());
        assert!(f.editor.tabs.is_empty());
    }

    #[test]
    fn rename_applies_non_empty_name() {
        let mut f = fixture();
        let mesh = f.mesh;
        let row = row_for(&mut f, mesh);

        row.activate(
            MenuAction::Rename,
            &mut f.editor,
            &mut FixedAnswer(Some("box".into())),
        )
        .unwrap();

        assert_eq!(f.editor.graph.get(mesh).unwrap().name, "box");
        assert!(f.editor.take_views_dirty());
    }

    #[test]
    fn rename_ignores_empty_and_cancel() {
        let mut f = fixture();
        let mesh = f.mesh;
        let row = row_for(&mut f, mesh);

        row.activate(MenuAction::Rename, &mut f.editor, &mut FixedAnswer(Some(String::new())))
            .unwrap();
        row.activate(MenuAction::Rename, &mut f.editor, &mut FixedAnswer(None))
            .unwrap();

        assert_eq!(f.editor.graph.get(mesh).unwrap().name, "crate");
        assert!(!f.editor.take_views_dirty());
    }

    #[test]
    fn add_physics_matches_geometry() {
        let mut f = fixture();
        let (scene, mesh) = (f.scene, f.mesh);
        let row = row_for(&mut f, mesh);

        row.activate(MenuAction::AddPhysics, &mut f.editor, &mut FixedAnswer(None))
            .unwrap();

        let physics = *f.editor.graph.children(scene).last().unwrap();
        let object = f.editor.graph.get(physics).unwrap();
        assert_eq!(object.name, "crate");
        assert_eq!(
            object.kind,
            ObjectKind::Physics {
                shapes: vec![PhysicsShape::Box {
                    half_extents: [1.0, 1.0, 1.0]
                }]
            }
        );
    }

    #[test]
    fn static_and_shadows_are_recursive() {
        let mut f = fixture();
        let mesh = f.mesh;
        let lid = f.editor.graph.children(mesh)[0];
        let row = row_for(&mut f, mesh);
        let mut prompt = FixedAnswer(None);

        row.activate(MenuAction::SetStatic, &mut f.editor, &mut prompt).unwrap();
        row.activate(MenuAction::EnableShadows, &mut f.editor, &mut prompt)
            .unwrap();
        let lid_object = f.editor.graph.get(lid).unwrap();
        assert!(!lid_object.matrix_auto_update);
        assert!(lid_object.cast_shadow && lid_object.receive_shadow);

        row.activate(MenuAction::SetDynamic, &mut f.editor, &mut prompt).unwrap();
        row.activate(MenuAction::DisableShadows, &mut f.editor, &mut prompt)
            .unwrap();
        let lid_object = f.editor.graph.get(lid).unwrap();
        assert!(lid_object.matrix_auto_update);
        assert!(!lid_object.cast_shadow && !lid_object.receive_shadow);
    }

    #[test]
    fn duplicate_inserts_under_parent() {
        let mut f = fixture();
        let (scene, mesh) = (f.scene, f.mesh);
        let row = row_for(&mut f, mesh);

        row.activate(MenuAction::Duplicate, &mut f.editor, &mut FixedAnswer(None))
            .unwrap();

        let children = f.editor.graph.children(scene);
        assert_eq!(children.len(), 3);
        let copy = children[2];
        assert_ne!(copy, mesh);
        assert_eq!(f.editor.graph.get(copy).unwrap().name, "crate");
        assert_eq!(f.editor.graph.children(copy).len(), 1);
    }

    #[test]
    fn delete_removes_object() {
        let mut f = fixture();
        let mesh = f.mesh;
        let row = row_for(&mut f, mesh);
        row.activate(MenuAction::Delete, &mut f.editor, &mut FixedAnswer(None))
            .unwrap();
        assert!(!f.editor.graph.contains(mesh));
    }

    #[test]
    fn copy_then_paste_into_script() {
        let mut f = fixture();
        let (mesh, script) = (f.mesh, f.script);
        let mesh_row = row_for(&mut f, mesh);
        let script_row = row_for(&mut f, script);
        let mut prompt = FixedAnswer(None);

        mesh_row.activate(MenuAction::Copy, &mut f.editor, &mut prompt).unwrap();
        script_row.activate(MenuAction::Paste, &mut f.editor, &mut prompt).unwrap();

        assert_eq!(f.editor.graph.children(script).len(), 1);
        assert!(f.editor.graph.contains(mesh));
    }
}
