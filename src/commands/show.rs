//! Show command implementation

use std::fmt::Write;

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::editor::{Editor, ObjectIcons};
use crate::error::Result;
use crate::scene::{load_project, SceneGraph};
use crate::tree::{LayoutMetrics, Outliner, TreeElement};

/// What to include when printing an outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineOptions {
    /// Include rows hidden under folded objects.
    pub all: bool,
    /// Append the object type to each label.
    pub types: bool,
}

/// Run the show command
pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let graph = load_project(&args.path)?;
    let editor = Editor::new(graph).with_icons(ObjectIcons::with_overrides(&config.icons));

    let mut outliner = Outliner::new(LayoutMetrics::from(&config.outliner));
    outliner.attach(editor.graph.root());
    outliner.update_view(&editor);

    let options = OutlineOptions {
        all: args.all,
        types: args.types,
    };
    print!("{}", format_outline(&outliner, &editor.graph, options));

    Ok(())
}

/// Render the outline as indented text, one row per line.
pub fn format_outline(outliner: &Outliner, graph: &SceneGraph, options: OutlineOptions) -> String {
    let rows = match (options.all, outliner.root()) {
        (true, Some(root)) => root.preorder(),
        (false, _) => outliner.visible_rows(),
        (true, None) => Vec::new(),
    };

    let mut out = String::new();
    for element in rows {
        let glyph = if !has_children(element, graph) {
            ' '
        } else if element.folded() {
            '►'
        } else {
            '▼'
        };

        let _ = write!(
            out,
            "{}{} {}",
            "  ".repeat(element.level()),
            glyph,
            element.row().label
        );
        if options.types {
            if let Some(object) = element.object().and_then(|id| graph.get(id)) {
                let _ = write!(out, " [{}]", object.kind.type_name());
            }
        }
        out.push('\n');
    }
    out
}

fn has_children(element: &TreeElement, graph: &SceneGraph) -> bool {
    match element.object() {
        Some(id) => !graph.object_is_empty(id),
        None => !element.children().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::sample_project;

    fn outline(editor: &Editor, options: OutlineOptions) -> String {
        let mut outliner = Outliner::new(LayoutMetrics::default());
        outliner.attach(editor.graph.root());
        outliner.update_view(editor);
        format_outline(&outliner, &editor.graph, options)
    }

    #[test]
    fn sample_outline() {
        let editor = Editor::new(sample_project().unwrap());
        insta::assert_snapshot!(outline(&editor, OutlineOptions::default()), @r"
        ▼ program
          ▼ scene
              camera
              sun
            ▼ props
                crate
                ball
              sparks
              controller
        ");
    }

    #[test]
    fn folded_rows_are_skipped_unless_all() {
        let mut editor = Editor::new(sample_project().unwrap());
        let props = editor
            .graph
            .descendants(editor.graph.root())
            .into_iter()
            .find(|id| editor.graph.get(*id).is_some_and(|o| o.name == "props"))
            .unwrap();
        editor.graph.get_mut(props).unwrap().folded = true;

        let visible = outline(&editor, OutlineOptions::default());
        assert!(visible.contains("► props"));
        assert!(!visible.contains("crate"));

        let all = outline(
            &editor,
            OutlineOptions {
                all: true,
                types: false,
            },
        );
        assert!(all.contains("crate"));
    }

    #[test]
    fn types_are_appended() {
        let editor = Editor::new(sample_project().unwrap());
        let text = outline(
            &editor,
            OutlineOptions {
                all: false,
                types: true,
            },
        );
        assert!(text.starts_with("▼ program [Program]\n"));
        assert!(text.contains("sparks [ParticleEmitter]"));
    }
}
