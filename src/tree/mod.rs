//! Outliner rows: layout, folding, pointer and drag/drop handling.

pub mod container;
pub mod drag;
pub mod element;
pub mod menu;
pub mod row;
pub mod view;

pub use container::{Container, NotMounted, ViewRequest};
pub use drag::{DataTransfer, DropOutcome, DropRejection, DropZone, UUID_KEY};
pub use element::TreeElement;
pub use menu::{
    menu_entries, open_editor, ContextMenu, FixedAnswer, MenuAction, Prompt, MENU_ENTRY_SIZE,
};
pub use row::{Arrow, ArrowIcon, Border, LayoutMetrics, Point, Row, RowId, Size};
pub use view::{Hit, Outliner};
