//! The visual record behind one outliner row.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::OutlinerConfig;

static NEXT_ROW: AtomicU64 = AtomicU64::new(1);

/// Identifier of a row, unique for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ROW.fetch_add(1, Ordering::Relaxed))
    }
}

/// Pixel metrics shared by layout and drop-zone classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub row_height: i32,
    pub indent: i32,
    pub arrow_left: i32,
    pub icon_left: i32,
    pub label_left: i32,
    pub drop_above: i32,
    pub drop_below: i32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::from(&OutlinerConfig::default())
    }
}

impl From<&OutlinerConfig> for LayoutMetrics {
    fn from(config: &OutlinerConfig) -> Self {
        Self {
            row_height: config.row_height,
            indent: config.indent,
            arrow_left: config.arrow_left,
            icon_left: config.icon_left,
            label_left: config.label_left,
            drop_above: config.drop_above,
            drop_below: config.drop_below,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Glyph of the fold arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowIcon {
    Expanded,
    Collapsed,
}

impl ArrowIcon {
    pub fn for_folded(folded: bool) -> Self {
        if folded {
            ArrowIcon::Collapsed
        } else {
            ArrowIcon::Expanded
        }
    }

    pub fn resource(self) -> &'static str {
        match self {
            ArrowIcon::Expanded => "icons/misc/arrow_down.png",
            ArrowIcon::Collapsed => "icons/misc/arrow_right.png",
        }
    }
}

/// Drop position decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Border {
    #[default]
    None,
    Top,
    Bottom,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub icon: ArrowIcon,
    pub displayed: bool,
    pub left: i32,
    /// Pointer is over the arrow.
    pub highlighted: bool,
}

impl Arrow {
    /// Opacity used when drawing the arrow.
    pub fn opacity(&self) -> f32 {
        if self.highlighted {
            1.0
        } else {
            0.5
        }
    }
}

/// Row state as it would be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    pub position: Point,
    pub size: Size,
    pub displayed: bool,
    pub arrow: Arrow,
    pub icon: String,
    pub icon_left: i32,
    pub label: String,
    pub label_left: i32,
    pub border: Border,
    pub background: Option<String>,
    border_writes: u32,
}

impl Row {
    pub(crate) fn new() -> Self {
        let metrics = LayoutMetrics::default();
        Self {
            id: RowId::next(),
            position: Point::default(),
            size: Size {
                width: 0,
                height: metrics.row_height,
            },
            displayed: true,
            arrow: Arrow {
                icon: ArrowIcon::Expanded,
                displayed: true,
                left: metrics.arrow_left,
                highlighted: false,
            },
            icon: ArrowIcon::Expanded.resource().to_string(),
            icon_left: metrics.icon_left,
            label: String::new(),
            label_left: metrics.label_left,
            border: Border::None,
            background: None,
            border_writes: 0,
        }
    }

    /// Replace the border decoration.
    pub(crate) fn set_border(&mut self, border: Border) {
        self.border = border;
        self.border_writes += 1;
    }

    /// How many times the border decoration was written.
    pub fn border_writes(&self) -> u32 {
        self.border_writes
    }
}
