use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::DiagramError;
use crate::schema::{Badge, TableId};

/// Axis-aligned box in diagram units. `(x, y)` is the top-left corner and y
/// grows upwards, so the box spans `y - height ..= y` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y - self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

impl FromStr for Side {
    type Err = DiagramError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            "top" => Ok(Side::Top),
            "bottom" => Ok(Side::Bottom),
            other => Err(DiagramError::UnknownSide(other.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RowLayout {
    pub badge: Badge,
    pub name: String,
    pub data_type: String,
    /// Vertical centre of the row.
    pub y: f32,
    pub badge_x: f32,
    pub name_x: f32,
    /// Right edge the type label is aligned to.
    pub type_x: f32,
}

/// Horizontal rule between two rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separator {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    pub id: TableId,
    pub title: String,
    pub bounds: BoundingBox,
    pub header: BoundingBox,
    pub accent: BoundingBox,
    pub title_anchor: (f32, f32),
    pub rows: Vec<RowLayout>,
    pub separators: Vec<Separator>,
}

#[derive(Debug, Clone)]
pub struct ConnectorLayout {
    pub from: TableId,
    pub to: TableId,
    pub from_side: Side,
    pub to_side: Side,
    pub points: Vec<(f32, f32)>,
    pub label: String,
    pub label_anchor: (f32, f32),
}

impl ConnectorLayout {
    pub fn source(&self) -> (f32, f32) {
        self.points[0]
    }

    pub fn destination(&self) -> (f32, f32) {
        self.points[self.points.len() - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionKind {
    Title,
    Subtitle,
}

#[derive(Debug, Clone)]
pub struct CaptionLayout {
    pub kind: CaptionKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub tables: Vec<TableLayout>,
    pub connectors: Vec<ConnectorLayout>,
    pub captions: Vec<CaptionLayout>,
}

impl Layout {
    pub fn table(&self, id: TableId) -> Option<&TableLayout> {
        self.tables.iter().find(|table| table.id == id)
    }
}
