use crate::layout::{BoundingBox, CaptionKind, Layout, Side};
use crate::schema::Badge;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub tables: Vec<TableDump>,
    pub connectors: Vec<ConnectorDump>,
    pub captions: Vec<CaptionDump>,
}

#[derive(Debug, Serialize)]
pub struct TableDump {
    pub id: String,
    pub title: String,
    pub bounds: BoundingBox,
    pub rows: Vec<RowDump>,
}

#[derive(Debug, Serialize)]
pub struct RowDump {
    pub badge: Badge,
    pub name: String,
    pub data_type: String,
    pub y: f32,
}

#[derive(Debug, Serialize)]
pub struct ConnectorDump {
    pub from: String,
    pub to: String,
    pub from_side: Side,
    pub to_side: Side,
    pub label: String,
    pub label_anchor: [f32; 2],
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct CaptionDump {
    pub kind: CaptionKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let tables = layout
            .tables
            .iter()
            .map(|table| TableDump {
                id: table.id.to_string(),
                title: table.title.clone(),
                bounds: table.bounds,
                rows: table
                    .rows
                    .iter()
                    .map(|row| RowDump {
                        badge: row.badge,
                        name: row.name.clone(),
                        data_type: row.data_type.clone(),
                        y: row.y,
                    })
                    .collect(),
            })
            .collect();

        let connectors = layout
            .connectors
            .iter()
            .map(|conn| ConnectorDump {
                from: conn.from.to_string(),
                to: conn.to.to_string(),
                from_side: conn.from_side,
                to_side: conn.to_side,
                label: conn.label.clone(),
                label_anchor: [conn.label_anchor.0, conn.label_anchor.1],
                points: conn.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        let captions = layout
            .captions
            .iter()
            .map(|caption| CaptionDump {
                kind: caption.kind,
                text: caption.text.clone(),
                x: caption.x,
                y: caption.y,
            })
            .collect();

        LayoutDump {
            tables,
            connectors,
            captions,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
