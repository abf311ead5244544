mod routing;
mod table;
pub(crate) mod types;

pub use routing::{anchor_point, label_anchor, route_connection, route_points};
pub use table::{layout_table, table_height};
pub use types::*;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::DiagramError;
use crate::schema::{StarSchema, TableId};

/// Computes every box, row, connector and caption position of the diagram.
pub fn compute_layout(schema: &StarSchema, config: &LayoutConfig) -> Result<Layout, DiagramError> {
    let tables: Vec<TableLayout> = schema
        .tables
        .iter()
        .map(|table| {
            let layout = layout_table(table, config);
            debug!(
                table = %layout.id,
                rows = layout.rows.len(),
                height = layout.bounds.height,
                "table laid out"
            );
            layout
        })
        .collect();

    let mut connectors = Vec::with_capacity(schema.relationships.len());
    for rel in &schema.relationships {
        let from = find_bounds(&tables, rel.from)?;
        let to = find_bounds(&tables, rel.to)?;
        let connector = route_connection(
            (rel.from, from),
            (rel.to, to),
            rel.from_side,
            rel.to_side,
            rel.label,
        );
        debug!(
            from = %rel.from,
            to = %rel.to,
            label = rel.label,
            points = connector.points.len(),
            "connector routed"
        );
        connectors.push(connector);
    }

    let captions = vec![
        CaptionLayout {
            kind: CaptionKind::Title,
            text: schema.title.text.to_string(),
            x: schema.title.x,
            y: schema.title.y,
        },
        CaptionLayout {
            kind: CaptionKind::Subtitle,
            text: schema.subtitle.text.to_string(),
            x: schema.subtitle.x,
            y: schema.subtitle.y,
        },
    ];

    Ok(Layout {
        tables,
        connectors,
        captions,
    })
}

fn find_bounds(tables: &[TableLayout], id: TableId) -> Result<&BoundingBox, DiagramError> {
    tables
        .iter()
        .find(|table| table.id == id)
        .map(|table| &table.bounds)
        .ok_or_else(|| DiagramError::MissingTable(id.to_string()))
}
