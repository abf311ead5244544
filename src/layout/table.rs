use crate::config::LayoutConfig;
use crate::schema::Table;

use super::{BoundingBox, RowLayout, Separator, TableLayout};

pub fn table_height(rows: usize, config: &LayoutConfig) -> f32 {
    config.header_height + rows as f32 * config.row_height + config.padding
}

/// Lays out a table whose top-left corner sits at `(table.x, table.y)`.
pub fn layout_table(table: &Table, config: &LayoutConfig) -> TableLayout {
    let (x, y, width) = (table.x, table.y, table.width);
    let row_count = table.columns.len();
    let bounds = BoundingBox::new(x, y, width, table_height(row_count, config));
    let header = BoundingBox::new(x, y, width, config.header_height);
    // Straddles the header's lower edge so the rounded corners there vanish.
    let accent = BoundingBox::new(
        x,
        y - config.header_height + config.accent_height / 2.0,
        width,
        config.accent_height,
    );

    let badge_x = x + config.padding;
    let name_x = badge_x + config.name_offset;
    let type_x = x + width - config.padding;
    let body_top = y - config.header_height;

    let rows = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| RowLayout {
            badge: column.badge,
            name: column.name.to_string(),
            data_type: column.data_type.to_string(),
            y: body_top - (idx as f32 + 0.5) * config.row_height,
            badge_x,
            name_x,
            type_x,
        })
        .collect();

    let separators = (1..row_count)
        .map(|idx| Separator {
            x1: x + config.separator_inset,
            x2: x + width - config.separator_inset,
            y: body_top - idx as f32 * config.row_height,
        })
        .collect();

    TableLayout {
        id: table.id,
        title: table.title.to_string(),
        bounds,
        header,
        accent,
        title_anchor: (header.center_x(), header.center_y()),
        rows,
        separators,
    }
}
