use crate::config::{MAX_CANVAS_SIDE, RenderConfig};
use crate::error::DiagramError;
use crate::layout::{BoundingBox, CaptionKind, ConnectorLayout, Layout, TableLayout};
use crate::schema::Badge;
use crate::text_metrics::text_width;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// Maps y-up diagram units onto SVG pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    x_min: f32,
    y_max: f32,
    scale: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            x_min: config.x_min,
            y_max: config.y_max,
            scale: config.scale,
            width: config.canvas_width().max(1.0),
            height: config.canvas_height().max(1.0),
        }
    }

    pub fn x(&self, x: f32) -> f32 {
        (x - self.x_min) * self.scale
    }

    pub fn y(&self, y: f32) -> f32 {
        (self.y_max - y) * self.scale
    }

    pub fn point(&self, point: (f32, f32)) -> (f32, f32) {
        (self.x(point.0), self.y(point.1))
    }

    pub fn length(&self, len: f32) -> f32 {
        len * self.scale
    }

    /// Pixel rectangle `(x, y, width, height)` with a top-left origin.
    pub fn rect(&self, bounds: &BoundingBox) -> (f32, f32, f32, f32) {
        (
            self.x(bounds.x),
            self.y(bounds.y),
            self.length(bounds.width),
            self.length(bounds.height),
        )
    }
}

pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let view = Viewport::new(config);
    let (width, height) = (view.width, view.height);
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" xml:space=\"preserve\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    // Lines go underneath the tables; markers and labels on top of them.
    svg.push_str("<g class=\"connectors\">");
    for connector in &layout.connectors {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
            points_to_path(&view, &connector.points),
            theme.line_color,
            config.line_width
        ));
    }
    svg.push_str("</g>");

    for table in &layout.tables {
        push_table(&mut svg, table, theme, config, &view);
    }

    svg.push_str("<g class=\"connector-labels\">");
    for connector in &layout.connectors {
        push_connector_decorations(&mut svg, connector, theme, config, &view);
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"captions\">");
    for caption in &layout.captions {
        let (x, y) = view.point((caption.x, caption.y));
        let (size, fill, extra) = match caption.kind {
            CaptionKind::Title => (
                config.caption_font_size,
                theme.text_dark.as_str(),
                "font-weight=\"bold\"",
            ),
            CaptionKind::Subtitle => (
                config.subtitle_font_size,
                theme.text_muted.as_str(),
                "font-style=\"italic\"",
            ),
        };
        svg.push_str(&text_svg(
            x,
            y,
            "middle",
            &theme.font_family,
            size,
            fill,
            extra,
            &caption.text,
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    debug!(bytes = svg.len(), "svg rendered");
    svg
}

fn push_table(
    svg: &mut String,
    table: &TableLayout,
    theme: &Theme,
    config: &RenderConfig,
    view: &Viewport,
) {
    let colors = theme.table_colors(table.id);
    let radius = config.corner_radius;
    svg.push_str(&format!("<g class=\"table\" data-table=\"{}\">", table.id));

    let (x, y, w, h) = view.rect(&table.bounds);
    svg.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
        colors.body, colors.header, config.table_stroke_width
    ));
    let (x, y, w, h) = view.rect(&table.header);
    svg.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
        colors.header, colors.header, config.table_stroke_width
    ));
    let (x, y, w, h) = view.rect(&table.accent);
    svg.push_str(&format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{w:.2}\" height=\"{h:.2}\" fill=\"{}\"/>",
        colors.header
    ));

    let (tx, ty) = view.point(table.title_anchor);
    svg.push_str(&text_svg(
        tx,
        ty,
        "middle",
        &theme.font_family,
        config.title_font_size,
        &theme.text_light,
        "font-weight=\"bold\"",
        &table.title,
    ));

    for row in &table.rows {
        let row_y = view.y(row.y);
        if let Some(badge) = row.badge.label() {
            let colors = match row.badge {
                Badge::Pk => &theme.pk,
                _ => &theme.fk,
            };
            let size = config.badge_font_size;
            let pad = config.badge_padding * size;
            let text_w = text_width(badge, size, &theme.mono_font_family);
            let bx = view.x(row.badge_x);
            let pill_h = size + 2.0 * pad;
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{pill_h:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
                bx - pad,
                row_y - pill_h / 2.0,
                text_w + 2.0 * pad,
                pill_h / 2.0,
                pill_h / 2.0,
                colors.fill,
                colors.stroke,
                config.badge_stroke_width
            ));
            svg.push_str(&text_svg(
                bx,
                row_y,
                "start",
                &theme.mono_font_family,
                size,
                &colors.stroke,
                "font-weight=\"bold\"",
                badge,
            ));
        }

        svg.push_str(&text_svg(
            view.x(row.name_x),
            row_y,
            "start",
            &theme.mono_font_family,
            config.column_font_size,
            &theme.text_dark,
            "",
            &row.name,
        ));
        svg.push_str(&text_svg(
            view.x(row.type_x),
            row_y,
            "end",
            &theme.mono_font_family,
            config.type_font_size,
            &theme.text_muted,
            "",
            &row.data_type,
        ));
    }

    for sep in &table.separators {
        let y = view.y(sep.y);
        svg.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            view.x(sep.x1),
            view.x(sep.x2),
            theme.separator_color,
            config.separator_width
        ));
    }

    svg.push_str("</g>");
}

fn push_connector_decorations(
    svg: &mut String,
    connector: &ConnectorLayout,
    theme: &Theme,
    config: &RenderConfig,
    view: &Viewport,
) {
    let (dx, dy) = view.point(connector.destination());
    svg.push_str(&format!(
        "<circle cx=\"{dx:.2}\" cy=\"{dy:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
        config.target_marker_radius, theme.line_color
    ));
    let (sx, sy) = view.point(connector.source());
    svg.push_str(&format!(
        "<circle cx=\"{sx:.2}\" cy=\"{sy:.2}\" r=\"{:.2}\" fill=\"#FFFFFF\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
        config.source_marker_radius, theme.line_color, config.marker_stroke_width
    ));

    if connector.label.is_empty() {
        return;
    }
    let (lx, ly) = view.point(connector.label_anchor);
    let size = config.label_font_size;
    let pad = config.label_padding * size;
    let label_w = text_width(&connector.label, size, &theme.mono_font_family) + 2.0 * pad;
    let label_h = size + 2.0 * pad;
    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{label_w:.2}\" height=\"{label_h:.2}\" rx=\"{pad:.2}\" ry=\"{pad:.2}\" fill=\"{}\" fill-opacity=\"{}\"/>",
        lx - label_w / 2.0,
        ly - label_h / 2.0,
        theme.label_background,
        theme.label_background_opacity
    ));
    svg.push_str(&text_svg(
        lx,
        ly,
        "middle",
        &theme.mono_font_family,
        size,
        &theme.line_color,
        "font-weight=\"bold\"",
        &connector.label,
    ));
}

fn points_to_path(view: &Viewport, points: &[(f32, f32)]) -> String {
    let mut d = String::new();
    for (idx, point) in points.iter().enumerate() {
        let (x, y) = view.point(*point);
        let cmd = if idx == 0 { "M" } else { " L" };
        d.push_str(&format!("{cmd} {x:.2} {y:.2}"));
    }
    d
}

#[allow(clippy::too_many_arguments)]
fn text_svg(
    x: f32,
    y: f32,
    anchor: &str,
    font_family: &str,
    font_size: f32,
    fill: &str,
    extra: &str,
    content: &str,
) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" dominant-baseline=\"central\" xml:space=\"preserve\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\" {extra}>{}</text>",
        escape_xml(font_family),
        escape_xml(content)
    )
}

pub fn write_output_svg(svg: &str, output: &Path) -> Result<()> {
    std::fs::write(output, svg)?;
    info!(path = %output.display(), "svg written");
    Ok(())
}

#[cfg(feature = "png")]
pub fn render_png(svg: &str, theme: &Theme) -> Result<Vec<u8>, DiagramError> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|err| DiagramError::Svg(err.to_string()))?;
    let size = tree.size().to_int_size();
    if size.width() as f32 > MAX_CANVAS_SIDE || size.height() as f32 > MAX_CANVAS_SIDE {
        return Err(DiagramError::CanvasTooLarge {
            width: size.width() as f32,
            height: size.height() as f32,
            max: MAX_CANVAS_SIDE,
        });
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height()).ok_or(
        DiagramError::Pixmap {
            width: size.width(),
            height: size.height(),
        },
    )?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .encode_png()
        .map_err(|err| DiagramError::PngEncode(err.to_string()))
}

#[cfg(not(feature = "png"))]
pub fn render_png(_svg: &str, _theme: &Theme) -> Result<Vec<u8>, DiagramError> {
    Err(DiagramError::PngUnsupported)
}

pub fn write_output_png(svg: &str, output: &Path, theme: &Theme) -> Result<(), DiagramError> {
    let png = render_png(svg, theme)?;
    std::fs::write(output, &png)?;
    info!(path = %output.display(), bytes = png.len(), "png written");
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LayoutConfig};
    use crate::layout::compute_layout;
    use crate::schema::StarSchema;

    fn retail_svg() -> String {
        let config = Config::default();
        let schema = StarSchema::retail_sales().unwrap();
        let layout = compute_layout(&schema, &LayoutConfig::default()).unwrap();
        render_svg(&layout, &config.theme, &config.render)
    }

    #[test]
    fn render_svg_basic() {
        let svg = retail_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"1800\" height=\"1100\""));
        assert!(svg.contains("FactSales  (Fact Table)"));
        assert!(svg.contains("Retail Sales Data Warehouse"));
    }

    #[test]
    fn every_table_gets_a_group() {
        let svg = retail_svg();
        for name in ["FactSales", "DimDate", "DimProduct", "DimCustomer"] {
            assert!(svg.contains(&format!("data-table=\"{name}\"")), "missing {name}");
        }
        assert!(svg.contains("fill=\"#C0392B\""));
        assert!(svg.contains("fill=\"#E8DAEF\""));
    }

    #[test]
    fn badges_only_for_keyed_columns() {
        let svg = retail_svg();
        // sale_id and one PK per dimension, three FKs on the fact table.
        assert_eq!(svg.matches(">PK</text>").count(), 4);
        assert_eq!(svg.matches(">FK</text>").count(), 3);
    }

    #[test]
    fn connectors_have_markers_and_labels() {
        let svg = retail_svg();
        assert_eq!(svg.matches("<circle").count(), 6);
        assert_eq!(svg.matches("fill=\"#FFFFFF\" stroke=").count(), 3);
        for label in ["date_id", "product_id", "customer_id"] {
            assert!(svg.contains(&format!("font-weight=\"bold\">{label}</text>")));
        }
    }

    #[test]
    fn viewport_flips_y_axis() {
        let view = Viewport::new(&RenderConfig::default());
        assert_eq!(view.point((-1.0, 2.5)), (0.0, 0.0));
        assert_eq!(view.point((17.0, -8.5)), (1800.0, 1100.0));
        assert!(view.y(0.0) > view.y(1.0));
    }

    #[test]
    fn repeated_spaces_are_preserved() {
        let svg = retail_svg();
        assert!(svg.starts_with("<svg") && svg.contains("xml:space=\"preserve\">"));
        assert_eq!(
            svg.matches("<text ").count(),
            svg.matches("xml:space=\"preserve\" font-family").count()
        );
        assert!(svg.contains(">FactSales  (Fact Table)</text>"));
        assert!(svg.contains("Star Schema  \u{2014}  Retail"));
    }

    #[cfg(feature = "png")]
    #[test]
    fn oversized_svg_is_rejected_before_allocation() {
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100000\" height=\"10\"/>";
        let err = render_png(svg, &Theme::default()).unwrap_err();
        assert!(matches!(err, DiagramError::CanvasTooLarge { .. }));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(retail_svg(), retail_svg());
    }
}
