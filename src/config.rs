use crate::error::DiagramError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest canvas side, in pixels, that will be rendered.
pub const MAX_CANVAS_SIDE: f32 = 16384.0;

/// Table geometry, in diagram units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub header_height: f32,
    pub row_height: f32,
    pub padding: f32,
    /// Gap between the badge column and the column name.
    pub name_offset: f32,
    pub accent_height: f32,
    pub separator_inset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            header_height: 0.50,
            row_height: 0.38,
            padding: 0.18,
            name_offset: 0.45,
            accent_height: 0.08,
            separator_inset: 0.06,
        }
    }
}

/// Canvas bounds (diagram units) plus everything sized in output pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    /// Output pixels per diagram unit.
    pub scale: f32,
    pub corner_radius: f32,
    pub table_stroke_width: f32,
    pub separator_width: f32,
    pub line_width: f32,
    pub source_marker_radius: f32,
    pub target_marker_radius: f32,
    pub marker_stroke_width: f32,
    pub badge_stroke_width: f32,
    pub title_font_size: f32,
    pub column_font_size: f32,
    pub type_font_size: f32,
    pub badge_font_size: f32,
    pub label_font_size: f32,
    pub caption_font_size: f32,
    pub subtitle_font_size: f32,
    /// Badge pill padding, as a fraction of the badge font size.
    pub badge_padding: f32,
    /// Label background padding, as a fraction of the label font size.
    pub label_padding: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            x_min: -1.0,
            x_max: 17.0,
            y_min: -8.5,
            y_max: 2.5,
            scale: 100.0,
            corner_radius: 6.0,
            table_stroke_width: 1.7,
            separator_width: 0.7,
            line_width: 2.5,
            source_marker_radius: 4.0,
            target_marker_radius: 5.5,
            marker_stroke_width: 2.1,
            badge_stroke_width: 0.9,
            title_font_size: 17.0,
            column_font_size: 14.0,
            type_font_size: 12.5,
            badge_font_size: 11.0,
            label_font_size: 11.5,
            caption_font_size: 23.0,
            subtitle_font_size: 14.0,
            badge_padding: 0.15,
            label_padding: 0.2,
        }
    }
}

impl RenderConfig {
    pub fn canvas_width(&self) -> f32 {
        (self.x_max - self.x_min) * self.scale
    }

    pub fn canvas_height(&self) -> f32 {
        (self.y_max - self.y_min) * self.scale
    }

    /// Rejects scales that would produce an empty, non-finite or oversized
    /// canvas.
    pub fn validate(&self) -> Result<(), DiagramError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(DiagramError::InvalidScale(self.scale));
        }
        let (width, height) = (self.canvas_width(), self.canvas_height());
        if !(width.is_finite() && height.is_finite())
            || width > MAX_CANVAS_SIDE
            || height > MAX_CANVAS_SIDE
        {
            return Err(DiagramError::CanvasTooLarge {
                width,
                height,
                max: MAX_CANVAS_SIDE,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    mono_font_family: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    header_text_color: Option<String>,
    muted_text_color: Option<String>,
    line_color: Option<String>,
    separator_color: Option<String>,
    label_background: Option<String>,
    label_background_opacity: Option<f32>,
    pk_color: Option<String>,
    pk_background: Option<String>,
    fk_color: Option<String>,
    fk_background: Option<String>,
    fact_header: Option<String>,
    fact_body: Option<String>,
    dim_date_header: Option<String>,
    dim_date_body: Option<String>,
    dim_product_header: Option<String>,
    dim_product_body: Option<String>,
    dim_customer_header: Option<String>,
    dim_customer_body: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    header_height: Option<f32>,
    row_height: Option<f32>,
    padding: Option<f32>,
    name_offset: Option<f32>,
    accent_height: Option<f32>,
    separator_inset: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f32>,
    corner_radius: Option<f32>,
    line_width: Option<f32>,
    title_font_size: Option<f32>,
    column_font_size: Option<f32>,
    type_font_size: Option<f32>,
    badge_font_size: Option<f32>,
    label_font_size: Option<f32>,
    caption_font_size: Option<f32>,
    subtitle_font_size: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    let mut config = Config::default();

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.mono_font_family {
            theme.mono_font_family = v;
        }
        if let Some(v) = vars.background {
            theme.background = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_dark = v;
        }
        if let Some(v) = vars.header_text_color {
            theme.text_light = v;
        }
        if let Some(v) = vars.muted_text_color {
            theme.text_muted = v;
        }
        if let Some(v) = vars.line_color {
            theme.line_color = v;
        }
        if let Some(v) = vars.separator_color {
            theme.separator_color = v;
        }
        if let Some(v) = vars.label_background {
            theme.label_background = v;
        }
        if let Some(v) = vars.label_background_opacity {
            theme.label_background_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.pk_color {
            theme.pk.stroke = v;
        }
        if let Some(v) = vars.pk_background {
            theme.pk.fill = v;
        }
        if let Some(v) = vars.fk_color {
            theme.fk.stroke = v;
        }
        if let Some(v) = vars.fk_background {
            theme.fk.fill = v;
        }
        if let Some(v) = vars.fact_header {
            theme.fact.header = v;
        }
        if let Some(v) = vars.fact_body {
            theme.fact.body = v;
        }
        if let Some(v) = vars.dim_date_header {
            theme.dim_date.header = v;
        }
        if let Some(v) = vars.dim_date_body {
            theme.dim_date.body = v;
        }
        if let Some(v) = vars.dim_product_header {
            theme.dim_product.header = v;
        }
        if let Some(v) = vars.dim_product_body {
            theme.dim_product.body = v;
        }
        if let Some(v) = vars.dim_customer_header {
            theme.dim_customer.header = v;
        }
        if let Some(v) = vars.dim_customer_body {
            theme.dim_customer.body = v;
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.header_height {
            config.layout.header_height = v;
        }
        if let Some(v) = layout.row_height {
            config.layout.row_height = v;
        }
        if let Some(v) = layout.padding {
            config.layout.padding = v;
        }
        if let Some(v) = layout.name_offset {
            config.layout.name_offset = v;
        }
        if let Some(v) = layout.accent_height {
            config.layout.accent_height = v;
        }
        if let Some(v) = layout.separator_inset {
            config.layout.separator_inset = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
        if let Some(v) = render.corner_radius {
            config.render.corner_radius = v;
        }
        if let Some(v) = render.line_width {
            config.render.line_width = v;
        }
        if let Some(v) = render.title_font_size {
            config.render.title_font_size = v;
        }
        if let Some(v) = render.column_font_size {
            config.render.column_font_size = v;
        }
        if let Some(v) = render.type_font_size {
            config.render.type_font_size = v;
        }
        if let Some(v) = render.badge_font_size {
            config.render.badge_font_size = v;
        }
        if let Some(v) = render.label_font_size {
            config.render.label_font_size = v;
        }
        if let Some(v) = render.caption_font_size {
            config.render.caption_font_size = v;
        }
        if let Some(v) = render.subtitle_font_size {
            config.render.subtitle_font_size = v;
        }
    }

    config.render.validate()?;
    Ok(config)
}
