#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod schema;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::DiagramError;
pub use layout::{Layout, compute_layout};
pub use render::{render_png, render_svg};
pub use schema::StarSchema;
pub use theme::Theme;

/// Lays out the retail sales schema and renders it to an SVG document.
pub fn render_star_schema(config: &Config) -> Result<String, DiagramError> {
    let schema = StarSchema::retail_sales()?;
    let layout = compute_layout(&schema, &config.layout)?;
    Ok(render_svg(&layout, &config.theme, &config.render))
}
