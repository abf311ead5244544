use crate::config::load_config;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::schema::StarSchema;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "star-schema",
    version,
    about = "Render the retail sales star schema diagram"
)]
pub struct Args {
    /// Output file. Defaults to star_schema.<ext> next to the executable.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
    pub output_format: OutputFormat,

    /// Config JSON file (themeVariables, layout and render overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Also write the computed geometry as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Pixels per diagram unit
    #[arg(short = 's', long = "scale")]
    pub scale: Option<f32>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let path = execute(&args)?;
    println!("Saved: {}", path.display());
    Ok(())
}

/// Renders the diagram as described by `args` and returns the absolute path
/// of the written file.
pub fn execute(args: &Args) -> Result<PathBuf> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        config.render.scale = scale;
    }
    config.render.validate()?;

    let schema = StarSchema::retail_sales()?;
    let layout = compute_layout(&schema, &config.layout)?;
    if let Some(dump_path) = args.dump_layout.as_deref() {
        write_layout_dump(dump_path, &layout)?;
        info!(path = %dump_path.display(), "layout dump written");
    }

    let svg = render_svg(&layout, &config.theme, &config.render);
    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path(args.output_format)?,
    };
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, &output)?,
        OutputFormat::Png => write_output_png(&svg, &output, &config.theme)?,
    }

    Ok(std::path::absolute(&output)?)
}

/// `star_schema.<ext>` in the directory holding the running executable.
pub fn default_output_path(format: OutputFormat) -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Executable path {} has no parent", exe.display()))?;
    Ok(dir.join(format!("star_schema.{}", format.extension())))
}

// Diagnostics go to stderr so stdout carries only the confirmation line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagramError;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("star-schema-cli-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn no_arguments_means_default_png() {
        let args = Args::try_parse_from(["star-schema"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Png);
        assert!(args.output.is_none());
        let path = default_output_path(args.output_format).unwrap();
        assert_eq!(path.file_name().unwrap(), "star_schema.png");
        assert!(path.is_absolute());
        let exe = std::env::current_exe().unwrap();
        assert_eq!(path.parent(), exe.parent());
    }

    #[test]
    fn parses_svg_output_flags() {
        let args = Args::try_parse_from([
            "star-schema",
            "-e",
            "svg",
            "-o",
            "out.svg",
            "--dumpLayout",
            "layout.json",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert_eq!(args.output.as_deref(), Some(Path::new("out.svg")));
        assert_eq!(args.dump_layout.as_deref(), Some(Path::new("layout.json")));
    }

    #[test]
    fn execute_writes_svg_and_dump() {
        let dir = scratch_dir("svg");
        let output = dir.join("diagram.svg");
        let dump = dir.join("layout.json");
        let args = Args {
            output: Some(output.clone()),
            output_format: OutputFormat::Svg,
            config: None,
            dump_layout: Some(dump.clone()),
            scale: Some(50.0),
        };
        let written = execute(&args).unwrap();
        assert_eq!(written, output);
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("width=\"900\" height=\"550\""));
        let dump: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&dump).unwrap()).unwrap();
        assert_eq!(dump["connectors"].as_array().unwrap().len(), 3);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn rejects_unusable_scales() {
        let dir = scratch_dir("scale");
        for scale in [0.0, -1.0, f32::NAN, f32::INFINITY, 100_000.0] {
            let output = dir.join("never.svg");
            let args = Args {
                output: Some(output.clone()),
                output_format: OutputFormat::Svg,
                config: None,
                dump_layout: None,
                scale: Some(scale),
            };
            let err = execute(&args).unwrap_err();
            assert!(err.downcast_ref::<DiagramError>().is_some(), "{scale}: {err}");
            assert!(!output.exists(), "{scale}");
        }
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn parses_nan_scale_flag_then_rejects_it() {
        let args = Args::try_parse_from(["star-schema", "-e", "svg", "-s", "NaN"]).unwrap();
        assert!(args.scale.unwrap().is_nan());
        assert!(execute(&args).is_err());
    }
}
