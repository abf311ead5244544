use std::path::PathBuf;

use star_schema_diagram::config::Config;
use star_schema_diagram::layout::{compute_layout, table_height};
use star_schema_diagram::schema::{StarSchema, TableId};
use star_schema_diagram::render_star_schema;

fn scratch_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("star-schema-suite-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir.join(name)
}

#[test]
fn every_table_height_matches_its_row_count() {
    let config = Config::default();
    let schema = StarSchema::retail_sales().expect("schema");
    let layout = compute_layout(&schema, &config.layout).expect("layout");

    for table in &schema.tables {
        let laid_out = layout.table(table.id).expect("table laid out");
        let expected = config.layout.header_height
            + table.columns.len() as f32 * config.layout.row_height
            + config.layout.padding;
        assert!((laid_out.bounds.height - expected).abs() < 1e-4, "{}", table.id);
        assert_eq!(laid_out.bounds.height, table_height(table.columns.len(), &config.layout));
        for pair in laid_out.rows.windows(2) {
            let step = pair[0].y - pair[1].y;
            assert!((step - config.layout.row_height).abs() < 1e-4, "{}", table.id);
        }
    }
}

#[test]
fn labels_sit_between_fact_and_dimension() {
    let config = Config::default();
    let schema = StarSchema::retail_sales().expect("schema");
    let layout = compute_layout(&schema, &config.layout).expect("layout");
    let fact = layout.table(TableId::FactSales).unwrap().bounds;

    for conn in &layout.connectors {
        assert_eq!(conn.points.len(), 4);
        let (p1, p2) = (conn.points[1], conn.points[2]);
        assert!((conn.label_anchor.0 - (p1.0 + p2.0) / 2.0).abs() < 1e-4);
        assert!((conn.label_anchor.1 - (p1.1 + p2.1) / 2.0).abs() < 1e-4);

        let target = layout.table(conn.to).unwrap().bounds;
        let (lo, hi) = if target.x < fact.x {
            (target.right(), fact.left())
        } else {
            (fact.right(), target.left())
        };
        assert!(conn.label_anchor.0 > lo && conn.label_anchor.0 < hi, "{}", conn.label);
    }
}

#[test]
fn svg_render_is_complete_and_stable() {
    let config = Config::default();
    let first = render_star_schema(&config).expect("render");
    let second = render_star_schema(&config).expect("render");
    assert_eq!(first, second);
    assert!(first.contains("<svg"));
    assert!(first.contains("</svg>"));
    for text in [
        "FactSales  (Fact Table)",
        "DimDate",
        "DimProduct",
        "DimCustomer",
        "payment_method",
        "fiscal_year",
        "preferred_location",
        "FactSales references three dimension tables via foreign keys",
    ] {
        assert!(first.contains(text), "missing {text}");
    }
}

#[cfg(feature = "png")]
#[test]
fn png_output_is_written_and_reproducible() {
    use star_schema_diagram::render::write_output_png;

    let config = Config::default();
    let svg = render_star_schema(&config).expect("render");
    let path = scratch_path("star_schema.png");

    write_output_png(&svg, &path, &config.theme).expect("first write");
    let first = std::fs::read(&path).expect("read png");
    write_output_png(&svg, &path, &config.theme).expect("second write");
    let second = std::fs::read(&path).expect("read png");

    assert!(first.len() > 8);
    assert_eq!(&first[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(first, second);
    let _ = std::fs::remove_file(path);
}

#[cfg(feature = "cli")]
#[test]
fn binary_prints_single_saved_line() {
    let output = scratch_path("cli.svg");
    let run = std::process::Command::new(env!("CARGO_BIN_EXE_star-schema"))
        .args(["-e", "svg", "-o"])
        .arg(&output)
        .output()
        .expect("run binary");
    assert!(run.status.success());

    let stdout = String::from_utf8(run.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("Saved: "));
    assert!(lines[0].ends_with("cli.svg"));
    assert!(std::fs::metadata(&output).expect("output exists").len() > 0);
    let _ = std::fs::remove_file(output);
}

#[cfg(all(feature = "cli", feature = "png"))]
#[test]
fn binary_without_arguments_writes_png_next_to_itself() {
    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    let exe = std::path::Path::new(env!("CARGO_BIN_EXE_star-schema"));
    // The binary resolves itself through the OS, which yields a canonical path.
    let expected = std::fs::canonicalize(exe)
        .expect("canonical binary path")
        .with_file_name("star_schema.png");

    let mut renders = Vec::new();
    for _ in 0..2 {
        let _ = std::fs::remove_file(&expected);
        let run = std::process::Command::new(exe)
            .output()
            .expect("run binary");
        assert!(run.status.success(), "{}", String::from_utf8_lossy(&run.stderr));
        let stdout = String::from_utf8(run.stdout).expect("utf8 stdout");
        assert_eq!(stdout, format!("Saved: {}\n", expected.display()));

        let bytes = std::fs::read(&expected).expect("default png written");
        assert!(bytes.starts_with(PNG_SIGNATURE));
        renders.push(bytes);
    }
    assert_eq!(renders[0], renders[1]);
    let _ = std::fs::remove_file(expected);
}

#[cfg(feature = "cli")]
#[test]
fn binary_rejects_nan_scale() {
    let output = scratch_path("nan.svg");
    let run = std::process::Command::new(env!("CARGO_BIN_EXE_star-schema"))
        .args(["-e", "svg", "-s", "NaN", "-o"])
        .arg(&output)
        .output()
        .expect("run binary");
    assert!(!run.status.success());
    assert!(run.stdout.is_empty());
    assert!(!output.exists());
}
