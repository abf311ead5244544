fn main() {
    if let Err(err) = star_schema_diagram::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
