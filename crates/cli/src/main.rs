//! Guardmark CLI entry point.

fn main() {
    if let Err(e) = guardmark_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
