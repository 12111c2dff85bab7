fn main() {
    if let Err(e) = fathom_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
