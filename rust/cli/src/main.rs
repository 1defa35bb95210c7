use std::io;

fn main() {
    if let Err(e) = gridiron_cli::logging::init_logging() {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let code = gridiron_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
