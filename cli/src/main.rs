//! Binary entrypoint for ccfont

fn main() {
    if let Err(err) = ccfont_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
