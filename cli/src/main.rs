//! Binary entrypoint for mplsettings-cli.

fn main() {
    if let Err(err) = mplsettings_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
