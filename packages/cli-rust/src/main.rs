//! servicify binary entry point

fn main() -> std::process::ExitCode {
    servicify::run_cli()
}
