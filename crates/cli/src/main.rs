use std::process::ExitCode;

fn main() -> ExitCode {
    lana_cli::run()
}
