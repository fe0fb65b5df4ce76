use std::process::ExitCode;

fn main() -> ExitCode {
    crmsuite_cli::run()
}
