use std::process::ExitCode;

fn main() -> ExitCode {
    match timeline_explorer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
