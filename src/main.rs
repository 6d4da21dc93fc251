use std::process::ExitCode;

use dmviz::ui::output;

fn main() -> ExitCode {
    match dmviz::cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
