use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match chess_search::uci::run_uci_loop() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("uci loop stopped: {e}");
            ExitCode::FAILURE
        }
    }
}
