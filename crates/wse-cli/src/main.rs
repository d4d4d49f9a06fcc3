mod cli;

use crate::cli::Cli;

fn main() {
    match Cli::run_from_args() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("wse error: {:#}", err);
            std::process::exit(1);
        }
    }
}
