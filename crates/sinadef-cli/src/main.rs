//! Main entry point for the `sinadef` binary.

use clap::Parser;
use sinadef_cli::{run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            if let Some(publication) = &summary.publication {
                println!("{}", publication.image_path.display());
                println!("{}", publication.caption);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("sinadef: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
