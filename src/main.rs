use clap::Parser;
use lc3_vm::emulator;
use lc3_vm::errors::ExecutionError;
use lc3_vm::terminal::{self, EchoOptions};
use log::debug;
use std::path::PathBuf;
use std::process;

/// Emulator for the LC-3 educational 16-bit architecture.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Program images to load before execution starts
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

fn main() -> Result<(), ExecutionError> {
    env_logger::init();
    let args = Args::parse();

    let mut emu = match emulator::from_image_files(&args.images) {
        Ok(emu) => emu,
        Err(error) => {
            eprintln!("{error}");
            process::exit(1);
        }
    };

    let raw_mode = match terminal::set_terminal_raw(EchoOptions::EchoOff) {
        Ok(lock) => Some(lock),
        Err(error) => {
            debug!("running without raw mode, stdin is not a terminal: {error}");
            None
        }
    };
    let result = emu.execute();
    // restore the terminal before any exit below
    drop(raw_mode);

    match result {
        Err(ExecutionError::Interrupted) => {
            println!();
            process::exit(-2);
        }
        other => other,
    }
}
