use std::{fs::File, io::Read, process::exit};

use clap::{CommandFactory, Parser, Subcommand};
use darkload::{WEIGHTS_HEADER_SIZE, model_name};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header fields and parameter count of a .weights file
    Inspect {
        /// Path to the .weights file
        weights_path: String,
    },
    /// Derive the canonical model name from a parameter file path
    Name {
        /// Path to a .weights file or checkpoint
        file_path: String,
    },
}

fn inspect(weights_path: &str) -> Result<(), String> {
    let mut file =
        File::open(weights_path).map_err(|error| error.to_string())?;
    let size = file
        .metadata()
        .map_err(|error| error.to_string())?
        .len();
    if size < WEIGHTS_HEADER_SIZE {
        return Err(format!(
            "file is {size} bytes, smaller than the {WEIGHTS_HEADER_SIZE}-byte header"
        ));
    }

    let mut header = [0u8; WEIGHTS_HEADER_SIZE as usize];
    file.read_exact(&mut header).map_err(|error| error.to_string())?;
    let words: Vec<i32> = header
        .chunks_exact(4)
        .map(|bytes| i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect();
    let float_count = (size - WEIGHTS_HEADER_SIZE) / 4;

    println!("version: {}.{}.{}", words[0], words[1], words[2]);
    println!("seen: {}", words[3]);
    println!("parameters: {float_count} float32 values ({size} bytes total)");
    if let Ok(name) = model_name(weights_path) {
        println!("model: {name}");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Inspect {
            weights_path,
        }) => {
            if let Err(reason) = inspect(&weights_path) {
                eprintln!("Failed to inspect {weights_path}: {reason}");
                exit(1);
            }
        },
        Some(Commands::Name {
            file_path,
        }) => match model_name(&file_path) {
            Ok(name) => println!("{name}"),
            Err(error) => {
                eprintln!("{error}");
                exit(1);
            },
        },
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().unwrap();
        },
    }
}
