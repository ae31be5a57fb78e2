use clap::{Parser, Subcommand};
use error_set::error_set;
use std::io::Read;
use std::path::PathBuf;

error_set! {
    /// Errors from the command line front end
    CliError := {
        #[display("Failed to read {path}: {message}")]
        ReadFailed { path: String, message: String },
        #[display("Failed to encode JSON: {message}")]
        EncodeFailed { message: String },
    }
}

#[derive(Parser)]
#[command(name = "patch-groups")]
#[command(about = "Show how a unified diff splits into files, hunks and groups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a patch and print its groups
    Show {
        /// Patch file to read (stdin when omitted)
        file: Option<PathBuf>,
        /// Print the parsed model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report whether each name would be shown as an image
    IsImage {
        /// File names (e.g. "assets/logo.png")
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn read_patch(file: Option<&PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| CliError::ReadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| CliError::ReadFailed {
                    path: "stdin".to_string(),
                    message: e.to_string(),
                })?;
            Ok(text)
        }
    }
}

fn main() -> Result<(), CliError> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, json } => {
            let files = patch_groups::parse(&read_patch(file.as_ref())?);
            log::info!("parsed {} file(s)", files.len());

            if json {
                let encoded = serde_json::to_string_pretty(&files)
                    .map_err(|e| CliError::EncodeFailed {
                        message: e.to_string(),
                    })?;
                println!("{encoded}");
            } else {
                print!("{}", patch_groups::format_files(&files));
            }
        }
        Commands::IsImage { names } => {
            for name in names {
                println!("{name}: {}", patch_groups::is_image_file(&name));
            }
        }
    }

    Ok(())
}
