use clap::{Parser, Subcommand};
use cpp2cs_driver::{Driver, DEFAULT_OUTPUT_DIR};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cpp2cs")]
#[command(author, version, about = "Structural C++ to C# source converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of C++ headers and implementations to C#
    Convert {
        /// Directory scanned recursively for .h/.cpp files
        source_dir: PathBuf,

        /// Where generated .cs files go (default: <source-dir>/Generated_CS)
        output_dir: Option<PathBuf>,

        /// Convert only these files, by name with extension
        #[arg(long, value_delimiter = ',')]
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            source_dir,
            output_dir,
            files,
        } => {
            let output = output_dir.unwrap_or_else(|| source_dir.join(DEFAULT_OUTPUT_DIR));
            let driver = Driver::new();
            let summary = if files.is_empty() {
                driver.convert_directory(&source_dir, &output)?
            } else {
                driver.convert_files(&source_dir, &output, &files)?
            };
            println!(
                "Converted {} types from {} headers and {} implementation files into {} ({} files)",
                summary.types,
                summary.headers,
                summary.implementations,
                output.display(),
                summary.written.len(),
            );
        }
    }
    Ok(())
}
