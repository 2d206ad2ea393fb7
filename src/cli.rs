use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};

/// Default output file, written to the working directory
pub const DEFAULT_OUTPUT: &str = "composite.json";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Merge game server ban lists into one deduplicated list.")]
pub struct Args {
    /// Ban list files to merge, processed in order
    pub files: Vec<PathBuf>,

    /// Output file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Show a progress bar while reading input files
    #[arg(long = "progress")]
    pub progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Base name of the running executable, or the command name if unknown
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| Args::command().get_name().to_string())
}

/// Usage text printed when no input files are given
pub fn usage(program: &str, output: &Path) -> String {
    format!(
        "Usage: {} <file1> <file2> ...\nOutput file: {}",
        program,
        output.display()
    )
}
