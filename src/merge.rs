use crate::ban::BanEntry;
use crate::cli::Args;
use crate::dedup::dedup;
use crate::error::MergeError;
use crate::parse::parse;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    pub files: usize,
    pub entries: usize,
    pub bytes: usize,
    pub output: PathBuf,
}

/// Read a whole ban list file into memory
pub fn load(path: &Path) -> Result<Vec<u8>, MergeError> {
    let mut file = File::open(path).map_err(|e| MergeError::io("open", path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| MergeError::io("read", path, e))?;
    Ok(data)
}

/// Serialize entries as tab-indented JSON with a trailing newline
pub fn encode(entries: &[BanEntry]) -> Result<Vec<u8>, MergeError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    entries.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Create or overwrite `path` with the encoded entries; returns bytes written
pub fn write(path: &Path, entries: &[BanEntry]) -> Result<usize, MergeError> {
    let buf = encode(entries)?;
    let mut file = File::create(path).map_err(|e| MergeError::io("create", path, e))?;
    file.write_all(&buf)
        .map_err(|e| MergeError::io("write", path, e))?;
    Ok(buf.len())
}

/// Progress bar over input files; hidden unless requested
fn progress_bar(args: &Args) -> ProgressBar {
    if !args.progress {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(args.files.len() as u64);
    let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

pub fn run(args: &Args) -> Result<MergeSummary, MergeError> {
    if args.files.is_empty() {
        return Err(MergeError::Usage);
    }

    let pb = progress_bar(args);
    let mut composite: Vec<BanEntry> = Vec::new();

    // Fail fast: any unreadable file aborts before the output is touched.
    for file in &args.files {
        pb.inc(1);
        pb.set_message(format!("{}", file.display()));

        let data = load(file)?;
        let (kept, stats) = dedup(parse(&data));

        info!(file = %file.display(), "read {} bans from banlist", stats.read);
        info!(
            file = %file.display(),
            "removed {} duplicates from banlist, {} dupes had multiple reasons (reasons combined)",
            stats.duplicates,
            stats.combined
        );

        composite.extend(kept);
    }

    pb.finish_with_message("done");

    let bytes = write(&args.output, &composite)?;
    info!(
        output = %args.output.display(),
        "wrote banlist ({}) of {} bytes",
        composite.len(),
        bytes
    );

    Ok(MergeSummary {
        files: args.files.len(),
        entries: composite.len(),
        bytes,
        output: args.output.clone(),
    })
}
