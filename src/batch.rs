use crate::constants::{PROCESSING_PREFIX, SCAN_PREFIX};
use crate::error::{OptimizeError, Result};
use crate::processing::{optimize_image, ConversionOutcome, OptimizeOptions};
use crate::utils::{generate_output_path, is_image_file};
use crate::{error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file that could not be converted.
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: OptimizeError,
}

/// Per-file outcomes of one pass over a directory, in scan order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConversionOutcome>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Converts every supported image directly inside `dir` to WebP.
///
/// Files are handled one at a time; a failure is logged and recorded and
/// the loop moves on. The only error returned is for the directory itself
/// (`DirectoryNotFound`, or an unreadable listing).
pub fn optimize_directory(dir: &Path, options: &OptimizeOptions) -> Result<BatchReport> {
    // Checked before the scan banner; `collect_image_files` repeats it for direct callers.
    if !dir.is_dir() {
        return Err(OptimizeError::DirectoryNotFound(dir.to_path_buf()));
    }

    info!("{} Scanning {} for images...", SCAN_PREFIX, dir.display());

    let image_files = collect_image_files(dir)?;
    let mut report = BatchReport::default();

    for input_path in image_files {
        let file_name = input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("{} Processing {}...", PROCESSING_PREFIX, file_name);

        let result = generate_output_path(&input_path)
            .and_then(|output_path| optimize_image(&input_path, &output_path, options));

        match result {
            Ok(outcome) => report.converted.push(outcome),
            Err(e) => {
                error!("Error processing {}: {}", input_path.display(), e);
                report.failed.push(FileFailure {
                    input: input_path,
                    error: e,
                });
            }
        }
    }

    Ok(report)
}

/// Lists the candidate files directly inside `dir`, sorted by file name.
///
/// Only regular files (after following symlinks) with a supported
/// extension are kept. Entries that cannot be inspected are skipped with a
/// warning. A `.webp` file that another candidate converts into is that
/// candidate's output and is not listed.
pub fn collect_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(OptimizeError::DirectoryNotFound(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut image_files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if entry.file_type().is_file() && is_image_file(entry.path()) {
            image_files.push(entry.into_path());
        }
    }

    let generated: HashSet<PathBuf> = image_files
        .iter()
        .filter_map(|path| generate_output_path(path).ok().filter(|output| output != path))
        .collect();
    image_files.retain(|path| !generated.contains(path));

    Ok(image_files)
}
