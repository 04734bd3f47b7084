use anyhow::Context;
use img_optimize::constants::IMAGES_DIR;
use img_optimize::{error, optimize_directory, OptimizeError, OptimizeOptions};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let options = OptimizeOptions::default();
    let images_dir = Path::new(IMAGES_DIR);

    match optimize_directory(images_dir, &options) {
        Ok(_) => Ok(()),
        Err(OptimizeError::DirectoryNotFound(dir)) => {
            error!("Directory not found: {}", dir.display());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to scan {}", images_dir.display())),
    }
}
