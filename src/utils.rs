/// Utility functions for common operations
///
/// This module contains helper functions shared by the scanner and the
/// per-image pipeline.
use crate::constants::{OUTPUT_EXTENSION, PROGRESS_SPINNER_TEMPLATE, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::{OptimizeError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Check if a file path carries one of the supported image extensions
///
/// # Arguments
/// * `path` - The file path to check
///
/// # Returns
/// * `true` if the lowercased extension is supported, `false` otherwise
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Build the sibling output path: same directory, same stem, `.webp`.
pub fn generate_output_path(input_path: &Path) -> Result<PathBuf> {
    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| OptimizeError::InvalidFileName(input_path.to_path_buf()))?;

    let output_filename = format!("{}.{}", file_stem.to_string_lossy(), OUTPUT_EXTENSION);
    Ok(input_path.with_file_name(output_filename))
}

/// Create a progress spinner with consistent styling
///
/// Hidden automatically when stdout is not a terminal.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Format file size in human-readable format
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Size reduction as a percentage; negative when the output grew.
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("test.jpg")));
        assert!(is_image_file(Path::new("test.JPEG")));
        assert!(is_image_file(Path::new("test.png")));
        assert!(is_image_file(Path::new("test.WebP")));

        assert!(!is_image_file(Path::new("test.gif")));
        assert!(!is_image_file(Path::new("test.bmp")));
        assert!(!is_image_file(Path::new("test.txt")));
        assert!(!is_image_file(Path::new("test")));
        assert!(!is_image_file(Path::new("jpg")));
    }

    #[test]
    fn test_generate_output_path() {
        let result = generate_output_path(Path::new("/tmp/images/photo.jpg")).unwrap();
        assert_eq!(result, PathBuf::from("/tmp/images/photo.webp"));
    }

    #[test]
    fn test_generate_output_path_keeps_inner_dots() {
        let result = generate_output_path(Path::new("images/team.2024.PNG")).unwrap();
        assert_eq!(result, PathBuf::from("images/team.2024.webp"));
    }

    #[test]
    fn test_generate_output_path_webp_input_maps_to_itself() {
        let result = generate_output_path(Path::new("images/banner.webp")).unwrap();
        assert_eq!(result, PathBuf::from("images/banner.webp"));
    }

    #[test]
    fn test_generate_output_path_without_stem() {
        let result = generate_output_path(Path::new("/"));
        assert!(matches!(result, Err(OptimizeError::InvalidFileName(_))));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
    }

    #[test]
    fn test_calculate_compression_ratio() {
        assert_eq!(calculate_compression_ratio(1000, 800), 20.0);
        assert_eq!(calculate_compression_ratio(1000, 1200), -20.0);
        assert_eq!(calculate_compression_ratio(0, 500), 0.0);
    }
}
