/// Directory scanned for images, relative to the working directory.
pub const IMAGES_DIR: &str = "../images";

/// Lowercased extensions eligible for conversion.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Images wider than this are downscaled, preserving aspect ratio.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

pub const WEBP_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const OUTPUT_EXTENSION: &str = "webp";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

// Common output message prefixes
pub const SCAN_PREFIX: &str = "🔍";
pub const PROCESSING_PREFIX: &str = "🗜️";
pub const RESIZE_PREFIX: &str = "🔄";
pub const SUCCESS_PREFIX: &str = "✅";
