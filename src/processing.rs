use crate::constants::{
    DEFAULT_MAX_WIDTH, MAX_QUALITY, MIN_QUALITY, RESIZE_PREFIX, SUCCESS_PREFIX, WEBP_QUALITY,
};
use crate::error::{OptimizeError, Result};
use crate::info;
use crate::utils::{calculate_compression_ratio, create_progress_spinner, format_file_size};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Images wider than this are downscaled. `None` or `Some(0)` disables resizing.
    pub max_width: Option<u32>,
    pub quality: u8,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            max_width: Some(DEFAULT_MAX_WIDTH),
            quality: WEBP_QUALITY,
        }
    }
}

impl OptimizeOptions {
    pub fn new(max_width: Option<u32>, quality: Option<u8>) -> Result<Self> {
        let quality = quality.unwrap_or(WEBP_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizeError::InvalidQuality(quality));
        }

        Ok(Self { max_width, quality })
    }
}

/// Result of converting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub original_size: u64,
    pub optimized_size: u64,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
}

impl ConversionOutcome {
    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.final_dimensions
    }
}

/// Converts one image: load -> resize if too wide -> encode WebP -> save.
///
/// The decoded image lives only for the duration of this call, whichever
/// step fails.
///
/// # Arguments
/// * `input_path` - Image to read
/// * `output_path` - Destination, overwritten if it exists
/// * `options` - Width limit and encoder quality
///
/// # Returns
/// * `Ok(ConversionOutcome)` - Sizes and dimensions before and after
/// * `Err(OptimizeError)` - If decoding, resizing or writing fails
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use img_optimize::{optimize_image, OptimizeOptions};
///
/// let outcome = optimize_image(
///     Path::new("../images/photo.jpg"),
///     Path::new("../images/photo.webp"),
///     &OptimizeOptions::default(),
/// )?;
/// assert!(outcome.final_dimensions.0 <= 1024);
/// # Ok::<(), img_optimize::OptimizeError>(())
/// ```
pub fn optimize_image(
    input_path: &Path,
    output_path: &Path,
    options: &OptimizeOptions,
) -> Result<ConversionOutcome> {
    let (mut img, original_size) = load_image_with_metadata(input_path)?;
    let original_dimensions = img.dimensions();

    if let Some((width, height)) = resize_to_max_width(&mut img, options.max_width) {
        info!(
            "{} Resized {} to {}x{}",
            RESIZE_PREFIX,
            input_path.display(),
            width,
            height
        );
    }

    let final_dimensions = img.dimensions();
    let optimized_size = save_webp(&img, output_path, options.quality)?;

    info!(
        "{} Saved optimized image to {} ({} -> {}, {:.1}% smaller)",
        SUCCESS_PREFIX,
        output_path.display(),
        format_file_size(original_size),
        format_file_size(optimized_size),
        calculate_compression_ratio(original_size, optimized_size)
    );

    Ok(ConversionOutcome {
        input: input_path.to_path_buf(),
        output: output_path.to_path_buf(),
        original_size,
        optimized_size,
        original_dimensions,
        final_dimensions,
    })
}

/// Decodes an image file and returns it along with its size on disk.
///
/// The format is sniffed from the file contents, falling back to the
/// extension when the header is not recognised.
pub fn load_image_with_metadata(input_path: &Path) -> Result<(DynamicImage, u64)> {
    let file_size = fs::metadata(input_path)?.len();

    let pb = create_progress_spinner(&format!("Decoding {}...", input_path.display()));
    let decoded = ImageReader::open(input_path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(OptimizeError::from)
        .and_then(|reader| reader.decode().map_err(OptimizeError::from));
    pb.finish_and_clear();

    Ok((decoded?, file_size))
}

/// Target size for an image `width` x `height` capped at `max_width`.
///
/// Returns `None` when the image already fits. The height is
/// `floor(height * max_width / width)`, never less than one pixel.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> Option<(u32, u32)> {
    if max_width == 0 || width <= max_width {
        return None;
    }

    let new_height = u64::from(height) * u64::from(max_width) / u64::from(width);
    Some((max_width, (new_height as u32).max(1)))
}

/// Downscales `img` in place with Lanczos3 when it is wider than `max_width`.
///
/// Returns the new dimensions if a resize happened.
pub fn resize_to_max_width(img: &mut DynamicImage, max_width: Option<u32>) -> Option<(u32, u32)> {
    let (width, height) = max_width
        .and_then(|max| scaled_dimensions(img.width(), img.height(), max))?;

    *img = img.resize_exact(width, height, image::imageops::FilterType::Lanczos3);
    Some((width, height))
}

/// Lossy WebP encoding at `quality` (0-100).
pub fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();

    // libwebp only takes 8-bit RGB or RGBA buffers.
    // `result` is bound so the encoder's borrow of the buffer ends before the buffer drops.
    let encoded = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let result = webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, f32::from(quality));
        result
    } else {
        let rgb = img.to_rgb8();
        let result = webp::Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_simple(false, f32::from(quality));
        result
    };

    let memory = encoded.map_err(|e| OptimizeError::WebPEncoding(format!("{:?}", e)))?;
    Ok(memory.to_vec())
}

/// Encodes `img` and writes it to `output`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn save_webp(img: &DynamicImage, output: &Path, quality: u8) -> Result<u64> {
    let bytes = encode_webp(img, quality)?;
    fs::write(output, &bytes)?;
    Ok(bytes.len() as u64)
}
