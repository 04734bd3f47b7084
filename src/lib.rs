pub mod batch;
pub mod constants;
pub mod error;
pub mod logger;
pub mod processing;
pub mod utils;

pub use batch::{collect_image_files, optimize_directory, BatchReport, FileFailure};
pub use error::{OptimizeError, Result};
pub use processing::{
    encode_webp, load_image_with_metadata, optimize_image, resize_to_max_width, save_webp,
    scaled_dimensions, ConversionOutcome, OptimizeOptions,
};
pub use utils::{generate_output_path, is_image_file};
