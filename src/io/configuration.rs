//! Build constants and command-line defaults

// Input and output formats
/// File extensions (lowercase) accepted for template and element images
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["bmp", "jpg", "jpeg", "png", "gif"];

/// Extension used when no output path is given
pub const DEFAULT_OUTPUT_EXTENSION: &str = "png";

/// Suffix added to the template file stem for the default output name
pub const OUTPUT_SUFFIX: &str = "_mosaic";

// Default values for configurable parameters
/// Side length in template pixels of one sampled block
pub const DEFAULT_RESOLUTION: usize = 10;

/// Side length in output pixels of one element tile
pub const DEFAULT_ELEMENT_SIZE: usize = 20;

// Command-line ranges
/// Largest resolution the command line accepts
pub const MAX_RESOLUTION: u16 = 100;

/// Largest element size the command line accepts
pub const MAX_ELEMENT_SIZE: u16 = 100;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed coarse grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Maximum number of pixels in an output canvas (about 800 MB of RGB)
pub const MAX_CANVAS_PIXELS: usize = 1 << 28;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Spinner refresh interval while decoding
pub const SPINNER_TICK_MS: u64 = 100;
