//! Command-line interface for building a single photomosaic

use crate::algorithm::builder::{MosaicBuilder, MosaicConfig};
use crate::algorithm::cache::CacheStats;
use crate::io::configuration::{
    DEFAULT_ELEMENT_SIZE, DEFAULT_OUTPUT_EXTENSION, DEFAULT_RESOLUTION, MAX_ELEMENT_SIZE,
    MAX_RESOLUTION, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{ImageCanvasPersister, output_format};
use crate::io::progress::ProgressReporter;
use clap::Parser;
use clap::builder::TypedValueParser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild a template image from a directory of element images"
)]
/// Command-line arguments for the mosaic generator
pub struct Cli {
    /// Template image (bmp, jpg, jpeg, png or gif)
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Directory of element images
    #[arg(value_name = "ELEMENTS")]
    pub elements: PathBuf,

    /// Output image; format follows the extension (defaults to <TEMPLATE>_mosaic.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Template pixels per side of one sampled block
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_RESOLUTION,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_RESOLUTION)).map(usize::from)
    )]
    pub resolution: usize,

    /// Output pixels per side of one element tile
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_ELEMENT_SIZE,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_ELEMENT_SIZE)).map(usize::from)
    )]
    pub element_size: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Build even if the output file already exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Compose on a single thread
    #[arg(short = 'S', long)]
    pub sequential: bool,
}

impl Cli {
    /// Check if an existing output file should be left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the mosaic will be written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.template))
    }

    /// Build parameters taken from the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution or element size is zero
    pub fn config(&self) -> Result<MosaicConfig> {
        MosaicConfig::new(
            &self.template,
            self.resolution,
            &self.elements,
            self.element_size,
        )
    }
}

/// `<dir>/<stem>_mosaic.png` next to the template
pub fn default_output_path(template: &Path) -> PathBuf {
    let stem = template.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        DEFAULT_OUTPUT_EXTENSION
    );

    if let Some(parent) = template.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

/// What a run ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The mosaic was built and written
    Written {
        /// Destination path
        path: PathBuf,
        /// Mosaic width in pixels
        width: usize,
        /// Mosaic height in pixels
        height: usize,
        /// Nearest-color searches (misses) and cache hits during composition
        lookups: CacheStats,
    },
    /// The output already existed and `--no-skip` was not given
    Skipped {
        /// Existing output path
        path: PathBuf,
    },
}

/// Runs one build from parsed arguments with progress display
pub struct MosaicProcessor {
    cli: Cli,
    progress: ProgressReporter,
}

impl MosaicProcessor {
    /// Create a processor for the given arguments
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressReporter::new()
        } else {
            ProgressReporter::hidden()
        };

        Self { cli, progress }
    }

    /// Validate, build, and save the mosaic
    ///
    /// Parameters and the output format are checked before any image is read.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, decoding, composition, or saving fails
    pub fn process(&self) -> Result<RunOutcome> {
        let config = self.cli.config()?;
        let output_path = self.cli.output_path();
        output_format(&output_path)?;

        if self.cli.skip_existing() && output_path.exists() {
            self.progress.finish();
            self.report_skip(&output_path);
            return Ok(RunOutcome::Skipped { path: output_path });
        }

        let start_time = Instant::now();
        let builder = MosaicBuilder::new().parallel(!self.cli.sequential);
        let result =
            builder.build_and_save(&config, &output_path, &ImageCanvasPersister, &self.progress);
        self.progress.finish();

        let composition = result?;
        let outcome = RunOutcome::Written {
            path: output_path,
            width: composition.canvas.width(),
            height: composition.canvas.height(),
            lookups: composition.stats,
        };
        self.report_done(&outcome, start_time);
        Ok(outcome)
    }

    // Allow print for user feedback on skipped output
    #[allow(clippy::print_stderr)]
    fn report_skip(&self, path: &Path) {
        if !self.cli.quiet {
            eprintln!("Skipping: {} (output exists)", path.display());
        }
    }

    // Allow print for user feedback on the finished mosaic
    #[allow(clippy::print_stderr)]
    fn report_done(&self, outcome: &RunOutcome, start_time: Instant) {
        if self.cli.quiet {
            return;
        }
        if let RunOutcome::Written {
            path,
            width,
            height,
            lookups,
        } = outcome
        {
            eprintln!(
                "Wrote {width}x{height} mosaic to {} in {:.2?} ({} searches, {} cache hits)",
                path.display(),
                start_time.elapsed(),
                lookups.misses,
                lookups.hits
            );
        }
    }
}
