//! lidarseg command-line wrapper
//!
//! Runs the segmentation core against files on disk: a `.mha` RGBD raster
//! in, seed scribbles from a seed image / text file / per-label masks, a
//! mask PNG out. `cut` is the single-pass cut; `lidar` is the two-pass
//! depth→RGBD refinement.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use lidarseg::{
    Difference, RgbdImage, SeedSet, SegmentationParams, SegmentationSession, dilate_indices,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lidarseg", version, about = "Interactive RGBD graph-cut segmentation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Single-pass graph cut
    Cut(CutArgs),
    /// Two-pass LiDAR refinement (depth-only cut, reseed, weighted RGBD cut)
    Lidar(LidarArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Input RGBD raster (.mha, MET_FLOAT, 4+ channels)
    #[arg(long)]
    image: PathBuf,

    /// Seed image: green (0,255,0) = foreground, red (255,0,0) = background
    #[arg(long)]
    seed_image: Option<PathBuf>,

    /// Seed text file: one 'f x y' or 'b x y' line per seed
    #[arg(long)]
    seed_text: Option<PathBuf>,

    /// Foreground seeds as a grayscale PNG (nonzero = seed)
    #[arg(long)]
    foreground: Option<PathBuf>,

    /// Background seeds as a grayscale PNG (nonzero = seed)
    #[arg(long)]
    background: Option<PathBuf>,

    /// Thicken seed scribbles by a disk of this radius
    #[arg(long, default_value_t = 0)]
    seed_radius: u32,

    /// Trade-off between the regional and smoothness terms
    #[arg(long, default_value_t = 1.0)]
    lambda: f64,

    /// Histogram bins per channel
    #[arg(long, default_value_t = 10)]
    bins: u32,

    /// Leave the RGB channels out of the histograms
    #[arg(long)]
    no_color_histogram: bool,

    /// Leave the depth channel out of the histograms
    #[arg(long)]
    no_depth_histogram: bool,

    /// Channel weights for the weighted difference, as r,g,b,d
    #[arg(long, value_delimiter = ',', num_args = 4)]
    weights: Option<Vec<f64>>,

    /// Output mask PNG (255 = foreground)
    #[arg(long, short)]
    output: PathBuf,

    /// Also write an RGBA composite of the image clipped to the mask
    #[arg(long)]
    composite: Option<PathBuf>,
}

#[derive(Args)]
struct CutArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Neighbor dissimilarity metric
    #[arg(long, value_enum, default_value = "depth")]
    difference: Metric,
}

#[derive(Args)]
struct LidarArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Depth-discontinuity threshold for boundary background seeds
    #[arg(long, default_value_t = 0.4)]
    background_threshold: f64,

    /// Window radius of the boundary background check
    #[arg(long, default_value_t = 3)]
    background_check_radius: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Metric {
    Depth,
    Color,
    Weighted,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Cut(args) => run_cut(args),
        Command::Lidar(args) => run_lidar(args),
    }
}

fn run_cut(args: CutArgs) -> Result<()> {
    let (image, seeds) = load_inputs(&args.common)?;
    let weights = parse_weights(&args.common)?;
    let difference = match args.difference {
        Metric::Depth => Difference::Depth,
        Metric::Color => Difference::Color,
        Metric::Weighted => Difference::Weighted(weights),
    };
    let params = base_params(&args.common).with_difference(difference);

    let mut session = SegmentationSession::new(image);
    session.set_seeds(seeds);
    let result = session.segment(&params).context("segmentation failed")?;
    eprintln!(
        "cut energy {:.4}, {} foreground pixels",
        result.flow,
        result.mask.count_foreground()
    );

    write_outputs(&args.common, session.image(), &result.mask)
}

fn run_lidar(args: LidarArgs) -> Result<()> {
    let (image, seeds) = load_inputs(&args.common)?;
    let weights = parse_weights(&args.common)?;
    let params = base_params(&args.common)
        .with_difference(Difference::Weighted(weights))
        .with_background_threshold(args.background_threshold)
        .with_background_check_radius(args.background_check_radius);

    let mut session = SegmentationSession::new(image);
    session.set_seeds(seeds);
    let result = session
        .segment_two_pass(&params)
        .context("two-pass segmentation failed")?;
    eprintln!(
        "pass one energy {:.4}, pass two energy {:.4}, {} boundary sinks, {} foreground pixels",
        result.pass_one_flow,
        result.flow,
        result.boundary_sinks,
        result.mask.count_foreground()
    );

    write_outputs(&args.common, session.image(), &result.mask)
}

fn base_params(common: &CommonArgs) -> SegmentationParams {
    SegmentationParams::new()
        .with_lambda(common.lambda)
        .with_bins(common.bins)
        .with_histogram_channels(!common.no_color_histogram, !common.no_depth_histogram)
}

fn parse_weights(common: &CommonArgs) -> Result<[f64; 4]> {
    match &common.weights {
        None => Ok([1.0; 4]),
        Some(values) => {
            let array: [f64; 4] = values
                .as_slice()
                .try_into()
                .context("--weights takes exactly four values")?;
            Ok(array)
        }
    }
}

fn load_inputs(common: &CommonArgs) -> Result<(RgbdImage, SeedSet)> {
    let image = lidarseg::read_image(&common.image)
        .with_context(|| format!("reading {}", common.image.display()))?;

    let mut seeds = SeedSet::new();
    let mut have_seeds = false;
    if let Some(path) = &common.seed_image {
        let loaded = lidarseg::read_seeds(path)
            .with_context(|| format!("reading seed image {}", path.display()))?;
        seeds.add_sources(loaded.sources);
        seeds.add_sinks(loaded.sinks);
        have_seeds = true;
    }
    if let Some(path) = &common.seed_text {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening seed text {}", path.display()))?;
        let loaded = lidarseg::read_seeds_text(std::io::BufReader::new(file))?;
        seeds.add_sources(loaded.sources);
        seeds.add_sinks(loaded.sinks);
        have_seeds = true;
    }
    if let Some(path) = &common.foreground {
        seeds.add_sources(read_label(path)?);
        have_seeds = true;
    }
    if let Some(path) = &common.background {
        seeds.add_sinks(read_label(path)?);
        have_seeds = true;
    }
    if !have_seeds {
        bail!("no seeds given: use --seed-image, --seed-text, --foreground, or --background");
    }

    if common.seed_radius > 0 {
        let region = image.region();
        seeds.sources = dilate_indices(&seeds.sources, &region, common.seed_radius)?;
        seeds.sinks = dilate_indices(&seeds.sinks, &region, common.seed_radius)?;
    }

    Ok((image, seeds))
}

fn read_label(path: &PathBuf) -> Result<Vec<lidarseg::Coord>> {
    let file =
        std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(lidarseg::read_label_image(std::io::BufReader::new(file))?)
}

fn write_outputs(
    common: &CommonArgs,
    image: &RgbdImage,
    mask: &lidarseg::SegmentMask,
) -> Result<()> {
    lidarseg::write_mask(mask, &common.output)
        .with_context(|| format!("writing {}", common.output.display()))?;
    if let Some(path) = &common.composite {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        lidarseg::write_composite_png(image, mask, std::io::BufWriter::new(file))?;
    }
    Ok(())
}
