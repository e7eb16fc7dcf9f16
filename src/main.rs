use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dust_detect_rs::dust_detection::{
    BlendMode, DetectionConfig, DustDetectionPipeline, TiffLayerSink, TiffRasterSource,
};
use dust_detect_rs::logger;

use tracing::{error, info};

/// Scan polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Polarity {
    /// Bright specks on a film negative
    Negative,
    /// Dark specks on a print or positive
    Positive,
}

/// Compositing mode recorded for the mask layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayerBlend {
    Normal,
    Multiply,
    Screen,
}

impl From<LayerBlend> for BlendMode {
    fn from(blend: LayerBlend) -> Self {
        match blend {
            LayerBlend::Normal => BlendMode::Normal,
            LayerBlend::Multiply => BlendMode::Multiply,
            LayerBlend::Screen => BlendMode::Screen,
        }
    }
}

/// Detect dust specks in a scanned image and write them out as an RGBA mask layer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image (8-bit gray, gray+alpha, RGB or RGBA TIFF)
    input: PathBuf,

    /// Output mask layer (RGBA TIFF)
    output: PathBuf,

    /// Whether dust shows up bright (negative) or dark (positive)
    #[arg(value_enum, default_value_t = Polarity::Negative)]
    polarity: Polarity,

    /// Level threshold in percent of full intensity
    #[arg(short, long, default_value_t = 85, value_parser = clap::value_parser!(u32).range(75..=95))]
    sensitivity: u32,

    /// Approximate speck diameter in pixels
    #[arg(short = 'z', long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(5..=30))]
    spot_size: u32,

    /// Blend mode of the created layer
    #[arg(long, value_enum, default_value_t = LayerBlend::Normal)]
    blend: LayerBlend,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init();

    let is_negative = args.polarity == Polarity::Negative;
    let mut config = DetectionConfig::from_plugin_args(is_negative, args.sensitivity, args.spot_size)?;
    config.blend_mode = args.blend.into();

    info!("Starting dust detection...");
    info!("Polarity: {:?}", args.polarity);
    info!("Sensitivity: {}%, spot size: {}px", args.sensitivity, args.spot_size);

    let source = TiffRasterSource::open(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let sink = TiffLayerSink::new(&args.output);
    let pipeline = DustDetectionPipeline::with_custom(source, sink, config);

    match pipeline.run_with_timings() {
        Ok((report, timings)) => {
            info!(
                "Flagged {} of {} pixels, mask written to {}",
                report.flagged_pixels,
                report.width * report.height,
                args.output.display()
            );
            timings.print_summary();
        }
        Err(e) => {
            error!("Dust detection failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dialog() {
        let args = Args::try_parse_from(["dust-detect", "in.tiff", "out.tiff"]).unwrap();
        assert_eq!(args.input, PathBuf::from("in.tiff"));
        assert_eq!(args.output, PathBuf::from("out.tiff"));
        assert_eq!(args.polarity, Polarity::Negative);
        assert_eq!((args.sensitivity, args.spot_size), (85, 9));
        assert_eq!(args.blend, LayerBlend::Normal);
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "dust-detect",
            "in.tiff",
            "out.tiff",
            "positive",
            "--sensitivity",
            "90",
            "-z",
            "12",
            "--blend",
            "screen",
        ])
        .unwrap();
        assert_eq!(args.polarity, Polarity::Positive);
        assert_eq!((args.sensitivity, args.spot_size), (90, 12));
        assert_eq!(BlendMode::from(args.blend), BlendMode::Screen);
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(Args::try_parse_from(["dust-detect", "a", "b", "-s", "96"]).is_err());
        assert!(Args::try_parse_from(["dust-detect", "a", "b", "-z", "4"]).is_err());
        assert!(Args::try_parse_from(["dust-detect", "a", "b", "sideways"]).is_err());
    }

    #[test]
    fn test_help_is_not_an_input_error() {
        let err = Args::try_parse_from(["dust-detect", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["dust-detect"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
