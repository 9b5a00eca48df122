use anyhow::{bail, Context, Result};
use clap::Parser;
use imgframe::config::Config;
use imgframe::overlay::{OverlayDocument, OverlaySpec, StageOutcome};
use imgframe::pipeline::Pipeline;
use imgframe::resize::{EncoderQuality, OutputFormat, Preset, SizeRequest};
use std::path::{Path, PathBuf};

/// Resize an image and stamp a logo and text on it
#[derive(Parser, Debug)]
#[command(name = "imgframe")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source image
    input: PathBuf,

    /// Where to write the result
    output: PathBuf,

    /// Target width in pixels
    #[arg(short = 'W', long, requires = "height", conflicts_with = "preset")]
    width: Option<i64>,

    /// Target height in pixels
    #[arg(short = 'H', long, requires = "width", conflicts_with = "preset")]
    height: Option<i64>,

    /// Named target size (e.g. instagram_post, youtube_thumbnail)
    #[arg(short, long)]
    preset: Option<String>,

    /// Fill the target box exactly instead of preserving the aspect ratio
    #[arg(long)]
    stretch: bool,

    /// Output format (jpeg, png, webp); defaults to the output extension,
    /// then to the configured format
    #[arg(short, long)]
    format: Option<String>,

    /// Quality for lossy formats (1-100)
    #[arg(short, long)]
    quality: Option<u8>,

    /// Overlay document (YAML or JSON)
    #[arg(short, long)]
    overlay: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config.validate().context("Invalid configuration")?;

    imgframe::logging::init_subscriber(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(
        config_file = ?args.config,
        fonts_dir = %config.fonts.dir.display(),
        "Configuration loaded successfully"
    );

    let request = size_request(&args)?;
    let format = output_format(&args, &config)?;
    let overlays = load_overlays(args.overlay.as_deref())?;

    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let pipeline = Pipeline::from_config(&config);
    let quality = args
        .quality
        .map(EncoderQuality::with_quality)
        .unwrap_or_else(|| pipeline.image_config().quality());

    let processed = pipeline
        .process_with_quality(&data, &request, &overlays, format, quality)
        .with_context(|| format!("Failed to process {}", args.input.display()))?;

    std::fs::write(&args.output, &processed.data)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "{} ({}x{}) -> {} ({}x{}, {})",
        args.input.display(),
        processed.original_size.0,
        processed.original_size.1,
        args.output.display(),
        processed.output_size.0,
        processed.output_size.1,
        processed.content_type
    );
    for (name, outcome) in [("logo", &processed.overlays.logo), ("text", &processed.overlays.text)] {
        if let StageOutcome::Failed(e) = outcome {
            eprintln!("warning: {} overlay skipped: {}", name, e);
        }
    }

    Ok(())
}

fn size_request(args: &Args) -> Result<SizeRequest> {
    let (width, height) = match (&args.preset, args.width, args.height) {
        (Some(name), _, _) => {
            let preset: Preset = name.parse()?;
            let (w, h) = preset.dimensions();
            (w as i64, h as i64)
        }
        (None, Some(w), Some(h)) => (w, h),
        _ => bail!("Either --width and --height or --preset is required"),
    };
    Ok(SizeRequest::new(width, height, !args.stretch)?)
}

fn output_format(args: &Args, config: &Config) -> Result<OutputFormat> {
    if let Some(format) = &args.format {
        return Ok(format.parse()?);
    }
    Ok(OutputFormat::from_path(&args.output).unwrap_or(config.output.format))
}

fn load_overlays(path: Option<&Path>) -> Result<OverlaySpec> {
    let Some(path) = path else {
        return Ok(OverlaySpec::new());
    };
    let document = OverlayDocument::from_file(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(document.into_spec(base_dir))
}
