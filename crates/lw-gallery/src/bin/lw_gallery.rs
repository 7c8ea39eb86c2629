use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::RgbaImage;
use lw_core::{FilterMode, Image, Point2f, Rgba, Texture};
use lw_distort::{
    BarrelDistortion, DistortionConfig, Fringe, PostEffect, Scanlines, Warp, classify,
    pixel_center, render, render_into_serial,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "lw_gallery")]
#[command(about = "Apply the lens-warp barrel distortion to images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Distort a PNG
    #[command(name = "distort")]
    Distort(DistortArgs),
    /// Distort a generated checkerboard
    #[command(name = "pattern")]
    Pattern(PatternArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum FilterArg {
    Nearest,
    Bilinear,
}

impl From<FilterArg> for FilterMode {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::Nearest => FilterMode::Nearest,
            FilterArg::Bilinear => FilterMode::Bilinear,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct EffectArgs {
    /// JSON distortion config; missing fields use the reference values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the config's texture filter
    #[arg(long, value_enum)]
    filter: Option<FilterArg>,
    /// Enable scanline darkening (default parameters unless configured)
    #[arg(long)]
    scanlines: bool,
    /// Enable diagonal color fringing (default parameters unless configured)
    #[arg(long)]
    fringe: bool,
    /// Render on the calling thread instead of the rayon pool
    #[arg(long)]
    serial: bool,
}

#[derive(Args, Debug, Clone)]
struct DistortArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/distort")]
    out: PathBuf,
    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Args, Debug, Clone)]
struct PatternArgs {
    #[arg(long, default_value_t = 640)]
    width: usize,
    #[arg(long, default_value_t = 480)]
    height: usize,
    /// Checkerboard cells along the shorter side
    #[arg(long, default_value_t = 12)]
    cells: usize,
    #[arg(long, default_value = "out/pattern")]
    out: PathBuf,
    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRun {
    source: String,
    width: usize,
    height: usize,
    config: DistortionConfig,
    mode: &'static str,
    elapsed_ms: f64,
    border_pixels: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level, cli.log_format);

    match cli.cmd {
        Command::Distort(args) => run_distort(args),
        Command::Pattern(args) => run_pattern(args),
    }
}

fn init_tracing(level: LogLevel, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.filter().into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run_distort(args: DistortArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let cfg = resolve_config(&args.effect)?;
    let fx = BarrelDistortion::try_from_config(&cfg).context("invalid distortion config")?;

    let src = load_rgba(&args.input)?;
    if src.is_empty() {
        bail!("input image {} has no pixels", args.input.display());
    }
    info!(
        input = %args.input.display(),
        width = src.width(),
        height = src.height(),
        "loaded input"
    );

    let start = Instant::now();
    let out = if args.effect.serial {
        let tex = Texture::new(src.as_view())
            .context("binding input as texture")?
            .with_filter(cfg.filter);
        let mut out = Image::new_fill(src.width(), src.height(), cfg.border);
        render_into_serial(&fx, &tex, &mut out.as_view_mut());
        out
    } else {
        fx.apply(&src.as_view()).context("applying distortion")?
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let case_dir = prepare_out_dir(&args.out)?;
    fs::copy(&args.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            args.input.display(),
            case_dir.join("input.png").display()
        )
    })?;
    save_rgba(case_dir.join("distorted.png"), &out)?;

    let meta = MetaRun {
        source: args.input.display().to_string(),
        width: out.width(),
        height: out.height(),
        config: cfg,
        mode: mode_name(args.effect.serial),
        elapsed_ms,
        border_pixels: count_border_pixels(&fx, out.width(), out.height()),
    };
    write_json(case_dir.join("meta.json"), &meta)?;
    info!(out = %case_dir.display(), elapsed_ms, "wrote distorted image");

    Ok(())
}

fn run_pattern(args: PatternArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("pattern size must be non-zero, got {}x{}", args.width, args.height);
    }
    if args.cells == 0 {
        bail!("--cells must be at least 1");
    }
    let cfg = resolve_config(&args.effect)?;
    let fx = BarrelDistortion::try_from_config(&cfg).context("invalid distortion config")?;

    let cells = args.cells as f32;
    let aspect = args.width as f32 / args.height as f32;
    let (cx, cy) = if aspect >= 1.0 {
        (cells * aspect, cells)
    } else {
        (cells, cells / aspect)
    };
    let checker = move |uv: Point2f| {
        let parity = ((uv.x * cx).floor() as i64 + (uv.y * cy).floor() as i64).rem_euclid(2);
        if parity == 0 {
            Rgba::new(0.95, 0.95, 0.9, 1.0)
        } else {
            Rgba::new(0.1, 0.25, 0.6, 1.0)
        }
    };

    let (w, h) = (args.width, args.height);
    let pattern = Image::from_fn(w, h, |x, y| checker(pixel_center(x, y, w, h)));

    let start = Instant::now();
    let out = if args.effect.serial {
        let mut out = Image::new_fill(w, h, cfg.border);
        render_into_serial(&fx, &checker, &mut out.as_view_mut());
        out
    } else {
        render(&fx, &checker, w, h)
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;

    let case_dir = prepare_out_dir(&args.out)?;
    save_rgba(case_dir.join("pattern.png"), &pattern)?;
    save_rgba(case_dir.join("distorted.png"), &out)?;

    let meta = MetaRun {
        source: format!("checkerboard {}x{} cells", cx.round(), cy.round()),
        width: w,
        height: h,
        config: cfg,
        mode: mode_name(args.effect.serial),
        elapsed_ms,
        border_pixels: count_border_pixels(&fx, w, h),
    };
    write_json(case_dir.join("meta.json"), &meta)?;
    info!(out = %case_dir.display(), elapsed_ms, "wrote distorted pattern");

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides.
fn resolve_config(args: &EffectArgs) -> Result<DistortionConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<DistortionConfig>(path)?
        }
        None => DistortionConfig::default(),
    };

    if let Some(filter) = args.filter {
        cfg.filter = filter.into();
    }
    if args.scanlines && cfg.scanlines.is_none() {
        cfg.scanlines = Some(Scanlines::default());
    }
    if args.fringe && cfg.fringe.is_none() {
        cfg.fringe = Some(Fringe::default());
    }

    debug!(?cfg, "resolved distortion config");
    Ok(cfg)
}

fn count_border_pixels(fx: &BarrelDistortion, width: usize, height: usize) -> usize {
    let mut n = 0;
    for y in 0..height {
        for x in 0..width {
            if classify(pixel_center(x, y, width, height), fx.params()) == Warp::Outside {
                n += 1;
            }
        }
    }
    n
}

fn mode_name(serial: bool) -> &'static str {
    if serial { "serial" } else { "parallel" }
}

fn prepare_out_dir(out: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    Ok(out.to_path_buf())
}

fn load_rgba(path: &Path) -> Result<Image<Rgba>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba.pixels().map(|p| Rgba::from_u8(p.0)).collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing lw-core image from {}", path.display()))
}

fn save_rgba(path: PathBuf, img: &Image<Rgba>) -> Result<()> {
    let raw: Vec<u8> = img.data().iter().flat_map(|c| c.to_u8()).collect();
    let out = RgbaImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("constructing RgbaImage from raw bytes")?;
    out.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lw_core::FilterMode;
    use lw_distort::{BarrelDistortion, Scanlines};

    use super::{EffectArgs, FilterArg, count_border_pixels, resolve_config};

    fn no_overrides() -> EffectArgs {
        EffectArgs {
            config: None,
            filter: None,
            scanlines: false,
            fringe: false,
            serial: false,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = EffectArgs {
            filter: Some(FilterArg::Nearest),
            scanlines: true,
            ..no_overrides()
        };
        let cfg = resolve_config(&args).expect("no config file needed");

        assert_eq!(cfg.filter, FilterMode::Nearest);
        assert_eq!(cfg.scanlines, Some(Scanlines::default()));
        assert_eq!(cfg.fringe, None);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = EffectArgs {
            config: Some("does/not/exist.json".into()),
            ..no_overrides()
        };
        let err = resolve_config(&args).expect_err("missing file");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn border_pixels_are_a_small_fraction() {
        let fx = BarrelDistortion::new();
        let n = count_border_pixels(&fx, 64, 64);
        assert!(n > 0);
        assert!(n < 64 * 64 / 10);
        assert_eq!(count_border_pixels(&fx, 0, 64), 0);
    }
}
