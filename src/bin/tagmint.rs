use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tagmint", version)]
struct Cli {
    /// Words of the tag text, joined with single spaces.
    #[arg(required = true)]
    words: Vec<String>,

    /// Font file (TTF/OTF). Required unless the style names one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Font size in pixels (default 50).
    #[arg(long)]
    size: Option<f32>,

    /// Corner radius in pixels (default 20).
    #[arg(long)]
    radius: Option<u32>,

    /// Leave out the hanging hole.
    #[arg(long)]
    no_hole: bool,

    /// Base look the style file and flags start from.
    #[arg(long, value_enum, default_value_t = Preset::Keychain)]
    preset: Preset,

    /// JSON style file; its fields override the preset.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, default_value = "/tmp/out.png")]
    out: PathBuf,

    /// Log debug diagnostics to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Keychain,
    Plate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let text = cli.words.join(" ");
    let style = resolve_style(&cli)?;
    let font_path = style
        .font_path
        .clone()
        .context("no font given: pass --font or set font_path in the style")?;

    let mut rasterizer = tagmint::FontRasterizer::from_file(&font_path, style.font_size_px)
        .with_context(|| format!("load font '{}'", font_path.display()))?;
    let tag = tagmint::render_tag(&text, &style, &mut rasterizer)
        .with_context(|| format!("render tag '{text}'"))?;

    tagmint::write_png(&tag, &cli.out)?;
    eprintln!("wrote {}", cli.out.display());
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_style(cli: &Cli) -> anyhow::Result<tagmint::TagStyle> {
    let base = match cli.preset {
        Preset::Keychain => tagmint::TagStyle::keychain(),
        Preset::Plate => tagmint::TagStyle::plate(),
    };
    let mut style = match &cli.style {
        Some(path) => base
            .overlay_json_file(path)
            .with_context(|| format!("load style '{}'", path.display()))?,
        None => base,
    };

    if let Some(font) = &cli.font {
        style.font_path = Some(font.clone());
    }
    if let Some(size) = cli.size {
        style.font_size_px = size;
    }
    if let Some(radius) = cli.radius {
        style.mask.radius = radius;
    }
    if cli.no_hole {
        style.hole = None;
    }
    style.validate()?;
    Ok(style)
}
