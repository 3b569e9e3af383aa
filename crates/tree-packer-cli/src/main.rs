use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use tracing::{debug, error, info};
use tree_packer_core::{
    ImageRegistry, PackStats, PackedItem, PackerConfig, atlas_names, pack_images, pack_items,
    pad_to_pow2, to_json_meta,
};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "tree-packer",
    about = "Pack images into fixed-size atlases with a binary-tree packer",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into atlas pages and write PNGs plus meta.json
    Pack(PackArgs),
    /// Layout-only export (no PNGs): compute placements and write meta.json
    Layout(PackArgs),
    /// Print the smallest power of two not below X
    Pow2 {
        /// Value to pad
        x: u32,
    },
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Input file or directory
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (pages are written as name_0.png, name_1.png, ...)
    #[arg(short, long, default_value = "txatlas", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,
    /// Compute everything but write no files
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    dry_run: bool,

    // Layout
    /// Atlas width
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    max_width: u32,
    /// Atlas height
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    max_height: u32,
    /// Keep every image upright (no 90° rotation of wide images)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    no_rotation: bool,
    /// Pad page images to power-of-two sides
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    pow2: bool,

    // Debug
    /// Print the effective config and exit
    #[arg(long, default_value_t = false, help_heading = "Debug")]
    print_config: bool,
    /// Format for --print-config: json|yaml
    #[arg(long, default_value = "yaml", help_heading = "Debug")]
    print_config_format: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => run_layout(args),
        Commands::Pow2 { x } => {
            match pad_to_pow2(*x) {
                Some(p) => println!("{}", p),
                None => anyhow::bail!("no power of two >= {} fits in 32 bits", x),
            }
            Ok(())
        }
    }
}

fn run_pack(args: &PackArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = effective_config(args)?;
    if args.print_config {
        return print_config(&cfg, &args.print_config_format);
    }

    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    let registry = load_images_with_progress(&args.input, &paths, show_progress)?;
    info!(count = registry.len(), "loaded input images");

    let t0 = Instant::now();
    let out = pack_images(registry, &cfg).context("pack images")?;
    debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "packing done");

    let names = atlas_names(out.pages.len(), &args.name);
    let meta = to_json_meta(out.pages.iter().map(|p| &p.result), &names);

    if !args.dry_run {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
        for (page, file) in out.pages.iter().zip(&names) {
            let path = args.out_dir.join(file);
            page.rgba
                .save(&path)
                .with_context(|| format!("write {}", path.display()))?;
            info!(?path, frames = page.result.len(), "page written");
        }
        write_meta(&args.out_dir, &meta)?;
    }

    report(&out.stats(), args.dry_run);
    Ok(())
}

fn run_layout(args: &PackArgs) -> anyhow::Result<()> {
    let cfg = effective_config(args)?;
    if args.print_config {
        return print_config(&cfg, &args.print_config_format);
    }

    let paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    let mut items = Vec::with_capacity(paths.len());
    for p in &paths {
        // header-only read; pixels are not needed for placement
        match image::image_dimensions(p) {
            Ok((w, h)) => items.push(PackedItem::new(file_id(&args.input, p), w, h)),
            Err(e) => error!(?p, error = %e, "skip image"),
        }
    }
    info!(count = items.len(), "read image sizes");

    let results = pack_items(items, &cfg).context("pack layout")?;
    let names = atlas_names(results.len(), &args.name);
    let meta = to_json_meta(&results, &names);

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&meta)?);
    } else {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
        write_meta(&args.out_dir, &meta)?;
    }

    report(&PackStats::from_results(&results), args.dry_run);
    Ok(())
}

fn effective_config(args: &PackArgs) -> anyhow::Result<PackerConfig> {
    let base = PackerConfig::builder()
        .with_max_dimensions(args.max_width, args.max_height)
        .allow_rotation(!args.no_rotation)
        .pow2(args.pow2)
        .build();
    let cfg = if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_packer_config(base)
    } else {
        base
    };
    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

fn print_config(cfg: &PackerConfig, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(cfg)?),
        _ => println!("{}", serde_yaml::to_string(cfg)?),
    }
    Ok(())
}

fn write_meta(out_dir: &Path, meta: &serde_json::Value) -> anyhow::Result<()> {
    let path = out_dir.join("meta.json");
    fs::write(&path, serde_json::to_string_pretty(meta)?)
        .with_context(|| format!("write {}", path.display()))?;
    info!(?path, "metadata written");
    Ok(())
}

fn report(stats: &PackStats, dry_run: bool) {
    if dry_run {
        println!("{}", stats.summary());
    } else {
        info!(
            atlases = stats.num_atlases,
            items = stats.num_items,
            rotated = stats.num_rotated,
            occupancy = %format!("{:.2}%", stats.occupancy * 100.0),
            "packed"
        );
    }
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    let inc_set = build_globset(include)?;
    let exc_set = build_globset(exclude)?;
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn build_globset(patterns: &[String]) -> anyhow::Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut b = GlobSetBuilder::new();
    for pat in patterns {
        b.add(Glob::new(pat).with_context(|| format!("bad glob {}", pat))?);
    }
    Ok(Some(b.build()?))
}

fn should_skip(p: &Path, include: Option<&GlobSet>, exclude: Option<&GlobSet>) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if exclude.is_some_and(|ex| ex.is_match(&s)) {
        return true;
    }
    include.is_some_and(|inc| !inc.is_match(&s))
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    )
}

/// Id written to `fileId`: the path relative to the input root, with forward slashes.
fn file_id(root: &Path, p: &Path) -> String {
    let rel = if root.is_file() {
        p.file_name().map(Path::new).unwrap_or(p)
    } else {
        p.strip_prefix(root).unwrap_or(p)
    };
    rel.to_string_lossy().replace('\\', "/")
}

fn load_images_with_progress(
    root: &Path,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<ImageRegistry> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(ProgressStyle::with_template(
            "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
        )?);
        Some(b)
    } else {
        None
    };
    let mut registry = ImageRegistry::new();
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        if let Err(e) = registry.insert_path(file_id(root, p), p) {
            error!(?p, error = %e, "skip image");
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(registry)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

/// Partial config file; present keys override the command-line values.
#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_width: Option<u32>,
    max_height: Option<u32>,
    allow_rotation: Option<bool>,
    power_of_two: Option<bool>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.allow_rotation {
            cfg.allow_rotation = v;
        }
        if let Some(v) = self.power_of_two {
            cfg.power_of_two = v;
        }
        cfg
    }
}
