//! orbital CLI: radial timeline widget for the terminal

use clap::{Args, Parser, Subcommand, ValueEnum};
use orbital_engine::{
    demo_items, load_items, normalize_angle, orbital_position, slot_angle, top_slot, OrbitConfig,
    Position, TimelineItem,
};
use orbital_tui::{IconMode, Theme, UiConfig};
use serde::Serialize;
use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Radial orbital timeline with phased selection animation
#[derive(Parser)]
#[command(name = "orbital")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    tui: TuiArgs,

    /// Write logs to this file (RUST_LOG selects the level)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui(TuiArgs),

    /// Print slot angles, positions and the top slot
    Layout {
        /// Number of evenly spaced slots
        #[arg(long, conflicts_with = "items")]
        count: Option<usize>,

        /// Item list (JSON); defaults to the demo items
        #[arg(long)]
        items: Option<PathBuf>,

        /// Global rotation angle in degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        angle: f64,

        /// Config file (JSON) for the orbit radius
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate and print an item list
    Items {
        /// Item list (JSON); defaults to the demo items
        #[arg(long)]
        items: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone, Default)]
struct TuiArgs {
    /// Item list (JSON); defaults to the demo items
    #[arg(long)]
    items: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Icon set; defaults to nerd, or ascii when NO_COLOR is set
    #[arg(long, value_enum)]
    icons: Option<IconArg>,

    /// Color theme
    #[arg(long, value_enum, default_value = "mocha")]
    theme: ThemeArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum IconArg {
    Nerd,
    Unicode,
    Ascii,
}

impl From<IconArg> for IconMode {
    fn from(arg: IconArg) -> Self {
        match arg {
            IconArg::Nerd => IconMode::Nerd,
            IconArg::Unicode => IconMode::Unicode,
            IconArg::Ascii => IconMode::Ascii,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum ThemeArg {
    #[default]
    Mocha,
    Latte,
    HighContrast,
}

impl ThemeArg {
    fn theme(self) -> Theme {
        match self {
            Self::Mocha => Theme::mocha(),
            Self::Latte => Theme::latte(),
            Self::HighContrast => Theme::high_contrast(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let is_tui = matches!(cli.command, None | Some(Commands::Tui(_)));
    if let Err(e) = init_logging(cli.log_file.as_deref(), is_tui) {
        eprintln!("Error: failed to open log file: {e}");
        std::process::exit(1);
    }

    let result = match cli.command {
        None => cmd_tui(cli.tui),
        Some(Commands::Tui(args)) => cmd_tui(args),
        Some(Commands::Layout {
            count,
            items,
            angle,
            config,
            json,
        }) => cmd_layout(count, items.as_deref(), angle, config.as_deref(), json),
        Some(Commands::Items { items, json }) => cmd_items(items.as_deref(), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// With a log file, everything goes there. Without one, the TUI logs nothing
/// (it owns the terminal) and other commands log warnings to stderr.
fn init_logging(log_file: Option<&Path>, is_tui: bool) -> std::io::Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("orbital_engine=debug,orbital_tui=debug,orbital=debug"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if is_tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_item_list(path: Option<&Path>) -> Result<Vec<TimelineItem>, Box<dyn Error>> {
    match path {
        Some(path) => {
            let items = load_items(path)?;
            info!(path = %path.display(), count = items.len(), "loaded items");
            Ok(items)
        }
        None => Ok(demo_items()),
    }
}

fn load_config(path: Option<&Path>) -> Result<OrbitConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(OrbitConfig::load(path)?),
        None => Ok(OrbitConfig::default()),
    }
}

fn cmd_tui(args: TuiArgs) -> Result<(), Box<dyn Error>> {
    let items = load_item_list(args.items.as_deref())?;
    let config = load_config(args.config.as_deref())?;

    let mut ui = UiConfig::from_env();
    if let Some(icons) = args.icons {
        ui.icons = icons.into();
    }
    ui.theme = args.theme.theme();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(orbital_tui::run_tui(items, config, ui))
}

/// One slot in `orbital layout` output.
#[derive(Debug, Serialize)]
struct SlotRow {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    slot_angle: f64,
    angle: f64,
    position: Position,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    count: usize,
    angle: f64,
    radius: f64,
    top_slot: Option<usize>,
    slots: Vec<SlotRow>,
}

fn layout_report(
    items: Option<&[TimelineItem]>,
    count: usize,
    angle: f64,
    radius: f64,
) -> LayoutReport {
    let angle = normalize_angle(angle);
    let slots = (0..count)
        .map(|index| {
            let item = items.and_then(|items| items.get(index));
            let base = slot_angle(index, count);
            SlotRow {
                index,
                id: item.map(|item| item.id),
                title: item.map(|item| item.title.clone()),
                slot_angle: base,
                angle: normalize_angle(base + angle),
                position: orbital_position(index, count, angle, radius),
            }
        })
        .collect();

    LayoutReport {
        count,
        angle,
        radius,
        top_slot: top_slot(count, angle),
        slots,
    }
}

fn cmd_layout(
    count: Option<usize>,
    items_path: Option<&Path>,
    angle: f64,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let config = load_config(config_path)?;
    let items = match count {
        Some(_) => None,
        None => Some(load_item_list(items_path)?),
    };
    let count = count.unwrap_or_else(|| items.as_ref().map_or(0, Vec::len));
    let report = layout_report(items.as_deref(), count, angle, config.radius);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} slots, angle {:.1}°, radius {:.1}\n",
        report.count, report.angle, report.radius
    );
    for slot in &report.slots {
        let marker = if report.top_slot == Some(slot.index) { "*" } else { " " };
        let title = slot.title.as_deref().unwrap_or("");
        println!(
            "{marker} {:>3}  {:<14} {:>7.2}°  ({:>8.2}, {:>8.2})",
            slot.index, title, slot.angle, slot.position.x, slot.position.y
        );
    }
    if let Some(top) = report.top_slot {
        println!("\nTop slot: {top}");
    }
    Ok(())
}

fn cmd_items(path: Option<&Path>, json: bool) -> Result<(), Box<dyn Error>> {
    let items = load_item_list(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("{} items\n", items.len());
    for item in &items {
        println!(
            "{:>3}  {:<14} {:<12} {:<10} {:>3}%",
            item.id, item.title, item.status, item.date, item.progress
        );
    }
    Ok(())
}
