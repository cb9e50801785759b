use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use dta_data::{DEFAULT_COLUMNS, DecodeOptions, Palette, ResourceContainer, read_container};
use dta_types::{TileCategory, ZoneRecord};
use log::{LevelFilter, debug, info};
use serde::Deserialize;
use strum::IntoEnumIterator;

/// Inspect a Desktop Adventures `.DTA` resource container.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults to `dta.toml` if present.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory holding the container.
    #[arg(long)]
    data_dir: Option<String>,
    /// Container file name inside the data directory.
    #[arg(long)]
    file_name: Option<String>,
    /// 1024-byte BGRA palette replacing the built-in one.
    #[arg(long)]
    palette: Option<String>,
    /// More log output; repeat for trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Version and record counts.
    Summary,
    /// Header, hotspots, actors and scripts of one zone.
    Zone { id: u16 },
    /// Render every tile into one PNG sheet.
    Tiles {
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long)]
        columns: Option<u32>,
    },
    /// The whole container as JSON, without pixel data.
    Json {
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Debug, Deserialize)]
struct Settings {
    data_dir: PathBuf,
    file_name: String,
    palette: Option<PathBuf>,
    tileset_columns: u32,
}

impl Settings {
    fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::with_name("dta").required(false),
        };
        config::Config::builder()
            .set_default("data_dir", "data")?
            .set_default("file_name", "YODESK.DTA")?
            .set_default("tileset_columns", i64::from(DEFAULT_COLUMNS))?
            .add_source(file)
            .add_source(config::Environment::with_prefix("DTA"))
            .set_override_option("data_dir", cli.data_dir.clone())?
            .set_override_option("file_name", cli.file_name.clone())?
            .set_override_option("palette", cli.palette.clone())?
            .build()?
            .try_deserialize()
            .wrap_err("invalid settings")
    }

    fn container_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_palette(path: &Path) -> Result<Palette> {
    let bytes =
        std::fs::read(path).wrap_err_with(|| format!("reading palette {}", path.display()))?;
    Ok(Palette::from_bgra(&bytes)?)
}

fn load(settings: &Settings) -> Result<ResourceContainer> {
    let mut options = DecodeOptions::default();
    if let Some(path) = &settings.palette {
        options.palette = load_palette(path)?;
    }
    let path = settings.container_path();
    info!("decoding {}", path.display());
    let file = File::open(&path).wrap_err_with(|| format!("opening {}", path.display()))?;
    read_container(BufReader::new(file), &options)
        .wrap_err_with(|| format!("decoding {}", path.display()))
}

fn summary(container: &ResourceContainer, out: &mut impl Write) -> io::Result<()> {
    match &container.version {
        Some(version) => writeln!(out, "version    {version}")?,
        None => writeln!(out, "version    (none)")?,
    }
    writeln!(out, "tiles      {}", container.tiles.len())?;
    for category in TileCategory::iter() {
        let n = container
            .tiles
            .iter()
            .filter(|t| t.category == category)
            .count();
        if n > 0 {
            let name = format!("{category:?}");
            writeln!(out, "  {name:<12} {n}")?;
        }
    }
    writeln!(out, "zones      {}", container.zones.len())?;
    let overworld = container.zones.iter().filter(|z| z.is_overworld).count();
    writeln!(out, "  overworld    {overworld}")?;
    let splash = container.zones.iter().filter(|z| z.kind.is_splash()).count();
    writeln!(out, "  splash       {splash}")?;
    writeln!(out, "items      {}", container.items.len())?;
    writeln!(out, "creatures  {}", container.creatures.len())?;
    writeln!(out, "puzzles    {}", container.puzzles.len())?;
    writeln!(out, "sounds     {}", container.sounds.len())
}

fn zone(container: &ResourceContainer, zone: &ZoneRecord, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "zone {} {}x{} {:?} ({}) {:?} trailer {} {}",
        zone.id,
        zone.width,
        zone.height,
        zone.kind,
        zone.kind_code,
        zone.biome,
        zone.trailer.code,
        zone.trailer.mask
    )?;

    writeln!(out, "walkable:")?;
    for y in 0..zone.height {
        let row: String = (0..zone.width)
            .map(|x| if container.is_walkable(zone, x, y) { '.' } else { '#' })
            .collect();
        writeln!(out, "  {row}")?;
    }

    writeln!(out, "hotspots:")?;
    for hotspot in &zone.hotspots {
        writeln!(out, "  {hotspot}")?;
    }

    writeln!(out, "actors:")?;
    for actor in &zone.zone_actors {
        let name = container
            .creature(actor.creature_id)
            .map_or("?", |c| c.name.as_str());
        writeln!(
            out,
            "  {} {} ({}) at ({},{}) {:?}",
            actor.index, actor.creature_id, name, actor.x, actor.y, actor.args
        )?;
    }

    for (label, ids) in [("rewards", &zone.reward_items), ("npcs", &zone.quest_npcs)] {
        let names: Vec<&str> = ids
            .iter()
            .map(|&id| container.item_name(id).unwrap_or("?"))
            .collect();
        writeln!(out, "{label}: {}", names.join(", "))?;
    }

    for (i, script) in zone.action_triggers.iter().enumerate() {
        writeln!(out, "script {i}:")?;
        write!(out, "{script}")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::load(&cli)?;
    debug!("{settings:?}");
    let container = load(&settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Summary => summary(&container, &mut out)?,
        Command::Zone { id } => {
            let record = container
                .zone(id)
                .ok_or_else(|| eyre!("no zone with id {id}"))?;
            zone(&container, record, &mut out)?;
        }
        Command::Tiles { out: path, columns } => {
            let columns = columns.unwrap_or(settings.tileset_columns);
            container
                .tileset(columns)
                .save(&path)
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            info!("wrote {} tiles to {}", container.tiles.len(), path.display());
        }
        Command::Json { compact } => {
            if compact {
                serde_json::to_writer(&mut out, &container)?;
            } else {
                serde_json::to_writer_pretty(&mut out, &container)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
