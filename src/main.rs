use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sagbook::{
    AppConfig, FileSlot, SagbookError, SetupDraft, SetupQuery, SetupRecord, SetupStore,
    TrackCondition, export::export_json_lines, filter::track_names, setup::PRESET_TAGS,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Directory holding the setup history, overrides the config file
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a new setup
    Add(AddArgs),
    /// List stored setups, newest first
    List {
        #[arg(short, long)]
        track: Option<String>,
        #[arg(short, long)]
        condition: Option<String>,
        /// Search track names, notes and tags
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show every field of one setup
    Show { id: String },
    /// List the tracks that have stored setups
    Tracks,
    /// List the quick-pick feedback tags
    Presets,
    /// Export the history as JSON Lines
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct AddArgs {
    #[arg(short, long)]
    track: String,
    #[arg(short, long, default_value_t = TrackCondition::Loamy)]
    conditions: TrackCondition,
    #[arg(short, long)]
    weather: Option<String>,
    #[arg(long)]
    front_compression: Option<u32>,
    #[arg(long)]
    front_rebound: Option<u32>,
    #[arg(long)]
    front_sag: Option<f64>,
    #[arg(long)]
    front_tire_pressure: Option<f64>,
    #[arg(long)]
    rear_high_speed_compression: Option<f64>,
    #[arg(long)]
    rear_low_speed_compression: Option<u32>,
    #[arg(long)]
    rear_rebound: Option<u32>,
    #[arg(long)]
    rear_sag: Option<f64>,
    #[arg(long)]
    rear_tire_pressure: Option<f64>,
    #[arg(short, long, default_value = "")]
    notes: String,
    /// Feedback tag, may be repeated. See `sagbook presets` for the usual ones
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl AddArgs {
    fn into_draft(self) -> SetupDraft {
        let defaults = SetupDraft::default();
        SetupDraft {
            track_name: self.track,
            conditions: self.conditions,
            weather: self.weather,
            front_compression: self.front_compression.unwrap_or(defaults.front_compression),
            front_rebound: self.front_rebound.unwrap_or(defaults.front_rebound),
            front_sag: self.front_sag.unwrap_or(defaults.front_sag),
            front_tire_pressure: self
                .front_tire_pressure
                .unwrap_or(defaults.front_tire_pressure),
            rear_high_speed_compression: self
                .rear_high_speed_compression
                .unwrap_or(defaults.rear_high_speed_compression),
            rear_low_speed_compression: self
                .rear_low_speed_compression
                .unwrap_or(defaults.rear_low_speed_compression),
            rear_rebound: self.rear_rebound.unwrap_or(defaults.rear_rebound),
            rear_sag: self.rear_sag.unwrap_or(defaults.rear_sag),
            rear_tire_pressure: self
                .rear_tire_pressure
                .unwrap_or(defaults.rear_tire_pressure),
            notes: self.notes,
            tags: self.tags,
        }
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Result<SetupStore<FileSlot>, SagbookError> {
    let mut config = AppConfig::load()?;
    if data_dir.is_some() {
        config.data_dir = data_dir;
    }
    let slot = config.open_slot()?;
    Ok(SetupStore::with_key(slot, config.slot_key))
}

fn add(store: &mut SetupStore<FileSlot>, args: AddArgs) -> Result<(), SagbookError> {
    let record = SetupRecord::create(args.into_draft())?;
    let id = record.id();
    store.append(record)?;
    println!("Setup saved: {}", id);
    Ok(())
}

fn list(store: &SetupStore<FileSlot>, query: SetupQuery) {
    let setups = query.apply(&store.load());
    if setups.is_empty() {
        println!("No setups found");
        return;
    }
    for setup in setups {
        println!(
            "{}  {}  {} · {}  {}",
            setup.id(),
            setup.created_at().format("%Y-%m-%d %H:%M"),
            setup.track_name,
            setup.conditions,
            setup.tags.join(", ")
        );
    }
}

fn show(store: &SetupStore<FileSlot>, id: &str) -> Result<(), SagbookError> {
    let setup = Uuid::parse_str(id.trim())
        .ok()
        .and_then(|uuid| store.find(uuid))
        .ok_or_else(|| SagbookError::SetupNotFound { id: id.to_string() })?;

    println!("{}", setup.track_name);
    println!(
        "{} · {}",
        setup.created_at().format("%Y-%m-%d %H:%M"),
        setup.conditions
    );
    if let Some(weather) = &setup.weather {
        println!("Weather: {}", weather);
    }
    println!();
    println!("Front");
    println!("  Compression:        {} clicks", setup.front_compression);
    println!("  Rebound:            {} clicks", setup.front_rebound);
    println!("  Sag:                {} mm", setup.front_sag);
    println!("  Tire pressure:      {} bar", setup.front_tire_pressure);
    println!("Rear");
    println!("  High-speed comp.:   {} turns", setup.rear_high_speed_compression);
    println!("  Low-speed comp.:    {} clicks", setup.rear_low_speed_compression);
    println!("  Rebound:            {} clicks", setup.rear_rebound);
    println!("  Sag:                {} mm", setup.rear_sag);
    println!("  Tire pressure:      {} bar", setup.rear_tire_pressure);
    if !setup.notes.is_empty() {
        println!();
        println!("Notes: {}", setup.notes);
    }
    if !setup.tags.is_empty() {
        println!("Tags: {}", setup.tags.join(", "));
    }
    Ok(())
}

fn run(cli: Args) -> Result<(), SagbookError> {
    let mut store = open_store(cli.data_dir)?;
    match cli.command {
        Commands::Add(args) => add(&mut store, args)?,
        Commands::List {
            track,
            condition,
            search,
        } => list(
            &store,
            SetupQuery {
                track_name: track,
                condition,
                search_query: search,
            },
        ),
        Commands::Show { id } => show(&store, &id)?,
        Commands::Tracks => {
            for name in track_names(&store.load()) {
                println!("{}", name);
            }
        }
        Commands::Presets => {
            for tag in PRESET_TAGS {
                println!("{}", tag);
            }
        }
        Commands::Export { output } => {
            let count = export_json_lines(&store.load(), &output)?;
            println!("Exported {} setups to {}", count, output.display());
        }
    }
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = run(cli) {
        log::error!("{:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
