use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

use training_core::{
    ingest_player, ingest_roster, load_roster, PlayerIdentity, PlayerRecord, RecordStore,
    RunTotals, TrainingError, TrainingExtractor,
};

#[derive(Parser)]
#[command(name = "dotrain", version, about = "Dugout Online training chart tracker")]
struct Cli {
    /// Directory holding one JSON record per player
    #[arg(long, default_value = "player_data")]
    output_dir: PathBuf,

    /// Increase verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge one saved player page into that player's record
    Ingest {
        /// Saved player details page (HTML)
        page: PathBuf,
        /// Player ID
        #[arg(long)]
        id: String,
        /// Full player name as shown on the roster
        #[arg(long)]
        name: String,
        /// Player age
        #[arg(long)]
        age: u32,
    },
    /// Process every player listed in a roster file
    Scan {
        /// JSON array of {id, name, age, page}; page paths are relative to this file
        roster: PathBuf,
        /// Maximum player age to include
        #[arg(long, default_value = "30")]
        max_age: u32,
    },
    /// Show the per-skill chart summary for one stored player
    Show {
        /// Player ID
        id: String,
    },
    /// Summarise every stored player
    Report,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> training_core::Result<()> {
    match cli.command {
        Commands::Ingest { page, id, name, age } => {
            cmd_ingest(&cli.output_dir, &page, PlayerIdentity::new(id, name, age))
        }
        Commands::Scan { roster, max_age } => cmd_scan(&cli.output_dir, &roster, max_age),
        Commands::Show { id } => cmd_show(&cli.output_dir, &id),
        Commands::Report => cmd_report(&cli.output_dir),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn fmt_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "-".to_string(), |r| format!("{:.2}", r))
}

fn fmt_cap(cap: Option<i64>) -> String {
    cap.map_or_else(|| "-".to_string(), |c| c.to_string())
}

fn print_totals(totals: &RunTotals) {
    println!();
    println!("Run complete:");
    println!("  Players processed: {}", totals.players);
    println!("  Records written:   {}", totals.written);
    if totals.too_old > 0 {
        println!("  Over age limit:    {}", totals.too_old);
    }
    if totals.skipped > 0 {
        println!("  Skipped (errors):  {}", totals.skipped);
    }
    println!();
    println!("Total POPS: {}", totals.pops);
    println!("Total DROPS: {}", totals.drops);
    println!("Ratio: {}", fmt_ratio(totals.ratio()));
}

fn cmd_ingest(output_dir: &Path, page: &Path, identity: PlayerIdentity) -> training_core::Result<()> {
    let store = RecordStore::open(output_dir)?;
    let extractor = TrainingExtractor::new()?;
    let html = std::fs::read_to_string(page)?;

    let outcome = ingest_player(&extractor, &store, identity, &html)?;
    let r = &outcome.record;
    println!(
        "{}: {} skills, cap {}, pops {}, drops {}, ratio {}",
        r.name,
        r.training_chart.len(),
        fmt_cap(r.player_cap),
        r.player_pops,
        r.player_drops,
        fmt_ratio(r.player_pops_ratio)
    );
    if outcome.written {
        println!("Wrote {}", store.path_for(&outcome.key).display());
    } else {
        println!("No pops or drops yet; {} left unchanged.", outcome.key);
    }
    Ok(())
}

fn cmd_scan(output_dir: &Path, roster_path: &Path, max_age: u32) -> training_core::Result<()> {
    let roster = load_roster(roster_path)?;
    println!("Processing {} player(s)...", roster.len());

    let store = RecordStore::open(output_dir)?;
    log::info!("Writing records to {}", store.dir().display());
    let extractor = TrainingExtractor::new()?;
    let report = ingest_roster(&extractor, &store, &roster, max_age);

    if !report.outcomes.is_empty() {
        let mut table = new_table();
        table.set_header(vec!["Name", "Age", "Skills", "Cap", "Pops", "Drops", "Ratio", "Saved"]);
        for o in &report.outcomes {
            let r = &o.record;
            table.add_row(vec![
                r.name.clone(),
                r.age.to_string(),
                r.training_chart.len().to_string(),
                fmt_cap(r.player_cap),
                r.player_pops.to_string(),
                r.player_drops.to_string(),
                fmt_ratio(r.player_pops_ratio),
                if o.written { "yes" } else { "no" }.to_string(),
            ]);
        }
        println!("{table}");
    }

    print_totals(&report.totals);
    Ok(())
}

fn find_record(store: &RecordStore, id: &str) -> training_core::Result<PlayerRecord> {
    store
        .load_all()?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| TrainingError::Data(format!("No stored record for player {}", id)))
}

fn cmd_show(output_dir: &Path, id: &str) -> training_core::Result<()> {
    let store = RecordStore::open(output_dir)?;
    let record = find_record(&store, id)?;

    println!("{} (id {}, age {})", record.name, record.id, record.age);
    println!(
        "Cap {}  Pops {}  Drops {}  Ratio {}",
        fmt_cap(record.player_cap),
        record.player_pops,
        record.player_drops,
        fmt_ratio(record.player_pops_ratio)
    );

    let mut table = new_table();
    table.set_header(vec!["Skill", "Native", "Points", "Latest", "Cap", "Pops", "Drops"]);
    for s in &record.training_chart {
        let latest = s
            .data
            .last()
            .map(|p| format!("{} ({})", p.value, p.date))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            s.label_en.clone(),
            s.label.clone(),
            s.data.len().to_string(),
            latest,
            fmt_cap(s.cap),
            s.pops.to_string(),
            s.drops.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn cmd_report(output_dir: &Path) -> training_core::Result<()> {
    let store = RecordStore::open(output_dir)?;
    let mut records = store.load_all()?;

    if records.is_empty() {
        println!(
            "No records in {}. Run 'dotrain scan <roster>' first.",
            store.dir().display()
        );
        return Ok(());
    }

    records.sort_by(|a, b| {
        b.player_pops_ratio
            .unwrap_or(-1.0)
            .total_cmp(&a.player_pops_ratio.unwrap_or(-1.0))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut totals = RunTotals::default();
    let mut table = new_table();
    table.set_header(vec!["Name", "ID", "Age", "Cap", "Pops", "Drops", "Ratio"]);
    for r in &records {
        totals.players += 1;
        totals.pops += r.player_pops;
        totals.drops += r.player_drops;
        table.add_row(vec![
            r.name.clone(),
            r.id.clone(),
            r.age.to_string(),
            fmt_cap(r.player_cap),
            r.player_pops.to_string(),
            r.player_drops.to_string(),
            fmt_ratio(r.player_pops_ratio),
        ]);
    }
    println!("{table}");
    println!();
    println!("Players: {}", totals.players);
    println!("Total POPS: {}", totals.pops);
    println!("Total DROPS: {}", totals.drops);
    println!("Ratio: {}", fmt_ratio(totals.ratio()));
    Ok(())
}
