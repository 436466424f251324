use anyhow::Result;
use clap::Parser;
use fs_err as fs;
use std::path::Path;

mod cli;
mod config;
mod errors;
mod export;
mod log;
mod outfit;
mod prompt;
mod provider;
mod session;
mod store;
mod stylist;
mod ux;

use cli::{Command, SuggestArgs, WardrobeCommand};
use config::Config;
use errors::{StoreError, StylistError};
use outfit::Conditions;
use session::Session;
use store::{JsonStore, SaveReport};
use stylist::Stylist;

/// Configuration problems end the program before any command runs.
fn fatal(e: StylistError) -> ! {
    ux::error(&e.to_string());
    std::process::exit(2);
}

fn report_read(warning: &Option<String>) {
    if let Some(w) = warning {
        ux::warning(w);
    }
}

/// Returns true when the write went through.
fn report_save(saved: &Result<SaveReport, StoreError>) -> bool {
    match saved {
        Ok(r) => {
            tracing::debug!(path = %r.path.display(), "saved");
            report_read(&r.warning);
            true
        }
        Err(e) => {
            ux::error(&e.to_string());
            false
        }
    }
}

fn export_to(path: &Path, text: &str) {
    match export::write_document(path, text) {
        Ok(()) => ux::success(&format!("Outfit exported as LaTeX to {}", path.display())),
        Err(e) => ux::error(&format!("Error exporting outfit: {e}")),
    }
}

fn run_wardrobe(cmd: WardrobeCommand, store: &JsonStore) -> Result<()> {
    match cmd {
        WardrobeCommand::Save { name, file } => {
            let items = match file {
                Some(path) => outfit::parse_items(&fs::read_to_string(path)?),
                None => ux::read_items_from_stdin(),
            };
            if items.is_empty() {
                ux::warning("No wardrobe items given; nothing saved.");
                return Ok(());
            }
            let count = items.len();
            if report_save(&store.save_wardrobe(&name, items)) {
                ux::success(&format!("Wardrobe '{name}' saved successfully! ({count} items)"));
            }
        }
        WardrobeCommand::List => {
            let loaded = store.load_wardrobes();
            report_read(&loaded.warning);
            if loaded.data.is_empty() {
                println!("(no saved wardrobes)");
            }
            for (name, items) in &loaded.data {
                println!("{name}  ({} items)", items.len());
            }
        }
        WardrobeCommand::Show { name } => {
            let loaded = store.load_wardrobes();
            report_read(&loaded.warning);
            match loaded.data.get(&name) {
                Some(items) => ux::show_wardrobe(&name, items),
                None => ux::error(&format!("No wardrobe named '{name}'")),
            }
        }
    }
    Ok(())
}

async fn run_suggest(args: SuggestArgs, store: &JsonStore, stylist: &Stylist) -> Result<()> {
    let items = match (&args.wardrobe, &args.file) {
        (Some(name), _) => {
            let loaded = store.load_wardrobes();
            report_read(&loaded.warning);
            match loaded.data.get(name) {
                Some(items) => {
                    ux::success(&format!("Loaded wardrobe '{name}'!"));
                    items.clone()
                }
                None => {
                    ux::error(&format!("No wardrobe named '{name}'"));
                    return Ok(());
                }
            }
        }
        (None, Some(path)) => outfit::parse_items(&fs::read_to_string(path)?),
        (None, None) => ux::read_items_from_stdin(),
    };
    if items.is_empty() {
        ux::warning("Your wardrobe is empty. Save or enter some items first.");
        return Ok(());
    }

    let mut session = Session::with_wardrobe(items);
    let conditions = Conditions {
        weather: args.weather.unwrap_or_else(ux::choose),
        season: args.season.unwrap_or_else(ux::choose),
        mood: args.mood.unwrap_or_else(ux::choose),
        event: args.event.unwrap_or_else(ux::choose),
        style: args.style.unwrap_or_else(ux::choose),
        color: args.color.unwrap_or_else(ux::choose),
    };

    let pb = ux::spinner("Styling your perfect outfit...");
    let turn = session.suggest(stylist, store, conditions).await;
    pb.finish_and_clear();
    ux::show_suggestion("Your Outfit Suggestion", &turn.text);
    report_save(&turn.saved);

    if !args.no_refine {
        while ux::confirm("Refine this outfit with feedback?") {
            let question = if session.feedback.is_empty() {
                "Feedback:".to_string()
            } else {
                format!("Feedback [{}]:", session.feedback)
            };
            let Some(line) = ux::ask(&question) else { break };
            let feedback = match line.trim() {
                "" => session.feedback.clone(),
                t => t.to_string(),
            };
            if feedback.is_empty() {
                ux::warning("No feedback given.");
                continue;
            }

            let pb = ux::spinner("Refining your outfit...");
            let turn = session.refine(stylist, store, conditions, feedback).await;
            pb.finish_and_clear();
            ux::show_suggestion("Refined Outfit Suggestion", &turn.text);
            report_save(&turn.saved);
        }
    }

    if let (Some(path), Some(text)) = (&args.export, &session.suggestion) {
        export_to(path, text);
    }
    Ok(())
}

fn run_history(store: &JsonStore, limit: Option<usize>) {
    let loaded = store.load_history();
    report_read(&loaded.warning);
    let entries = &loaded.data;
    let skip = limit.map(|n| entries.len().saturating_sub(n)).unwrap_or(0);
    ux::show_history(&entries[skip..]);
}

fn run_export(store: &JsonStore, cfg: &Config, index: Option<usize>, out: Option<&Path>) {
    let loaded = store.load_history();
    report_read(&loaded.warning);
    let entry = match index {
        Some(i) => i.checked_sub(1).and_then(|i| loaded.data.get(i)),
        None => loaded.data.last(),
    };
    let Some(entry) = entry else {
        ux::error("No such outfit in history.");
        return;
    };
    let path = out.map(Path::to_path_buf).unwrap_or_else(|| Path::new(&cfg.export_file).to_path_buf());
    ux::success(&ux::history_heading(entry));
    export_to(&path, &entry.outfit);
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = cli::Args::parse();
    log::init(args.debug);

    let mut cfg = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fatal(e)),
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir.clone() {
        cfg.data_dir = dir;
    }
    if let Some(model) = args.model.clone() {
        cfg.model = model;
    }

    let api_key = config::api_key_from_env().unwrap_or_else(|e| fatal(e));
    tracing::debug!(?cfg, "configuration resolved");

    let store = JsonStore::from_config(&cfg);
    tracing::debug!(
        history = %store.history_path().display(),
        wardrobes = %store.wardrobes_path().display(),
        "data files"
    );
    let stylist = Stylist::new(provider::make_provider(&cfg, api_key));

    match args.command {
        Command::Wardrobe(cmd) => run_wardrobe(cmd, &store)?,
        Command::Suggest(s) => run_suggest(s, &store, &stylist).await?,
        Command::History { limit } => run_history(&store, limit),
        Command::Export { index, out } => run_export(&store, &cfg, index, out.as_deref()),
    }

    Ok(())
}
