use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::outfit::{ColorPreference, Event, Mood, Season, StylePreference, Weather};

#[derive(Parser, Debug)]
#[command(name="chikki", version, about="Outfit suggestions from your own wardrobe, styled by Gemini")]
pub struct Args {
    /// TOML file with storage and model settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding outfit_history.json and wardrobes.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save, list or show named wardrobes
    #[command(subcommand)]
    Wardrobe(WardrobeCommand),
    /// Ask the stylist for an outfit, then refine it with feedback
    Suggest(SuggestArgs),
    /// Show past suggestions
    History {
        /// Only the most recent N entries
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Write a past suggestion as a LaTeX document
    Export {
        /// History position, 1 = oldest; defaults to the latest entry
        #[arg(long)]
        index: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WardrobeCommand {
    /// Items are read one per line from --file, or from stdin
    Save {
        #[arg(long, default_value = "My Wardrobe")]
        name: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    List,
    Show { name: String },
}

#[derive(clap::Args, Debug)]
pub struct SuggestArgs {
    /// Saved wardrobe to pick from
    #[arg(long, conflicts_with = "file")]
    pub wardrobe: Option<String>,

    /// Text file with one item per line
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub weather: Option<Weather>,

    #[arg(long, value_enum)]
    pub season: Option<Season>,

    #[arg(long, value_enum)]
    pub mood: Option<Mood>,

    #[arg(long, value_enum)]
    pub event: Option<Event>,

    #[arg(long, value_enum)]
    pub style: Option<StylePreference>,

    #[arg(long, value_enum)]
    pub color: Option<ColorPreference>,

    /// Also write the suggestion as LaTeX to this path
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub no_refine: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_flags_parse_into_choices() {
        let args = Args::try_parse_from([
            "chikki", "suggest", "--wardrobe", "Summer", "--weather", "sunny",
            "--event", "casual-outing", "--style", "streetwear", "--no-refine",
        ])
        .unwrap();
        match args.command {
            Command::Suggest(s) => {
                assert_eq!(s.wardrobe.as_deref(), Some("Summer"));
                assert_eq!(s.weather, Some(Weather::Sunny));
                assert_eq!(s.event, Some(Event::CasualOuting));
                assert_eq!(s.style, Some(StylePreference::Streetwear));
                assert!(s.mood.is_none());
                assert!(s.no_refine);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn out_of_set_value_is_rejected() {
        assert!(Args::try_parse_from(["chikki", "suggest", "--weather", "foggy"]).is_err());
    }

    #[test]
    fn wardrobe_and_file_conflict() {
        assert!(Args::try_parse_from(["chikki", "suggest", "--wardrobe", "A", "--file", "x.txt"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["chikki", "wardrobe", "list", "--data-dir", "/tmp/c", "--debug"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/c")));
        assert!(args.debug);
        assert!(matches!(args.command, Command::Wardrobe(WardrobeCommand::List)));
    }

    #[test]
    fn wardrobe_save_defaults_name() {
        let args = Args::try_parse_from(["chikki", "wardrobe", "save"]).unwrap();
        match args.command {
            Command::Wardrobe(WardrobeCommand::Save { name, file }) => {
                assert_eq!(name, "My Wardrobe");
                assert!(file.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
