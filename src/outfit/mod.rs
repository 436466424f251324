use chrono::Local;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used for history entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Items offered when a new wardrobe is typed in interactively.
pub const STARTER_WARDROBE: &[&str] = &[
    "Blue jeans",
    "White cotton shirt",
    "Black leather jacket",
    "Red hoodie",
    "White sneakers",
    "Black heels",
];

/// A closed set of values the user picks one of.
pub trait Choice: Copy + fmt::Display + 'static {
    /// Heading shown in menus and prompts, e.g. "Style Preference".
    const TITLE: &'static str;
    fn all() -> &'static [Self];
}

macro_rules! choice {
    ($name:ident, $title:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Choice for $name {
            const TITLE: &'static str = $title;

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

choice!(Weather, "Weather" {
    Sunny => "Sunny",
    Cold => "Cold",
    Rainy => "Rainy",
    Warm => "Warm",
});

choice!(Season, "Season" {
    Spring => "Spring",
    Summer => "Summer",
    Autumn => "Autumn",
    Winter => "Winter",
});

choice!(Mood, "Mood" {
    Confident => "Confident",
    Casual => "Casual",
    Elegant => "Elegant",
    Playful => "Playful",
    Bold => "Bold",
});

choice!(Event, "Event" {
    OfficeMeeting => "Office Meeting",
    CasualOuting => "Casual Outing",
    Party => "Party",
    FormalEvent => "Formal Event",
    DateNight => "Date Night",
});

choice!(StylePreference, "Style Preference" {
    Casual => "Casual",
    Formal => "Formal",
    Bohemian => "Bohemian",
    Streetwear => "Streetwear",
    Minimalist => "Minimalist",
});

choice!(ColorPreference, "Color Preference" {
    Neutral => "Neutral",
    Bold => "Bold",
    Pastel => "Pastel",
    Monochrome => "Monochrome",
    Vibrant => "Vibrant",
});

/// The six situational inputs of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditions {
    pub weather: Weather,
    pub season: Season,
    pub mood: Mood,
    pub event: Event,
    pub style: StylePreference,
    pub color: ColorPreference,
}

/// What the stylist is asked about: the conditions plus the wardrobe to pick from.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub conditions: Conditions,
    pub items: Vec<String>,
}

/// One logged suggestion. Field names are the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub weather: Weather,
    pub season: Season,
    pub mood: Mood,
    pub event: Event,
    pub style_preference: StylePreference,
    pub color_preference: ColorPreference,
    pub outfit: String,
}

impl HistoryEntry {
    /// Stamp a new entry with the local wall clock.
    pub fn new(conditions: Conditions, outfit: impl Into<String>) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::at(timestamp, conditions, outfit)
    }

    pub fn at(timestamp: impl Into<String>, c: Conditions, outfit: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            weather: c.weather,
            season: c.season,
            mood: c.mood,
            event: c.event,
            style_preference: c.style,
            color_preference: c.color,
            outfit: outfit.into(),
        }
    }

    pub fn conditions(&self) -> Conditions {
        Conditions {
            weather: self.weather,
            season: self.season,
            mood: self.mood,
            event: self.event,
            style: self.style_preference,
            color: self.color_preference,
        }
    }
}

/// Split free text into wardrobe items: one per line, trimmed, blanks dropped.
pub fn parse_items(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
