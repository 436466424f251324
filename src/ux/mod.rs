use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use crate::outfit::{Choice, HistoryEntry, STARTER_WARDROBE};
use crate::stylist;

pub fn success(msg: &str) {
    println!("{} {}", "✔".green().bold(), msg.green());
}

pub fn warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg.yellow());
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✖".red().bold(), msg.red());
}

/// Read one line; `None` on EOF or a read error.
pub fn ask(prompt: &str) -> Option<String> {
    print!("{} ", prompt.bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Yes/no question defaulting to no. EOF counts as no.
pub fn confirm(question: &str) -> bool {
    ask(&format!("{question} [y/N]:")).is_some_and(|a| is_yes(&a))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Match a menu answer: a 1-based position or a label, case-insensitive.
/// Blank input picks the first value.
pub fn pick<T: Choice>(input: &str) -> Option<T> {
    let input = input.trim();
    if input.is_empty() {
        return T::all().first().copied();
    }
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| T::all().get(i)).copied();
    }
    T::all()
        .iter()
        .copied()
        .find(|c| c.to_string().eq_ignore_ascii_case(input))
}

/// The first option, used when stdin ends before the field is answered,
/// with the notice telling the user so.
fn fallback<T: Choice>() -> (T, String) {
    let first = T::all()[0];
    (first, format!("No answer for {}; using {first}.", T::TITLE))
}

/// Numbered menu for one field; keeps asking until the answer is in the set.
/// If stdin runs out, the first option is taken and a warning names the field.
pub fn choose<T: Choice>() -> T {
    println!("{}", T::TITLE.cyan().bold());
    for (i, c) in T::all().iter().enumerate() {
        println!("  {}. {}", i + 1, c);
    }
    loop {
        let Some(line) = ask(&format!("{} [1]:", T::TITLE)) else {
            println!();
            let (first, notice) = fallback::<T>();
            warning(&notice);
            return first;
        };
        match pick::<T>(&line) {
            Some(c) => return c,
            None => warning(&format!("'{}' is not one of the {} options", line.trim(), T::all().len())),
        }
    }
}

/// Wardrobe items from stdin. Piped input is read to the end; at a terminal
/// an empty line finishes, and finishing with nothing offers the starter list.
pub fn read_items_from_stdin() -> Vec<String> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let text: String = stdin.lock().lines().map_while(Result::ok).collect::<Vec<_>>().join("\n");
        return crate::outfit::parse_items(&text);
    }

    println!("{}", "Enter wardrobe items, one per line. Empty line to finish.".bold());
    let mut items = Vec::new();
    while let Some(line) = ask(">") {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        items.push(line.to_string());
    }
    if items.is_empty() && confirm(&format!("No items entered. Use the starter wardrobe ({})?", STARTER_WARDROBE.join(", "))) {
        items = STARTER_WARDROBE.iter().map(|s| s.to_string()).collect();
    }
    items
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn show_wardrobe(name: &str, items: &[String]) {
    println!("\n{}", format!("=== {} ===", name).bold());
    for row in items.chunks(4) {
        let cells: Vec<String> = row.iter().map(|i| format!("👗 {:<22}", i)).collect();
        println!("  {}", cells.join(" ").blue());
    }
    println!();
}

pub fn show_suggestion(title: &str, text: &str) {
    println!("\n{}", format!("## {}", title).magenta().bold());
    if stylist::is_failure(text) {
        error(text);
    } else {
        println!("{}", render_markdown(text));
    }
    println!();
}

/// Light terminal styling for headings and bold lines; everything else
/// passes through untouched.
fn render_markdown(text: &str) -> String {
    text.lines()
        .map(|line| {
            let t = line.trim_start();
            if t.starts_with('#') {
                t.trim_start_matches('#').trim().cyan().bold().to_string()
            } else if t.starts_with("**") || t.starts_with("- **") {
                line.bold().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history_heading(entry: &HistoryEntry) -> String {
    format!("Outfit from {}", entry.timestamp)
}

pub fn show_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("(no outfits yet)");
        return;
    }
    for e in entries {
        println!("{}", history_heading(e).bold().underline());
        let c = e.conditions();
        println!("- {}: {}", "Weather".bold(), c.weather);
        println!("- {}: {}", "Season".bold(), c.season);
        println!("- {}: {}", "Mood".bold(), c.mood);
        println!("- {}: {}", "Event".bold(), c.event);
        println!("- {}: {}", "Style Preference".bold(), c.style);
        println!("- {}: {}", "Color Preference".bold(), c.color);
        show_suggestion("Outfit", &e.outfit);
    }
}
