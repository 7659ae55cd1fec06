use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::NotesSplit;

pub const NO_TICKETS: &str = "None.";

const CURRENCY_SYMBOLS: &[char] = &['€', '$', '£'];
const TICKET_KEYWORDS: &[&str] = &["fare", "ticket"];

static FILLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)hold\s+(?:kids|children)(?:['’]s?)?\s+hands?|watch\s+(?:kids|children)")
        .expect("valid filler regex")
});

static FRAGMENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.\n;]").expect("valid separator regex"));

/// Splits free-text notes into informational lines and ticket lines.
/// The ticket list always has at least one entry.
pub fn split_notes(notes: Option<&str>) -> NotesSplit {
    let Some(notes) = notes else {
        return NotesSplit::empty();
    };

    let cleaned = FILLER.replace_all(notes, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return NotesSplit::empty();
    }

    let mut costs_and_notes = Vec::new();
    let mut tickets_to_buy = Vec::new();

    for fragment in FRAGMENT_SEPARATOR
        .split(cleaned)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
    {
        if is_ticket_line(fragment) {
            tickets_to_buy.push(fragment.to_string());
        }
        costs_and_notes.push(fragment.to_string());
    }

    if tickets_to_buy.is_empty() {
        tickets_to_buy.push(NO_TICKETS.to_string());
    }

    NotesSplit {
        costs_and_notes,
        tickets_to_buy,
    }
}

fn is_ticket_line(fragment: &str) -> bool {
    let lower = fragment.to_lowercase();
    fragment.contains(CURRENCY_SYMBOLS)
        || TICKET_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

impl NotesSplit {
    pub fn empty() -> Self {
        Self {
            costs_and_notes: Vec::new(),
            tickets_to_buy: vec![NO_TICKETS.to_string()],
        }
    }
}
