use crate::models::ActivityType;

const TRAVEL_ACTIVITY_KEYWORDS: &[&str] = &[
    "arrive",
    "flight",
    "taxi",
    "walk to",
    "vaporetto",
    "train",
    "water bus",
    "check-in",
    "check out",
    "luggage",
    "customs",
    "immigration",
];
const TRAVEL_NOTES_KEYWORDS: &[&str] = &["flight", "taxi", "vaporetto", "train"];
const DINING_ACTIVITY_KEYWORDS: &[&str] = &["breakfast", "lunch", "dinner", "gelato", "snack"];
const LEISURE_ACTIVITY_KEYWORDS: &[&str] =
    &["view", "relax", "explore", "free time", "gondola", "market"];
const LEISURE_NOTES_KEYWORDS: &[&str] = &["photo", "sightseeing", "market"];

/// Tags an activity as travel, dining and/or activity. Matching is plain
/// case-insensitive substring search, so "overview" still counts as "view".
pub fn assign_activity_types(activity: &str, notes: &str) -> Vec<ActivityType> {
    let activity = activity.to_lowercase();
    let notes = notes.to_lowercase();
    let mut types = Vec::new();

    if contains_any(&activity, TRAVEL_ACTIVITY_KEYWORDS)
        || contains_any(&notes, TRAVEL_NOTES_KEYWORDS)
    {
        types.push(ActivityType::Travel);
    }

    if contains_any(&activity, DINING_ACTIVITY_KEYWORDS) {
        types.push(ActivityType::Dining);
    }

    if contains_any(&activity, LEISURE_ACTIVITY_KEYWORDS)
        || contains_any(&notes, LEISURE_NOTES_KEYWORDS)
    {
        types.push(ActivityType::Activity);
    }

    if types.is_empty() {
        types.push(ActivityType::Activity);
    }

    types
}

pub fn things_to_do(activity: &str, location: &str) -> Vec<String> {
    let lower = activity.to_lowercase();
    let mut phrases = Vec::new();

    if lower.contains("arrive") {
        phrases.push(format!("Arrive at {location}."));
    }
    if lower.contains("walk") {
        phrases.push(format!("Walk to {location}."));
    }
    if contains_any(&lower, &["taxi", "flight", "train", "vaporetto"]) {
        phrases.push(format!("Travel to {location}."));
    }
    if contains_any(&lower, &["breakfast", "lunch", "dinner", "gelato"]) {
        phrases.push(format!("Enjoy {lower} at {location}."));
    }
    if contains_any(&lower, &["view", "explore", "relax", "free time"]) {
        phrases.push(format!("Explore or relax at {location}."));
    }
    if contains_any(&lower, &["check-in", "check out"]) {
        phrases.push(format!("Complete check-in/out at {location}."));
    }
    if lower.contains("luggage") {
        phrases.push(format!("Handle luggage at {location}."));
    }

    if phrases.is_empty() {
        phrases.push(format!("Perform activity: {activity}."));
    }

    phrases
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}
