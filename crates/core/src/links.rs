use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::MapLink;

pub const MAPS_BASE_URL: &str = "https://maps.app.goo.gl/";

static LEG_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(?:to|→)\s*").expect("valid leg separator regex"));

/// Builds placeholder map links. These are not geocoded and do not resolve.
///
/// Legs are split on any "to", including inside words, so "Rialto Bridge"
/// yields two links. Empty legs are kept and produce a bare base URL.
pub fn generate_map_link(location: &str) -> MapLink {
    let legs = split_legs(location);

    if legs.len() > 1 {
        MapLink::Legs(legs.into_iter().map(placeholder_link).collect())
    } else {
        MapLink::Single(placeholder_link(location))
    }
}

pub fn split_legs(location: &str) -> Vec<&str> {
    LEG_SEPARATOR.split(location).map(str::trim).collect()
}

fn placeholder_link(name: &str) -> String {
    let compact = name
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '(' | ')'))
        .collect::<String>();
    format!("{MAPS_BASE_URL}{compact}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_leg_location_yields_one_link_per_leg() {
        assert_eq!(
            generate_map_link("Venice to Murano"),
            MapLink::Legs(vec![
                "https://maps.app.goo.gl/Venice".to_string(),
                "https://maps.app.goo.gl/Murano".to_string(),
            ])
        );
        assert_eq!(generate_map_link("Marco Polo Airport (VCE) → Piazzale Roma").links().len(), 2);
    }

    #[test]
    fn single_location_strips_spaces_and_parentheses() {
        assert_eq!(
            generate_map_link("Hotel Danieli (Castello)"),
            MapLink::Single("https://maps.app.goo.gl/HotelDanieliCastello".to_string())
        );
    }

    // Known limitation: "to" inside a word still splits the location.
    #[test]
    fn to_inside_a_word_splits_legs() {
        assert_eq!(
            generate_map_link("Rialto Bridge"),
            MapLink::Legs(vec![
                "https://maps.app.goo.gl/Rial".to_string(),
                "https://maps.app.goo.gl/Bridge".to_string(),
            ])
        );
    }

    #[test]
    fn trailing_separator_keeps_empty_leg() {
        assert_eq!(split_legs("Walk to"), vec!["Walk", ""]);
        assert_eq!(
            generate_map_link("Walk to"),
            MapLink::Legs(vec![
                "https://maps.app.goo.gl/Walk".to_string(),
                MAPS_BASE_URL.to_string(),
            ])
        );
    }
}
