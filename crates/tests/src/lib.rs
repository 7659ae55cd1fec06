use std::fs;
use std::path::Path;

use anyhow::Result;

pub const HEADER: &str = "Date,Time,Activity,Location,Directions,Transportation Details,Notes";

/// Writes `<city>.csv` with the standard header and the given data lines.
pub fn write_sheet(dir: &Path, city: &str, lines: &[&str]) -> Result<()> {
    let mut body = String::from(HEADER);
    for line in lines {
        body.push('\n');
        body.push_str(line);
    }
    body.push('\n');

    fs::write(dir.join(format!("{city}.csv")), body)?;
    Ok(())
}

pub fn page_with_marker() -> String {
    [
        "<!doctype html>",
        "<html>",
        "<body>",
        "<script>",
        "const itineraryData = {",
        "  \"itinerary\": []",
        "};",
        "renderItinerary(itineraryData);",
        "</script>",
        "</body>",
        "</html>",
    ]
    .join("\n")
}
