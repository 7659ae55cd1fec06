use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use thiserror::Error;
use tracing::{debug, error, info, instrument};
use trip_core::Itinerary;

pub const DEFAULT_FALLBACK_FILE: &str = "debug_output.json";
const MARKER_PREFIX: &str = "const itineraryData = ";
const PREVIEW_CHARS: usize = 500;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"const itineraryData = \{[\s\S]*?\};").expect("valid itinerary marker regex")
});

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("marker `const itineraryData = {{...}};` not found in document")]
    MarkerNotFound,
    #[error("failed serializing itinerary: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Rewrites a document so it embeds the given itinerary.
pub trait DocumentPatcher {
    fn patch(&self, content: &str, itinerary: &Itinerary) -> Result<String, PatchError>;
}

/// Replaces every `const itineraryData = {...};` assignment with the
/// pretty-printed itinerary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerPatcher;

impl DocumentPatcher for MarkerPatcher {
    fn patch(&self, content: &str, itinerary: &Itinerary) -> Result<String, PatchError> {
        if !MARKER.is_match(content) {
            return Err(PatchError::MarkerNotFound);
        }

        let json = itinerary.to_pretty_json()?;
        let assignment = format!("{MARKER_PREFIX}{json};");
        Ok(MARKER
            .replace_all(content, NoExpand(&assignment))
            .into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Patched { path: PathBuf },
    Fallback { path: PathBuf, reason: String },
}

/// Patches `document` in place. Any read, patch or write failure leaves the
/// document alone and writes the itinerary JSON to `fallback` instead; only a
/// failed fallback write is returned as an error.
#[instrument(skip_all, fields(document = %document.display()))]
pub fn publish(
    document: &Path,
    fallback: &Path,
    itinerary: &Itinerary,
    patcher: &impl DocumentPatcher,
) -> Result<PublishOutcome> {
    match patch_document(document, itinerary, patcher) {
        Ok(()) => {
            info!(path = %document.display(), "itinerary embedded");
            Ok(PublishOutcome::Patched {
                path: document.to_path_buf(),
            })
        }
        Err(err) => {
            let reason = format!("{err:#}");
            error!(error = %reason, fallback = %fallback.display(), "failed updating document");
            write_fallback(fallback, itinerary)?;
            Ok(PublishOutcome::Fallback {
                path: fallback.to_path_buf(),
                reason,
            })
        }
    }
}

fn patch_document(
    document: &Path,
    itinerary: &Itinerary,
    patcher: &impl DocumentPatcher,
) -> Result<()> {
    let content = fs::read_to_string(document)
        .with_context(|| format!("failed reading {}", document.display()))?;

    log_preview(itinerary);

    let patched = patcher
        .patch(&content, itinerary)
        .with_context(|| format!("failed patching {}", document.display()))?;

    fs::write(document, patched)
        .with_context(|| format!("failed writing {}", document.display()))?;
    Ok(())
}

pub fn write_fallback(path: &Path, itinerary: &Itinerary) -> Result<()> {
    let json = itinerary.to_pretty_json()?;
    fs::write(path, json)
        .with_context(|| format!("failed writing fallback json to {}", path.display()))?;
    info!(path = %path.display(), "itinerary saved for inspection");
    Ok(())
}

fn log_preview(itinerary: &Itinerary) {
    let Ok(json) = itinerary.to_pretty_json() else {
        return;
    };

    let preview = if json.chars().count() > PREVIEW_CHARS {
        json.chars().take(PREVIEW_CHARS).collect::<String>() + "..."
    } else {
        json
    };
    debug!(preview = %preview, "generated itinerary json");
}
