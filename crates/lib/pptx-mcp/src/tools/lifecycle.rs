//! Deck lifecycle: create, open, save, list, delete slides.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pptx_core::{PackageError, Presentation, SlideLayout};
use tokio::task;
use tracing::info;

use crate::args::ToolArgs;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools::{HandlerResult, not_found, resolve_slide};

pub(crate) async fn create_presentation(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let title = args.string("title")?;
    let subtitle = args.string("subtitle")?;
    let filename = args.string("filename")?;

    let mut pres = Presentation::new();
    let slide = pres.add_slide(SlideLayout::Title);
    slide.set_title(title);
    if !subtitle.is_empty() {
        slide.set_subtitle(subtitle);
    }
    store.insert(filename, pres).await;
    info!(filename, "created presentation");
    Ok(ToolOutcome::success(format!(
        "Created presentation '{filename}' with title: {title}"
    )))
}

pub(crate) async fn open_presentation(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let file_path = args.string("file_path")?;
    let filename = match args.opt_string("filename")? {
        Some(name) => name.to_string(),
        None => basename(file_path),
    };

    let path = PathBuf::from(file_path);
    let loaded = task::spawn_blocking(move || {
        if path.exists() {
            Some(Presentation::open(&path))
        } else {
            None
        }
    })
    .await;

    match loaded {
        Ok(Some(Ok(pres))) => {
            let slides = pres.slide_count();
            store.insert(&filename, pres).await;
            info!(filename, slides, "opened presentation");
            Ok(ToolOutcome::success(format!(
                "Opened presentation '{file_path}' as '{filename}' ({slides} slides)"
            )))
        }
        Ok(Some(Err(err))) => Ok(ToolOutcome::failed(format!(
            "Error opening presentation: {err}"
        ))),
        Ok(None) => Ok(ToolOutcome::failed(format!(
            "Error: File '{file_path}' not found."
        ))),
        Err(err) => Ok(ToolOutcome::failed(format!(
            "Error opening presentation: {err}"
        ))),
    }
}

pub(crate) async fn save_presentation(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let path = match args.opt_string("output_path")?.filter(|p| !p.is_empty()) {
        Some(output_path) => PathBuf::from(output_path),
        None => {
            let Some(home) = dirs::home_dir() else {
                return Ok(ToolOutcome::failed(
                    "Error: no home directory to resolve the default save path",
                ));
            };
            home.join("Downloads").join(filename)
        }
    };

    // Serialize from a snapshot so the deck lock is never held across file IO.
    let snapshot = deck.lock().await.clone();
    let display_path = path.display().to_string();
    let saved = task::spawn_blocking(move || -> Result<(), PackageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        snapshot.save(&path)
    })
    .await;

    match saved {
        Ok(Ok(())) => {
            info!(filename, path = %display_path, "saved presentation");
            Ok(ToolOutcome::success(format!(
                "Saved presentation to: {display_path}"
            )))
        }
        Ok(Err(err)) => Ok(ToolOutcome::failed(format!("Error: {err}"))),
        Err(err) => Ok(ToolOutcome::failed(format!("Error: {err}"))),
    }
}

pub(crate) async fn list_presentations(store: Arc<DeckStore>, _args: ToolArgs) -> HandlerResult {
    let entries = store.entries().await;
    if entries.is_empty() {
        return Ok(ToolOutcome::success("No presentations in memory."));
    }
    let mut lines = vec!["Presentations in memory:".to_string()];
    for (name, deck) in entries {
        let slides = deck.lock().await.slide_count();
        lines.push(format!("- {name} ({slides} slides)"));
    }
    Ok(ToolOutcome::success(lines.join("\n")))
}

pub(crate) async fn delete_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let index = args.integer("slide_index")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let mut pres = deck.lock().await;
    let resolved = match resolve_slide(&pres, index) {
        Ok(resolved) => resolved,
        Err(outcome) => return Ok(outcome),
    };
    pres.remove_slide(resolved);
    Ok(ToolOutcome::success(format!(
        "Deleted slide {resolved} from '{filename}'"
    )))
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(basename("/tmp/decks/q3.pptx"), "q3.pptx");
        assert_eq!(basename("q3.pptx"), "q3.pptx");
    }
}
