//! Advertised-but-unbuilt tools.
//!
//! These validate their arguments like any other tool, then answer with a
//! fixed message pointing at the supported path. They never touch the store.

// Handlers must be async to sit in the dispatch table.
#![allow(clippy::unused_async)]

use std::sync::Arc;

use crate::args::ToolArgs;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools::HandlerResult;

pub(crate) async fn duplicate_slide(_store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    args.string("filename")?;
    args.integer("slide_index")?;
    Ok(ToolOutcome::unimplemented(
        "duplicate_slide is not implemented. Rebuild the slide with the add_* tools instead.",
    ))
}

pub(crate) async fn merge_presentations(_store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    args.string("target")?;
    args.strings("sources")?;
    Ok(ToolOutcome::unimplemented(
        "merge_presentations is not implemented. Open each source and re-add its slides manually.",
    ))
}

pub(crate) async fn export_pdf(_store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    args.string("filename")?;
    args.opt_string("output_path")?;
    Ok(ToolOutcome::unimplemented(
        "export_pdf is not implemented. Save as .pptx and convert with an external tool.",
    ))
}

pub(crate) async fn apply_theme(_store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    args.string("filename")?;
    args.string("theme")?;
    Ok(ToolOutcome::unimplemented(
        "apply_theme is not implemented. Decks keep the built-in default theme.",
    ))
}
