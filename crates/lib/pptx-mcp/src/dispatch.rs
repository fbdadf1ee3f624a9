//! Tool-name dispatch.
//!
//! The handler table is built once per dispatcher and mirrors the catalog
//! exactly. Dispatch applies declared defaults, hands the handler a typed
//! argument view, and reports unknown names as tool output rather than a
//! protocol error, matching how clients probe for capabilities.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::args::{ArgError, ToolArgs};
use crate::catalog;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools;

type HandlerFuture = Pin<Box<dyn Future<Output = Result<ToolOutcome, ArgError>> + Send>>;
type Handler = Box<dyn Fn(Arc<DeckStore>, ToolArgs) -> HandlerFuture + Send + Sync>;

fn entry<F, Fut>(handler: F) -> Handler
where
    F: Fn(Arc<DeckStore>, ToolArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ToolOutcome, ArgError>> + Send + 'static,
{
    Box::new(move |store, args| Box::pin(handler(store, args)))
}

/// Routes tool calls to handlers over a shared [`DeckStore`].
pub struct Dispatcher {
    store: Arc<DeckStore>,
    handlers: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(DeckStore::new()))
    }

    /// Builds the full handler table over an existing store.
    #[must_use]
    pub fn with_store(store: Arc<DeckStore>) -> Self {
        use tools::{content, data, lifecycle, stubs, visuals};

        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();
        handlers.insert("create_presentation", entry(lifecycle::create_presentation));
        handlers.insert("open_presentation", entry(lifecycle::open_presentation));
        handlers.insert("add_title_slide", entry(content::add_title_slide));
        handlers.insert("add_content_slide", entry(content::add_content_slide));
        handlers.insert("add_two_column_slide", entry(content::add_two_column_slide));
        handlers.insert("save_presentation", entry(lifecycle::save_presentation));
        handlers.insert("list_presentations", entry(lifecycle::list_presentations));
        handlers.insert("add_image_slide", entry(visuals::add_image_slide));
        handlers.insert("add_table_slide", entry(visuals::add_table_slide));
        handlers.insert("add_chart_slide", entry(visuals::add_chart_slide));
        handlers.insert("analyze_and_chart", entry(data::analyze_and_chart));
        handlers.insert("add_comparison_slide", entry(content::add_comparison_slide));
        handlers.insert("add_timeline_slide", entry(visuals::add_timeline_slide));
        handlers.insert("format_text", entry(content::format_text));
        handlers.insert("set_slide_background", entry(visuals::set_slide_background));
        handlers.insert("add_speaker_notes", entry(content::add_speaker_notes));
        handlers.insert("read_data_file", entry(data::read_data_file));
        handlers.insert("add_shape_slide", entry(visuals::add_shape_slide));
        handlers.insert("add_qr_slide", entry(visuals::add_qr_slide));
        handlers.insert("delete_slide", entry(lifecycle::delete_slide));
        handlers.insert("duplicate_slide", entry(stubs::duplicate_slide));
        handlers.insert("merge_presentations", entry(stubs::merge_presentations));
        handlers.insert("export_pdf", entry(stubs::export_pdf));
        handlers.insert("apply_theme", entry(stubs::apply_theme));

        Self { store, handlers }
    }

    /// The store handlers operate on, shared with embedding callers.
    #[must_use]
    pub fn store(&self) -> Arc<DeckStore> {
        Arc::clone(&self.store)
    }

    /// Runs one tool call.
    ///
    /// # Errors
    /// Returns [`ArgError`] when a required argument is missing or has the
    /// wrong type; the MCP layer reports that as `invalid_params`.
    pub async fn invoke(
        &self,
        name: &str,
        mut arguments: Map<String, Value>,
    ) -> Result<ToolOutcome, ArgError> {
        let Some(handler) = self.handlers.get(name) else {
            debug!(tool = name, "unknown tool");
            return Ok(ToolOutcome::failed(format!("Unknown tool: {name}")));
        };
        if let Some(spec) = catalog::find(name) {
            spec.apply_defaults(&mut arguments);
        }
        debug!(tool = name, "dispatching");
        handler(Arc::clone(&self.store), ToolArgs::new(arguments)).await
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_table_matches_the_catalog() {
        let dispatcher = Dispatcher::new();
        for spec in catalog::catalog() {
            assert!(
                dispatcher.handlers.contains_key(spec.name),
                "no handler for {}",
                spec.name
            );
        }
        assert_eq!(dispatcher.handlers.len(), catalog::catalog().len());
    }

    #[tokio::test]
    async fn unknown_names_are_tool_output_not_faults() {
        let dispatcher = Dispatcher::new();
        let outcome = dispatcher
            .invoke("definitely_not_a_tool", Map::new())
            .await
            .expect("unknown tool is not a protocol fault");
        assert_eq!(outcome.message(), "Unknown tool: definitely_not_a_tool");
        assert!(outcome.is_error());
    }

    #[tokio::test]
    async fn missing_required_arguments_fail_fast() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher
            .invoke("create_presentation", Map::new())
            .await
            .expect_err("missing title is a protocol fault");
        assert_eq!(err, ArgError::Missing("title"));
    }
}
