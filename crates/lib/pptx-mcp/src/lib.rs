//! MCP server implementation for pptx-mcp.
//!
//! This crate carries the tool catalog, the dispatcher that routes calls to
//! slide-building handlers, and the in-memory deck store they share. The
//! schemas are data ([`catalog`]), so `list_tools` and dispatch can never
//! drift apart.

mod args;
mod catalog;
mod dispatch;
mod outcome;
pub mod server;
mod store;
mod tools;

pub use args::{ArgError, ToolArgs};
pub use catalog::{FieldKind, FieldSpec, ParamDefault, ParamKind, ParamSpec, ToolSpec, catalog, find};
pub use dispatch::Dispatcher;
pub use outcome::ToolOutcome;
pub use store::DeckStore;

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler};

const SERVER_INSTRUCTIONS: &str = r"pptx-mcp builds PowerPoint presentations through MCP tools.

Workflow:
1. `create_presentation` registers a deck in memory under a `filename` handle and adds its title slide.
2. Add slides: `add_title_slide`, `add_content_slide`, `add_two_column_slide`, `add_comparison_slide`,
   `add_table_slide`, `add_chart_slide`, `add_timeline_slide`, `add_image_slide`, `add_shape_slide`,
   `add_qr_slide`, `format_text`.
3. Polish: `set_slide_background`, `add_speaker_notes`, `delete_slide`.
4. Data-driven decks: `read_data_file` summarizes a CSV/Excel/JSON file; `analyze_and_chart` charts
   its columns directly.
5. `save_presentation` writes the deck to disk (default: the Downloads folder under the handle name).

Notes:
- `filename` is an in-memory handle; nothing touches disk until `save_presentation`.
- `slide_index` is 0-based; -1 addresses the last slide.
- Refusals come back as tool text starting with `Error:`.";

/// MCP server over the tool dispatcher.
#[derive(Clone)]
pub struct PptxMcp {
    dispatcher: Arc<Dispatcher>,
}

impl PptxMcp {
    /// Creates a server with its own empty deck store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(Dispatcher::new()))
    }

    /// Creates a server over a shared dispatcher, so embedding callers can
    /// reach the same decks.
    #[must_use]
    pub fn with_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl Default for PptxMcp {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerHandler for PptxMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = catalog()
            .iter()
            .map(|spec| Tool::new(spec.name, spec.description, Arc::new(spec.input_schema())))
            .collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let arguments = request.arguments.unwrap_or_default();
        let outcome = self
            .dispatcher
            .invoke(&request.name, arguments)
            .await
            .map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
        let content = vec![Content::text(outcome.message())];
        Ok(if outcome.is_error() {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_mention_the_entry_point() {
        assert!(SERVER_INSTRUCTIONS.contains("create_presentation"));
        assert!(SERVER_INSTRUCTIONS.contains("save_presentation"));
    }

    #[test]
    fn every_catalog_entry_lists_cleanly() {
        for spec in catalog() {
            let tool = Tool::new(spec.name, spec.description, Arc::new(spec.input_schema()));
            assert_eq!(tool.name, spec.name);
        }
    }
}
