//! Demo driver for the pptx MCP toolset.
//!
//! Runs the tools in-process through the dispatcher and prints each reply,
//! so the tool surface can be exercised without an MCP client attached.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pptx_mcp::Dispatcher;
use serde_json::{Value, json};

type BoxError = Box<dyn std::error::Error>;

#[derive(Parser, Debug)]
#[command(
    name = "pptx-cli",
    version,
    about = "Build demo PowerPoint decks through the MCP tools."
)]
struct Cli {
    /// Directory to save the generated decks into (default: the Downloads folder).
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// A title slide plus one bulleted content slide.
    Simple,
    /// A column chart with two data series.
    Charts,
    /// Comparison, timeline and table slides in one deck.
    Comprehensive,
    /// Runs every demo in sequence.
    Test,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let runner = Runner {
        dispatcher: Dispatcher::new(),
        out_dir: cli.out_dir,
    };

    let result = match cli.command {
        Commands::Simple => runner.simple().await,
        Commands::Charts => runner.charts().await,
        Commands::Comprehensive => runner.comprehensive().await,
        Commands::Test => runner.all().await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

struct Runner {
    dispatcher: Dispatcher,
    out_dir: Option<PathBuf>,
}

impl Runner {
    async fn call(&self, tool: &str, arguments: Value) -> Result<(), BoxError> {
        let Value::Object(arguments) = arguments else {
            return Err(format!("{tool}: arguments must be an object").into());
        };
        let outcome = self.dispatcher.invoke(tool, arguments).await?;
        println!("{}", outcome.message());
        if outcome.is_error() {
            return Err(format!("{tool} failed").into());
        }
        Ok(())
    }

    async fn save(&self, filename: &str) -> Result<(), BoxError> {
        let mut arguments = json!({ "filename": filename });
        if let Some(dir) = &self.out_dir {
            arguments["output_path"] = json!(dir.join(filename).display().to_string());
        }
        self.call("save_presentation", arguments).await
    }

    async fn simple(&self) -> Result<(), BoxError> {
        self.call(
            "create_presentation",
            json!({
                "title": "My Presentation",
                "subtitle": "Created with pptx-mcp",
                "filename": "simple.pptx",
            }),
        )
        .await?;
        self.call(
            "add_content_slide",
            json!({
                "filename": "simple.pptx",
                "title": "Key Points",
                "content": [
                    "First important point",
                    "Second important point",
                    "Third important point",
                ],
            }),
        )
        .await?;
        self.save("simple.pptx").await
    }

    async fn charts(&self) -> Result<(), BoxError> {
        self.call(
            "create_presentation",
            json!({
                "title": "Sales Report Q4",
                "filename": "sales.pptx",
            }),
        )
        .await?;
        self.call(
            "add_chart_slide",
            json!({
                "filename": "sales.pptx",
                "title": "Quarterly Revenue",
                "chart_type": "column",
                "categories": ["Q1", "Q2", "Q3", "Q4"],
                "series": [
                    { "name": "Revenue", "values": [100.0, 150.0, 200.0, 250.0] },
                    { "name": "Costs", "values": [80.0, 90.0, 100.0, 110.0] },
                ],
            }),
        )
        .await?;
        self.save("sales.pptx").await
    }

    async fn comprehensive(&self) -> Result<(), BoxError> {
        self.call(
            "create_presentation",
            json!({
                "title": "Product Launch 2025",
                "subtitle": "Strategic Overview",
                "filename": "launch.pptx",
            }),
        )
        .await?;
        self.call(
            "add_comparison_slide",
            json!({
                "filename": "launch.pptx",
                "title": "Market Position",
                "left_title": "Current State",
                "left_content": ["Limited market share", "Manual processes", "High costs"],
                "right_title": "Future State",
                "right_content": ["Market leadership", "Automated workflows", "Optimized costs"],
            }),
        )
        .await?;
        self.call(
            "add_timeline_slide",
            json!({
                "filename": "launch.pptx",
                "title": "Launch Timeline",
                "events": [
                    { "date": "Jan", "event": "Development" },
                    { "date": "Mar", "event": "Beta Testing" },
                    { "date": "May", "event": "Marketing" },
                    { "date": "Jul", "event": "Launch" },
                ],
            }),
        )
        .await?;
        self.call(
            "add_table_slide",
            json!({
                "filename": "launch.pptx",
                "title": "Feature Comparison",
                "headers": ["Feature", "Competitor A", "Competitor B", "Our Product"],
                "rows": [
                    ["Price", "$99", "$149", "$79"],
                    ["Support", "Email", "Email", "24/7 Phone"],
                    ["Updates", "Yearly", "Quarterly", "Monthly"],
                ],
            }),
        )
        .await?;
        self.save("launch.pptx").await
    }

    async fn all(&self) -> Result<(), BoxError> {
        banner("Simple presentation");
        self.simple().await?;
        banner("Presentation with charts");
        self.charts().await?;
        banner("Comprehensive presentation");
        self.comprehensive().await?;

        println!();
        println!("All demos completed.");
        match &self.out_dir {
            Some(dir) => println!("Decks saved under {}", dir.display()),
            None => println!("Check the Downloads folder for the decks."),
        }
        Ok(())
    }
}

fn banner(title: &str) {
    println!("{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demos_build_and_save_decks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = Runner {
            dispatcher: Dispatcher::new(),
            out_dir: Some(dir.path().to_path_buf()),
        };

        runner.all().await.expect("demos succeed");

        assert!(dir.path().join("simple.pptx").exists());
        assert!(dir.path().join("sales.pptx").exists());
        assert!(dir.path().join("launch.pptx").exists());
    }
}
