use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, WriteLogger};

use squad_panel::OutputFormat;
use squad_panel::core::config::{self, CliOverrides, SquadPanelConfig};
use squad_panel::core::page::{Page, PageId};
use squad_panel::core::{Runner, Shell};
use squad_panel::data::MockData;
use squad_panel::dom::to_lines;
use squad_panel::fragments::{self, EmbeddedFragments};

#[derive(Parser)]
#[command(name = "squad-panel", about = "Game server admin panel")]
struct Args {
    /// Fragment base: an http(s) URL or a directory containing pages/
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Use the fragments built into the binary
    #[arg(long, global = true)]
    embedded: bool,

    /// Server id selected in the console
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal panel (default)
    Tui {
        /// Page opened at startup
        #[arg(long)]
        page: Option<String>,
    },
    /// Load one page, run its renderer and print the content region
    Render {
        page: String,
        #[arg(short, long, default_value_t, value_enum)]
        format: OutputFormat,
    },
    /// List known page ids
    Pages,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (SquadPanelConfig::default(), Some(e)),
    };

    let start_page = match &args.command {
        Some(Command::Tui { page }) => page.as_deref(),
        _ => None,
    };
    let overrides = CliOverrides {
        pages: args.pages.as_deref(),
        embedded: args.embedded,
        server: args.server.as_deref(),
        page: start_page,
    };
    let resolved = config::resolve(&file_config, &overrides);

    // Initialize file logger - writes to squad-panel.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("squad-panel.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::error!("Failed to load config, using defaults: {}", e);
    }

    let source = fragments::source_for(
        &resolved.fragment_base,
        resolved.embedded,
        resolved.fetch_timeout,
    );
    log::info!(
        "Squad Panel starting up with fragment source '{}' ({})",
        source.name(),
        resolved.fragment_base
    );

    match args.command {
        None | Some(Command::Tui { .. }) => squad_panel::tui::run(resolved, source),
        Some(Command::Render { page, format }) => {
            let shell = Shell::from_config(Arc::new(MockData), &resolved);
            let mut runner = Runner::new(shell, source);
            runner.open(page).await;
            let shell = runner.into_shell();
            match format {
                OutputFormat::Html => println!("{}", shell.document.content()),
                OutputFormat::Text => {
                    for line in to_lines(shell.document.content()) {
                        println!("{}", line);
                    }
                }
            }
            Ok(())
        }
        Some(Command::Pages) if resolved.embedded => {
            // Built-in fragments may include pages without a renderer.
            for id in EmbeddedFragments::ids() {
                let label = PageId::new(id).page().map(Page::label).unwrap_or("-");
                println!("{:<14} {}", id, label);
            }
            Ok(())
        }
        Some(Command::Pages) => {
            for page in Page::ALL {
                println!("{:<14} {}", page.id(), page.label());
            }
            Ok(())
        }
    }
}
