//! CLI binary for brandpress.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use brandpress::{convert, ensure_engine_available, ConversionConfig};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a Markdown document
  brandpress convert handbook.md -o handbook.pdf

  # Convert a ready HTML page as-is
  brandpress convert report.html -o report.pdf

  # Use a custom template
  brandpress convert notes.md -o notes.pdf --template corp-template.html

DIAGRAMS:
  Fenced code blocks tagged `mermaid` are rendered to vector graphics and
  embedded into the PDF. A diagram that fails to render becomes a visible
  inline error marker; the rest of the document still converts.

REQUIREMENTS:
  A Chrome or Chromium installation. The first matching executable on the
  usual paths is used; set CHROME=/path/to/chrome to override.
"#;

/// Convert Markdown and HTML documents to branded PDFs.
#[derive(Parser, Debug)]
#[command(
    name = "brandpress",
    version,
    about = "Convert Markdown and HTML documents to branded PDFs via headless Chrome",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "BRANDPRESS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "BRANDPRESS_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one input document (.md, .markdown, .html, .htm) to PDF.
    Convert {
        /// Path to the input document.
        input: PathBuf,

        /// Path for the output PDF file.
        #[arg(short, long, env = "BRANDPRESS_OUTPUT")]
        output: PathBuf,

        /// HTML template overriding the bundled branded one.
        #[arg(long, env = "BRANDPRESS_TEMPLATE")]
        template: Option<PathBuf>,

        /// Diagram renderer readiness timeout in seconds.
        #[arg(long, env = "BRANDPRESS_RENDERER_TIMEOUT", default_value_t = 15)]
        renderer_timeout: u64,

        /// Per-diagram render timeout in seconds.
        #[arg(long, env = "BRANDPRESS_DIAGRAM_TIMEOUT", default_value_t = 10)]
        diagram_timeout: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Engine preflight ─────────────────────────────────────────────────
    // Advisory: the engine may still be found at launch time (or the run may
    // not need a browser at all if it fails on input validation first).
    if let Err(e) = ensure_engine_available() {
        warn!("browser engine preflight failed: {e}");
    }

    match cli.command {
        Command::Convert {
            input,
            output,
            template,
            renderer_timeout,
            diagram_timeout,
        } => {
            let mut builder = ConversionConfig::builder()
                .renderer_ready_timeout_secs(renderer_timeout)
                .diagram_timeout_secs(diagram_timeout);
            if let Some(template) = template {
                builder = builder.template_path(template);
            }
            let config = builder.build().context("Invalid configuration")?;

            let spinner = (!cli.quiet).then(|| stage_spinner(&input));

            let result = convert(&input, &output, &config);

            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            let output = result.context("Conversion failed")?;
            if !cli.quiet && output.stats.diagrams_failed > 0 {
                eprintln!(
                    "warning: {}/{} diagrams failed to render; see error markers in the PDF",
                    output.stats.diagrams_failed, output.stats.diagrams_total
                );
            }
            println!("PDF generated: {}", output.pdf_path.display());
        }
    }

    Ok(())
}

/// A simple steady-tick spinner; the pipeline is sequential and fast enough
/// that per-stage progress would be noise.
fn stage_spinner(input: &std::path::Path) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Converting");
    bar.set_message(input.display().to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
