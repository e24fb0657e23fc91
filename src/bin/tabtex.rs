//! tabtex CLI - render LaTeX tables, geometry and report sections from a data file

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process::ExitCode;
use tabtex::{
    render_document, templates::template_slots, ConfigFormat, DocumentConfig, LayoutError,
    LayoutResult, RenderedDocument,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tabtex")]
#[command(version)]
#[command(about = "tabtex - LaTeX table, geometry and report-section generator", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document description (JSON or TOML); reads stdin if not provided
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// LaTeX template with \VAR{name} slots
    #[arg(short, long)]
    template: Option<String>,

    /// Print a single slot instead of the table fragment
    #[arg(short, long, conflicts_with = "template")]
    slot: Option<String>,

    /// Input format when reading stdin
    #[arg(long, value_enum, default_value_t = InputFormat::Json)]
    format: InputFormat,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List the slots a document provides, or the ones a template needs
    Slots {
        /// Document description
        input: String,

        /// Check this template against the document's slots
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Show resolved column widths of the document's table
    Widths {
        /// Document description
        input: String,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Json,
    Toml,
}

#[cfg(feature = "cli")]
fn setup_logging(level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let result = match cli.command {
        Some(cmd) => handle_subcommand(cmd),
        None => run(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("✗ {}", err);
            if err.is_spec_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> LayoutResult<()> {
    let config = match cli.input_file {
        Some(ref path) => DocumentConfig::load(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let format = match cli.format {
                InputFormat::Json => ConfigFormat::Json,
                InputFormat::Toml => ConfigFormat::Toml,
            };
            DocumentConfig::parse(&buffer, format)?
        }
    };

    let doc = render_document(&config)?;

    let result = if let Some(ref path) = cli.template {
        let template = fs::read_to_string(path)?;
        doc.fill(&template)?
    } else {
        let name = cli.slot.as_deref().unwrap_or("table");
        doc.slot(name)
            .map(str::to_string)
            .ok_or_else(|| LayoutError::template(format!("document has no '{}' slot", name)))?
    };

    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            write!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            print!("{}", result);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> LayoutResult<()> {
    match cmd {
        Commands::Slots { input, template } => {
            let doc = load_and_render(&input)?;
            match template {
                Some(path) => {
                    let template = fs::read_to_string(&path)?;
                    let mut missing = 0;
                    for name in template_slots(&template) {
                        if doc.slot(&name).is_some() {
                            println!("  ✓ {}", name);
                        } else {
                            println!("  ✗ {}", name);
                            missing += 1;
                        }
                    }
                    if missing > 0 {
                        return Err(LayoutError::template(format!(
                            "{} slot(s) used by {} are not provided",
                            missing, path
                        )));
                    }
                }
                None => {
                    for (name, value) in &doc.slots {
                        println!("{:<18} {}", name, summarize(value));
                    }
                }
            }
        }

        Commands::Widths { input } => {
            let doc = load_and_render(&input)?;
            let layout = doc
                .layout
                .as_ref()
                .ok_or_else(|| LayoutError::invalid("document has no table"))?;
            println!("{:<8} {:>10} {:>10}", "column", "full(mm)", "inner(mm)");
            for i in 0..layout.column_count() {
                println!(
                    "{:<8} {:>10.2} {:>10.2}",
                    i + 1,
                    layout.full_width(i),
                    layout.inner_width(i)
                );
            }
            println!("{:<8} {:>10.2}", "total", layout.table_width());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_and_render(input: &str) -> LayoutResult<RenderedDocument> {
    let config = DocumentConfig::load(Path::new(input))?;
    render_document(&config)
}

/// First line of a slot value, shortened for listings
#[cfg(feature = "cli")]
fn summarize(value: &str) -> String {
    let first = value.lines().next().unwrap_or("");
    let lines = value.lines().count();
    let mut out: String = first.chars().take(60).collect();
    if first.chars().count() > 60 {
        out.push('…');
    }
    if lines > 1 {
        out.push_str(&format!(" (+{} lines)", lines - 1));
    }
    out
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tabtex --features cli");
    eprintln!("  tabtex [OPTIONS] [INPUT_FILE]");
}
