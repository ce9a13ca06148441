//! Bracket Layout CLI
//!
//! Usage:
//!   bracket-layout [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --template <FILE>   Bracket template (TOML format)
//!   -s, --spacing <PX>      Pixels per slot unit
//!       --height <PX>       Fit the deepest column into this height
//!   -f, --format <FORMAT>   Output format: json, text or svg
//!   -l, --lint              Report layout defects on stderr
//!   -h, --help              Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use bracket_layout::layout::lint;
use bracket_layout::{
    build_from_json, render_svg, render_text, BracketTemplate, BuildConfig, LayoutConfig,
    SvgConfig,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
    Svg,
}

#[derive(Parser)]
#[command(name = "bracket-layout")]
#[command(about = "Lay out a knockout tournament bracket from match records")]
struct Cli {
    /// Match records JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Bracket template file (defaults to the built-in World Cup 2026 bracket)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Pixels per slot unit
    #[arg(short, long, conflicts_with = "height")]
    spacing: Option<f64>,

    /// Available height; the slot spacing is derived from it
    #[arg(long)]
    height: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Report layout defects on stderr
    #[arg(short, long)]
    lint: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let template = match &cli.template {
        Some(path) => load_template(path),
        None => BracketTemplate::default(),
    };

    let mut layout_config = LayoutConfig::default();
    if let Some(spacing) = cli.spacing {
        layout_config = layout_config.with_vertical_spacing(spacing);
    }
    if let Some(height) = cli.height {
        layout_config = layout_config.fit_height(height, template.leaves_per_half());
    }

    let config = BuildConfig::new()
        .with_template(template)
        .with_layout(layout_config);

    let source = read_input(cli.input.as_deref())
        .unwrap_or_else(|e| fail(&format!("Error reading match records: {}", e)));

    let layout =
        build_from_json(&source, &config).unwrap_or_else(|e| fail(&format!("Error: {}", e)));

    if cli.lint {
        for warning in lint::check(&layout) {
            eprintln!("{}", warning);
        }
    }

    match cli.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&layout)
                .unwrap_or_else(|e| fail(&format!("Error: {}", e)));
            println!("{}", json);
        }
        Format::Text => print!("{}", render_text(&layout)),
        Format::Svg => println!("{}", render_svg(&layout, &SvgConfig::default())),
    }
}

/// Records from a file, or from stdin when no path is given
fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn load_template(path: &Path) -> BracketTemplate {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        fail(&format!(
            "Error reading template '{}': {}",
            path.display(),
            e
        ))
    });
    BracketTemplate::from_str(&source)
        .unwrap_or_else(|e| fail(&e.format(&source, &path.display().to_string())))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message.trim_end());
    std::process::exit(1)
}
