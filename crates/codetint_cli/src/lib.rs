//! Command-line front end: renders files to the terminal or to JSON.

pub mod ansi;
#[cfg(test)]
mod tests;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use codetint_core::constants::{APPEARANCE_ENV, THEME_ENV};
use codetint_core::{Appearance, RenderConfig, Renderer, SyntectBackend};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ansi::AnsiSink;

#[derive(Parser)]
#[command(name = "codetint", about = "Syntax-highlight source text", version)]
pub struct Cli {
    /// Theme id
    #[arg(short, long, global = true, env = THEME_ENV)]
    theme: Option<String>,

    /// Appearance mode: light, dark or default
    #[arg(short, long, global = true, env = APPEARANCE_ENV)]
    appearance: Option<Appearance>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a file (or stdin) with syntax highlighting
    Render {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
        /// Language id: top-level scope (source.rust), name or extension
        #[arg(short, long)]
        language: Option<String>,
        /// Print the span sequence as JSON instead of ANSI text
        #[arg(short, long)]
        json: bool,
    },
    /// List bundled themes
    Themes,
    /// List bundled languages
    Languages,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("codetint=warn,codetint_core=warn,codetint_cli=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

/// Theme and appearance come from clap (flag, then `CODETINT_THEME` /
/// `CODETINT_APPEARANCE`); the remaining fields come from the environment.
fn effective_config(cli: &Cli) -> RenderConfig {
    let mut config = RenderConfig::from_env();
    if let Some(theme) = cli.theme.as_ref() {
        config.theme = theme.clone();
    }
    if let Some(appearance) = cli.appearance {
        config.appearance = appearance;
    }
    config
}

/// Language id to use when none is given: the file extension, else the
/// fallback grammar.
fn infer_language(file: Option<&Path>, config: &RenderConfig) -> String {
    file.and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| config.fallback_language.clone())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Renders `code` to ANSI text or pretty JSON.
pub fn render_to_string(
    renderer: &Renderer<SyntectBackend>,
    code: &str,
    language: &str,
    json: bool,
) -> anyhow::Result<String> {
    let doc = renderer
        .render_with_defaults(code, language)
        .with_context(|| format!("failed to render as '{}'", language))?;
    if json {
        return serde_json::to_string_pretty(&doc.items).context("failed to encode spans");
    }
    let mut sink = AnsiSink::new();
    doc.replay(&mut sink);
    Ok(sink.into_string())
}

fn format_themes(backend: &SyntectBackend) -> String {
    backend
        .theme_names()
        .iter()
        .map(|name| format!("{}\n", name))
        .collect()
}

fn format_languages(backend: &SyntectBackend) -> String {
    backend
        .languages()
        .iter()
        .map(|info| {
            format!(
                "{:<32} {:<28} {}\n",
                info.name,
                info.scope,
                info.extensions.join(",")
            )
        })
        .collect()
}

fn execute(cli: Cli) -> anyhow::Result<String> {
    let config = effective_config(&cli);
    match cli.command {
        Commands::Render {
            file,
            language,
            json,
        } => {
            let code = read_input(file.as_deref())?;
            let language =
                language.unwrap_or_else(|| infer_language(file.as_deref(), &config));
            debug!(
                language = language.as_str(),
                theme = config.theme.as_str(),
                appearance = config.appearance.as_str(),
                fallback = config.fallback_language.as_str(),
                json,
                "rendering input"
            );
            let renderer = Renderer::new(SyntectBackend::default(), config);
            render_to_string(&renderer, &code, &language, json)
        }
        Commands::Themes => Ok(format_themes(&SyntectBackend::default())),
        Commands::Languages => Ok(format_languages(&SyntectBackend::default())),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let mut buffer = Vec::new();
            generate(shell, &mut cmd, "codetint", &mut buffer);
            String::from_utf8(buffer).context("completion script is not UTF-8")
        }
    }
}

/// Runs `runner` and maps its outcome to a process exit code, printing
/// the error chain to stderr on failure.
pub fn run_and_report<F, E>(runner: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match runner() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("codetint error: {:#}", err);
            1
        }
    }
}

/// Parses arguments, runs the command and writes its output to stdout.
///
/// # Errors
/// Input, render and output failures.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let output = execute(cli)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write output")
}
