//! Unit tests for the `codetint` CLI module.

use super::{
    effective_config, execute, format_languages, format_themes, infer_language, read_input,
    render_to_string, run_and_report, Cli, Commands,
};
use clap::Parser;
use codetint_core::constants::{APPEARANCE_ENV, THEME_ENV};
use codetint_core::env::{env_lock, EnvGuard};
use codetint_core::{Appearance, RenderConfig, Renderer, SyntectBackend, DEFAULT_THEME};
use std::io::Write;
use std::path::Path;

fn renderer(appearance: Appearance) -> Renderer<SyntectBackend> {
    let config = RenderConfig {
        appearance,
        ..RenderConfig::default()
    };
    Renderer::new(SyntectBackend::default(), config)
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[test]
fn parses_render_with_global_flags() {
    let cli = Cli::parse_from([
        "codetint",
        "render",
        "main.rs",
        "--language",
        "source.rust",
        "--theme",
        "InspiredGitHub",
        "--appearance",
        "light",
        "--json",
    ]);
    assert_eq!(cli.theme.as_deref(), Some("InspiredGitHub"));
    assert_eq!(cli.appearance, Some(Appearance::Light));
    match cli.command {
        Commands::Render {
            file,
            language,
            json,
        } => {
            assert_eq!(file.as_deref(), Some(Path::new("main.rs")));
            assert_eq!(language.as_deref(), Some("source.rust"));
            assert!(json);
        }
        _ => panic!("expected render command"),
    }
}

#[test]
fn rejects_unknown_appearance() {
    assert!(Cli::try_parse_from(["codetint", "--appearance", "sepia", "themes"]).is_err());
}

#[test]
fn flags_override_environment() {
    let _lock = env_lock().lock().expect("env lock");
    let _theme = EnvGuard::set(THEME_ENV, "Solarized (dark)");
    let _appearance = EnvGuard::set(APPEARANCE_ENV, "dark");

    let cli = Cli::parse_from(["codetint", "themes"]);
    assert_eq!(cli.theme.as_deref(), Some("Solarized (dark)"));
    assert_eq!(cli.appearance, Some(Appearance::Dark));
    let from_env = effective_config(&cli);
    assert_eq!(from_env.theme, "Solarized (dark)");
    assert_eq!(from_env.appearance, Appearance::Dark);

    let overridden = effective_config(&Cli::parse_from([
        "codetint",
        "-t",
        "InspiredGitHub",
        "-a",
        "light",
        "themes",
    ]));
    assert_eq!(overridden.theme, "InspiredGitHub");
    assert_eq!(overridden.appearance, Appearance::Light);
}

#[test]
fn rejects_unknown_appearance_from_environment() {
    let _lock = env_lock().lock().expect("env lock");
    let _appearance = EnvGuard::set(APPEARANCE_ENV, "sepia");
    assert!(Cli::try_parse_from(["codetint", "themes"]).is_err());
}

#[test]
fn infers_language_from_extension_or_fallback() {
    let config = RenderConfig::default();
    assert_eq!(infer_language(Some(Path::new("src/lib.rs")), &config), "rs");
    assert_eq!(
        infer_language(Some(Path::new("Makefile")), &config),
        config.fallback_language
    );
    assert_eq!(infer_language(None, &config), config.fallback_language);
}

#[test]
fn ansi_output_strips_back_to_the_input() {
    let code = "fn main() {\n    println!(\"hi\");\n}";
    let out = render_to_string(&renderer(Appearance::Dark), code, "rs", false).expect("render");
    assert_eq!(strip_ansi(&out), format!("{}\n", code));
    assert!(out.contains("\x1b[38;2;"));
}

#[test]
fn json_output_lists_spans_and_breaks() {
    let out =
        render_to_string(&renderer(Appearance::Light), "a\nb", "text.plain", true).expect("json");
    let value: serde_json::Value = serde_json::from_str(&out).expect("parse");
    let kinds: Vec<&str> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|item| item["kind"].as_str().expect("kind"))
        .collect();
    assert_eq!(kinds, ["span", "line_break", "span", "line_break"]);
}

#[test]
fn unknown_theme_is_reported_with_context() {
    let config = RenderConfig {
        theme: "Neon".to_string(),
        ..RenderConfig::default()
    };
    let renderer = Renderer::new(SyntectBackend::default(), config);
    let err = render_to_string(&renderer, "x", "rs", false).expect_err("unknown theme");
    let message = format!("{:#}", err);
    assert!(message.contains("failed to render as 'rs'"), "{}", message);
    assert!(message.contains("Unknown theme: Neon"), "{}", message);
}

#[test]
fn reads_input_files() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"let x = 1;\n").expect("write");
    let text = read_input(Some(file.path())).expect("read");
    assert_eq!(text, "let x = 1;\n");
    assert!(read_input(Some(Path::new("/definitely/not/here.rs"))).is_err());
}

#[test]
fn render_command_uses_the_file_extension() {
    let _lock = env_lock().lock().expect("env lock");
    let _theme = EnvGuard::remove(THEME_ENV);
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sample.rs");
    std::fs::write(&path, "fn x() {}").expect("write");
    let path_arg = path.to_string_lossy().to_string();
    let cli = Cli::parse_from(["codetint", "render", path_arg.as_str(), "--json"]);
    let out = execute(cli).expect("execute");
    assert!(out.contains("\"text\": \"fn\""), "{}", out);
}

#[test]
fn listings_include_bundled_entries() {
    let backend = SyntectBackend::default();
    assert!(format_themes(&backend)
        .lines()
        .any(|line| line == DEFAULT_THEME));
    assert!(format_languages(&backend).contains("source.rust"));
}

#[test]
fn completions_generate_a_script() {
    let _lock = env_lock().lock().expect("env lock");
    let out = execute(Cli::parse_from(["codetint", "completions", "bash"])).expect("completions");
    assert!(out.contains("codetint"));
}

#[test]
fn run_and_report_returns_zero_on_success() {
    let exit_code = run_and_report(|| Ok::<(), &str>(()));
    assert_eq!(exit_code, 0);
}

#[test]
fn run_and_report_returns_non_zero_on_failure() {
    let exit_code = run_and_report(|| Err::<(), &str>("boom"));
    assert_eq!(exit_code, 1);
}
