//! CLI command definitions and handlers

use clap::Subcommand;
use std::time::Duration;

use crate::core::config::TranslatorConfig;
use crate::shell::{Panel, PanelKind, ShellReport, TranslationShell};

/// Commands for the guardrails translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text once, with and without the guardrail
    Translate {
        /// Text to translate
        #[arg(short, long)]
        text: String,

        /// Target language (defaults to the configured language, normally en)
        #[arg(short = 'l', long)]
        target_lang: Option<String>,
    },

    /// Start the web form and JSON API
    Serve {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8501)
        #[arg(short, long, default_value_t = 8501)]
        port: u16,
    },

    /// Run only the profanity check on some text
    Check {
        /// Text to validate
        #[arg(short, long)]
        text: String,
    },
}

/// Terminal prefix for a panel
fn panel_label(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Info => "ℹ️ ",
        PanelKind::Warning => "⚠️ ",
        PanelKind::Success => "✅",
        PanelKind::Error => "❌",
    }
}

/// Format a report for the terminal, one panel per line
pub fn format_report(report: &ShellReport) -> String {
    report
        .panels
        .iter()
        .map(|panel: &Panel| format!("{} {}", panel_label(panel.kind), panel.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handle translate command
pub async fn handle_translate(
    config: TranslatorConfig,
    text: String,
    target_lang: Option<String>,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use tracing::info;

    let target_lang = config
        .resolve_target_language(target_lang.as_deref())
        .to_string();
    let shell = TranslationShell::from_config(config)?;

    info!("Translating with {}", shell.model_name());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Translating to {}...", target_lang));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = shell.run(&text, &target_lang).await;

    spinner.finish_and_clear();

    if report.is_empty() {
        // blank input renders nothing
        return Ok(());
    }

    println!("{}", format_report(&report));

    Ok(())
}

/// Handle serve command
pub async fn handle_serve(config: TranslatorConfig, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);
    println!("📄 OpenAPI document: http://{}:{}/api-docs/openapi.json", host, port);

    run_server(config, host, port).await?;

    Ok(())
}

/// Handle check command
pub async fn handle_check(config: TranslatorConfig, text: String) -> anyhow::Result<()> {
    use crate::core::models::ValidationOutcome;
    use crate::guard::classifier::WordlistClassifier;
    use crate::guard::gate::ValidationGate;
    use std::sync::Arc;

    let classifier = WordlistClassifier::with_blocked_terms(config.blocked_terms.as_slice())?;
    let gate = ValidationGate::new(Arc::new(classifier));

    match gate.validate(&text).await? {
        ValidationOutcome::Valid { .. } => println!("✅ Passed: no profanity detected"),
        ValidationOutcome::Invalid { reason } => println!("❌ {}", reason),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_translate() {
        let cli = TestCli::parse_from(["test", "translate", "--text", "Hello", "-l", "es"]);
        match cli.command {
            Commands::Translate { text, target_lang } => {
                assert_eq!(text, "Hello");
                assert_eq!(target_lang.as_deref(), Some("es"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = TestCli::parse_from(["test", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8501);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_format_report() {
        let report = ShellReport {
            panels: vec![
                Panel::info("Original Text: Hello"),
                Panel::error("Translation failed (without Guardrails): Request timeout"),
            ],
        };
        assert_eq!(
            format_report(&report),
            "ℹ️  Original Text: Hello\n❌ Translation failed (without Guardrails): Request timeout"
        );
    }
}
