//! Guardrails Translator - LLM translation with a profanity guardrail
//!
//! Text is translated by a hosted generative model twice: once as-is and once
//! through a single profanity check. A web form, a JSON API and a CLI share
//! the same [`shell::TranslationShell`].

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod guard;
pub mod server;
pub mod shell;

// Re-export key types for convenience
pub use crate::core::{
    client::{ChatSession, ChatTurn, GeminiClient, GenerativeModel, Role},
    config::TranslatorConfig,
    errors::TranslationError,
    models::{TranslationRequest, TranslationResult, ValidationOutcome, Verdict},
    translator::Translator,
};

pub use crate::guard::{
    classifier::{ProfanityClassifier, WordlistClassifier},
    gate::{GuardedTranslator, ValidationGate},
};

pub use crate::server::api::{build_app, AppState};
pub use crate::shell::{Panel, PanelKind, ShellReport, TranslationShell};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
