//! HTML for the translation form and its result panels

use crate::shell::{PanelKind, ShellReport};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
textarea, input[type=text] { width: 100%; box-sizing: border-box; margin: .25rem 0 1rem; }
textarea { min-height: 8rem; }
.panel { border-radius: .4rem; padding: .75rem 1rem; margin: .5rem 0; white-space: pre-wrap; }
.info { background: #e7f1fb; color: #0b4a82; }
.warning { background: #fff8e1; color: #7a5a00; }
.success { background: #e8f5e9; color: #1b5e20; }
.error { background: #fdecea; color: #8a1c1c; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn css_class(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Info => "info",
        PanelKind::Warning => "warning",
        PanelKind::Success => "success",
        PanelKind::Error => "error",
    }
}

/// Render the form, pre-filled with the last input, followed by any panels
pub fn render_page(text: &str, target_language: &str, report: Option<&ShellReport>) -> String {
    let panels: String = report
        .map(|r| {
            r.panels
                .iter()
                .map(|p| {
                    format!(
                        "<div class=\"panel {}\">{}</div>\n",
                        css_class(p.kind),
                        escape_html(&p.message)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Guardrails Translation App</title>
<style>{style}</style>
</head>
<body>
<h1>Guardrails Translation App</h1>
<form method="post" action="/">
<label for="text">Enter the Text You Want to Translate</label>
<textarea id="text" name="text">{text}</textarea>
<label for="target_language">Target Language (e.g., en, es, fr, de)</label>
<input type="text" id="target_language" name="target_language" value="{lang}">
<button type="submit">Translate</button>
</form>
{panels}</body>
</html>
"#,
        style = STYLE,
        text = escape_html(text),
        lang = escape_html(target_language),
        panels = panels,
    )
}
