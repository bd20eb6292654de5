//! HTML responses
//!
//! Inside the terminal the page is reduced to readable text; nothing in the
//! markup is executed. For a faithful look the page can be opened in a browser
//! through a host document that embeds it in a sandboxed iframe.

use crate::value::DecodedValue;
use color_eyre::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static HIDDEN_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->|<head\b.*?</head\s*>")
        .expect("Invalid hidden block regex pattern")
});

static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").expect("Invalid title regex pattern")
});

static BLOCK_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</?(?:p|div|li|ul|ol|tr|table|h[1-6]|section|article|header|footer|pre|blockquote)\b[^>]*>")
        .expect("Invalid block tag regex pattern")
});

static ANY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid tag regex pattern"));

/// Whether the response should be shown through the HTML view
pub fn is_html(content_type: Option<&str>, body: &DecodedValue) -> bool {
    let html_type = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("text/html"))
        .unwrap_or(false);
    html_type && matches!(body, DecodedValue::String(_))
}

/// Readable rendition of an HTML page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmlDocument {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

pub fn render_html(source: &str) -> HtmlDocument {
    let title = TITLE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_entities(m.as_str().trim()))
        .filter(|t| !t.is_empty());

    let visible = HIDDEN_BLOCKS.replace_all(source, "");
    let with_breaks = BLOCK_BREAK.replace_all(&visible, "\n");
    let text = ANY_TAG.replace_all(&with_breaks, "");
    let text = decode_entities(&text);

    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
        // collapse runs of blank lines into one
        if collapsed.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(collapsed);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    HtmlDocument { title, lines }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn escape_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn baseline_stylesheet(dark: bool) -> &'static str {
    if dark {
        "body{background:#1f2937;color:#f3f4f6;font-family:system-ui,sans-serif;line-height:1.5;margin:1rem}a{color:#93c5fd}"
    } else {
        "body{background:#ffffff;color:#111827;font-family:system-ui,sans-serif;line-height:1.5;margin:1rem}a{color:#2563eb}"
    }
}

/// Host page embedding `source` in a script-less, origin-less iframe with the
/// theme's baseline stylesheet injected ahead of the page's own markup
pub fn sandbox_document(source: &str, dark: bool) -> String {
    let style = baseline_stylesheet(dark);
    let framed = format!("<style>{style}</style>{source}");
    let host_bg = if dark { "#111827" } else { "#f3f4f6" };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>reqscope response</title>\n\
         <style>html,body{{margin:0;height:100%;background:{host_bg}}}iframe{{border:0;width:100%;height:100%}}</style>\n\
         </head>\n<body>\n<iframe sandbox=\"\" srcdoc=\"{}\"></iframe>\n</body>\n</html>\n",
        escape_attribute(&framed)
    )
}

/// Write the sandbox host document into `dir` and return its path
pub fn write_sandbox(source: &str, dark: bool, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join("reqscope-response.html");
    fs::write(&path, sandbox_document(source, dark))?;
    Ok(path)
}
