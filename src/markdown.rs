//! Markdown to HTML conversion.

use pulldown_cmark::{html::push_html, Options, Parser};

/// Render markdown to HTML.
///
/// Tables, strikethrough, task lists and footnotes are enabled. Raw HTML
/// passes through unchanged; nothing is sanitized. The newline the renderer
/// writes after the last block is dropped, so `# Heading` becomes
/// `<h1>Heading</h1>`.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;

    let parser = Parser::new_ext(content, options);

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, parser);
    html.truncate(html.trim_end_matches('\n').len());
    html
}
