use pulldown_cmark::{html, Options, Parser};

use crate::helpers::Capitalize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub title: String,
    pub body_html: String,
}

impl MarkdownDocument {
    pub fn from_markdown(location: &str, markdown: &str) -> Self {
        Self {
            title: title_for(location),
            body_html: render_markdown(markdown),
        }
    }
}

/// `docs/getting-started.md` becomes `Getting started`.
pub fn title_for(location: &str) -> String {
    let file_name = location.rsplit('/').next().unwrap_or(location);
    file_name
        .replacen(".md", "", 1)
        .capitalize_first()
        .replace('-', " ")
}

/// GitHub-flavoured rendering. Fenced code keeps its `language-*` class for
/// whatever highlighter the page loads.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
