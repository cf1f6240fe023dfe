use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use tracing::debug;

use crate::errors::ConvertError;

/// Switches set by command line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// `_text_` becomes `<em>text</em>`
    pub emphasized_text: bool,
    /// When false, blocks starting with '<' are passed through unwrapped
    pub wrap_html_in_paragraph: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            emphasized_text: true,
            wrap_html_in_paragraph: true,
        }
    }
}

pub trait Render {
    fn render(&self, source: &str) -> String;
}

/// Paragraph and emphasis handling only. Anything richer belongs to a real
/// Markdown converter plugged in through [`Render`].
pub struct ParagraphRenderer {
    config: RenderConfig,
}

impl ParagraphRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Render for ParagraphRenderer {
    fn render(&self, source: &str) -> String {
        let mut html = String::with_capacity(source.len() + 16);
        for block in blocks(source) {
            let block = if self.config.emphasized_text {
                emphasize(&block)
            } else {
                block
            };
            if !self.config.wrap_html_in_paragraph && block.starts_with('<') {
                html.push_str(&block);
            } else {
                html.push_str("<p>");
                html.push_str(&block);
                html.push_str("</p>");
            }
        }
        html
    }
}

/// Blank-line separated blocks, inner lines joined with a space
fn blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in source.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join(" "));
    }
    blocks
}

fn emphasize(text: &str) -> String {
    let parts: Vec<&str> = text.split('_').collect();
    let markers = parts.len() - 1;
    let mut out = String::with_capacity(text.len() + markers * 4);
    out.push_str(parts[0]);
    for pair in parts[1..].chunks(2) {
        match pair {
            [inner, after] => {
                out.push_str("<em>");
                out.push_str(inner);
                out.push_str("</em>");
                out.push_str(after);
            }
            // odd one out
            [tail] => {
                out.push('_');
                out.push_str(tail);
            }
            _ => {}
        }
    }
    out
}

pub fn read_source(input_file: &Path) -> Result<String, ConvertError> {
    if !input_file.exists() {
        return Err(ConvertError::NotFound(input_file.to_owned()));
    }
    let err_func = |source| ConvertError::Read {
        path: input_file.to_owned(),
        source,
    };
    let mut file = File::open(input_file).map_err(err_func)?;
    let mut data = match file.metadata() {
        Ok(meta) => String::with_capacity(usize::try_from(meta.len()).unwrap_or(0)),
        Err(_) => String::new(),
    };
    file.read_to_string(&mut data).map_err(err_func)?;
    debug!(path = %input_file.display(), bytes = data.len(), "read input");
    Ok(data)
}

/// Writes to `output_file`, or stdout followed by a newline when there is none
pub fn write_html(output_file: Option<&Path>, html: &str) -> Result<(), ConvertError> {
    let Some(path) = output_file else {
        println!("{html}");
        return Ok(());
    };
    let err_func = |source| ConvertError::Write {
        path: path.to_owned(),
        source,
    };
    let mut file = File::create(path).map_err(err_func)?;
    file.write_all(html.as_bytes()).map_err(err_func)?;
    debug!(path = %path.display(), bytes = html.len(), "wrote output");
    Ok(())
}
