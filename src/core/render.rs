//! Renderer module
//!
//! Renders a HitSet to different output formats: text, jsonl, json

use colored::Colorize;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::Path;

use crate::core::file_reader::read_source_safe;
use crate::core::model::{Hit, HitSet};
use crate::core::tokenizer::{tokenize, TokenClass};

/// Width of the separator printed between hits when context is shown
const SEPARATOR_WIDTH: usize = 40;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,

    /// Paint matched text red
    pub color: bool,

    /// Prefix source lines with their line number
    pub line_numbers: bool,

    /// Prefix source lines with the file path and drop the summary line
    pub with_filename: bool,

    /// Source lines shown before the match line
    pub before: usize,

    /// Source lines shown after the match line
    pub after: usize,

    /// Print a dashed line after each hit
    pub separator: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            ..Default::default()
        }
    }
}

/// Renderer for hit sets
pub struct Renderer {
    config: RenderConfig,
    /// Query words painted on context lines
    words: HashSet<String>,
    /// Source lines by path, loaded on first use
    sources: HashMap<String, Vec<String>>,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_config(RenderConfig::new(format))
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            words: HashSet::new(),
            sources: HashMap::new(),
        }
    }

    /// Set the words highlighted on context lines
    pub fn with_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.words = words.into_iter().map(str::to_string).collect();
        self
    }

    /// Render a hit set to a string
    pub fn render(&mut self, hits: &HitSet) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.render_to(hits, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&mut self, hits: &HitSet, mut writer: W) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => self.render_text(hits, &mut writer)?,
            OutputFormat::Jsonl => self.render_jsonl(hits, &mut writer)?,
            OutputFormat::Json => self.render_json(hits, &mut writer)?,
        }
        writer.flush()
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl<W: Write>(&self, hits: &HitSet, writer: &mut W) -> io::Result<()> {
        for (i, hit) in hits.hits.iter().enumerate() {
            if self.config.pretty {
                if i > 0 {
                    writeln!(writer)?;
                }
                serde_json::to_writer_pretty(&mut *writer, hit)?;
            } else {
                serde_json::to_writer(&mut *writer, hit)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Render as a single JSON array
    fn render_json<W: Write>(&self, hits: &HitSet, writer: &mut W) -> io::Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(&mut *writer, &hits.hits)?;
        } else {
            serde_json::to_writer(&mut *writer, &hits.hits)?;
        }
        writeln!(writer)
    }

    /// Render as human-readable text with source context
    fn render_text<W: Write>(&mut self, hits: &HitSet, writer: &mut W) -> io::Result<()> {
        let Self {
            config,
            words,
            sources,
        } = self;

        for hit in &hits.hits {
            if !config.with_filename {
                writeln!(
                    writer,
                    "File: {}  Line: {}  Type: string  Score: {:.1}",
                    hit.path, hit.line, hit.score
                )?;
            }

            let lines = sources
                .entry(hit.path.clone())
                .or_insert_with(|| load_lines(&hit.path));

            let match_index = hit.line.saturating_sub(1);
            let start = match_index.saturating_sub(config.before);
            let end = lines.len().min(match_index + config.after + 1);

            for (i, line) in lines.iter().enumerate().take(end).skip(start) {
                let is_match = i == match_index;
                let text = match (config.color, is_match) {
                    (false, _) => line.clone(),
                    (true, true) => highlight_literal(line, hit),
                    (true, false) => highlight_words(line, words),
                };
                let marker = if is_match { " <== match" } else { "" };
                writeln!(writer, "{}{}{}", line_prefix(config, hit, i + 1), text, marker)?;
            }

            if config.separator {
                writeln!(writer, "{}", "-".repeat(SEPARATOR_WIDTH))?;
            }
        }
        Ok(())
    }
}

fn load_lines(path: &str) -> Vec<String> {
    read_source_safe(Path::new(path))
        .map(|content| content.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

fn line_prefix(config: &RenderConfig, hit: &Hit, line_number: usize) -> String {
    match (config.with_filename, config.line_numbers) {
        (true, true) => format!("{}:{}:", hit.path, line_number),
        (true, false) => format!("{}:", hit.path),
        (false, true) => format!("{}:", line_number),
        (false, false) => String::new(),
    }
}

/// Paint the matched spans of the literal where it opens on `line`.
///
/// Falls back to the first occurrence when the column does not line up.
fn highlight_literal(line: &str, hit: &Hit) -> String {
    let first = hit.text.lines().next().unwrap_or("");
    if first.is_empty() {
        return line.to_string();
    }
    let offset = line
        .get(hit.column..)
        .filter(|rest| rest.starts_with(first))
        .map(|_| hit.column)
        .or_else(|| line.find(first));
    let Some(offset) = offset else {
        return line.to_string();
    };

    let mut out = String::with_capacity(line.len());
    let mut last = offset;
    out.push_str(&line[..offset]);
    for span in &hit.spans {
        let start = offset + span.start.min(first.len());
        let end = offset + span.end.min(first.len());
        if start >= end || start < last {
            continue;
        }
        out.push_str(&line[last..start]);
        out.push_str(&line[start..end].red().to_string());
        last = end;
    }
    out.push_str(&line[last..]);
    out
}

/// Paint whole word tokens of `line` that occur in the query
fn highlight_words(line: &str, words: &HashSet<String>) -> String {
    if words.is_empty() {
        return line.to_string();
    }
    tokenize(line)
        .into_iter()
        .map(|token| {
            if token.class == TokenClass::Alnum && words.contains(&token.text) {
                token.text.red().to_string()
            } else {
                token.text
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const RED: &str = "\u{1b}[31m";

    fn hit(path: &str, line: usize, text: &str, score: f64) -> Hit {
        Hit {
            path: path.to_string(),
            line,
            column: 0,
            text: text.to_string(),
            cleaned: text.to_string(),
            score,
            spans: Vec::new(),
        }
    }

    fn write_source(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    const SOURCE: &str = "int main() {\n    int x = 1;\n    puts(\"hello world\");\n    return 0;\n}\n";

    #[test]
    fn test_render_text_summary_and_match_line() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "a.c", SOURCE);
        let set: HitSet = vec![hit(&path, 3, "hello world", 10.1)].into_iter().collect();

        let output = Renderer::new(OutputFormat::Text).render(&set);
        let expected = format!(
            "File: {}  Line: 3  Type: string  Score: 10.1\n    puts(\"hello world\"); <== match\n",
            path
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_render_text_context_and_separator() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "a.c", SOURCE);
        let set: HitSet = vec![hit(&path, 3, "hello world", 10.1)].into_iter().collect();

        let config = RenderConfig {
            before: 1,
            after: 5,
            line_numbers: true,
            separator: true,
            ..Default::default()
        };
        let output = Renderer::with_config(config).render(&set);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "2:    int x = 1;");
        assert_eq!(lines[2], "3:    puts(\"hello world\"); <== match");
        assert_eq!(lines[4], "5:}");
        assert_eq!(lines[5], "-".repeat(40));
    }

    #[test]
    fn test_render_text_with_filename() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "a.c", SOURCE);
        let set: HitSet = vec![hit(&path, 1, "x", 1.0)].into_iter().collect();

        let config = RenderConfig {
            with_filename: true,
            after: 1,
            ..Default::default()
        };
        let output = Renderer::with_config(config).render(&set);
        assert!(!output.contains("File: "));
        assert_eq!(
            output,
            format!("{p}:int main() {{ <== match\n{p}:    int x = 1;\n", p = path)
        );
    }

    #[test]
    fn test_render_text_unreadable_source() {
        let set: HitSet = vec![hit("/nonexistent/a.c", 1, "x", 1.0)].into_iter().collect();
        let output = Renderer::new(OutputFormat::Text).render(&set);
        assert_eq!(output, "File: /nonexistent/a.c  Line: 1  Type: string  Score: 1.0\n");
    }

    #[test]
    fn test_highlight_literal_spans() {
        colored::control::set_override(true);
        let mut h = hit("a.c", 1, "min: %d MB", 1.0);
        h.spans = vec![0..3, 8..10];
        let out = highlight_literal("printf(\"min: %d MB\");", &h);
        assert!(out.starts_with(&format!("printf(\"{RED}min")));
        assert!(out.contains(": %d "));
        assert!(out.contains(&format!("{RED}MB")));
    }

    #[test]
    fn test_highlight_literal_uses_column() {
        colored::control::set_override(true);
        let mut h = hit("a.c", 1, "a", 1.0);
        h.spans = vec![0..1];
        h.column = 8;
        let out = highlight_literal("f(\"a\", \"a\");", &h);
        assert!(out.starts_with("f(\"a\", \""));
        assert!(out.contains(&format!("\"{RED}a")));

        h.column = 3;
        let out = highlight_literal("f(\"a\", \"a\");", &h);
        assert!(out.starts_with(&format!("f(\"{RED}a")));
    }

    #[test]
    fn test_highlight_literal_not_on_line() {
        let h = hit("a.c", 1, "elsewhere", 1.0);
        assert_eq!(highlight_literal("int x;", &h), "int x;");
    }

    #[test]
    fn test_highlight_words_whole_tokens_only() {
        colored::control::set_override(true);
        let words: HashSet<String> = ["peak".to_string()].into_iter().collect();
        let out = highlight_words("peak peaked", &words);
        assert!(out.starts_with(RED));
        assert!(out.ends_with(" peaked"));
        assert_eq!(highlight_words("nothing here", &words), "nothing here");
    }

    #[test]
    fn test_render_jsonl() {
        let set: HitSet = vec![hit("a.c", 1, "x", 1.0), hit("b.py", 2, "y", 2.0)]
            .into_iter()
            .collect();
        let output = Renderer::new(OutputFormat::Jsonl).render(&set);
        assert_eq!(output.lines().count(), 2);
        let first: Hit = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(first.path, "a.c");
        assert_eq!(first.line, 1);
    }

    #[test]
    fn test_render_json() {
        let set: HitSet = vec![hit("a.c", 1, "x", 1.0)].into_iter().collect();
        let output = Renderer::new(OutputFormat::Json).render(&set);
        assert!(output.starts_with('['));
        assert!(output.trim_end().ends_with(']'));
        let parsed: Vec<Hit> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_render_json_empty() {
        let output = Renderer::new(OutputFormat::Json).render(&HitSet::new());
        assert_eq!(output, "[]\n");
    }

    #[test]
    fn test_render_json_pretty() {
        let set: HitSet = vec![hit("a.c", 1, "x", 1.0)].into_iter().collect();
        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render(&set);
        assert!(output.contains("\n  "));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSONL".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        let result = "md".parse::<OutputFormat>();
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.pretty);
        assert!(!config.color);
    }
}
