//! In-process canonical layout for generated Go source
//!
//! This is a layout pass, not a full reimplementation of `gofmt`. Spacing
//! within a line and blank lines between declarations are left as the template
//! wrote them, so custom templates that need gofmt-canonical output should use
//! `GofmtFormatter`. It settles the line layout a template can get wrong:
//! - indentation is rebuilt with tabs from bracket nesting
//! - trailing whitespace is removed and blank-line runs collapse to one
//! - each group inside an `import ( ... )` block is sorted and deduplicated
//! - the file ends with exactly one newline
//!
//! Along the way it lexes strings, runes, raw strings and comments, so
//! unbalanced brackets, unterminated literals and a missing package clause are
//! reported as format errors instead of being written out.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::SourceFormatter;
use crate::generation::GenerationError;

static PACKAGE_CLAUSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^package\s+[A-Za-z_][A-Za-z0-9_]*\s*(//.*)?$").expect("valid package clause pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Code,
    /// Continuation of a raw string or block comment, kept byte for byte
    Verbatim,
}

#[derive(Debug, Clone)]
struct Line {
    text: String,
    kind: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    RawString,
    BlockComment,
}

#[derive(Debug)]
struct OpenBracket {
    ch: char,
    line: usize,
    /// Whether lines nested in this bracket get one more tab
    indents: bool,
}

struct Scanner {
    mode: Mode,
    stack: Vec<OpenBracket>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            mode: Mode::Code,
            stack: Vec::new(),
        }
    }

    /// Indentation of a line that starts by closing `leading_closers` brackets
    fn indent_for(&self, leading_closers: usize) -> usize {
        let open = self.stack.len().saturating_sub(leading_closers);
        self.stack[..open].iter().filter(|b| b.indents).count()
    }

    fn scan_line(&mut self, text: &str, line_no: usize) -> Result<(), GenerationError> {
        let mut min_depth = self.stack.len();
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match self.mode {
                Mode::RawString => {
                    if ch == '`' {
                        self.mode = Mode::Code;
                    }
                }
                Mode::BlockComment => {
                    if ch == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        self.mode = Mode::Code;
                    }
                }
                Mode::Code => match ch {
                    '/' if chars.peek() == Some(&'/') => break,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.mode = Mode::BlockComment;
                    }
                    '"' | '\'' => skip_quoted(&mut chars, ch, line_no)?,
                    '`' => self.mode = Mode::RawString,
                    '(' | '[' | '{' => self.stack.push(OpenBracket {
                        ch,
                        line: line_no,
                        indents: false,
                    }),
                    ')' | ']' | '}' => {
                        let open = self.stack.pop().ok_or_else(|| {
                            format_error(line_no, format!("unexpected '{ch}'"))
                        })?;
                        if open.ch != opening_for(ch) {
                            return Err(format_error(
                                line_no,
                                format!(
                                    "'{ch}' does not match '{}' opened on line {}",
                                    open.ch, open.line
                                ),
                            ));
                        }
                        min_depth = min_depth.min(self.stack.len());
                    }
                    _ => {}
                },
            }
        }

        // Only the innermost bracket left open on a line indents what follows
        if self.stack.len() > min_depth {
            if let Some(last) = self.stack.last_mut() {
                last.indents = true;
            }
        }

        Ok(())
    }

    fn finish(&self) -> Result<(), GenerationError> {
        match self.mode {
            Mode::RawString => {
                return Err(GenerationError::Format(
                    "unterminated raw string literal".to_string(),
                ));
            }
            Mode::BlockComment => {
                return Err(GenerationError::Format(
                    "unterminated block comment".to_string(),
                ));
            }
            Mode::Code => {}
        }

        if let Some(open) = self.stack.last() {
            return Err(format_error(
                open.line,
                format!("'{}' is never closed", open.ch),
            ));
        }

        Ok(())
    }
}

fn skip_quoted<I>(
    chars: &mut std::iter::Peekable<I>,
    quote: char,
    line_no: usize,
) -> Result<(), GenerationError>
where
    I: Iterator<Item = char>,
{
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if ch == quote {
            return Ok(());
        }
    }

    let kind = if quote == '"' { "string" } else { "rune" };
    Err(format_error(line_no, format!("unterminated {kind} literal")))
}

fn opening_for(close: char) -> char {
    match close {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

fn format_error(line_no: usize, message: String) -> GenerationError {
    GenerationError::Format(format!("line {line_no}: {message}"))
}

/// Canonical formatter that runs without any external tooling
pub struct CanonicalGoFormatter;

impl CanonicalGoFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format Go source synchronously
    pub fn format_source(&self, source: &str) -> Result<String, GenerationError> {
        let lines = reindent(source)?;
        let lines = collapse_blank_lines(lines);
        check_package_clause(&lines)?;
        let lines = sort_import_blocks(lines);

        let mut formatted = lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        formatted.push('\n');
        Ok(formatted)
    }
}

impl Default for CanonicalGoFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceFormatter for CanonicalGoFormatter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    async fn format(&self, source: &str) -> Result<String, GenerationError> {
        self.format_source(source)
    }
}

fn reindent(source: &str) -> Result<Vec<Line>, GenerationError> {
    let mut scanner = Scanner::new();
    let mut lines = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;

        if scanner.mode != Mode::Code {
            scanner.scan_line(raw, line_no)?;
            lines.push(Line {
                text: raw.to_string(),
                kind: LineKind::Verbatim,
            });
            continue;
        }

        let content = raw.trim_start();
        if content.trim_end().is_empty() {
            lines.push(Line {
                text: String::new(),
                kind: LineKind::Blank,
            });
            continue;
        }

        let leading_closers = content
            .chars()
            .take_while(|c| matches!(c, ')' | ']' | '}'))
            .count();
        let indent = scanner.indent_for(leading_closers);

        scanner.scan_line(content, line_no)?;

        // Trailing whitespace inside an open raw string is part of its value
        let body = if scanner.mode == Mode::RawString {
            content
        } else {
            content.trim_end()
        };

        lines.push(Line {
            text: format!("{}{}", "\t".repeat(indent), body),
            kind: LineKind::Code,
        });
    }

    scanner.finish()?;
    Ok(lines)
}

fn collapse_blank_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut result: Vec<Line> = Vec::with_capacity(lines.len());

    for line in lines {
        if line.kind == LineKind::Blank {
            let previous_blank = result
                .last()
                .map(|prev| prev.kind == LineKind::Blank)
                .unwrap_or(true);
            if previous_blank {
                continue;
            }
        }
        result.push(line);
    }

    while result
        .last()
        .map(|line| line.kind == LineKind::Blank)
        .unwrap_or(false)
    {
        result.pop();
    }

    result
}

fn check_package_clause(lines: &[Line]) -> Result<(), GenerationError> {
    let first_code = lines.iter().find(|line| {
        line.kind == LineKind::Code
            && !line.text.starts_with("//")
            && !line.text.starts_with("/*")
    });

    match first_code {
        Some(line) if PACKAGE_CLAUSE_RE.is_match(&line.text) => Ok(()),
        Some(line) => Err(GenerationError::Format(format!(
            "expected package clause, found '{}'",
            line.text
        ))),
        None => Err(GenerationError::Format(
            "missing package clause".to_string(),
        )),
    }
}

fn sort_import_blocks(lines: Vec<Line>) -> Vec<Line> {
    let mut result = Vec::with_capacity(lines.len());
    let mut group: Vec<Line> = Vec::new();
    let mut in_imports = false;

    for line in lines {
        if !in_imports {
            in_imports = line.kind == LineKind::Code && line.text.starts_with("import (");
            result.push(line);
            continue;
        }

        match line.kind {
            LineKind::Code if line.text.trim() == ")" => {
                flush_import_group(&mut group, &mut result);
                in_imports = false;
                result.push(line);
            }
            LineKind::Blank => {
                flush_import_group(&mut group, &mut result);
                result.push(line);
            }
            _ => group.push(line),
        }
    }

    flush_import_group(&mut group, &mut result);
    result
}

fn flush_import_group(group: &mut Vec<Line>, result: &mut Vec<Line>) {
    let sortable = group
        .iter()
        .all(|line| line.kind == LineKind::Code && !line.text.trim_start().starts_with("//"));

    if sortable {
        group.sort_by(|a, b| {
            import_path(&a.text)
                .cmp(import_path(&b.text))
                .then_with(|| a.text.cmp(&b.text))
        });
        group.dedup_by(|a, b| a.text == b.text);
    }

    result.append(group);
}

fn import_path(spec: &str) -> &str {
    match (spec.find('"'), spec.rfind('"')) {
        (Some(start), Some(end)) if end > start => &spec[start + 1..end],
        _ => spec.trim(),
    }
}
