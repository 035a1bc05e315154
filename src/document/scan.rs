//! Lexical map of a JavaScript object-literal document
//!
//! The merge engine edits documents by byte offset rather than through a
//! syntax tree. [`scan`] records which bytes are code (outside strings,
//! template text and comments), how deeply each byte is nested, and where
//! every bracket closes. Property lookups on top of that ignore anything
//! that only looks like a property because it sits inside a string.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Range;

static PROPERTY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?P<key>[A-Za-z_$][A-Za-z0-9_$]*|"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')\s*:"#)
        .expect("Valid property regex")
});

/// Structural problem found while scanning, with its 1-based line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScanError {}

/// A `key: value` pair located in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key_start: usize,
    /// Bracket depth of the key
    pub depth: u32,
    /// Byte span of the value expression
    pub value: Range<usize>,
}

#[derive(Debug)]
pub struct CodeMap<'a> {
    text: &'a str,
    code: Vec<bool>,
    depth: Vec<u32>,
    partners: HashMap<usize, usize>,
    /// String and template literal spans, start to end (exclusive)
    literals: BTreeMap<usize, usize>,
}

/// Scan `text`, failing on unterminated literals or unbalanced brackets
pub fn scan(text: &str) -> Result<CodeMap<'_>, ScanError> {
    let n = text.len();
    let scanner = Scanner {
        bytes: text.as_bytes(),
        code: vec![false; n],
        depth: vec![0; n],
        partners: HashMap::new(),
        literals: BTreeMap::new(),
        stack: Vec::new(),
        line: 1,
    };
    let (code, depth, partners, literals) = scanner.run()?;
    Ok(CodeMap {
        text,
        code,
        depth,
        partners,
        literals,
    })
}

impl<'a> CodeMap<'a> {
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_code(&self, at: usize) -> bool {
        self.code.get(at).copied().unwrap_or(false)
    }

    pub fn depth_at(&self, at: usize) -> u32 {
        self.depth.get(at).copied().unwrap_or(0)
    }

    /// Index of the bracket closing the opener at `open`
    pub fn matching_close(&self, open: usize) -> Option<usize> {
        self.partners.get(&open).copied()
    }

    /// Whether `value` is an object or array literal of the given opener
    pub fn opens_with(&self, value: &Range<usize>, opener: u8) -> bool {
        self.text.as_bytes().get(value.start) == Some(&opener) && self.is_code(value.start)
    }

    /// Span between the brackets of a bracketed value
    pub fn inner(&self, value: &Range<usize>) -> Range<usize> {
        (value.start + 1)..value.end.saturating_sub(1).max(value.start + 1)
    }

    /// Every property named `key` whose key starts inside `scope`
    pub fn properties(&self, scope: Range<usize>, key: &str) -> Vec<Property> {
        let mut found = Vec::new();
        let mut at = scope.start;

        while at < scope.end {
            let Some(caps) = PROPERTY_PATTERN.captures_at(self.text, at) else {
                break;
            };
            let Some(key_match) = caps.name("key") else {
                break;
            };
            let whole = caps.get(0).map_or(key_match.range(), |m| m.range());
            if key_match.start() >= scope.end {
                break;
            }

            if self.is_property_key(key_match.range(), whole.end - 1) {
                if unquote(key_match.as_str()) == key {
                    if let Some(value) = self.value_after(whole.end) {
                        found.push(Property {
                            key_start: key_match.start(),
                            depth: self.depth_at(key_match.start()),
                            value,
                        });
                    }
                }
                at = whole.end;
            } else {
                at = next_boundary(self.text, whole.start + 1);
            }
        }

        found
    }

    /// Least-nested property named `key` in `scope`, first one on ties
    pub fn shallowest(&self, scope: Range<usize>, key: &str) -> Option<Property> {
        self.properties(scope, key)
            .into_iter()
            .min_by_key(|property| property.depth)
    }

    /// Property named `key` directly inside the object whose `{` is at `open`
    pub fn direct_property(&self, open: usize, key: &str) -> Option<Property> {
        let close = self.matching_close(open)?;
        let child_depth = self.depth_at(open) + 1;
        self.properties((open + 1)..close, key)
            .into_iter()
            .find(|property| property.depth == child_depth)
    }

    /// Leading whitespace of the line containing `at`
    pub fn line_indent(&self, at: usize) -> &'a str {
        let start = self.text[..at].rfind('\n').map_or(0, |nl| nl + 1);
        let line = &self.text[start..];
        let width = line
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        &line[..width]
    }

    fn is_property_key(&self, key: Range<usize>, colon: usize) -> bool {
        if !self.is_code(colon) {
            return false;
        }
        let bytes = self.text.as_bytes();
        match bytes[key.start] {
            b'"' | b'\'' => self.literals.get(&key.start) == Some(&key.end),
            _ => {
                self.is_code(key.start)
                    && (key.start == 0 || !is_ident_byte(bytes[key.start - 1]))
                    && (key.start == 0 || bytes[key.start - 1] != b'.')
            }
        }
    }

    fn value_after(&self, colon_end: usize) -> Option<Range<usize>> {
        let bytes = self.text.as_bytes();
        let mut start = colon_end;
        while start < bytes.len()
            && (bytes[start].is_ascii_whitespace()
                || (!self.is_code(start) && !self.literals.contains_key(&start)))
        {
            start += 1;
        }
        if start >= bytes.len() {
            return None;
        }

        if let Some(end) = self.literals.get(&start) {
            return Some(start..*end);
        }
        if matches!(bytes[start], b'{' | b'[' | b'(') {
            return self.matching_close(start).map(|close| start..close + 1);
        }

        let mut end = start;
        while end < bytes.len()
            && self.is_code(end)
            && !matches!(bytes[end], b',' | b'}' | b']' | b')' | b';' | b'\n')
        {
            end += 1;
        }
        let trimmed = self.text[start..end].trim_end().len();
        Some(start..start + trimmed)
    }
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

fn unquote(key: &str) -> &str {
    let bytes = key.as_bytes();
    if key.len() >= 2 && (bytes[0] == b'"' || bytes[0] == b'\'') {
        &key[1..key.len() - 1]
    } else {
        key
    }
}

fn next_boundary(text: &str, mut at: usize) -> usize {
    while at < text.len() && !text.is_char_boundary(at) {
        at += 1;
    }
    at
}

struct Open {
    pos: usize,
    byte: u8,
    line: usize,
    /// Start of the template literal a `${` expression belongs to
    template: Option<usize>,
}

struct Scanner<'a> {
    bytes: &'a [u8],
    code: Vec<bool>,
    depth: Vec<u32>,
    partners: HashMap<usize, usize>,
    literals: BTreeMap<usize, usize>,
    stack: Vec<Open>,
    line: usize,
}

type ScanParts = (
    Vec<bool>,
    Vec<u32>,
    HashMap<usize, usize>,
    BTreeMap<usize, usize>,
);

impl Scanner<'_> {
    fn run(mut self) -> Result<ScanParts, ScanError> {
        let mut i = 0;
        while i < self.bytes.len() {
            i = self.step(i)?;
        }

        if let Some(open) = self.stack.last() {
            let what = if open.template.is_some() {
                "template expression '${'".to_string()
            } else {
                format!("'{}'", open.byte as char)
            };
            return Err(ScanError {
                line: open.line,
                message: format!("{} is never closed", what),
            });
        }

        Ok((self.code, self.depth, self.partners, self.literals))
    }

    fn current_depth(&self) -> u32 {
        self.stack.len() as u32
    }

    fn error(&self, line: usize, message: String) -> ScanError {
        ScanError { line, message }
    }

    fn fill_depth(&mut self, span: Range<usize>) {
        let depth = self.current_depth();
        let end = span.end.min(self.bytes.len());
        for slot in &mut self.depth[span.start.min(end)..end] {
            *slot = depth;
        }
    }

    fn step(&mut self, i: usize) -> Result<usize, ScanError> {
        let byte = self.bytes[i];
        self.depth[i] = self.current_depth();
        let next = self.bytes.get(i + 1).copied();

        match byte {
            b'/' if next == Some(b'/') => Ok(self.skip_line_comment(i)),
            b'/' if next == Some(b'*') => self.skip_block_comment(i),
            b'"' | b'\'' => self.skip_string(i, byte),
            b'`' => self.template_body(i + 1, i),
            b'{' | b'[' | b'(' => {
                self.code[i] = true;
                self.stack.push(Open {
                    pos: i,
                    byte,
                    line: self.line,
                    template: None,
                });
                Ok(i + 1)
            }
            b'}' | b']' | b')' => self.close(i, byte),
            _ => {
                if byte == b'\n' {
                    self.line += 1;
                }
                self.code[i] = true;
                Ok(i + 1)
            }
        }
    }

    fn skip_line_comment(&mut self, start: usize) -> usize {
        let end = self.bytes[start..]
            .iter()
            .position(|b| *b == b'\n')
            .map_or(self.bytes.len(), |offset| start + offset);
        self.fill_depth(start..end);
        end
    }

    fn skip_block_comment(&mut self, start: usize) -> Result<usize, ScanError> {
        let opened_on = self.line;
        let mut j = start + 2;
        while j + 1 < self.bytes.len() {
            if self.bytes[j] == b'*' && self.bytes[j + 1] == b'/' {
                self.fill_depth(start..j + 2);
                return Ok(j + 2);
            }
            if self.bytes[j] == b'\n' {
                self.line += 1;
            }
            j += 1;
        }
        Err(self.error(opened_on, "unterminated block comment".to_string()))
    }

    fn skip_string(&mut self, start: usize, quote: u8) -> Result<usize, ScanError> {
        let opened_on = self.line;
        let mut j = start + 1;
        loop {
            match self.bytes.get(j) {
                None | Some(b'\n') => {
                    return Err(self.error(opened_on, "unterminated string literal".to_string()))
                }
                Some(b'\\') => {
                    if self.bytes.get(j + 1) == Some(&b'\n') {
                        self.line += 1;
                    }
                    j += 2;
                }
                Some(b) if *b == quote => {
                    j += 1;
                    break;
                }
                Some(_) => j += 1,
            }
        }
        self.fill_depth(start..j);
        self.literals.insert(start, j);
        Ok(j)
    }

    /// Scan template text from `from` until the closing backtick or the
    /// next `${`, which suspends the literal until its `}`.
    fn template_body(&mut self, from: usize, start: usize) -> Result<usize, ScanError> {
        let mut j = from;
        loop {
            match self.bytes.get(j) {
                None => {
                    return Err(self.error(self.line, "unterminated template literal".to_string()))
                }
                Some(b'\\') => {
                    if self.bytes.get(j + 1) == Some(&b'\n') {
                        self.line += 1;
                    }
                    j += 2;
                }
                Some(b'\n') => {
                    self.line += 1;
                    j += 1;
                }
                Some(b'`') => {
                    self.fill_depth(from..j + 1);
                    self.literals.insert(start, j + 1);
                    return Ok(j + 1);
                }
                Some(b'$') if self.bytes.get(j + 1) == Some(&b'{') => {
                    let brace = j + 1;
                    self.fill_depth(from..brace + 1);
                    self.code[brace] = true;
                    self.stack.push(Open {
                        pos: brace,
                        byte: b'{',
                        line: self.line,
                        template: Some(start),
                    });
                    return Ok(brace + 1);
                }
                Some(_) => j += 1,
            }
        }
    }

    fn close(&mut self, i: usize, byte: u8) -> Result<usize, ScanError> {
        self.code[i] = true;
        let Some(open) = self.stack.pop() else {
            return Err(self.error(
                self.line,
                format!("unexpected '{}' with no open bracket", byte as char),
            ));
        };

        let expected = closing_for(open.byte);
        if expected != byte {
            return Err(self.error(
                self.line,
                format!(
                    "unexpected '{}', expected '{}' to close '{}' from line {}",
                    byte as char, expected as char, open.byte as char, open.line
                ),
            ));
        }

        self.depth[i] = self.current_depth();
        self.partners.insert(open.pos, i);
        match open.template {
            Some(start) => self.template_body(i + 1, start),
            None => Ok(i + 1),
        }
    }
}

fn closing_for(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'[' => b']',
        _ => b')',
    }
}
