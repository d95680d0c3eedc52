//! Per-file structural index.
//!
//! One pass over the file computes line offsets, comment spans, string
//! spans, function boundaries, and loop nesting sites. Every rule for that
//! file reads the same index, so the file is never re-lexed per rule, and
//! cross-line rules (function length, complexity) never fall back to raw
//! regex over comments or string literals.
//!
//! The index is lexical, not syntactic: it tracks just enough structure to
//! scope pattern matches and measure functions. Java/C++ methods carry no
//! introducing keyword, so function-level checks stay quiet there; the
//! line-level checks still apply.

use crate::core::file_unit::{FileUnit, SyntaxProfile};
use std::ops::Range;

/// Boundaries and shape of one named function.
#[derive(Debug, Clone)]
pub struct FunctionSpan {
    pub name: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    pub end_line: usize,
    pub parameter_count: usize,
    /// Decision points inside the body; complexity proxy is this plus one.
    pub branch_count: usize,
}

impl FunctionSpan {
    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    pub fn complexity(&self) -> usize {
        self.branch_count + 1
    }
}

/// A loop header together with how many loops enclose it (itself included).
#[derive(Debug, Clone)]
pub struct LoopSite {
    pub line: usize,
    pub column: usize,
    pub depth: usize,
}

#[derive(Debug)]
pub struct StructuralIndex {
    line_starts: Vec<usize>,
    comment_spans: Vec<Range<usize>>,
    string_spans: Vec<Range<usize>>,
    functions: Vec<FunctionSpan>,
    loop_sites: Vec<LoopSite>,
}

impl StructuralIndex {
    pub fn build(unit: &FileUnit) -> Self {
        let content = unit.content.as_str();
        let profile = unit.language.syntax();

        let (comment_spans, string_spans) = scan_spans(content, &profile);
        let line_starts = compute_line_starts(content);

        let mut index = Self {
            line_starts,
            comment_spans,
            string_spans,
            functions: Vec::new(),
            loop_sites: Vec::new(),
        };
        index.functions = detect_functions(unit, &index);
        index.loop_sites = detect_loop_sites(unit, &index);
        index
    }

    /// 1-based (line, column) of a byte offset. Column is a byte position
    /// within the line, matching how match offsets are produced.
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index_of(offset);
        (line + 1, offset - self.line_starts[line] + 1)
    }

    /// Byte offset of the start of a 1-based line.
    pub fn line_start(&self, line: usize) -> usize {
        let idx = line.saturating_sub(1).min(self.line_starts.len() - 1);
        self.line_starts[idx]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn in_comment(&self, offset: usize) -> bool {
        span_contains(&self.comment_spans, offset)
    }

    pub fn in_string(&self, offset: usize) -> bool {
        span_contains(&self.string_spans, offset)
    }

    pub fn is_code(&self, offset: usize) -> bool {
        !self.in_comment(offset) && !self.in_string(offset)
    }

    pub fn functions(&self) -> &[FunctionSpan] {
        &self.functions
    }

    pub fn loop_sites(&self) -> &[LoopSite] {
        &self.loop_sites
    }

    fn line_index_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1)
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
    starts
}

fn span_contains(spans: &[Range<usize>], offset: usize) -> bool {
    let idx = spans.partition_point(|r| r.end <= offset);
    spans.get(idx).is_some_and(|r| r.start <= offset)
}

/// Single-pass lexer classifying comment and string spans. Comment markers
/// inside strings and quotes inside comments are handled by whichever
/// construct opens first.
fn scan_spans(content: &str, profile: &SyntaxProfile) -> (Vec<Range<usize>>, Vec<Range<usize>>) {
    let mut comments = Vec::new();
    let mut strings = Vec::new();
    let len = content.len();
    let mut i = 0;

    while i < len {
        let rest = &content[i..];

        if profile.line_markers.iter().any(|m| rest.starts_with(*m)) {
            let end = rest.find('\n').map(|n| i + n).unwrap_or(len);
            comments.push(i..end);
            i = end;
            continue;
        }

        if let Some((open, close)) = profile.block_comment {
            if rest.starts_with(open) {
                let body = &content[i + open.len()..];
                let end = body
                    .find(close)
                    .map(|n| i + open.len() + n + close.len())
                    .unwrap_or(len);
                comments.push(i..end);
                i = end;
                continue;
            }
        }

        if profile.triple_quotes {
            if let Some(delim) = ["\"\"\"", "'''"].iter().find(|d| rest.starts_with(**d)) {
                let body = &content[i + delim.len()..];
                let end = body
                    .find(*delim)
                    .map(|n| i + delim.len() + n + delim.len())
                    .unwrap_or(len);
                strings.push(i..end);
                i = end;
                continue;
            }
        }

        let Some(c) = rest.chars().next() else { break };

        if profile.quotes.contains(&c) {
            let start = i;
            let mut j = i + c.len_utf8();
            let mut escaped = false;
            let mut end = len;
            while j < len {
                let Some(cj) = content[j..].chars().next() else {
                    break;
                };
                if escaped {
                    escaped = false;
                } else if cj == '\\' {
                    escaped = true;
                } else if cj == c {
                    end = j + cj.len_utf8();
                    break;
                } else if cj == '\n' && c != '`' {
                    // Unterminated on this line; treat the remainder as code.
                    end = j;
                    break;
                }
                j += cj.len_utf8();
            }
            strings.push(start..end);
            i = end.max(start + c.len_utf8());
            continue;
        }

        i += c.len_utf8();
    }

    (comments, strings)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds `keyword` as a whole word at a code offset within `line`.
fn find_code_keyword(
    line: &str,
    line_offset: usize,
    keyword: &str,
    index: &StructuralIndex,
) -> Option<usize> {
    let mut search_from = 0;
    while let Some(pos) = line[search_from..].find(keyword) {
        let at = search_from + pos;
        let before_ok = at == 0
            || !line[..at]
                .chars()
                .next_back()
                .is_some_and(is_ident_char);
        let after = at + keyword.len();
        let after_ok = !line[after..].chars().next().is_some_and(is_ident_char);
        if before_ok && after_ok && index.is_code(line_offset + at) {
            return Some(at);
        }
        search_from = at + keyword.len();
    }
    None
}

fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn detect_functions(unit: &FileUnit, index: &StructuralIndex) -> Vec<FunctionSpan> {
    let keywords = unit.language.function_keywords();
    if keywords.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = unit.content.lines().collect();
    let mut functions = Vec::new();

    for (line_idx, line) in lines.iter().enumerate() {
        let line_offset = index.line_start(line_idx + 1);
        let Some((keyword, at)) = keywords
            .iter()
            .find_map(|kw| find_code_keyword(line, line_offset, kw, index).map(|at| (*kw, at)))
        else {
            continue;
        };

        let Some((name, params_start)) = parse_function_name(line, at + keyword.len()) else {
            continue;
        };
        let parameter_count = count_parameters(line, params_start);

        let end_line = if unit.language.uses_indent_blocks() {
            indent_block_end(&lines, line_idx)
        } else {
            brace_block_end(index, &lines, line_idx)
        };
        let Some(end_line) = end_line else { continue };

        let branch_count = count_branches(index, &lines, line_idx, end_line);

        functions.push(FunctionSpan {
            name,
            start_line: line_idx + 1,
            end_line: end_line + 1,
            parameter_count,
            branch_count,
        });
    }

    functions
}

/// Parses the identifier after a function keyword; returns the name and the
/// byte position just past the opening parenthesis. Anonymous functions are
/// skipped.
fn parse_function_name(line: &str, from: usize) -> Option<(String, usize)> {
    let rest = &line[from..];
    let trimmed_start = from + (rest.len() - rest.trim_start().len());
    let rest = line[trimmed_start..].trim_end();

    let name_len = rest
        .char_indices()
        .take_while(|(i, c)| is_ident_char(*c) || (*i == 0 && *c == '_'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    let name = &rest[..name_len];
    if name.is_empty() || name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let paren = line[trimmed_start + name_len..].find('(')?;
    Some((
        name.to_string(),
        trimmed_start + name_len + paren + 1,
    ))
}

/// Counts comma-separated parameters in the same-line parenthesized list,
/// ignoring receiver-style tokens.
fn count_parameters(line: &str, params_start: usize) -> usize {
    let rest = &line[params_start..];
    let mut depth = 1usize;
    let mut end = rest.len();
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    end = i;
                    break;
                }
            }
            _ => {}
        }
    }

    rest[..end]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter(|p| !matches!(*p, "self" | "&self" | "&mut self" | "cls"))
        .count()
}

/// End of an indentation-delimited body: the last non-blank line indented
/// deeper than the definition line.
fn indent_block_end(lines: &[&str], def_idx: usize) -> Option<usize> {
    let base = indent_width(lines[def_idx]);
    let mut end = def_idx;
    for (idx, line) in lines.iter().enumerate().skip(def_idx + 1) {
        if is_blank(line) {
            continue;
        }
        if indent_width(line) <= base {
            break;
        }
        end = idx;
    }
    Some(end)
}

/// End of a brace-delimited body: match the first opening brace at a code
/// offset. Declarations without a body are skipped.
fn brace_block_end(index: &StructuralIndex, lines: &[&str], def_idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut opened = false;

    // The opening brace must appear within a few lines of the signature.
    let search_limit = (def_idx + 3).min(lines.len());

    for (idx, line) in lines.iter().enumerate().skip(def_idx) {
        if !opened && idx >= search_limit {
            return None;
        }
        let line_offset = index.line_start(idx + 1);
        for (pos, c) in line.char_indices() {
            if !index.is_code(line_offset + pos) {
                continue;
            }
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    if opened {
                        depth = depth.saturating_sub(1);
                        if depth == 0 {
                            return Some(idx);
                        }
                    }
                }
                _ => {}
            }
        }
        if idx + 1 == lines.len() && opened {
            return Some(idx);
        }
    }
    None
}

const BRANCH_KEYWORDS: [&str; 8] = [
    "if", "elif", "for", "while", "case", "when", "catch", "except",
];

fn count_branches(
    index: &StructuralIndex,
    lines: &[&str],
    start_idx: usize,
    end_idx: usize,
) -> usize {
    let mut count = 0;
    for (idx, line) in lines
        .iter()
        .enumerate()
        .skip(start_idx + 1)
        .take(end_idx.saturating_sub(start_idx))
    {
        let line_offset = index.line_start(idx + 1);
        for keyword in BRANCH_KEYWORDS {
            let mut from = 0;
            while let Some(at) = find_code_keyword(&line[from..], line_offset + from, keyword, index)
            {
                count += 1;
                from += at + keyword.len();
                if from >= line.len() {
                    break;
                }
            }
        }
        for op in ["&&", "||"] {
            let mut from = 0;
            while let Some(pos) = line[from..].find(op) {
                if index.is_code(line_offset + from + pos) {
                    count += 1;
                }
                from += pos + op.len();
            }
        }
    }
    count
}

const LOOP_KEYWORDS: [&str; 2] = ["for", "while"];

/// Indentation-stack scan recording each loop header with its nesting
/// depth. Works on both indentation- and brace-delimited code because it
/// only trusts relative indentation of loop headers.
fn detect_loop_sites(unit: &FileUnit, index: &StructuralIndex) -> Vec<LoopSite> {
    let mut sites = Vec::new();
    let mut stack: Vec<usize> = Vec::new();

    for (idx, line) in unit.content.lines().enumerate() {
        if is_blank(line) {
            continue;
        }
        let indent = indent_width(line);
        while stack.last().is_some_and(|top| indent <= *top) {
            stack.pop();
        }

        let line_offset = index.line_start(idx + 1);
        let keyword_at = LOOP_KEYWORDS
            .iter()
            .find_map(|kw| find_code_keyword(line, line_offset, kw, index));
        if let Some(at) = keyword_at {
            stack.push(indent);
            sites.push(LoopSite {
                line: idx + 1,
                column: at + 1,
                depth: stack.len(),
            });
        }
    }

    sites
}
