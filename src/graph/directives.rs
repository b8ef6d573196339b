// src/graph/directives.rs
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::types::{Directive, DirectiveKind};

// Sole quoted-literal argument only; `includeWhen` must precede `include`.
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"@(extends|includeWhen|include|component|yield)\s*\(\s*(?:'([^'\n]+)'|"([^"\n]+)")\s*\)"#,
    )
    .unwrap_or_else(|_| panic!("Invalid Regex"))
});

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{--.*?--\}\}").unwrap_or_else(|_| panic!("Invalid Regex")));

/// Extracts structural directives from template source, in order of appearance.
///
/// Directives inside `{{-- --}}` comments and escaped `@@` forms are skipped.
/// Invocations whose argument is anything but a single quoted literal are not
/// reported.
#[must_use]
pub fn extract(content: &str) -> Vec<Directive> {
    let comments: Vec<Range<usize>> = COMMENT_RE.find_iter(content).map(|m| m.range()).collect();
    let mut lines = LineCounter::new(content);
    let mut directives = Vec::new();

    for caps in DIRECTIVE_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        let start = whole.start();
        if is_escaped(content, start) || in_comment(&comments, start) {
            continue;
        }
        let Some(kind) = caps.get(1).and_then(|m| DirectiveKind::from_keyword(m.as_str())) else {
            continue;
        };
        let Some(target) = caps.get(2).or_else(|| caps.get(3)) else {
            continue;
        };
        directives.push(Directive {
            kind,
            raw_target: target.as_str().to_string(),
            line: lines.line_at(start),
        });
    }

    directives
}

fn is_escaped(content: &str, at: usize) -> bool {
    at > 0 && content.as_bytes().get(at - 1) == Some(&b'@')
}

fn in_comment(comments: &[Range<usize>], at: usize) -> bool {
    comments.iter().any(|r| r.contains(&at))
}

/// Incremental byte offset -> 1-based line lookup for ascending offsets.
struct LineCounter<'a> {
    content: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(content: &'a str) -> Self {
        Self { content, offset: 0, line: 1 }
    }

    fn line_at(&mut self, at: usize) -> usize {
        if let Some(slice) = self.content.get(self.offset..at) {
            self.line += slice.bytes().filter(|b| *b == b'\n').count();
            self.offset = at;
        }
        self.line
    }
}
