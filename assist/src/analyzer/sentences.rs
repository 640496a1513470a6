use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n\s*").expect("paragraph break regex"));

const TERMINATORS: &[char] = &['.', '!', '?'];
const CLOSERS: &[char] = &['.', '!', '?', '"', '\'', ')', '\u{201d}', '\u{2019}'];
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "dr", "mr", "mrs", "ms", "prof", "vs", "cf", "fig", "approx",
];

/// One sentence of the document, with byte offsets into the full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
    /// Index of the paragraph (blank-line separated block).
    pub paragraph: usize,
    /// Position of the sentence inside its paragraph, from 0.
    pub ordinal: usize,
    /// Byte length of the trimmed paragraph.
    pub paragraph_len: usize,
}

impl Sentence<'_> {
    /// Offset just before the trailing terminator run, where an in-text
    /// citation belongs.
    pub fn body_end(&self) -> usize {
        let trimmed = self.text.trim_end_matches(|c| TERMINATORS.contains(&c));
        self.start + trimmed.len()
    }
}

pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut paragraph = 0usize;
    let mut para_start = 0usize;
    let breaks = PARAGRAPH_BREAK_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((text.len(), text.len())));
    for (brk_start, brk_end) in breaks {
        let para = &text[para_start..brk_start];
        if !para.trim().is_empty() {
            push_paragraph(&mut sentences, text, para_start, para, paragraph);
            paragraph += 1;
        }
        para_start = brk_end;
    }
    sentences
}

fn push_paragraph<'a>(
    out: &mut Vec<Sentence<'a>>,
    text: &'a str,
    base: usize,
    para: &str,
    paragraph: usize,
) {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = para.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if start.is_none() {
            if c.is_whitespace() {
                continue;
            }
            start = Some(i);
        }
        if !TERMINATORS.contains(&c) {
            continue;
        }
        if c == '.' && start.is_some_and(|s| is_abbreviation(&para[s..i])) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, n)) = chars.peek() {
            if !CLOSERS.contains(&n) {
                break;
            }
            end = j + n.len_utf8();
            chars.next();
        }
        let at_boundary = chars.peek().is_none_or(|&(_, n)| n.is_whitespace());
        if at_boundary && let Some(s) = start.take() {
            spans.push((s, end));
        }
    }
    if let Some(s) = start {
        let end = para.trim_end().len();
        if end > s {
            spans.push((s, end));
        }
    }

    let trimmed = para.trim();
    for (ordinal, (s, e)) in spans.into_iter().enumerate() {
        out.push(Sentence {
            text: &text[base + s..base + e],
            start: base + s,
            end: base + e,
            paragraph,
            ordinal,
            paragraph_len: trimmed.len(),
        });
    }
}

/// Whether the word ending `before` is an abbreviation whose period does
/// not close the sentence: a single capital initial, `et al` or a common
/// short form.
fn is_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default();
    let mut chars = word.chars();
    if let (Some(first), None) = (chars.next(), chars.next()) {
        return first.is_uppercase();
    }
    let lower = word.to_lowercase();
    if lower == "al" {
        let rest = before[..before.len() - word.len()].trim_end();
        return rest.to_lowercase().ends_with("et");
    }
    ABBREVIATIONS.contains(&lower.as_str())
}
