//! Label-driven field extractors for pro-forma text.
//!
//! Pro-forma layouts are inconsistent: labels may sit inline or on their own
//! line, with or without a colon, and PDF text flattens table cells into one
//! stream. Each extractor finds its label and reads greedily up to the next
//! known label. Every extractor returns an empty string when its label is
//! absent.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d(?:[\d \t]*\d)?").unwrap());

// Labels. Each swallows trailing separators so the value starts right after.
static NAME_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bname\b[:\s]*").unwrap());
static DIOCESE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdiocese\b[:\s]*").unwrap());
static BISHOP_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bsponsoring\s+bishop\b[:\s]*").unwrap());
static DDO_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcontact\s+ddo\b[:\s]*").unwrap());
static DETAILS_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcontact\s+details\b[:\s]*").unwrap());
static NUMBER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcontact\s+number\s*:").unwrap());
// The number must follow the label on the same line.
static PHONE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bphone\s*:[ \t]*(\d(?:[\d \t]*\d)?)").unwrap());
static DDO_EMAIL_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bemail\s*:").unwrap());
// Candidate email label is capitalised in the pro-forma; the DDO's is not.
static CANDIDATE_EMAIL_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bEmail\s*:").unwrap());

// Terminators: the labels that can follow each field.
static NAME_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\boriginal\b|\bdiocese\b|\bsponsoring\s+bishop\b|{}",
        CONTACT_OR_HEADING
    ))
    .unwrap()
});
static DIOCESE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\bsponsoring\s+bishop\b|{}", CONTACT_OR_HEADING)).unwrap()
});
static BISHOP_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i){}", CONTACT_OR_HEADING)).unwrap());
static DDO_NAME_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\bemail\s*:|\bphone\s*:|\bcontact\s+(?:details|number)\b|{}",
        HEADING
    ))
    .unwrap()
});
static DDO_BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\bcontact\s+(?:details|number)\b|{}", HEADING)).unwrap()
});
static DETAILS_BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i)\bcontact\s+ddo\b|{}", HEADING)).unwrap());
static QUESTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\b3\.\s*question\s+to\s+the\s+panel\b[:\s]*(.*?)\s*\b4\.(?:\s|$)").unwrap()
});

const CONTACT_OR_HEADING: &str =
    r"\bcontact\s+(?:ddo|details|number)\b|\bemail\s*:|\bphone\s*:|(?m:(?:^|[ \t])\d{1,2}\.[ \t]+(?-i:[A-Z]))";
const HEADING: &str = r"(?m:(?:^|[ \t])\d{1,2}\.[ \t]+(?-i:[A-Z]))";

/// A field value and whether it came from the primary rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Found {
    pub value: String,
    /// Set when only a positional fallback produced the value.
    pub fallback: bool,
}

impl Found {
    fn primary(value: impl Into<String>) -> Self {
        Self { value: value.into(), fallback: false }
    }

    fn fallback(value: impl Into<String>) -> Self {
        Self { value: value.into(), fallback: true }
    }
}

/// Span after a label, cut at the first terminator.
struct Labelled<'t> {
    span: &'t str,
    /// A terminator was found; `span` is the whole block up to it.
    bounded: bool,
}

/// Read the value after the first `label`. Without a terminator the value is
/// the first non-empty line after the label.
fn labelled<'t>(text: &'t str, label: &Regex, end: &Regex) -> Option<Labelled<'t>> {
    let m = label.find(text)?;
    let rest = &text[m.end()..];
    match end.find(rest) {
        Some(t) => Some(Labelled {
            span: rest[..t.start()].trim(),
            bounded: true,
        }),
        None => Some(Labelled {
            span: rest.trim_start().lines().next().unwrap_or("").trim(),
            bounded: false,
        }),
    }
}

/// Byte range of the block that starts after `label` and runs to `end` (or EOF).
fn block_range(text: &str, label: &Regex, end: &Regex) -> Option<Range<usize>> {
    let m = label.find(text)?;
    let stop = end
        .find(&text[m.end()..])
        .map(|t| m.end() + t.start())
        .unwrap_or(text.len());
    Some(m.end()..stop)
}

fn emails_in(text: &str, range: Range<usize>) -> impl Iterator<Item = (Range<usize>, &str)> {
    let offset = range.start;
    EMAIL_RE
        .find_iter(&text[range])
        .map(move |m| (offset + m.start()..offset + m.end(), m.as_str()))
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First digit run after `label` that is not part of an email address.
fn digits_after(text: &str, label: &Regex, end: Option<&Regex>) -> Option<String> {
    let m = label.find(text)?;
    let rest = &text[m.end()..];
    let scope = match end.and_then(|end| end.find(rest)) {
        Some(t) if !rest[..t.start()].trim().is_empty() => &rest[..t.start()],
        _ => rest,
    };
    let emails: Vec<Range<usize>> = EMAIL_RE.find_iter(scope).map(|e| e.range()).collect();
    DIGITS_RE
        .find_iter(scope)
        .find(|d| !emails.iter().any(|e| overlaps(e, &d.range())))
        .map(|d| d.as_str().chars().filter(|c| !c.is_whitespace()).collect())
}

// ---------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------

/// Full name, before splitting into forename/surname.
pub fn extract_name(text: &str) -> Found {
    match labelled(text, &NAME_LABEL, &NAME_END) {
        Some(l) => Found::primary(collapse_whitespace(l.span)),
        None => Found::default(),
    }
}

/// Diocese name with the word "Diocese" stripped.
pub fn extract_diocese(text: &str) -> Found {
    static DIOCESE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdiocese\b\s*").unwrap());

    let Some(l) = labelled(text, &DIOCESE_LABEL, &DIOCESE_END) else {
        return Found::default();
    };
    let stripped = DIOCESE_WORD.replace_all(l.span, "");
    let lines: Vec<&str> = stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if l.bounded && lines.len() > 1 {
        // Layout noise between label and terminator: keep the last token.
        let last = lines
            .last()
            .and_then(|line| line.split_whitespace().last())
            .unwrap_or("");
        return Found::fallback(last);
    }
    Found::primary(collapse_whitespace(&stripped))
}

pub fn extract_sponsoring_bishop(text: &str) -> Found {
    match labelled(text, &BISHOP_LABEL, &BISHOP_END) {
        Some(l) => Found::primary(collapse_whitespace(l.span)),
        None => Found::default(),
    }
}

/// DDO name: text after "Contact DDO" up to `email:` or `Phone:`.
pub fn extract_ddo_name(text: &str) -> Found {
    match labelled(text, &DDO_LABEL, &DDO_NAME_END) {
        Some(l) => Found::primary(collapse_whitespace(l.span)),
        None => Found::default(),
    }
}

fn ddo_block(text: &str) -> Option<Range<usize>> {
    block_range(text, &DDO_LABEL, &DDO_BLOCK_END)
}

/// First email inside the DDO block; else the first email after an `email:` label.
pub fn extract_ddo_email(text: &str) -> Found {
    if let Some(block) = ddo_block(text) {
        if let Some((_, email)) = emails_in(text, block).next() {
            return Found::primary(email);
        }
    }
    if let Some(m) = DDO_EMAIL_LABEL.find(text) {
        if let Some((_, email)) = emails_in(text, m.end()..text.len()).next() {
            return Found::fallback(email);
        }
    }
    Found::default()
}

/// DDO phone: digits after `Phone:`, preferring the DDO block.
pub fn extract_ddo_phone(text: &str) -> Found {
    if let Some(block) = ddo_block(text) {
        if let Some(digits) = phone_digits(&text[block]) {
            return Found::primary(digits);
        }
    }
    match phone_digits(text) {
        Some(digits) => Found::primary(digits),
        None => Found::default(),
    }
}

fn phone_digits(text: &str) -> Option<String> {
    PHONE_VALUE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|d| d.as_str().chars().filter(|c| !c.is_whitespace()).collect())
}

/// Candidate email.
///
/// Order: the `Contact Details` block, then an `Email:`/`Contact Number:`
/// label outside the DDO block, then any email outside the DDO block that is
/// not the DDO's.
pub fn extract_email(text: &str) -> Found {
    if let Some(block) = block_range(text, &DETAILS_LABEL, &DETAILS_BLOCK_END) {
        if let Some((_, email)) = emails_in(text, block).next() {
            return Found::primary(email);
        }
    }

    let ddo = ddo_block(text).unwrap_or(0..0);
    let outside_ddo = |range: &Range<usize>| !overlaps(range, &ddo);

    for label in [&*CANDIDATE_EMAIL_LABEL, &*NUMBER_LABEL] {
        if let Some(m) = label.find(text) {
            if let Some((_, email)) = emails_in(text, m.end()..text.len())
                .find(|(range, _)| outside_ddo(range))
            {
                return Found::primary(email);
            }
        }
    }

    let ddo_email = extract_ddo_email(text).value;
    match emails_in(text, 0..text.len())
        .find(|(range, email)| outside_ddo(range) && *email != ddo_email)
    {
        Some((_, email)) => Found::fallback(email),
        None => Found::default(),
    }
}

/// Candidate phone: digits after `Contact Number:`, spaces stripped.
pub fn extract_contact_number(text: &str) -> Found {
    match digits_after(text, &NUMBER_LABEL, Some(&DETAILS_BLOCK_END)) {
        Some(digits) => Found::primary(digits),
        None => Found::default(),
    }
}

/// Free text between `3. Question to the Panel` and the next `4.` heading.
pub fn extract_question_to_panel(text: &str) -> Found {
    match QUESTION_RE.captures(text).and_then(|c| c.get(1)) {
        Some(m) => Found::primary(collapse_whitespace(m.as_str())),
        None => Found::default(),
    }
}
