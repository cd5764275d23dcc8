//! Candidate outcome letters.
//!
//! A letter template is chosen by interview and adviser count, filled from
//! the candidate, NDA and interview records, then wrapped as a standalone
//! HTML document ready to be stored next to the candidate's other files.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use panel_core::{find_adviser, Adviser, Candidate, Error, Interview, Nda, Result, TemplateRecord, TemplateType};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::SubstitutionContext;
use crate::names::{format_date, format_stored_date};
use crate::template::{Template, SECOND_INTERVIEW};

static LETTERHEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{nda\.title\}\} \{\{nda\.name\}\}.*?\{\{date\}\}").unwrap());
static SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)Yours sincerely,.*?Copy: DDO \{\{ddoName\}\}").unwrap());

const LETTER_CSS: &str = r#"
body { font-family: Arial, sans-serif; line-height: 1.2; color: #000; }
h1, h2, h3, h4, h5, h6 { margin-top: 1em; margin-bottom: 0.5em; }
h1 { font-size: 2em; }
h2 { font-size: 1.5em; }
h3 { font-size: 1.17em; }
h4 { font-size: 1em; }
h5 { font-size: 0.83em; }
h6 { font-size: 0.67em; }
.ql-align-center { text-align: center; }
.ql-align-right { text-align: right; }
.ql-align-left { text-align: left; }
.ql-align-justify { text-align: justify; line-height: 1.2; }
.ql-indent-1 { padding-left: 3em; }
.ql-indent-2 { padding-left: 6em; }
.ql-indent-3 { padding-left: 9em; }
.ql-indent-4 { padding-left: 12em; }
.ql-indent-5 { padding-left: 15em; }
.ql-indent-6 { padding-left: 18em; }
.ql-indent-7 { padding-left: 21em; }
.ql-indent-8 { padding-left: 24em; }
a { color: #0000FF; text-decoration: underline; }
strong { font-weight: bold; }
em { font-style: italic; }
s { text-decoration: line-through; }
blockquote { border-left: 4px solid #ccc; margin-bottom: 5px; margin-top: 5px; padding-left: 16px; }
code, .ql-code-block-container { background-color: #f0f0f0; border-radius: 3px; padding: 2px 4px; font-family: monospace; }
ul, ol { padding-left: 1.5em; margin-bottom: 1em; }
img { max-width: 100%; height: auto; }
.ql-size-small { font-size: 0.75em; }
.ql-size-large { font-size: 1.5em; }
.ql-size-huge { font-size: 2.5em; }
.letterhead { text-align: right; }
.signature { text-align: left; }
p { margin: 0; padding: 0; }
"#;

/// Letter template name for a candidate's interviews.
pub fn template_name(interviews: &[Interview]) -> Result<&'static str> {
    match interviews {
        [] => Ok("x1 Interview x1 Adviser"),
        [only] if only.adviser_names.len() > 1 => Ok("x1 Interview x2 Advisers"),
        [_] => Ok("x1 Interview x1 Adviser"),
        [_, _] => Ok("x2 Interviews x2 Advisers"),
        more => Err(Error::InvalidRequest(format!(
            "a candidate can have at most two interviews, got {}",
            more.len()
        ))),
    }
}

/// Letter template matching the candidate's category and interview shape.
pub fn select_template<'a>(
    templates: &'a [TemplateRecord],
    candidate: &Candidate,
    interviews: &[Interview],
) -> Result<&'a TemplateRecord> {
    let name = template_name(interviews)?;
    templates
        .iter()
        .find(|t| {
            t.template_type == TemplateType::CandidateLetter
                && t.category == candidate.question_category
                && t.name == name
        })
        .ok_or_else(|| {
            Error::TemplateNotFound(format!(
                "no candidate letter template '{}' for {}",
                name, candidate.question_category
            ))
        })
}

/// Lead and other adviser of one interview, with their records when known.
#[derive(Debug, Clone, Copy)]
pub struct InterviewPair<'a> {
    pub lead_name: &'a str,
    pub other_name: &'a str,
    pub lead: Option<&'a Adviser>,
    pub other: Option<&'a Adviser>,
}

impl<'a> InterviewPair<'a> {
    pub fn new(interview: &'a Interview, advisers: &'a [Adviser]) -> Self {
        let lead_name = interview.lead_adviser_name.as_str();
        let other_name = interview.other_adviser_name().unwrap_or("");
        Self {
            lead_name,
            other_name,
            lead: find_adviser(advisers, lead_name),
            other: find_adviser(advisers, other_name),
        }
    }

    fn insert_into(&self, ctx: &mut SubstitutionContext, prefix: &str) {
        ctx.insert(format!("{}leadAdviserName", prefix), self.lead_name)
            .insert(format!("{}otherAdviserName", prefix), self.other_name);
        insert_adviser(ctx, &format!("{}leadAdviser", prefix), self.lead);
        insert_adviser(ctx, &format!("{}otherAdviser", prefix), self.other);
    }
}

fn insert_adviser(ctx: &mut SubstitutionContext, root: &str, adviser: Option<&Adviser>) {
    let Some(adviser) = adviser else {
        return;
    };
    let fields = [
        ("title", &adviser.title),
        ("email", &adviser.email),
        ("mobile", &adviser.mobile),
        ("biography", &adviser.biography),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            ctx.insert(format!("{}.{}", root, field), value.as_str());
        }
    }
}

/// Everything a letter render needs besides the template.
#[derive(Debug, Clone, Copy)]
pub struct LetterInputs<'a> {
    pub candidate: &'a Candidate,
    pub interviews: &'a [Interview],
    pub advisers: &'a [Adviser],
    pub nda: Option<&'a Nda>,
    /// Stored panel date, empty when the candidate has none.
    pub panel_date: &'a str,
    pub today: NaiveDate,
}

pub fn build_context(inputs: &LetterInputs<'_>) -> Result<SubstitutionContext> {
    let mut ctx = SubstitutionContext::new();
    ctx.insert_record(None, inputs.candidate)?;
    ctx.insert("date", format_date(inputs.today))
        .insert("panelDate", format_stored_date(inputs.panel_date));

    if let Some(nda) = inputs.nda {
        ctx.insert("nda.name", nda.name.as_str())
            .insert("nda.email", nda.email.as_str())
            .insert("nda.title", nda.title.clone().unwrap_or_default());
    }

    if let Some(first) = inputs.interviews.first() {
        InterviewPair::new(first, inputs.advisers).insert_into(&mut ctx, "");
    }
    if let Some(second) = inputs.interviews.get(1) {
        InterviewPair::new(second, inputs.advisers).insert_into(&mut ctx, "2nd");
        ctx.enable_section(SECOND_INTERVIEW);
    }

    Ok(ctx)
}

/// Mark the letterhead and signature blocks of a letter template so the
/// stylesheet can align them. Runs on the template source, before
/// substitution, while the sentinel placeholders are still present.
pub fn mark_layout(source: &str) -> String {
    let marked = LETTERHEAD_RE.replace(source, r#"<div class="letterhead">$0</div>"#);
    SIGNATURE_RE
        .replace(&marked, r#"<div class="signature">$0</div>"#)
        .into_owned()
}

pub fn wrap_html(body: &str) -> String {
    format!(
        "<html><head><style>{}</style></head><body>{}</body></html>",
        LETTER_CSS, body
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLetter {
    pub filename: String,
    /// Object-store path the caller uploads `html` to.
    pub storage_path: String,
    pub html: String,
}

pub fn letter_filename(candidate: &Candidate, unix_millis: i64) -> String {
    format!(
        "{}_{}_letter_{}.html",
        candidate.surname, candidate.forename, unix_millis
    )
}

pub fn storage_path(candidate: &Candidate, filename: &str) -> String {
    format!("candidates/{}/files/{}", candidate.id, filename)
}

/// Render a letter. `unix_millis` stamps the file name.
pub fn generate(template: &TemplateRecord, inputs: &LetterInputs<'_>, unix_millis: i64) -> Result<GeneratedLetter> {
    let ctx = build_context(inputs)?;
    let parsed = Template::parse(&mark_layout(&template.content));

    let unresolved = parsed.unresolved(&ctx);
    if !unresolved.is_empty() {
        debug!("Letter placeholders without a value: {:?}", unresolved);
    }

    let html = wrap_html(&parsed.render(&ctx));
    let filename = letter_filename(inputs.candidate, unix_millis);
    let storage_path = storage_path(inputs.candidate, &filename);

    info!(
        "Generated letter for {} using template '{}'",
        inputs.candidate.full_name(),
        template.name
    );

    Ok(GeneratedLetter {
        filename,
        storage_path,
        html,
    })
}
