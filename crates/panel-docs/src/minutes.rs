//! Panel meeting minutes: one short case paragraph per candidate.

use panel_core::{find_adviser, Adviser, Candidate, Interview, Nda, Outcome};
use serde::Serialize;
use tracing::info;

use crate::names::{initials, join_with_and};

const TITLE: &str = "Cases";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesEntry {
    pub candidate_id: String,
    /// "Forename Surname (NDA initials)".
    pub heading: String,
    /// Paragraph text up to the decision phrase.
    pub summary: String,
    pub decision: String,
}

impl MinutesEntry {
    pub fn paragraph(&self) -> String {
        format!("{} {} the request.", self.summary, self.decision)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Minutes {
    pub entries: Vec<MinutesEntry>,
}

impl Minutes {
    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", TITLE);
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.heading);
            out.push('\n');
            out.push_str(&entry.paragraph());
            out.push('\n');
        }
        out
    }

    pub fn render_html(&self) -> String {
        let mut out = format!("<h3>{}</h3>", TITLE);
        for entry in &self.entries {
            out.push_str(&format!(
                "<p><strong>{}</strong></p><p>{} <strong>{}</strong> the request.</p>",
                escape_html(&entry.heading),
                escape_html(&entry.summary),
                escape_html(&entry.decision)
            ));
        }
        out
    }
}

/// Order candidates by their question category's position in
/// `category_order`. Unknown categories sort last; ties keep input order.
pub fn order_candidates<'a>(candidates: &'a [Candidate], category_order: &[String]) -> Vec<&'a Candidate> {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by_key(|c| {
        category_order
            .iter()
            .position(|category| *category == c.question_category)
            .unwrap_or(usize::MAX)
    });
    ordered
}

fn adviser_display_names(interview: &Interview, advisers: &[Adviser]) -> Vec<String> {
    interview
        .adviser_names
        .iter()
        .map(|name| match find_adviser(advisers, name) {
            Some(adviser) => adviser.titled_name(),
            None => name.clone(),
        })
        .collect()
}

fn interviewed_by(interview: &Interview, advisers: &[Adviser]) -> String {
    let names = adviser_display_names(interview, advisers);
    if names.is_empty() {
        "was interviewed".to_string()
    } else {
        format!("was interviewed by {}", join_with_and(&names))
    }
}

/// What happened before the meeting, phrased to follow the forename.
pub fn interview_text(forename: &str, interviews: &[&Interview], advisers: &[Adviser]) -> String {
    match interviews {
        [] => "was not interviewed".to_string(),
        [only] => format!("had one interview and {}", interviewed_by(only, advisers)),
        many => {
            let details: Vec<String> = many.iter().map(|i| interviewed_by(i, advisers)).collect();
            format!(
                "had {} interviews. {} {}",
                many.len(),
                forename,
                details.join(", and ")
            )
        }
    }
}

fn decision(outcome: Option<Outcome>) -> &'static str {
    match outcome {
        Some(Outcome::Agreed) => "was glad to agree to",
        _ => "did not agree to",
    }
}

fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

pub fn entry(candidate: &Candidate, interviews: &[Interview], advisers: &[Adviser], ndas: &[Nda]) -> MinutesEntry {
    let nda_initials = ndas
        .iter()
        .find(|nda| !candidate.nda_id.is_empty() && nda.id == candidate.nda_id)
        .map(|nda| initials(&nda.name))
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| "N/A".to_string());

    let own: Vec<&Interview> = interviews
        .iter()
        .filter(|i| i.candidate_id == candidate.id)
        .collect();

    let summary = format!(
        "The Candidates Panel was asked by the Diocese of {} {}. Prior to the meeting {} {}. \
         In the light of their reports and papers received from the Diocese, and after careful \
         discussion, the Panel",
        or_placeholder(Some(candidate.diocese.as_str()), "[Diocese]"),
        or_placeholder(candidate.revised_question.as_deref(), "[revised question]"),
        candidate.forename,
        interview_text(&candidate.forename, &own, advisers),
    );

    MinutesEntry {
        candidate_id: candidate.id.clone(),
        heading: format!("{} {} ({})", candidate.forename, candidate.surname, nda_initials),
        summary,
        decision: decision(candidate.outcome).to_string(),
    }
}

pub fn build(
    candidates: &[Candidate],
    interviews: &[Interview],
    advisers: &[Adviser],
    ndas: &[Nda],
    category_order: &[String],
) -> Minutes {
    let entries: Vec<MinutesEntry> = order_candidates(candidates, category_order)
        .into_iter()
        .map(|c| entry(c, interviews, advisers, ndas))
        .collect();
    info!("Built minutes for {} candidate(s)", entries.len());
    Minutes { entries }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, forename: &str, category: &str) -> Candidate {
        Candidate {
            id: id.into(),
            forename: forename.into(),
            surname: "Smith".into(),
            question_category: category.into(),
            ..Default::default()
        }
    }

    fn interview(candidate_id: &str, names: &[&str]) -> Interview {
        Interview {
            candidate_id: candidate_id.into(),
            adviser_names: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    fn advisers() -> Vec<Adviser> {
        vec![Adviser {
            name: "Ann Lee".into(),
            title: Some("Revd".into()),
            ..Default::default()
        }]
    }

    #[test]
    fn test_order_unknown_categories_last_and_stable() {
        let candidates = vec![
            candidate("1", "A", "Other"),
            candidate("2", "B", "Reader"),
            candidate("3", "C", "Ordination"),
            candidate("4", "D", "Reader"),
        ];
        let order = vec!["Ordination".to_string(), "Reader".to_string()];
        let ids: Vec<&str> = order_candidates(&candidates, &order)
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn test_interview_text() {
        let advisers = advisers();
        assert_eq!(interview_text("Jo", &[], &advisers), "was not interviewed");

        let one = interview("1", &["Ann Lee", "Bob Ray"]);
        assert_eq!(
            interview_text("Jo", &[&one], &advisers),
            "had one interview and was interviewed by Revd Ann Lee and Bob Ray"
        );

        let two = interview("1", &["Cy Day"]);
        assert_eq!(
            interview_text("Jo", &[&one, &two], &advisers),
            "had 2 interviews. Jo was interviewed by Revd Ann Lee and Bob Ray, and was interviewed by Cy Day"
        );
    }

    #[test]
    fn test_entry_placeholders_and_decision() {
        let mut c = candidate("1", "Jo", "Reader");
        c.nda_id = "n1".into();
        let ndas = vec![Nda {
            id: "n1".into(),
            name: "kate mary hill".into(),
            ..Default::default()
        }];
        let e = entry(&c, &[], &[], &ndas);
        assert_eq!(e.heading, "Jo Smith (KMH)");
        assert_eq!(
            e.paragraph(),
            "The Candidates Panel was asked by the Diocese of [Diocese] [revised question]. \
             Prior to the meeting Jo was not interviewed. In the light of their reports and papers \
             received from the Diocese, and after careful discussion, the Panel did not agree to the request."
        );

        c.outcome = Some(Outcome::Agreed);
        c.diocese = "Ely".into();
        c.nda_id.clear();
        let e = entry(&c, &[], &[], &ndas);
        assert_eq!(e.heading, "Jo Smith (N/A)");
        assert!(e.paragraph().starts_with("The Candidates Panel was asked by the Diocese of Ely [revised question]."));
        assert!(e.paragraph().ends_with("the Panel was glad to agree to the request."));
    }

    #[test]
    fn test_render_text_and_html() {
        let mut c = candidate("1", "Jo", "Reader");
        c.surname = "O'Neil <Jr>".into();
        let minutes = build(&[c], &[], &[], &[], &[]);
        let text = minutes.render_text();
        assert!(text.starts_with("Cases\n\nJo O'Neil <Jr> (N/A)\nThe Candidates Panel"));

        let html = minutes.render_html();
        assert!(html.starts_with("<h3>Cases</h3><p><strong>Jo O&#39;Neil &lt;Jr&gt; (N/A)</strong></p>"));
        assert!(html.contains("<strong>did not agree to</strong> the request.</p>"));
    }
}
