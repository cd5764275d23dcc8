//! Domain records as stored in the document database.
//!
//! The store itself lives outside this codebase; these shapes mirror what
//! callers send in request bodies. Every field defaults so that partially
//! filled records deserialize.

use serde::{Deserialize, Serialize};

/// Whether a candidate's paperwork has arrived.
///
/// New records carry an empty string until someone answers; any value other
/// than the three known ones reads as unanswered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperworkStatus {
    Yes,
    No,
    Partial,
    #[default]
    #[serde(rename = "", other)]
    Unanswered,
}

impl PaperworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::Partial => "Partial",
            Self::Unanswered => "",
        }
    }
}

/// Panel decision on a candidate's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Agreed,
    #[serde(rename = "Not Agreed")]
    NotAgreed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub id: String,
    pub surname: String,
    pub forename: String,
    pub email: String,
    pub question_category: String,
    pub paperwork_received: PaperworkStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paperwork_notes: Option<String>,
    pub diocese: String,
    pub sponsoring_bishop: String,
    pub ddo_name: String,
    pub ddo_email: String,
    pub nda_id: String,
    pub panel_date_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_asked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname).trim().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Adviser {
    pub id: String,
    pub name: String,
    pub title: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub biography: Option<String>,
}

impl Adviser {
    /// Name prefixed with the adviser's title when one is recorded.
    pub fn titled_name(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => format!("{} {}", title, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Find an adviser record by exact name.
pub fn find_adviser<'a>(advisers: &'a [Adviser], name: &str) -> Option<&'a Adviser> {
    advisers.iter().find(|a| a.name == name)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interview {
    pub id: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub adviser_names: Vec<String>,
    pub category: String,
    pub panel_date_id: String,
    pub lead_adviser_name: String,
    pub email_sent: bool,
}

impl Interview {
    /// First listed adviser who is not the lead.
    pub fn other_adviser_name(&self) -> Option<&str> {
        self.adviser_names
            .iter()
            .map(String::as_str)
            .find(|name| *name != self.lead_adviser_name)
    }
}

/// National Discernment Adviser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nda {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelDate {
    pub id: String,
    /// ISO date (`YYYY-MM-DD`), possibly with a time component.
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    #[default]
    AdviserEmail,
    CandidateLetter,
    PanelDocument,
}

/// A stored document template with `{{placeholder}}` content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub category: String,
    pub general_category: String,
    pub word_template_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_partial_json() {
        let candidate: Candidate = serde_json::from_value(serde_json::json!({
            "id": "c1",
            "surname": "Smith",
            "forename": "Jo",
            "paperworkReceived": "Partial",
            "outcome": "Not Agreed",
        }))
        .unwrap();
        assert_eq!(candidate.full_name(), "Jo Smith");
        assert_eq!(candidate.paperwork_received, PaperworkStatus::Partial);
        assert_eq!(candidate.outcome, Some(Outcome::NotAgreed));
        assert!(candidate.diocese.is_empty());
    }

    #[test]
    fn test_empty_paperwork_status() {
        let candidate: Candidate = serde_json::from_value(serde_json::json!({
            "forename": "Jo",
            "paperworkReceived": "",
        }))
        .unwrap();
        assert_eq!(candidate.paperwork_received, PaperworkStatus::Unanswered);
        assert_eq!(candidate.paperwork_received.as_str(), "");
        assert_eq!(
            serde_json::to_value(candidate).unwrap()["paperworkReceived"],
            ""
        );

        let missing: Candidate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(missing.paperwork_received, PaperworkStatus::Unanswered);
        let yes: Candidate =
            serde_json::from_value(serde_json::json!({ "paperworkReceived": "Yes" })).unwrap();
        assert_eq!(yes.paperwork_received, PaperworkStatus::Yes);
    }

    #[test]
    fn test_template_type_wire_name() {
        let template: TemplateRecord = serde_json::from_value(serde_json::json!({
            "name": "Vocations x2 Adviser",
            "type": "candidate_letter",
        }))
        .unwrap();
        assert_eq!(template.template_type, TemplateType::CandidateLetter);
    }

    #[test]
    fn test_other_adviser_name() {
        let interview = Interview {
            adviser_names: vec!["Ann Lee".into(), "Bob Ray".into()],
            lead_adviser_name: "Ann Lee".into(),
            ..Default::default()
        };
        assert_eq!(interview.other_adviser_name(), Some("Bob Ray"));

        let solo = Interview {
            adviser_names: vec!["Ann Lee".into()],
            lead_adviser_name: "Ann Lee".into(),
            ..Default::default()
        };
        assert_eq!(solo.other_adviser_name(), None);
    }

    #[test]
    fn test_titled_name() {
        let adviser = Adviser {
            name: "Ann Lee".into(),
            title: Some("The Revd".into()),
            ..Default::default()
        };
        assert_eq!(adviser.titled_name(), "The Revd Ann Lee");
        let plain = Adviser {
            name: "Bob Ray".into(),
            title: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(plain.titled_name(), "Bob Ray");
    }
}
