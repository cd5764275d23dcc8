//! Interview invitation emails sent to the advisers of one interview.

use panel_core::{find_adviser, Adviser, Candidate, Error, Interview, Result, TemplateRecord, TemplateType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::SubstitutionContext;
use crate::names::{first_name, format_stored_date};
use crate::template::Template;

pub const SUBJECT: &str = "Candidates Panel - Interviewing";

/// A ready-to-send email. The caller opens it in a mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviserEmailDraft {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Pick the adviser email template for the candidate's question category,
/// keyed on whether the interview has one adviser or several.
pub fn select_template<'a>(
    templates: &'a [TemplateRecord],
    candidate: &Candidate,
    interview: &Interview,
) -> Result<&'a TemplateRecord> {
    let pattern = if interview.adviser_names.len() > 1 {
        "x2 adviser"
    } else {
        "x1 adviser"
    };

    templates
        .iter()
        .filter(|t| t.template_type == TemplateType::AdviserEmail)
        .filter(|t| t.category == candidate.question_category)
        .find(|t| t.name.to_lowercase().contains(pattern))
        .ok_or_else(|| {
            Error::TemplateNotFound(format!(
                "no adviser email template for {} with {}",
                candidate.question_category, pattern
            ))
        })
}

pub fn build_context(candidate: &Candidate, interview: &Interview, panel_date: &str) -> SubstitutionContext {
    let forename = first_name(&candidate.forename);
    let adviser_names: Vec<&str> = interview.adviser_names.iter().map(|n| first_name(n)).collect();

    let mut ctx = SubstitutionContext::new();
    ctx.insert("candidateName", format!("{} {}", forename, candidate.surname))
        .insert("adviserNames", adviser_names.join(", "))
        .insert("category", interview.category.as_str())
        .insert("panelDate", format_stored_date(panel_date))
        .insert("leadAdviserName", first_name(&interview.lead_adviser_name))
        .insert("surname", candidate.surname.as_str())
        .insert("forename", forename)
        .insert("email", candidate.email.as_str())
        .insert("questionCategory", candidate.question_category.as_str())
        .insert("paperworkReceived", candidate.paperwork_received.as_str())
        .insert("diocese", candidate.diocese.as_str())
        .insert("sponsoringBishop", candidate.sponsoring_bishop.as_str())
        .insert("ddoName", candidate.ddo_name.as_str())
        .insert("ddoEmail", candidate.ddo_email.as_str());
    ctx
}

/// Build the email for an interview. `panel_date` is the stored date of the
/// interview's panel, empty when unknown.
pub fn draft(
    candidate: &Candidate,
    interview: &Interview,
    advisers: &[Adviser],
    templates: &[TemplateRecord],
    panel_date: &str,
) -> Result<AdviserEmailDraft> {
    let template = select_template(templates, candidate, interview)?;
    debug!("Using adviser email template '{}'", template.name);

    let ctx = build_context(candidate, interview, panel_date);
    let body = Template::parse(&template.content).render(&ctx);

    let to: Vec<String> = interview
        .adviser_names
        .iter()
        .filter_map(|name| find_adviser(advisers, name))
        .filter_map(|adviser| adviser.email.clone())
        .filter(|email| !email.is_empty())
        .collect();

    info!(
        "Drafted adviser email for {} to {} recipient(s)",
        candidate.full_name(),
        to.len()
    );

    Ok(AdviserEmailDraft {
        to,
        subject: SUBJECT.to_string(),
        body,
    })
}
