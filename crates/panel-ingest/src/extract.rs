//! Pro-forma field extraction.
//!
//! Each extractor in [`fields`] scans the same normalized text independently.
//! The only post-processing step is splitting the extracted full name into
//! surname and forename.

pub mod fields;
pub mod name;

use serde::{Deserialize, Serialize};

use self::fields::Found;

/// The fixed set of fields read from a pro-forma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProFormaField {
    Surname,
    Forename,
    Email,
    Diocese,
    DdoName,
    DdoEmail,
    DdoPhone,
    SponsoringBishop,
    QuestionToThePanel,
    ContactNumber,
}

impl ProFormaField {
    pub const ALL: [ProFormaField; 10] = [
        Self::Surname,
        Self::Forename,
        Self::Email,
        Self::Diocese,
        Self::DdoName,
        Self::DdoEmail,
        Self::DdoPhone,
        Self::SponsoringBishop,
        Self::QuestionToThePanel,
        Self::ContactNumber,
    ];

    /// Wire name, as used in the JSON response.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Surname => "surname",
            Self::Forename => "forename",
            Self::Email => "email",
            Self::Diocese => "diocese",
            Self::DdoName => "ddoName",
            Self::DdoEmail => "ddoEmail",
            Self::DdoPhone => "ddoPhone",
            Self::SponsoringBishop => "sponsoringBishop",
            Self::QuestionToThePanel => "questionToThePanel",
            Self::ContactNumber => "contactNumber",
        }
    }
}

/// Extracted pro-forma values. Every key is always present; a field that
/// was not found is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFieldSet {
    pub surname: String,
    pub forename: String,
    pub email: String,
    pub diocese: String,
    pub ddo_name: String,
    pub ddo_email: String,
    pub ddo_phone: String,
    pub sponsoring_bishop: String,
    pub question_to_the_panel: String,
    pub contact_number: String,
}

impl ExtractedFieldSet {
    pub fn get(&self, field: ProFormaField) -> &str {
        match field {
            ProFormaField::Surname => &self.surname,
            ProFormaField::Forename => &self.forename,
            ProFormaField::Email => &self.email,
            ProFormaField::Diocese => &self.diocese,
            ProFormaField::DdoName => &self.ddo_name,
            ProFormaField::DdoEmail => &self.ddo_email,
            ProFormaField::DdoPhone => &self.ddo_phone,
            ProFormaField::SponsoringBishop => &self.sponsoring_bishop,
            ProFormaField::QuestionToThePanel => &self.question_to_the_panel,
            ProFormaField::ContactNumber => &self.contact_number,
        }
    }

    /// Fields that came back empty.
    pub fn missing(&self) -> Vec<ProFormaField> {
        ProFormaField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_empty())
            .collect()
    }
}

/// Extracted fields plus the ones that only a positional fallback produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldExtraction {
    pub fields: ExtractedFieldSet,
    pub low_confidence: Vec<ProFormaField>,
}

/// Run every field extractor on normalized text.
pub fn extract_fields(text: &str) -> FieldExtraction {
    let mut low_confidence = Vec::new();
    let mut take = |field: ProFormaField, found: Found| {
        if found.fallback && !found.value.is_empty() {
            low_confidence.push(field);
        }
        found.value
    };

    let full_name = fields::extract_name(text).value;
    let split = name::split_name(&full_name);

    let fields = ExtractedFieldSet {
        surname: split.surname,
        forename: split.forename,
        email: take(ProFormaField::Email, fields::extract_email(text)),
        diocese: take(ProFormaField::Diocese, fields::extract_diocese(text)),
        ddo_name: take(ProFormaField::DdoName, fields::extract_ddo_name(text)),
        ddo_email: take(ProFormaField::DdoEmail, fields::extract_ddo_email(text)),
        ddo_phone: take(ProFormaField::DdoPhone, fields::extract_ddo_phone(text)),
        sponsoring_bishop: take(
            ProFormaField::SponsoringBishop,
            fields::extract_sponsoring_bishop(text),
        ),
        question_to_the_panel: take(
            ProFormaField::QuestionToThePanel,
            fields::extract_question_to_panel(text),
        ),
        contact_number: take(
            ProFormaField::ContactNumber,
            fields::extract_contact_number(text),
        ),
    };

    FieldExtraction {
        fields,
        low_confidence,
    }
}
