//! Pro-forma extraction pipeline: normalize → extract fields → split name.

use panel_core::Result;
use tracing::{debug, info};

use crate::extract::{extract_fields, FieldExtraction, ProFormaField};
use crate::file::{normalize, RawDocument};

/// Extract the candidate fields from an uploaded pro-forma.
///
/// Fails only when the document cannot be turned into text; fields the
/// document does not contain come back as empty strings.
pub fn extract_pro_forma(doc: &RawDocument) -> Result<FieldExtraction> {
    let text = normalize(doc)?;
    let extraction = extract_fields(&text);

    let missing = extraction.fields.missing();
    info!(
        "Extracted pro-forma: {} of {} fields populated",
        ProFormaField::ALL.len() - missing.len(),
        ProFormaField::ALL.len()
    );
    if !missing.is_empty() {
        debug!("Fields not found: {:?}", missing);
    }
    if !extraction.low_confidence.is_empty() {
        debug!("Fields found by fallback only: {:?}", extraction.low_confidence);
    }

    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::tests::docx_with_paragraphs;
    use crate::extract::ExtractedFieldSet;
    use crate::file::tests::pdf_with_lines;
    use crate::file::{DOCX_MIME, PDF_MIME};
    use panel_core::Error;

    const LINES: &[&str] = &[
        "Name Jo Anne Smith",
        "Original request",
        "Diocese London",
        "Sponsoring Bishop The Bishop of London",
        "Contact Details",
        "Contact Number: jo.smith@example.com 07700 900123",
        "Contact DDO Revd Mark Jones email: ddo@london.org Phone: 020 7946 0000",
        "3. Question to the Panel",
        "Is now the right time?",
        "4. Training Proposal",
    ];

    fn assert_all_fields(fields: &ExtractedFieldSet) {
        assert_eq!(fields.forename, "Jo Anne");
        assert_eq!(fields.surname, "Smith");
        assert_eq!(fields.diocese, "London");
        assert_eq!(fields.sponsoring_bishop, "The Bishop of London");
        assert_eq!(fields.email, "jo.smith@example.com");
        assert_eq!(fields.contact_number, "07700900123");
        assert_eq!(fields.ddo_name, "Revd Mark Jones");
        assert_eq!(fields.ddo_email, "ddo@london.org");
        assert_eq!(fields.ddo_phone, "02079460000");
        assert_eq!(fields.question_to_the_panel, "Is now the right time?");
        assert!(fields.missing().is_empty());
    }

    #[test]
    fn test_docx_pro_forma() {
        let doc = RawDocument::new(docx_with_paragraphs(LINES), DOCX_MIME);
        assert_all_fields(&extract_pro_forma(&doc).unwrap().fields);
    }

    #[test]
    fn test_pdf_pro_forma() {
        let doc = RawDocument::new(pdf_with_lines(LINES), PDF_MIME);
        assert_all_fields(&extract_pro_forma(&doc).unwrap().fields);
    }

    #[test]
    fn test_same_bytes_same_fields() {
        let doc = RawDocument::new(docx_with_paragraphs(LINES), DOCX_MIME);
        assert_eq!(
            extract_pro_forma(&doc).unwrap(),
            extract_pro_forma(&doc).unwrap()
        );
    }

    #[test]
    fn test_unsupported_type_fails_whole_operation() {
        let doc = RawDocument::new(docx_with_paragraphs(LINES), "image/png");
        assert!(matches!(
            extract_pro_forma(&doc),
            Err(Error::UnsupportedFileType(_))
        ));
    }
}
