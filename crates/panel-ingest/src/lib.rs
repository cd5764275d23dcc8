//! Candidates Panel Ingest — pro-forma normalisation and field extraction.

pub mod docx;
pub mod extract;
pub mod file;
pub mod ingest;

pub use extract::name::{split_name, SplitName};
pub use extract::{extract_fields, ExtractedFieldSet, FieldExtraction, ProFormaField};
pub use file::{normalize, FileType, RawDocument, DOCX_MIME, PDF_MIME};
pub use ingest::extract_pro_forma;
