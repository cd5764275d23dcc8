//! Candidates Panel Docs — template substitution and generated documents.

pub mod adviser_email;
pub mod context;
pub mod letter;
pub mod minutes;
pub mod names;
pub mod template;

pub use adviser_email::AdviserEmailDraft;
pub use context::{SubstitutionContext, TokenCategory, NOT_AVAILABLE};
pub use letter::{GeneratedLetter, LetterInputs};
pub use minutes::{Minutes, MinutesEntry};
pub use template::{Node, SectionRule, Template};
