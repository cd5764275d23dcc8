//! Candidates Panel Core — error taxonomy, configuration, domain records.

pub mod config;
pub mod error;
pub mod records;

pub use config::PanelConfig;
pub use error::{Error, Result};
pub use records::{
    find_adviser, Adviser, Candidate, Interview, Nda, Outcome, PanelDate, PaperworkStatus,
    TemplateRecord, TemplateType,
};
