//! Full-name splitting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitName {
    pub surname: String,
    pub forename: String,
}

/// Split a full name on its last token: the last word is the surname and the
/// words before it, single-space joined, are the forename.
pub fn split_name(full_name: &str) -> SplitName {
    let mut parts: Vec<&str> = full_name.split_whitespace().collect();
    let surname = parts.pop().unwrap_or("").to_string();
    SplitName {
        surname,
        forename: parts.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_multi_word_forename() {
        let name = split_name("Jane Mary Doe");
        assert_eq!(name.forename, "Jane Mary");
        assert_eq!(name.surname, "Doe");
    }

    #[test]
    fn test_split_single_token() {
        assert_eq!(
            split_name("Cher"),
            SplitName { surname: "Cher".into(), forename: String::new() }
        );
    }

    #[test]
    fn test_split_empty() {
        assert_eq!(split_name(""), SplitName::default());
        assert_eq!(split_name("   "), SplitName::default());
    }

    #[test]
    fn test_split_collapses_spacing() {
        let name = split_name("  Jo \t Anne   Smith ");
        assert_eq!(name.forename, "Jo Anne");
        assert_eq!(name.surname, "Smith");
    }
}
