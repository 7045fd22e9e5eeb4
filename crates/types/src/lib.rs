//! Validated text types shared across the Forge workspace.
//!
//! Node names travel from user input into persisted repository records, so
//! the validation lives in the type rather than at each call site. A name
//! that deserialises is a name that would also have been accepted at the
//! front door.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("name cannot be empty")]
    Empty,
    /// The input text contained a path separator
    #[error("name cannot contain '/'")]
    ContainsSeparator,
}

/// The name of a single file or folder entry in a content tree.
///
/// Guarantees non-empty content with no `/` characters. Input is trimmed of
/// leading and trailing whitespace during construction. Comparison is exact
/// and case-sensitive; `README.md` and `readme.md` are different entries.
///
/// A `/` inside an entry name would let one node shadow an entire path
/// during resolution, so it is rejected here instead of being re-checked by
/// every tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName(String);

impl EntryName {
    /// Creates a new `EntryName` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, or contains a `/`, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` for empty or whitespace-only input, and
    /// `TextError::ContainsSeparator` if the input contains `/`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed.contains('/') {
            return Err(TextError::ContainsSeparator);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntryName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl serde::Serialize for EntryName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EntryName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EntryName::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let name = EntryName::new("  readme.md  ").expect("should accept padded name");
        assert_eq!(name.as_str(), "readme.md");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(EntryName::new(""), Err(TextError::Empty)));
        assert!(matches!(EntryName::new("   "), Err(TextError::Empty)));
    }

    #[test]
    fn test_new_rejects_separator() {
        assert!(matches!(
            EntryName::new("docs/readme.md"),
            Err(TextError::ContainsSeparator)
        ));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let upper = EntryName::new("README.md").unwrap();
        let lower = EntryName::new("readme.md").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper, *"README.md");
    }

    #[test]
    fn test_deserialize_revalidates() {
        let ok: Result<EntryName, serde_json::Error> = serde_json::from_str("\"logo.png\"");
        assert_eq!(ok.unwrap().as_str(), "logo.png");

        let bad: Result<EntryName, serde_json::Error> = serde_json::from_str("\"a/b\"");
        assert!(bad.is_err(), "separator should be rejected on deserialise");
    }
}
