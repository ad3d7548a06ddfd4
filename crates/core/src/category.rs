//! Spending and income categories.

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, required_text};

/// Color given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";

/// Maximum category name length.
pub const MAX_CATEGORY_NAME: usize = 50;

/// A user's category as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store object ID.
    pub id: String,
    /// Display name, unique per user.
    pub name: String,
    /// Hex color used by charts.
    pub color: String,
}

/// Category fields as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    /// Display name.
    pub name: Option<String>,
    /// Hex color.
    pub color: Option<String>,
}

/// A validated category ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Display name.
    pub name: String,
    /// Hex color.
    pub color: String,
}

/// Validated changes to an existing category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    /// New name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
}

impl CategoryPatch {
    /// Returns true when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

impl CategoryInput {
    /// Validates a full category for creation.
    ///
    /// # Errors
    ///
    /// Returns the first field that fails validation.
    pub fn validate(&self) -> Result<NewCategory, ValidationError> {
        let name = required_text(self.name.as_deref(), "Name", MAX_CATEGORY_NAME)?;
        let color = match self.color.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_CATEGORY_COLOR.to_string(),
            Some(color) => validate_color(color)?,
        };
        Ok(NewCategory { name, color })
    }

    /// Validates only the fields present, for updates.
    ///
    /// # Errors
    ///
    /// Returns the first present field that fails validation.
    pub fn validate_patch(&self) -> Result<CategoryPatch, ValidationError> {
        let name = self
            .name
            .as_deref()
            .map(|name| required_text(Some(name), "Name", MAX_CATEGORY_NAME))
            .transpose()?;
        let color = self.color.as_deref().map(validate_color).transpose()?;
        Ok(CategoryPatch { name, color })
    }
}

/// Validates a `#RGB` or `#RRGGBB` color, returning it lowercased.
///
/// # Errors
///
/// Returns `ValidationError::InvalidColor` for anything else.
pub fn validate_color(color: &str) -> Result<String, ValidationError> {
    let color = color.trim();
    let valid = color
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid {
        Ok(color.to_ascii_lowercase())
    } else {
        Err(ValidationError::InvalidColor(color.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_validate_defaults_color() {
        let input = CategoryInput {
            name: Some("  Groceries ".into()),
            color: None,
        };
        let category = input.validate().unwrap();
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_validate_requires_name() {
        let input = CategoryInput {
            name: Some("   ".into()),
            color: Some("#fff".into()),
        };
        assert_eq!(input.validate(), Err(ValidationError::Required("Name")));
        assert_eq!(
            CategoryInput::default().validate(),
            Err(ValidationError::Required("Name"))
        );
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let input = CategoryInput {
            name: Some("x".repeat(MAX_CATEGORY_NAME + 1)),
            color: None,
        };
        assert!(matches!(
            input.validate(),
            Err(ValidationError::TooLong { field: "Name", .. })
        ));
    }

    #[rstest]
    #[case("#FFF", Ok("#fff".to_string()))]
    #[case("#10b981", Ok("#10b981".to_string()))]
    #[case("10b981", Err(ValidationError::InvalidColor("10b981".into())))]
    #[case("#12345", Err(ValidationError::InvalidColor("#12345".into())))]
    #[case("#ggg", Err(ValidationError::InvalidColor("#ggg".into())))]
    fn test_validate_color(#[case] input: &str, #[case] expected: Result<String, ValidationError>) {
        assert_eq!(validate_color(input), expected);
    }

    #[test]
    fn test_patch_only_validates_present_fields() {
        let patch = CategoryInput {
            name: None,
            color: Some("#ABCDEF".into()),
        }
        .validate_patch()
        .unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.color.as_deref(), Some("#abcdef"));
        assert!(!patch.is_empty());

        assert!(CategoryInput::default().validate_patch().unwrap().is_empty());
    }
}
