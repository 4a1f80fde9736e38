use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resources::CategoryLabel;
use crate::ConfigError;

/// A category and the provider keywords searched for it, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub label: CategoryLabel,
    pub keywords: Vec<String>,
}

impl CategorySpec {
    fn new(label: CategoryLabel, keywords: &[&str]) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// The built-in search plan. Order matters: when a place surfaces under
/// several categories, the earliest category here keeps it.
#[must_use]
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::new(
            CategoryLabel::SupportGroup,
            &["cancer support group", "support group", "patient support"],
        ),
        CategorySpec::new(
            CategoryLabel::TreatmentCenter,
            &[
                "cancer center",
                "oncology center",
                "hospital oncology",
                "cancer treatment",
            ],
        ),
        CategorySpec::new(
            CategoryLabel::Counseling,
            &["cancer counseling", "oncology counselor", "therapy"],
        ),
        CategorySpec::new(
            CategoryLabel::FinancialAid,
            &[
                "cancer financial assistance",
                "patient financial services",
                "charity financial aid",
            ],
        ),
        CategorySpec::new(
            CategoryLabel::Hospice,
            &["hospice care", "palliative care", "end of life care"],
        ),
        CategorySpec::new(
            CategoryLabel::Transportation,
            &[
                "medical transport",
                "patient transport",
                "healthcare transport",
            ],
        ),
    ]
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategorySpec>,
}

/// Load and validate a category search plan from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<Vec<CategorySpec>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_categories(&content)
}

fn parse_categories(content: &str) -> Result<Vec<CategorySpec>, ConfigError> {
    let file: CategoriesFile = serde_yaml::from_str(content)?;
    validate_categories(&file.categories)?;
    Ok(file.categories)
}

fn validate_categories(categories: &[CategorySpec]) -> Result<(), ConfigError> {
    if categories.is_empty() {
        return Err(ConfigError::Validation(
            "at least one category is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for spec in categories {
        if !seen.insert(spec.label) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                spec.label
            )));
        }
        if spec.keywords.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no keywords",
                spec.label
            )));
        }
        if spec.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has a blank keyword",
                spec.label
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_cover_every_label_once() {
        let specs = default_categories();
        assert_eq!(specs.len(), CategoryLabel::ALL.len());
        assert!(validate_categories(&specs).is_ok());
        assert_eq!(specs[0].label, CategoryLabel::SupportGroup);
        assert_eq!(specs[0].keywords[0], "cancer support group");
    }

    #[test]
    fn parses_yaml_plan() {
        let yaml = r#"
categories:
  - label: Counseling
    keywords: ["grief counseling", "oncology counselor"]
  - label: Support Group
    keywords: ["cancer support group"]
"#;
        let specs = parse_categories(yaml).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].label, CategoryLabel::Counseling);
        assert_eq!(specs[1].label, CategoryLabel::SupportGroup);
        assert_eq!(specs[0].keywords, vec!["grief counseling", "oncology counselor"]);
    }

    #[test]
    fn rejects_unknown_label() {
        let yaml = "categories:\n  - label: Bakery\n    keywords: [bread]\n";
        assert!(matches!(
            parse_categories(yaml),
            Err(ConfigError::CategoriesFileParse(_))
        ));
    }

    #[test]
    fn rejects_duplicate_label() {
        let yaml = "categories:\n  - label: Hospice\n    keywords: [a]\n  - label: Hospice\n    keywords: [b]\n";
        let err = parse_categories(yaml).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")),
            "got {err:?}"
        );
    }

    #[test]
    fn rejects_empty_and_blank_keywords() {
        let empty = "categories:\n  - label: Hospice\n    keywords: []\n";
        assert!(matches!(
            parse_categories(empty),
            Err(ConfigError::Validation(_))
        ));
        let blank = "categories:\n  - label: Hospice\n    keywords: [\"  \"]\n";
        assert!(matches!(
            parse_categories(blank),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_plan() {
        assert!(matches!(
            parse_categories("categories: []\n"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_categories(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CategoriesFileIo { .. }));
    }
}
