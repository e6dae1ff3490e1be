//! PBIP change categories and path classification.

use std::collections::BTreeMap;
use std::fmt;

/// Category of a changed PBIP path.
///
/// Variant order is the fixed reporting order used by commit messages and
/// changelog sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeCategory {
    Measures,
    Tables,
    Relationships,
    Visuals,
    Other,
}

impl ChangeCategory {
    /// All categories in reporting order.
    pub const ALL: [ChangeCategory; 5] = [
        Self::Measures,
        Self::Tables,
        Self::Relationships,
        Self::Visuals,
        Self::Other,
    ];

    /// Get the lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Measures => "measures",
            Self::Tables => "tables",
            Self::Relationships => "relationships",
            Self::Visuals => "visuals",
            Self::Other => "other",
        }
    }

    /// Classify a path by the first matching substring rule.
    ///
    /// Matching is case-insensitive and checked in priority order:
    /// `measures`, `tables`, `relationship`, then `visual` or `report`.
    /// Anything else is [`ChangeCategory::Other`].
    pub fn classify(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("measures") {
            Self::Measures
        } else if lower.contains("tables") {
            Self::Tables
        } else if lower.contains("relationship") {
            Self::Relationships
        } else if lower.contains("visual") || lower.contains("report") {
            Self::Visuals
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for ChangeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Changed paths grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    groups: BTreeMap<ChangeCategory, Vec<String>>,
}

impl ChangeSummary {
    /// Classify every path, keeping input order within each category.
    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Self {
        let mut summary = Self::default();
        for path in paths {
            summary.push(path.as_ref());
        }
        summary
    }

    /// Classify and add a single path.
    pub fn push(&mut self, path: &str) {
        self.groups
            .entry(ChangeCategory::classify(path))
            .or_default()
            .push(path.to_string());
    }

    /// Paths in a category, in the order they were added.
    pub fn paths(&self, category: ChangeCategory) -> &[String] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, category: ChangeCategory) -> usize {
        self.paths(category).len()
    }

    /// Non-empty categories with their paths, in reporting order.
    pub fn non_empty(&self) -> impl Iterator<Item = (ChangeCategory, &[String])> {
        self.groups
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(category, paths)| (*category, paths.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_directory() {
        assert_eq!(
            ChangeCategory::classify("Model/Measures/Sales.tmdl"),
            ChangeCategory::Measures
        );
        assert_eq!(
            ChangeCategory::classify("Model/Tables/Orders.tmdl"),
            ChangeCategory::Tables
        );
        assert_eq!(
            ChangeCategory::classify("Model/relationships.tmdl"),
            ChangeCategory::Relationships
        );
        assert_eq!(
            ChangeCategory::classify("Report/visual1.json"),
            ChangeCategory::Visuals
        );
        assert_eq!(ChangeCategory::classify("README.md"), ChangeCategory::Other);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(
            ChangeCategory::classify("MODEL/MEASURES/X.dax"),
            ChangeCategory::Measures
        );
        assert_eq!(
            ChangeCategory::classify("model/RelationShip.tmdl"),
            ChangeCategory::Relationships
        );
    }

    #[test]
    fn test_classify_first_rule_wins() {
        // Contains both "tables" and "visual"
        assert_eq!(
            ChangeCategory::classify("tables/visual.json"),
            ChangeCategory::Tables
        );
        // Contains "measures" and "report"
        assert_eq!(
            ChangeCategory::classify("Sales.Report/measures.json"),
            ChangeCategory::Measures
        );
        // "relationship" beats "report"
        assert_eq!(
            ChangeCategory::classify("Report/relationships.json"),
            ChangeCategory::Relationships
        );
    }

    #[test]
    fn test_classify_singular_table_is_other() {
        // Rules match on the plural directory name only
        assert_eq!(
            ChangeCategory::classify("Model/table.tmdl"),
            ChangeCategory::Other
        );
        assert_eq!(
            ChangeCategory::classify("Model/measure.tmdl"),
            ChangeCategory::Other
        );
    }

    #[test]
    fn test_summary_keeps_original_case_and_order() {
        let summary = ChangeSummary::from_paths(&[
            "Model/Measures/B.tmdl",
            "Model/Measures/A.tmdl",
            "notes.txt",
        ]);

        assert_eq!(
            summary.paths(ChangeCategory::Measures),
            ["Model/Measures/B.tmdl", "Model/Measures/A.tmdl"]
        );
        assert_eq!(summary.paths(ChangeCategory::Other), ["notes.txt"]);
        assert!(summary.paths(ChangeCategory::Tables).is_empty());
    }

    #[test]
    fn test_summary_is_total_and_exclusive() {
        let paths = [
            "Model/Measures/Sales.tmdl",
            "Model/Tables/Orders.tmdl",
            "Model/relationships.tmdl",
            "Report/visual1.json",
            "Report/report.json",
            ".gitignore",
            "tables/visual.json",
        ];
        let summary = ChangeSummary::from_paths(&paths);

        assert_eq!(summary.total(), paths.len());
        for path in paths {
            let hits = ChangeCategory::ALL
                .iter()
                .filter(|cat| summary.paths(**cat).iter().any(|p| p == path))
                .count();
            assert_eq!(hits, 1, "{path} should be in exactly one category");
        }
    }

    #[test]
    fn test_scenario_summary() {
        let summary = ChangeSummary::from_paths(&[
            "Model/Measures/Sales.tmdl",
            "Model/Tables/Orders.tmdl",
            "Report/visual1.json",
        ]);

        assert_eq!(
            summary.paths(ChangeCategory::Measures),
            ["Model/Measures/Sales.tmdl"]
        );
        assert_eq!(
            summary.paths(ChangeCategory::Tables),
            ["Model/Tables/Orders.tmdl"]
        );
        assert_eq!(
            summary.paths(ChangeCategory::Visuals),
            ["Report/visual1.json"]
        );
        assert_eq!(summary.count(ChangeCategory::Relationships), 0);
        assert_eq!(summary.count(ChangeCategory::Other), 0);
    }

    #[test]
    fn test_non_empty_in_fixed_order() {
        let summary = ChangeSummary::from_paths(&[
            "notes.txt",
            "Report/page.json",
            "Model/Tables/Orders.tmdl",
            "Model/Measures/Sales.tmdl",
        ]);

        let order: Vec<ChangeCategory> = summary.non_empty().map(|(cat, _)| cat).collect();
        assert_eq!(
            order,
            vec![
                ChangeCategory::Measures,
                ChangeCategory::Tables,
                ChangeCategory::Visuals,
                ChangeCategory::Other,
            ]
        );
    }

    #[test]
    fn test_empty_summary() {
        let summary = ChangeSummary::from_paths::<&str>(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.non_empty().count(), 0);
    }
}
