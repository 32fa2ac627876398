//! Identifier extraction and the ad-hoc compile path.

use std::collections::HashSet;

use tracing::info;

use tagtree_core::defaults::{SHEET_PREFERENCE, TAG_COLUMN};
use tagtree_core::{compile, CanonicalPath, Error, Result, TreeNode};

use crate::tabular::{Sheet, Workbook};

/// Extract the identifier column from a sheet.
///
/// Empty and whitespace-only cells are dropped; duplicates are removed
/// preserving first-seen order, which later fixes child ordering in the
/// compiled tree.
pub fn extract_tags(sheet: &Sheet, column: &str) -> Result<Vec<String>> {
    let cells = sheet.column(column)?;

    let mut seen = HashSet::new();
    let mut tags = Vec::new();
    for cell in cells {
        let tag = cell.trim();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.to_string()) {
            tags.push(tag.to_string());
        }
    }

    Ok(tags)
}

/// Normalize raw tags into canonical paths, preserving order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<CanonicalPath>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| CanonicalPath::normalize(t.as_ref()))
        .collect()
}

/// Extract and normalize the canonical path set of a workbook, using the
/// default sheet preference and identifier column.
///
/// This is the admission half alone; feed the result to the ingestion gate
/// for a permanent ingest.
pub fn paths_from_workbook(workbook: &Workbook) -> Result<Vec<CanonicalPath>> {
    let sheet = workbook
        .select_sheet(SHEET_PREFERENCE)
        .ok_or_else(|| Error::MissingColumn(TAG_COLUMN.to_string()))?;
    let tags = extract_tags(sheet, TAG_COLUMN)?;

    info!(
        subsystem = "ingest",
        component = "extract",
        op = "paths_from_workbook",
        sheet = %sheet.name,
        tag_count = tags.len(),
        "Extracted identifier column"
    );

    Ok(normalize_tags(tags))
}

/// Compile an uploaded dataset straight into a tree, without persistence.
pub fn compile_dataset(workbook: &Workbook) -> Result<TreeNode> {
    Ok(compile(paths_from_workbook(workbook)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtree_core::{LevelType, SensorStatus};

    fn tag_sheet(name: &str, tags: &[&str]) -> Sheet {
        let mut sheet = Sheet::new(name, vec![TAG_COLUMN.to_string()]);
        for tag in tags {
            sheet.rows.push(vec![tag.to_string()]);
        }
        sheet
    }

    #[test]
    fn test_extract_tags_skips_blanks_and_dedupes() {
        let sheet = tag_sheet("Sheet2", &["A/B/s1", "", "  ", "A/B/s1", "A/B/s2"]);
        let tags = extract_tags(&sheet, TAG_COLUMN).unwrap();
        assert_eq!(tags, vec!["A/B/s1", "A/B/s2"]);
    }

    #[test]
    fn test_extract_tags_missing_column() {
        let sheet = Sheet::new("Sheet2", vec!["Wrong".to_string()]);
        let err = extract_tags(&sheet, TAG_COLUMN).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(name) if name == TAG_COLUMN));
    }

    #[test]
    fn test_normalize_tags_mixes_formats() {
        let paths = normalize_tags(["plantA/line3/temp", "ABCDEF"]);
        assert_eq!(paths[0].to_string(), "plantA/line3/temp");
        assert_eq!(paths[1].to_string(), "ABCD/EF");
    }

    #[test]
    fn test_paths_from_workbook_prefers_sheet2() {
        let workbook = Workbook::new(vec![
            tag_sheet("Sheet1", &["X/ignored"]),
            tag_sheet("Sheet2", &["A/B/s1"]),
        ]);
        let paths = paths_from_workbook(&workbook).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].to_string(), "A/B/s1");
    }

    #[test]
    fn test_paths_from_workbook_empty_workbook() {
        let err = paths_from_workbook(&Workbook::default()).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_compile_dataset_builds_tree() {
        let workbook = Workbook::new(vec![tag_sheet(
            "Sheet2",
            &["A/B/sensor1", "A/B/sensor2", "A/C/sensor3"],
        )]);
        let tree = compile_dataset(&workbook).unwrap();

        let a = tree.child("A").unwrap();
        assert_eq!(a.level_type, LevelType::Manufacturer);
        assert_eq!(a.children.len(), 2);
        assert_eq!(
            a.child("B").unwrap().child("sensor1").unwrap().status,
            Some(SensorStatus::Online)
        );
    }

    #[test]
    fn test_compile_dataset_is_pure() {
        let workbook = Workbook::new(vec![tag_sheet("Sheet2", &["A/B/s1"])]);
        assert_eq!(
            compile_dataset(&workbook).unwrap(),
            compile_dataset(&workbook).unwrap()
        );
    }
}
