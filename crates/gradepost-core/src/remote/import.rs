//! Idempotent rubric import against a live assignment
//!
//! Categories are matched by exact name, comments by exact text within
//! their category; existing entries are left untouched. Category
//! positions count every block in the file, comment positions count
//! created comments only.

use std::collections::HashMap;

use crate::error::Result;
use crate::rubricfile::RubricCategorySpec;

use super::client::GradingService;
use super::types::RubricCategoryRecord;

/// What an import actually created
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub categories_created: usize,
    pub comments_created: usize,
}

/// Apply parsed rubric specs to an assignment, creating only what is
/// missing. Re-importing the same file is a no-op.
pub fn import_rubric(
    service: &dyn GradingService,
    assignment_id: u64,
    specs: &[RubricCategorySpec],
) -> Result<ImportSummary> {
    let mut existing: HashMap<String, RubricCategoryRecord> = service
        .rubric_categories(assignment_id)?
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();

    let mut summary = ImportSummary::default();

    for (category_position, spec) in specs.iter().enumerate() {
        let category = match existing.get(&spec.name) {
            Some(category) => category.clone(),
            None => {
                tracing::info!(category = %spec.name, "creating rubric category");
                let created = service.create_rubric_category(
                    assignment_id,
                    &spec.name,
                    Some(spec.point_limit),
                    category_position as i64,
                )?;
                summary.categories_created += 1;
                existing.insert(spec.name.clone(), created.clone());
                created
            }
        };

        let mut known_texts: Vec<String> = service
            .rubric_comments(&category)?
            .into_iter()
            .map(|c| c.text)
            .collect();

        let mut comment_position = 0i64;
        for comment in &spec.comments {
            if known_texts.iter().any(|t| t == &comment.text) {
                continue;
            }
            tracing::info!(comment = %comment.text, "creating rubric comment");
            service.create_rubric_comment(
                category.id,
                &comment.text,
                comment.point_delta,
                comment_position,
            )?;
            known_texts.push(comment.text.clone());
            comment_position += 1;
            summary.comments_created += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::super::testing::MockGradingService;
    use super::*;
    use crate::rubricfile::parse_rubric_text;

    const RUBRIC: &str = "\
75 Correctness
2 minor correctness issue
10 significant correctness issue

15 Organization/Style
2 use descriptive variable names
";

    #[test]
    fn test_first_import_creates_everything() {
        let service = MockGradingService::with_assignment(10, "LList");
        let specs = parse_rubric_text(RUBRIC).unwrap();

        let summary = import_rubric(&service, 10, &specs).unwrap();
        assert_eq!(summary.categories_created, 2);
        assert_eq!(summary.comments_created, 3);
    }

    #[test]
    fn test_reimport_is_noop() {
        let service = MockGradingService::with_assignment(10, "LList");
        let specs = parse_rubric_text(RUBRIC).unwrap();

        import_rubric(&service, 10, &specs).unwrap();
        let second = import_rubric(&service, 10, &specs).unwrap();

        assert_eq!(second, ImportSummary::default());
        assert_eq!(service.rubric_categories(10).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_text_within_block_created_once() {
        let service = MockGradingService::with_assignment(10, "LList");
        let specs = parse_rubric_text(
            "75 Correctness\n\
             2 minor correctness issue\n\
             5 minor correctness issue\n",
        )
        .unwrap();

        let summary = import_rubric(&service, 10, &specs).unwrap();
        assert_eq!(summary.comments_created, 1);

        let category = &service.rubric_categories(10).unwrap()[0];
        let comments = service.rubric_comments(category).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].point_delta, 2.0);
    }

    #[test]
    fn test_partial_import_fills_gaps() {
        let service = MockGradingService::with_assignment(10, "LList");
        let category = service
            .create_rubric_category(10, "Correctness", Some(75.0), 0)
            .unwrap();
        service
            .create_rubric_comment(category.id, "minor correctness issue", 2.0, 0)
            .unwrap();

        let specs = parse_rubric_text(RUBRIC).unwrap();
        let summary = import_rubric(&service, 10, &specs).unwrap();

        assert_eq!(summary.categories_created, 1);
        assert_eq!(summary.comments_created, 2);
    }
}
