//! Grade report aggregation
//!
//! The aggregator is a pure function from `(target filenames,
//! Submission, RubricIndex)` to a `GradeReport`: it groups annotation
//! point deltas by rubric category, applies each category's scoring
//! policy, and renders the deterministic feedback text consumed by the
//! upload tools as the literal contents of a grade file.

use std::collections::HashMap;

use crate::error::Result;
use crate::file::Submission;
use crate::rubric::{RubricIndex, ScoringPolicy};

/// Bucket for deltas whose rubric link is absent or does not resolve
pub const OTHER_CATEGORY: &str = "Other";

const SEPARATOR_WIDTH: usize = 50;

fn separator(ch: char) -> String {
    std::iter::repeat(ch).take(SEPARATOR_WIDTH).collect()
}

/// Aggregated score and formatted feedback for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    /// Final numeric score
    pub total_score: f64,
    /// One formatted "points : category-name" line per category, in
    /// rubric display order, with a trailing "Other" line when unlinked
    /// deductions exist
    pub category_lines: Vec<String>,
    /// Concatenated per-file annotation blocks
    pub feedback_text: String,
}

impl GradeReport {
    /// Serialize the full report text
    pub fn render(&self) -> String {
        format!(
            "{:.1}\n\n{}\n\nFeedback:\n\n{}\n\n{}",
            self.total_score,
            self.category_lines.join("\n"),
            separator('='),
            self.feedback_text
        )
    }
}

/// Consumes a set of annotated files plus a rubric index and produces a
/// `GradeReport`
pub struct ReportAggregator<'a> {
    index: &'a RubricIndex,
}

impl<'a> ReportAggregator<'a> {
    pub fn new(index: &'a RubricIndex) -> Self {
        ReportAggregator { index }
    }

    /// Aggregate the named target files, in caller-supplied order.
    ///
    /// A target filename absent from the submission is skipped silently:
    /// callers may request a superset of expected files.
    pub fn aggregate(&self, targets: &[String], submission: &Submission) -> Result<GradeReport> {
        let mut points_by_category: HashMap<String, f64> =
            HashMap::from([(OTHER_CATEGORY.to_string(), 0.0)]);

        let feedback_text = self.collect_feedback(targets, submission, &mut points_by_category)?;
        let (total_score, category_lines) = self.score_categories(&points_by_category);

        Ok(GradeReport {
            total_score,
            category_lines,
            feedback_text,
        })
    }

    /// Format every annotation block and accumulate point deltas into
    /// their owning category (or the "Other" bucket).
    fn collect_feedback(
        &self,
        targets: &[String],
        submission: &Submission,
        points_by_category: &mut HashMap<String, f64>,
    ) -> Result<String> {
        let mut file_blocks = Vec::new();

        for target in targets {
            let Some(file) = submission.file_with_name(target) else {
                tracing::debug!(file = %target, "target file not in submission; skipping");
                continue;
            };

            let mut blocks = Vec::new();
            for annotation in file.sorted_annotations() {
                let resolved = self.index.resolve(annotation);
                blocks.push(file.format_annotation(annotation, resolved.map(|(_, item)| item))?);

                let bucket = resolved
                    .map(|(category, _)| category.name.as_str())
                    .unwrap_or(OTHER_CATEGORY);
                *points_by_category.entry(bucket.to_string()).or_insert(0.0) +=
                    annotation.point_delta;
            }

            if !blocks.is_empty() {
                file_blocks.push(blocks.join(&format!("{}\n", separator('-'))));
            }
        }

        Ok(file_blocks.join(&format!("{}\n\n", separator('='))))
    }

    /// Apply each category's scoring policy in rubric display order and
    /// compute the final score.
    fn score_categories(&self, points_by_category: &HashMap<String, f64>) -> (f64, Vec<String>) {
        let mut total_score = 0.0;
        let mut category_lines = Vec::new();

        for category in self.index.categories() {
            let points = points_by_category
                .get(&category.name)
                .copied()
                .unwrap_or(0.0);

            match category.policy {
                ScoringPolicy::Capped(limit) => {
                    let remaining = limit - points.min(limit);
                    total_score += remaining;
                    category_lines.push(format!(
                        "{:5.1} / {:5.1} : {}",
                        remaining, limit, category.name
                    ));
                }
                ScoringPolicy::Uncapped => {
                    total_score -= points;
                    category_lines.push(format!("{:5.1}{:8} : {}", points.abs(), "", category.name));
                }
                ScoringPolicy::SignInverted { show_magnitude } => {
                    if points != 0.0 {
                        total_score -= points;
                        let shown = if show_magnitude { points.abs() } else { -points };
                        category_lines.push(format!("{:5.1}{:8} : {}", shown, "", category.name));
                    }
                }
            }
        }

        let other = points_by_category
            .get(OTHER_CATEGORY)
            .copied()
            .unwrap_or(0.0);
        if other != 0.0 {
            total_score -= other;
            category_lines.push(format!("{:5.1}{:8} : {}", -other, "", OTHER_CATEGORY));
        }

        (total_score, category_lines)
    }
}
