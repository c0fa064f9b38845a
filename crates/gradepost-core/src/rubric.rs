//! Rubric categories, items, and the per-assignment index
//!
//! A rubric category is a named scoring bucket with a scoring policy
//! resolved once at construction. The index is built explicitly before
//! the first aggregation and is immutable afterwards, so it can be
//! shared freely across concurrent aggregations for the same assignment.

use std::collections::HashMap;

use crate::annotation::{render_with_delta, Annotation};

/// A predefined, reusable comment template with a fixed point delta
#[derive(Debug, Clone, PartialEq)]
pub struct RubricItem {
    /// Unique within the assignment
    pub id: u64,
    pub text: String,
    /// Signed, same convention as `Annotation::point_delta`
    pub point_delta: f64,
}

impl RubricItem {
    pub fn new(id: u64, text: impl Into<String>, point_delta: f64) -> Self {
        RubricItem {
            id,
            text: text.into(),
            point_delta,
        }
    }

    /// Render the item for the feedback report
    pub fn display(&self) -> String {
        render_with_delta(&self.text, self.point_delta)
    }
}

/// Scoring policy for a category, resolved once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoringPolicy {
    /// Award the remainder of the limit after subtracting capped deductions.
    /// Deductions beyond the limit do not drive the award below zero.
    Capped(f64),
    /// Open bucket with no cap, scored as a pure deduction. The category
    /// line is always rendered, even at zero points.
    Uncapped,
    /// Special bucket whose contribution is the negated accumulation and
    /// whose line is skipped when the accumulation is zero. "Deductions"
    /// shows the negated total, "Bonus" shows its magnitude.
    SignInverted { show_magnitude: bool },
}

impl ScoringPolicy {
    /// Resolve the policy for a category name and optional point limit.
    ///
    /// An open category that is not one of the two special buckets is a
    /// configuration anomaly: it is accepted with a diagnostic and scored
    /// as an unlimited deduction bucket.
    pub fn resolve(name: &str, point_limit: Option<f64>) -> Self {
        match (name, point_limit) {
            ("Deductions", _) => ScoringPolicy::SignInverted {
                show_magnitude: false,
            },
            ("Bonus", _) => ScoringPolicy::SignInverted {
                show_magnitude: true,
            },
            (_, Some(limit)) => ScoringPolicy::Capped(limit),
            (name, None) => {
                tracing::warn!(
                    category = name,
                    "category has no point limit; scoring as an open deduction bucket"
                );
                ScoringPolicy::Uncapped
            }
        }
    }
}

/// A named scoring bucket owning an ordered set of rubric items
#[derive(Debug, Clone)]
pub struct RubricCategory {
    /// Unique within the assignment
    pub name: String,
    /// Defines category display order, ascending
    pub sort_key: i64,
    pub policy: ScoringPolicy,
    /// Authoring/import order, not sorted further
    pub items: Vec<RubricItem>,
}

impl RubricCategory {
    pub fn new(
        name: impl Into<String>,
        point_limit: Option<f64>,
        sort_key: i64,
        items: Vec<RubricItem>,
    ) -> Self {
        let name = name.into();
        let policy = ScoringPolicy::resolve(&name, point_limit);
        RubricCategory {
            name,
            sort_key,
            policy,
            items,
        }
    }
}

/// Read-only view over an assignment's rubric: categories in display
/// order plus a lookup from item identity to its owning category.
#[derive(Debug, Clone)]
pub struct RubricIndex {
    categories: Vec<RubricCategory>,
    owner_by_item: HashMap<u64, usize>,
}

impl RubricIndex {
    /// Build the index from the assignment's categories.
    ///
    /// Categories are stable-sorted by `sort_key`; ties keep their input
    /// order (no secondary key is defined).
    pub fn build(mut categories: Vec<RubricCategory>) -> Self {
        categories.sort_by_key(|c| c.sort_key);

        let mut owner_by_item = HashMap::new();
        for (position, category) in categories.iter().enumerate() {
            for item in &category.items {
                owner_by_item.insert(item.id, position);
            }
        }

        RubricIndex {
            categories,
            owner_by_item,
        }
    }

    /// Categories sorted ascending by `sort_key`
    pub fn categories(&self) -> &[RubricCategory] {
        &self.categories
    }

    /// Resolve an annotation's linked rubric item and its owning category.
    /// Returns `None` when the annotation has no link or the link does not
    /// resolve against this assignment's rubric.
    pub fn resolve(&self, annotation: &Annotation) -> Option<(&RubricCategory, &RubricItem)> {
        let item_id = annotation.rubric_item?;
        let position = *self.owner_by_item.get(&item_id)?;
        let category = &self.categories[position];
        let item = category.items.iter().find(|i| i.id == item_id)?;
        Some((category, item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn correctness() -> RubricCategory {
        RubricCategory::new(
            "Correctness",
            Some(75.0),
            0,
            vec![
                RubricItem::new(1, "minor correctness issue", 2.0),
                RubricItem::new(2, "significant correctness issue", 10.0),
            ],
        )
    }

    #[test]
    fn test_policy_resolution() {
        assert_eq!(
            ScoringPolicy::resolve("Deductions", None),
            ScoringPolicy::SignInverted {
                show_magnitude: false
            }
        );
        assert_eq!(
            ScoringPolicy::resolve("Bonus", None),
            ScoringPolicy::SignInverted {
                show_magnitude: true
            }
        );
        assert_eq!(
            ScoringPolicy::resolve("Correctness", Some(75.0)),
            ScoringPolicy::Capped(75.0)
        );
        // Open category falls back to a deduction bucket
        assert_eq!(
            ScoringPolicy::resolve("Style", None),
            ScoringPolicy::Uncapped
        );
    }

    #[test]
    fn test_categories_sorted_by_sort_key() {
        let index = RubricIndex::build(vec![
            RubricCategory::new("Comments", Some(10.0), 2, vec![]),
            RubricCategory::new("Correctness", Some(75.0), 0, vec![]),
            RubricCategory::new("Organization/Style", Some(15.0), 1, vec![]),
        ]);

        let names: Vec<&str> = index.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Correctness", "Organization/Style", "Comments"]);
    }

    #[test]
    fn test_sort_key_ties_keep_input_order() {
        let index = RubricIndex::build(vec![
            RubricCategory::new("First", Some(5.0), 1, vec![]),
            RubricCategory::new("Second", Some(5.0), 1, vec![]),
            RubricCategory::new("Third", Some(5.0), 1, vec![]),
        ]);

        let names: Vec<&str> = index.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_resolve_linked_item() {
        let index = RubricIndex::build(vec![correctness()]);
        let annotation = Annotation::new(1, 1, "loop bound", -2.0, Some(2));

        let (category, item) = index.resolve(&annotation).unwrap();
        assert_eq!(category.name, "Correctness");
        assert_eq!(item.text, "significant correctness issue");
    }

    #[test]
    fn test_resolve_unlinked_and_dangling() {
        let index = RubricIndex::build(vec![correctness()]);

        let unlinked = Annotation::new(1, 1, "free-form", -2.0, None);
        assert!(index.resolve(&unlinked).is_none());

        let dangling = Annotation::new(1, 1, "stale link", -2.0, Some(999));
        assert!(index.resolve(&dangling).is_none());
    }
}
