//! Reviewer annotations attached to submission files
//!
//! An annotation is an immutable value created by the grading service when
//! a reviewer comments on a line range. The point delta sign is stored
//! exactly as received and negated only for display: a stored delta of
//! `-5` renders as `(5.0)`, five points deducted.

/// One reviewer comment on a file
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// First line of the commented range (1-based, inclusive)
    pub start_line: usize,
    /// Last line of the commented range (1-based, inclusive)
    pub end_line: usize,
    /// Comment text, trailing whitespace stripped
    pub text: String,
    /// Signed point delta; negative = deduction, positive = bonus
    pub point_delta: f64,
    /// Optional link to a rubric item
    pub rubric_item: Option<u64>,
}

impl Annotation {
    pub fn new(
        start_line: usize,
        end_line: usize,
        text: impl Into<String>,
        point_delta: f64,
        rubric_item: Option<u64>,
    ) -> Self {
        Annotation {
            start_line,
            end_line,
            text: text.into().trim_end().to_string(),
            point_delta,
            rubric_item,
        }
    }

    /// Render the comment for the feedback report
    pub fn display(&self) -> String {
        render_with_delta(&self.text, self.point_delta)
    }
}

/// Render `text (<negated delta>)`, or the text alone when the delta is zero
pub(crate) fn render_with_delta(text: &str, point_delta: f64) -> String {
    if point_delta == 0.0 {
        text.to_string()
    } else {
        format!("{} ({:.1})", text, -point_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_whitespace_stripped() {
        let annotation = Annotation::new(1, 1, "needs comments  \n", -2.0, None);
        assert_eq!(annotation.text, "needs comments");
    }

    #[test]
    fn test_display_negates_delta() {
        let annotation = Annotation::new(4, 5, "off by one", -5.0, None);
        assert_eq!(annotation.display(), "off by one (5.0)");

        let bonus = Annotation::new(1, 1, "elegant solution", 3.0, None);
        assert_eq!(bonus.display(), "elegant solution (-3.0)");
    }

    #[test]
    fn test_display_zero_delta_text_only() {
        let annotation = Annotation::new(2, 2, "nice naming", 0.0, None);
        assert_eq!(annotation.display(), "nice naming");
    }

}
