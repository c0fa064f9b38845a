//! Flat-text rubric definition parsing
//!
//! A rubric file is a sequence of blocks separated by blank lines. Each
//! block's first line is `<point limit> <category name>`; each following
//! line until the next blank line is `<point delta> <comment text>`:
//!
//! ```text
//! 75 Correctness
//! 2 minor correctness issue
//! 10 significant correctness issue
//!
//! 15 Organization/Style
//! 2 use descriptive variable names
//! ```

use crate::error::{GradepostError, Result};

/// One comment template within a rubric block
#[derive(Debug, Clone, PartialEq)]
pub struct RubricCommentSpec {
    pub text: String,
    pub point_delta: f64,
}

/// One parsed rubric block: category plus its ordered comments
#[derive(Debug, Clone, PartialEq)]
pub struct RubricCategorySpec {
    pub name: String,
    pub point_limit: f64,
    pub comments: Vec<RubricCommentSpec>,
}

enum ParseState {
    Category,
    Comment,
}

/// Parse rubric definition text into ordered category specs.
///
/// Malformed lines fail with the 1-based line number.
pub fn parse_rubric_text(text: &str) -> Result<Vec<RubricCategorySpec>> {
    let mut specs: Vec<RubricCategorySpec> = Vec::new();
    let mut state = ParseState::Category;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let line_number = index + 1;

        match state {
            ParseState::Category => {
                if line.is_empty() {
                    continue;
                }
                let (limit, name) = split_point_value(line, line_number)?;
                specs.push(RubricCategorySpec {
                    name: name.to_string(),
                    point_limit: limit,
                    comments: Vec::new(),
                });
                state = ParseState::Comment;
            }
            ParseState::Comment => {
                if line.is_empty() {
                    state = ParseState::Category;
                    continue;
                }
                let (delta, text) = split_point_value(line, line_number)?;
                // parse_rubric_text only enters Comment after pushing a spec
                if let Some(current) = specs.last_mut() {
                    current.comments.push(RubricCommentSpec {
                        text: text.to_string(),
                        point_delta: delta,
                    });
                }
            }
        }
    }

    Ok(specs)
}

/// Split `<integer> <text>` and parse the leading integer
fn split_point_value(line: &str, line_number: usize) -> Result<(f64, &str)> {
    let Some((value, text)) = line.split_once(' ') else {
        return Err(GradepostError::InvalidRubricFile {
            line: line_number,
            reason: format!("expected `<points> <text>`, got {:?}", line),
        });
    };

    let points: i64 = value
        .parse()
        .map_err(|_| GradepostError::InvalidRubricFile {
            line: line_number,
            reason: format!("invalid point value {:?}", value),
        })?;

    Ok((points as f64, text.trim()))
}
