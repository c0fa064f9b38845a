//! Local filesystem helpers for the grading tools
//!
//! Student work lives in a `<course>/<assignment>/<student email>/`
//! directory convention; these helpers list directories, read and write
//! whole-file text, and infer course context from a working directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{GradepostError, Result};

/// Immediate child files and directories of one path
#[derive(Debug)]
pub struct DirectoryListing {
    files: BTreeSet<PathBuf>,
    directories: BTreeSet<PathBuf>,
}

impl DirectoryListing {
    pub fn read(path: &Path) -> Result<Self> {
        let mut files = BTreeSet::new();
        let mut directories = BTreeSet::new();

        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry =
                entry.map_err(|e| GradepostError::io_operation("list", path.display(), e))?;
            if entry.file_type().is_dir() {
                directories.insert(entry.into_path());
            } else {
                files.insert(entry.into_path());
            }
        }

        Ok(DirectoryListing { files, directories })
    }

    /// Child files in deterministic (lexicographic) order
    pub fn files(&self) -> &BTreeSet<PathBuf> {
        &self.files
    }

    /// Child directories in deterministic (lexicographic) order
    pub fn directories(&self) -> &BTreeSet<PathBuf> {
        &self.directories
    }

    pub fn contains_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Final path components of the child directories
    pub fn directory_names(&self) -> Vec<String> {
        self.directories
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

/// Whole-file text content; a missing file reads as empty
pub fn read_text_or_empty(path: &Path) -> Result<String> {
    if path.exists() {
        fs::read_to_string(path)
            .map_err(|e| GradepostError::io_operation("read", path.display(), e))
    } else {
        Ok(String::new())
    }
}

/// Write whole-file text content
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| GradepostError::io_operation("write", path.display(), e))
}

/// Course context inferred from a directory path following the
/// `<course>/<assignment>/<student email>/<file>` convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseContext {
    pub course: String,
    pub assignment: Option<String>,
    pub student: Option<String>,
    pub file: Option<String>,
}

/// Infer course context from a path by finding the deepest component
/// starting with the course prefix; the components after it are the
/// assignment, student email, and filename.
pub fn infer_course_context(path: &Path, prefix: &str) -> Option<CourseContext> {
    let components: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let course_index = components
        .iter()
        .rposition(|name| name.starts_with(prefix))?;

    let mut rest = components[course_index + 1..].iter().cloned();
    Some(CourseContext {
        course: components[course_index].clone(),
        assignment: rest.next(),
        student: rest.next(),
        file: rest.next(),
    })
}

/// Student directories are recognized by an `@` in the directory name
pub fn is_student_directory(name: &str) -> bool {
    name.contains('@')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_full_context() {
        let ctx = infer_course_context(
            Path::new("/home/dreed/Labs/CS161/Lab1/dreed@capital.edu/llist.py"),
            "CS",
        )
        .unwrap();
        assert_eq!(ctx.course, "CS161");
        assert_eq!(ctx.assignment.as_deref(), Some("Lab1"));
        assert_eq!(ctx.student.as_deref(), Some("dreed@capital.edu"));
        assert_eq!(ctx.file.as_deref(), Some("llist.py"));
    }

    #[test]
    fn test_infer_partial_context() {
        let ctx = infer_course_context(Path::new("/home/dreed/Labs/CS161/Lab1"), "CS").unwrap();
        assert_eq!(ctx.course, "CS161");
        assert_eq!(ctx.assignment.as_deref(), Some("Lab1"));
        assert!(ctx.student.is_none());
        assert!(ctx.file.is_none());
    }

    #[test]
    fn test_infer_no_match() {
        assert!(infer_course_context(Path::new("/home/dreed/Labs"), "CS").is_none());
    }

    #[test]
    fn test_infer_uses_deepest_match() {
        let ctx =
            infer_course_context(Path::new("/home/CSstaff/courses/CS160/Project1"), "CS").unwrap();
        assert_eq!(ctx.course, "CS160");
        assert_eq!(ctx.assignment.as_deref(), Some("Project1"));
    }

    #[test]
    fn test_directory_listing() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("grade.txt"), "x").unwrap();
        fs::create_dir(dir.path().join("dreed@capital.edu")).unwrap();
        fs::create_dir(dir.path().join("asmith@capital.edu")).unwrap();

        let listing = DirectoryListing::read(dir.path()).unwrap();
        assert_eq!(listing.files().len(), 1);
        assert!(listing.contains_file(&dir.path().join("grade.txt")));
        assert_eq!(
            listing.directory_names(),
            vec!["asmith@capital.edu", "dreed@capital.edu"]
        );
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(
            read_text_or_empty(&dir.path().join("grade.txt")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("comments.txt");
        write_text(&path, "feedback\n").unwrap();
        assert_eq!(read_text_or_empty(&path).unwrap(), "feedback\n");
    }

    #[test]
    fn test_is_student_directory() {
        assert!(is_student_directory("dreed@capital.edu"));
        assert!(!is_student_directory("solutions"));
    }
}
