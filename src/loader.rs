//! Loading utilities for YOLO label files.

use crate::error::{Result, YoloEvalError};
use crate::types::{BoundingBox, ImageSize, YoloRecord};
use log::warn;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Number of fields on an object line.
const FIELD_COUNT: usize = 5;

/// What to do with a line that is not a valid object record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Skip the line, count it, and keep reading
    #[default]
    Lenient,
    /// Fail the whole file on the first bad line
    Strict,
}

/// Boxes read from one label file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelFile {
    pub boxes: Vec<BoundingBox>,
    /// Malformed lines that were dropped under [`LabelPolicy::Lenient`]
    pub skipped_lines: usize,
}

/// Load the boxes of a YOLO label file in pixel space.
///
/// A missing file is not an error: it means the image has no objects and an
/// empty [`LabelFile`] is returned. A line that is not valid UTF-8 is treated
/// like any other malformed line.
///
/// # Arguments
///
/// * `path` - Path to the `.txt` label file
/// * `size` - Dimensions of the image the labels belong to
/// * `policy` - How to treat malformed lines
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or if a line is
/// malformed under [`LabelPolicy::Strict`].
///
/// # Example
///
/// ```no_run
/// use yolo_eval::loader::{load_boxes, LabelPolicy};
/// use yolo_eval::types::ImageSize;
///
/// let labels = load_boxes("labels/img_001.txt", ImageSize::new(640, 480), LabelPolicy::Lenient).unwrap();
/// println!("Loaded {} boxes", labels.boxes.len());
/// ```
pub fn load_boxes<P: AsRef<Path>>(path: P, size: ImageSize, policy: LabelPolicy) -> Result<LabelFile> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LabelFile::default()),
        Err(e) => return Err(e.into()),
    };

    // Invalid UTF-8 becomes U+FFFD, which no numeric field accepts, so only
    // the offending line is rejected.
    let content = String::from_utf8_lossy(&bytes);
    parse_labels(&content, size, policy, path)
}

/// Parse the contents of a label file.
///
/// `origin` is only used to label warnings and errors.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use yolo_eval::loader::{parse_labels, LabelPolicy};
/// use yolo_eval::types::{BoundingBox, ImageSize};
///
/// let labels = parse_labels(
///     "0 0.5 0.5 0.5 0.5\nnot a label\n",
///     ImageSize::new(100, 100),
///     LabelPolicy::Lenient,
///     Path::new("inline"),
/// ).unwrap();
/// assert_eq!(labels.boxes, vec![BoundingBox::new(25, 25, 75, 75, 0)]);
/// assert_eq!(labels.skipped_lines, 1);
/// ```
pub fn parse_labels(
    content: &str,
    size: ImageSize,
    policy: LabelPolicy,
    origin: &Path,
) -> Result<LabelFile> {
    let mut labels = LabelFile::default();

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        match parse_label_line(line) {
            Ok(Some(record)) => labels.boxes.push(record.to_pixel_box(size)),
            Ok(None) => {}
            Err(message) => match policy {
                LabelPolicy::Strict => {
                    return Err(YoloEvalError::LabelParse {
                        path: origin.to_path_buf(),
                        line: line_num,
                        message,
                    });
                }
                LabelPolicy::Lenient => {
                    warn!(
                        "Skipping line {} of {}: {}",
                        line_num,
                        origin.display(),
                        message
                    );
                    labels.skipped_lines += 1;
                }
            },
        }
    }

    Ok(labels)
}

/// Parse one line as `class_id x_center y_center width height`.
///
/// Blank lines yield `Ok(None)`.
pub fn parse_label_line(line: &str) -> std::result::Result<Option<YoloRecord>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // One extra token is enough to reject the line
    let tokens: Vec<&str> = trimmed.split_whitespace().take(FIELD_COUNT + 1).collect();
    if tokens.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}{}",
            FIELD_COUNT,
            tokens.len(),
            if tokens.len() > FIELD_COUNT { " or more" } else { "" }
        ));
    }

    let class_id = parse_field(tokens[0], "class_id")?;
    if class_id < 0.0 {
        return Err(format!("class_id must be non-negative, got {}", class_id));
    }

    Ok(Some(YoloRecord {
        class_id,
        x_center: parse_field(tokens[1], "x_center")?,
        y_center: parse_field(tokens[2], "y_center")?,
        width: parse_field(tokens[3], "width")?,
        height: parse_field(tokens[4], "height")?,
    }))
}

fn parse_field(token: &str, name: &str) -> std::result::Result<f64, String> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("invalid {} '{}'", name, token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> ImageSize {
        ImageSize::new(200, 100)
    }

    #[test]
    fn test_parse_label_line() {
        let record = parse_label_line("1 0.5 0.5 0.25 0.5").unwrap().unwrap();
        assert_eq!(record.class_id, 1.0);
        assert_eq!(record.x_center, 0.5);
        assert_eq!(record.width, 0.25);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_label_line("   \t").unwrap(), None);
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(parse_label_line("1 0.5 0.5 0.25").is_err());
        assert!(parse_label_line("1 0.5 0.5 0.25 0.5 0.9").is_err());
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse_label_line("1 0.5 abc 0.25 0.5").unwrap_err();
        assert!(err.contains("y_center"));
        assert!(parse_label_line("1 0.5 NaN 0.25 0.5").is_err());
    }

    #[test]
    fn test_negative_class() {
        assert!(parse_label_line("-1 0.5 0.5 0.25 0.5").is_err());
    }

    #[test]
    fn test_parse_labels_lenient() {
        let content = "1 0.5 0.5 0.25 0.5\n\n0 0.5\n0 0.5 0.5 0.5 0.5\n";
        let labels = parse_labels(content, size(), LabelPolicy::Lenient, Path::new("a.txt")).unwrap();

        assert_eq!(
            labels.boxes,
            vec![
                BoundingBox::new(75, 25, 125, 75, 1),
                BoundingBox::new(50, 25, 150, 75, 0),
            ]
        );
        assert_eq!(labels.skipped_lines, 1);
    }

    #[test]
    fn test_parse_labels_strict() {
        let content = "1 0.5 0.5 0.25 0.5\n0 0.5\n";
        let err = parse_labels(content, size(), LabelPolicy::Strict, Path::new("a.txt")).unwrap_err();

        match err {
            YoloEvalError::LabelParse { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected LabelParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_line_is_malformed() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("binary.txt");
        fs::write(&path, b"0 0.5 0.5 0.5 0.5\n0 0.5\xff 0.5 0.5 0.5\n").unwrap();

        let labels = load_boxes(&path, size(), LabelPolicy::Lenient).unwrap();
        assert_eq!(labels.boxes.len(), 1);
        assert_eq!(labels.skipped_lines, 1);

        match load_boxes(&path, size(), LabelPolicy::Strict) {
            Err(YoloEvalError::LabelParse { line, message, .. }) => {
                assert_eq!(line, 2);
                assert!(message.contains("x_center"));
            }
            other => panic!("Expected LabelParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let labels = load_boxes("/definitely/not/here.txt", size(), LabelPolicy::Strict).unwrap();
        assert!(labels.boxes.is_empty());
        assert_eq!(labels.skipped_lines, 0);
    }
}
