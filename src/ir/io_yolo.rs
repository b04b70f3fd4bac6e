//! YOLO label file reader and writer.
//!
//! A label file holds one object per line as
//! `<class_index> <x_center> <y_center> <width> <height>`, all four numbers
//! normalized to the image. Class names live in a separate class list file
//! with one name per line.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::geometry::CenterBox;
use crate::error::AnnofactoryError;

/// One parsed (or to-be-written) label line.
#[derive(Clone, Debug, PartialEq)]
pub struct YoloRow {
    pub class_id: u64,
    pub bbox: CenterBox,
}

/// Ordered class names, addressed by 0-based class index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    /// Creates a class list from names in index order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Looks up the name for a class index.
    pub fn get(&self, class_id: u64) -> Option<&str> {
        usize::try_from(class_id)
            .ok()
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Read a class list file.
///
/// Entries are split on `\n` and a single trailing empty entry (the file's
/// final newline) is dropped. Any other empty line stays in the list as an
/// empty name so later indices keep their position.
pub fn read_class_list(path: &Path) -> Result<ClassList, AnnofactoryError> {
    let data = fs::read_to_string(path).map_err(AnnofactoryError::Io)?;
    let classes = parse_class_list_str(&data);
    log::debug!(
        "read {} class name(s) from {}",
        classes.len(),
        path.display()
    );
    Ok(classes)
}

fn parse_class_list_str(data: &str) -> ClassList {
    let mut names: Vec<String> = data
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();
    if names.last().is_some_and(String::is_empty) {
        names.pop();
    }
    ClassList { names }
}

/// Read every label row from a YOLO label file, in line order.
pub fn read_yolo_txt(path: &Path) -> Result<Vec<YoloRow>, AnnofactoryError> {
    let content = fs::read_to_string(path).map_err(AnnofactoryError::Io)?;
    let rows = parse_yolo_str(&content, path)?;
    log::debug!("read {} label row(s) from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse YOLO label text from a UTF-8 string.
pub fn from_yolo_str(text: &str) -> Result<Vec<YoloRow>, AnnofactoryError> {
    parse_yolo_str(text, Path::new("<memory>"))
}

fn parse_yolo_str(text: &str, path: &Path) -> Result<Vec<YoloRow>, AnnofactoryError> {
    label_rows(text, path)
        .map(|row| row.map(|(_, row)| row))
        .collect()
}

/// Iterates the label rows of `text` along with their 1-based line numbers.
///
/// Blank lines are skipped. Collecting into a `Result` stops at the first
/// malformed line.
pub fn label_rows<'a>(
    text: &'a str,
    path: &'a Path,
) -> impl Iterator<Item = Result<(usize, YoloRow), AnnofactoryError>> + 'a {
    text.lines().enumerate().filter_map(move |(line_idx, line)| {
        let line_num = line_idx + 1;
        match parse_label_line(line, path, line_num) {
            Ok(Some(row)) => Some(Ok((line_num, row))),
            Ok(None) => {
                log::debug!("skipping blank line {} in {}", line_num, path.display());
                None
            }
            Err(err) => Some(Err(err)),
        }
    })
}

/// Parse a single label line.
///
/// Blank lines yield `Ok(None)`. Anything other than exactly five tokens is
/// an error.
pub fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<YoloRow>, AnnofactoryError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(6).collect();

    if tokens.len() != 5 {
        let found = if tokens.len() > 5 {
            "more than 5".to_string()
        } else {
            tokens.len().to_string()
        };
        return Err(AnnofactoryError::YoloLabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("expected 5 tokens, found {found}"),
        });
    }

    let class_id = tokens[0]
        .parse::<u64>()
        .map_err(|_| AnnofactoryError::YoloLabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!(
                "invalid class index '{}'; expected non-negative integer",
                tokens[0]
            ),
        })?;

    let x_center = parse_f64_token(tokens[1], "x_center", file_path, line_num)?;
    let y_center = parse_f64_token(tokens[2], "y_center", file_path, line_num)?;
    let width = parse_f64_token(tokens[3], "width", file_path, line_num)?;
    let height = parse_f64_token(tokens[4], "height", file_path, line_num)?;

    Ok(Some(YoloRow {
        class_id,
        bbox: CenterBox::new(x_center, y_center, width, height),
    }))
}

/// Fuzz-only entrypoint for YOLO single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), AnnofactoryError> {
    let _ = parse_label_line(input, Path::new("<fuzz>"), 1)?;
    Ok(())
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, AnnofactoryError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AnnofactoryError::YoloLabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!(
                "invalid {field_name} '{raw}'; expected finite floating-point number"
            ),
        }),
    }
}

/// Render label rows as YOLO text, one `\n`-terminated line per row.
///
/// Coordinates are written with six decimals, so a written file reads back
/// to within 5e-7 per value rather than bit-exactly.
pub fn render_yolo_txt(rows: &[YoloRow]) -> String {
    let mut out = String::new();
    for row in rows {
        writeln!(
            out,
            "{} {:.6} {:.6} {:.6} {:.6}",
            row.class_id, row.bbox.x_center, row.bbox.y_center, row.bbox.width, row.bbox.height
        )
        .expect("write to string");
    }
    out
}

/// Write label rows to `path`, replacing any existing file.
pub fn write_yolo_txt(path: &Path, rows: &[YoloRow]) -> Result<(), AnnofactoryError> {
    let file = File::create(path).map_err(AnnofactoryError::Io)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(render_yolo_txt(rows).as_bytes())
        .map_err(AnnofactoryError::Io)?;
    writer.flush().map_err(AnnofactoryError::Io)?;

    log::debug!("wrote {} label row(s) to {}", rows.len(), path.display());
    Ok(())
}
