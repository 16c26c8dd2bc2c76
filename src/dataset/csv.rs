use crate::dataset::{AxisLabels, DataSource, Dataset};
use crate::error::{FitError, ParseError};
use csv::{Reader, ReaderBuilder, StringRecord, Terminator, Trim};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Comma-delimited file source: first line is `x_label,y_label`, every
/// following line is `x,y`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvSource {
    fn load(&self) -> Result<Dataset, FitError> {
        let file = File::open(&self.path)?;
        let dataset = read_csv(BufReader::new(file))?;
        info!(
            "loaded {} points ({}, {}) from {}",
            dataset.len(),
            dataset.labels().x,
            dataset.labels().y,
            self.path.display()
        );
        Ok(dataset)
    }
}

/// Parses a dataset from any reader.
///
/// Lines end at `\n` and are split on commas only: quotes carry no meaning
/// and every field is trimmed, which also drops a trailing `\r`. Blank lines
/// are not skipped; they fail like any other record without two fields.
///
/// # Errors
///
/// Returns [`FitError::Parse`] when the input is empty, the label record does
/// not have two fields, there are no data records, or a data record is not
/// exactly two numbers.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, FitError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut record = StringRecord::new();
    if !read_line(&mut rdr, &mut record)? {
        return Err(ParseError::Empty.into());
    }
    let labels = parse_labels(&record)?;

    let mut x = Vec::new();
    let mut y = Vec::new();
    while read_line(&mut rdr, &mut record)? {
        let (x_val, y_val) = parse_row(&record)?;
        x.push(x_val);
        y.push(y_val);
    }

    if x.is_empty() {
        return Err(ParseError::NoData.into());
    }
    Dataset::new(labels, x, y)
}

/// Reads the next record, failing on any blank line the reader skipped
/// before it (or before the end of input).
fn read_line<R: Read>(
    rdr: &mut Reader<R>,
    record: &mut StringRecord,
) -> Result<bool, FitError> {
    let found = rdr.read_record(record)?;
    // position is stamped before the reader skips empty lines
    let start = record.position().map_or(1, |p| p.line());
    let consumed = rdr.position().line() - start;
    let own = if found { 1 } else { 0 };
    if consumed > own {
        return Err(ParseError::FieldCount {
            line: start,
            found: 0,
        }
        .into());
    }
    Ok(found)
}

fn parse_labels(record: &StringRecord) -> Result<AxisLabels, ParseError> {
    match record.len() {
        0 => Err(ParseError::Empty),
        2 => Ok(AxisLabels::new(&record[0], &record[1])),
        found => Err(ParseError::BadLabels { found }),
    }
}

fn parse_row(record: &StringRecord) -> Result<(f64, f64), ParseError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    if record.len() != 2 {
        return Err(ParseError::FieldCount {
            line,
            found: record.len(),
        });
    }
    let number = |field: &str| {
        field.parse::<f64>().map_err(|_| ParseError::BadNumber {
            line,
            value: field.to_string(),
        })
    };
    Ok((number(&record[0])?, number(&record[1])?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Result<Dataset, FitError> {
        read_csv(Cursor::new(text.as_bytes().to_vec()))
    }

    #[test]
    fn test_reads_labels_and_rows() {
        let ds = parse("x,y\n1,10\n2,20\n3,30\n").unwrap();
        assert_eq!(ds.labels(), &AxisLabels::new("x", "y"));
        assert_eq!(ds.x().to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(ds.y().to_vec(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_trims_whitespace() {
        let ds = parse("time , dist \r\n0.5, -1.25\r\n1e1,3\n").unwrap();
        assert_eq!(ds.labels(), &AxisLabels::new("time", "dist"));
        assert_eq!(ds.x().to_vec(), vec![0.5, 10.0]);
        assert_eq!(ds.y().to_vec(), vec![-1.25, 3.0]);
    }

    #[test]
    fn test_blank_data_line_is_parse_error() {
        let err = parse("time,dist\n0.5,-1.25\n\n1e1,3\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::FieldCount { line: 3, found: 0 })
        ));
    }

    #[test]
    fn test_crlf_error_reports_line() {
        let err = parse("x,y\r\n1,2\r\n3,oops\r\n").unwrap_err();
        match err {
            FitError::Parse(ParseError::BadNumber { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_before_labels() {
        let err = parse("\n\nx,y\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::FieldCount { line: 1, found: 0 })
        ));
    }

    #[test]
    fn test_trailing_blank_line() {
        let err = parse("x,y\n1,2\n\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::FieldCount { line: 3, found: 0 })
        ));
    }

    #[test]
    fn test_quotes_are_not_interpreted() {
        let err = parse("x,y\n\"1\",\"2\"\n").unwrap_err();
        match err {
            FitError::Parse(ParseError::BadNumber { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "\"1\"");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse("\"a,b\",y\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::BadLabels { found: 3 })
        ));
    }

    #[test]
    fn test_no_trailing_newline() {
        let ds = parse("a,b\n1,2").unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_empty_input_is_parse_error() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, FitError::Parse(ParseError::Empty)));
    }

    #[test]
    fn test_labels_without_data() {
        let err = parse("x,y\n").unwrap_err();
        assert!(matches!(err, FitError::Parse(ParseError::NoData)));
    }

    #[test]
    fn test_bad_label_count() {
        let err = parse("x,y,z\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::BadLabels { found: 3 })
        ));
    }

    #[test]
    fn test_row_with_wrong_field_count() {
        let err = parse("x,y\n1,2\n3\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::FieldCount { line: 3, found: 1 })
        ));

        let err = parse("x,y\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            FitError::Parse(ParseError::FieldCount { line: 2, found: 3 })
        ));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = parse("x,y\n1,2\n4,abc\n").unwrap_err();
        match err {
            FitError::Parse(ParseError::BadNumber { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvSource::new("does/not/exist.csv");
        let err = source.load().unwrap_err();
        assert!(matches!(err, FitError::Io(_)));
    }

    #[test]
    fn test_source_loads_file() {
        let path = std::env::temp_dir().join(format!("linefit_csv_{}.csv", std::process::id()));
        std::fs::write(&path, "x,y\n1,11\n2,19\n3,31\n").unwrap();
        let ds = CsvSource::new(&path).load().unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.y().to_vec(), vec![11.0, 19.0, 31.0]);
    }
}
