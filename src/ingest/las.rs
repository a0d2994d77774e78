//! LAS 2.0 well logs.
//!
//! Sections are introduced by `~` and identified by their first letter:
//! `~V` version, `~W` well (carries `NULL`), `~C` curves, `~P` parameters,
//! `~O` other, `~A` ASCII data. Header lines read `MNEM.UNIT  VALUE : DESC`.
//!
//! Data tokens are chunked by curve count, so wrapped (`WRAP. YES`) files
//! decode the same as unwrapped ones. The `NULL` value becomes `NaN`.

use super::{finish_dataset, DataLoadError};
use crate::types::WellDataset;

/// `NULL` value used when the well section does not declare one.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Well,
    Curves,
    Parameters,
    Other,
    Ascii,
    Unknown,
}

impl Section {
    fn from_header(line: &str) -> Self {
        match line
            .trim_start_matches('~')
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
        {
            Some('V') => Self::Version,
            Some('W') => Self::Well,
            Some('C') => Self::Curves,
            Some('P') => Self::Parameters,
            Some('O') => Self::Other,
            Some('A') => Self::Ascii,
            _ => Self::Unknown,
        }
    }
}

/// One `MNEM.UNIT VALUE : DESC` header line.
#[derive(Debug, Clone, PartialEq)]
struct HeaderLine {
    mnemonic: String,
    unit: String,
    value: String,
}

fn parse_header_line(line: &str) -> Option<HeaderLine> {
    let (mnemonic, rest) = line.split_once('.')?;
    let mnemonic = mnemonic.trim();
    if mnemonic.is_empty() {
        return None;
    }

    // Unit runs up to the first whitespace after the dot.
    let (unit, rest) = match rest.find(char::is_whitespace) {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, ""),
    };

    // Value ends at the last colon; descriptions rarely hold one, values
    // (times, URLs) sometimes do.
    let value = match rest.rfind(':') {
        Some(idx) => &rest[..idx],
        None => rest,
    };

    Some(HeaderLine {
        mnemonic: mnemonic.to_string(),
        unit: unit.trim().to_string(),
        value: value.trim().to_string(),
    })
}

/// Curve names as table columns, `MNEM (UNIT)` when a unit is present.
fn curve_column(curve: &HeaderLine) -> String {
    if curve.unit.is_empty() {
        curve.mnemonic.clone()
    } else {
        format!("{} ({})", curve.mnemonic, curve.unit)
    }
}

pub fn parse_las(source_name: &str, text: &str) -> Result<WellDataset, DataLoadError> {
    let mut section = Section::Unknown;
    let mut seen_version = false;
    let mut null_value = DEFAULT_NULL_VALUE;
    let mut curves: Vec<HeaderLine> = Vec::new();
    let mut tokens: Vec<&str> = Vec::new();
    let mut seen_ascii = false;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('~') {
            section = Section::from_header(line);
            if section == Section::Ascii {
                seen_ascii = true;
            }
            continue;
        }

        match section {
            Section::Version => {
                seen_version = true;
                if let Some(h) = parse_header_line(line) {
                    if h.mnemonic.eq_ignore_ascii_case("VERS") && h.value.starts_with('3') {
                        return Err(DataLoadError::UnsupportedFormat(format!(
                            "{source_name}: LAS version {} (only LAS 1.2/2.0 are read)",
                            h.value
                        )));
                    }
                }
            }
            Section::Well => {
                if let Some(h) = parse_header_line(line) {
                    if h.mnemonic.eq_ignore_ascii_case("NULL") {
                        null_value = h.value.parse().map_err(|_| {
                            DataLoadError::parse(
                                source_name,
                                format!("line {}: NULL value '{}' is not a number", idx + 1, h.value),
                            )
                        })?;
                    }
                }
            }
            Section::Curves => {
                let curve = parse_header_line(line).ok_or_else(|| {
                    DataLoadError::parse(
                        source_name,
                        format!("line {}: malformed curve definition", idx + 1),
                    )
                })?;
                curves.push(curve);
            }
            Section::Ascii => tokens.extend(line.split_whitespace()),
            Section::Parameters | Section::Other | Section::Unknown => {}
        }
    }

    if !seen_version && curves.is_empty() {
        return Err(DataLoadError::parse(source_name, "no LAS sections found"));
    }
    if curves.is_empty() {
        return Err(DataLoadError::parse(source_name, "missing ~Curve section"));
    }
    if curves.len() < 2 {
        return Err(DataLoadError::parse(
            source_name,
            format!("{} curve(s) defined, need at least 2", curves.len()),
        ));
    }
    if !seen_ascii {
        return Err(DataLoadError::parse(source_name, "missing ~A data section"));
    }

    let width = curves.len();
    if tokens.len() % width != 0 {
        return Err(DataLoadError::parse(
            source_name,
            format!(
                "{} data values do not divide into rows of {width} curves",
                tokens.len()
            ),
        ));
    }

    let mut rows = Vec::with_capacity(tokens.len() / width);
    for (row_idx, chunk) in tokens.chunks(width).enumerate() {
        let row = chunk
            .iter()
            .map(|tok| {
                let v: f64 = tok.parse().map_err(|_| {
                    DataLoadError::parse(
                        source_name,
                        format!("data row {}: '{tok}' is not a number", row_idx + 1),
                    )
                })?;
                Ok(if (v - null_value).abs() < 1e-9 { f64::NAN } else { v })
            })
            .collect::<Result<Vec<f64>, DataLoadError>>()?;
        rows.push(row);
    }

    let columns = curves.iter().map(curve_column).collect();
    let dataset = finish_dataset(source_name, columns, rows)?;
    tracing::debug!(
        source = source_name,
        rows = dataset.len(),
        curves = width,
        "Parsed LAS well log"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNWRAPPED: &str = "\
~Version Information
 VERS.                 2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0
 WRAP.                  NO : ONE LINE PER DEPTH STEP
~Well Information
 STRT.M             2000.0 : START DEPTH
 STOP.M             2001.0 : STOP DEPTH
 NULL.             -999.25 : NULL VALUE
 WELL.     15/9-F-9 A      : WELL
~Curve Information
 DEPT.M                    : DEPTH
 GR  .GAPI                 : GAMMA RAY
 RHOB.G/C3                 : BULK DENSITY
~Parameter Information
 BHT .DEGC          95.0   : BOTTOM HOLE TEMPERATURE
~A  DEPT     GR      RHOB
2000.0   45.20   2.31
2000.5   -999.25 2.35
2001.0   52.10   2.40
";

    const WRAPPED: &str = "\
~V
 VERS.   2.0 : CWLS
 WRAP.   YES : MULTIPLE LINES PER DEPTH STEP
~W
 NULL.   -999.25 :
~C
 DEPT.M     : DEPTH
 GR  .GAPI  : GAMMA RAY
 RHOB.G/C3  : BULK DENSITY
~A
2000.0
   45.20   2.31
2000.5
   -999.25 2.35
2001.0
   52.10   2.40
";

    #[test]
    fn test_unwrapped_las() {
        let ds = parse_las("well.las", UNWRAPPED).unwrap();
        assert_eq!(
            ds.columns(),
            &["DEPT (M)".to_string(), "GR (GAPI)".to_string(), "RHOB (G/C3)".to_string()]
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows()[0], vec![2000.0, 45.2, 2.31]);
        assert!(ds.rows()[1][1].is_nan());
    }

    #[test]
    fn test_wrapped_matches_unwrapped() {
        let a = parse_las("a.las", UNWRAPPED).unwrap();
        let b = parse_las("b.las", WRAPPED).unwrap();
        assert_eq!(a.columns(), b.columns());
        assert_eq!(a.log_points(), b.log_points());
    }

    #[test]
    fn test_custom_null_value() {
        let text = "~V\n VERS. 2.0 :\n~W\n NULL. -1 : NULL\n~C\n DEPT.M :\n GR.API :\n~A\n10 -1\n11 5\n";
        let ds = parse_las("n.las", text).unwrap();
        assert!(ds.rows()[0][1].is_nan());
        assert_eq!(ds.log_points(), vec![(11.0, 5.0)]);
    }

    #[test]
    fn test_header_line_value_with_colon() {
        let h = parse_header_line(" DATE.   2024-01-05 10:30 : LOG DATE").unwrap();
        assert_eq!(h.mnemonic, "DATE");
        assert_eq!(h.unit, "");
        assert_eq!(h.value, "2024-01-05 10:30");
    }

    #[test]
    fn test_las3_unsupported() {
        let err = parse_las("v3.las", "~Version\n VERS. 3.0 : CWLS LAS 3.0\n").unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_partial_row_rejected() {
        let text = "~V\n VERS. 2.0 :\n~C\n DEPT.M :\n GR.API :\n~A\n10 1\n11\n";
        let err = parse_las("p.las", text).unwrap_err();
        assert!(err.to_string().contains("do not divide"));
    }

    #[test]
    fn test_non_numeric_token_rejected() {
        let text = "~V\n VERS. 2.0 :\n~C\n DEPT.M :\n GR.API :\n~A\n10 abc\n";
        let err = parse_las("t.las", text).unwrap_err();
        assert!(err.to_string().contains("'abc' is not a number"));
    }

    #[test]
    fn test_missing_sections() {
        assert!(parse_las("x.las", "just some text\n").is_err());
        let no_data = "~V\n VERS. 2.0 :\n~C\n DEPT.M :\n GR.API :\n";
        assert!(parse_las("x.las", no_data)
            .unwrap_err()
            .to_string()
            .contains("~A"));
        let one_curve = "~V\n VERS. 2.0 :\n~C\n DEPT.M :\n~A\n10\n";
        assert!(parse_las("x.las", one_curve).is_err());
    }
}
