//! Line-level tokenizing shared by the OBJ and MTL parsers.

use std::io::{self, BufRead};
use std::str::SplitWhitespace;

use crate::error::{SceneError, SceneResult};

/// Iterator over the logical lines of a line-oriented asset file.
///
/// Skips blank lines and `#` comments; yields each remaining line trimmed,
/// paired with its 1-based line number for error reporting. Line numbers
/// count every physical line, skipped ones included.
pub(crate) struct LogicalLines<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            match line {
                Err(e) => return Some(Err(e)),
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    return Some(Ok((self.line_no, trimmed.to_string())));
                }
            }
        }
        None
    }
}

pub(crate) fn logical_lines<R: BufRead>(reader: R) -> LogicalLines<R> {
    LogicalLines {
        lines: reader.lines(),
        line_no: 0,
    }
}

/// Parse the next `N` whitespace-separated tokens as floats.
///
/// Missing or non-numeric tokens are a fatal [`SceneError::MalformedAttribute`]
/// naming the tag and the offending line. Trailing extra tokens are the
/// caller's business (the loaders ignore them).
pub(crate) fn parse_floats<const N: usize>(
    parts: &mut SplitWhitespace<'_>,
    tag: &str,
    line: usize,
    content: &str,
) -> SceneResult<[f32; N]> {
    let malformed = || SceneError::MalformedAttribute {
        tag: tag.to_string(),
        line,
        content: content.to_string(),
    };

    let mut out = [0.0f32; N];
    for slot in &mut out {
        let token = parts.next().ok_or_else(malformed)?;
        *slot = token.parse().map_err(|_| malformed())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_blanks_and_comments_keeping_line_numbers() {
        let src = "v 1 2 3\n\n# comment\n  vt 0 1\n";
        let lines: Vec<_> = logical_lines(Cursor::new(src))
            .collect::<io::Result<_>>()
            .expect("in-memory read");
        assert_eq!(
            lines,
            vec![(1, "v 1 2 3".to_string()), (4, "vt 0 1".to_string())]
        );
    }

    #[test]
    fn parse_floats_reads_exact_arity_and_ignores_extras() {
        let mut parts = "1.0 2.5 -3 junk".split_whitespace();
        let got: [f32; 3] = parse_floats(&mut parts, "v", 1, "v 1.0 2.5 -3 junk").expect("floats");
        assert_eq!(got, [1.0, 2.5, -3.0]);
        assert_eq!(parts.next(), Some("junk"));
    }

    #[test]
    fn parse_floats_rejects_short_and_non_numeric_input() {
        let mut parts = "1.0 2.0".split_whitespace();
        let err = parse_floats::<3>(&mut parts, "vn", 7, "vn 1.0 2.0").unwrap_err();
        assert!(matches!(
            err,
            SceneError::MalformedAttribute { ref tag, line: 7, .. } if tag == "vn"
        ));

        let mut parts = "x 2.0 3.0".split_whitespace();
        assert!(parse_floats::<3>(&mut parts, "v", 2, "v x 2.0 3.0").is_err());
    }
}
