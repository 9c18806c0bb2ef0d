use super::filter::LineFilter;
use super::model::{ParseReport, Sample, Series, SkipReason};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extract the (x, y) series of a loosely formatted two-column text file.
///
/// Comment lines, header lines and anything that does not start with two
/// numbers are dropped silently; the result may be empty.
pub fn parse(text: &str) -> Series {
    parse_with(text, &LineFilter::default()).0
}

/// [`parse`] with a custom line filter, also reporting what was skipped.
pub fn parse_with(text: &str, filter: &LineFilter) -> (Series, ParseReport) {
    let mut series = Series::new();
    let mut report = ParseReport::default();

    for raw in lines(text) {
        report.lines += 1;
        match parse_line(raw, filter) {
            Ok(sample) => {
                // parse_line only hands back finite samples
                series.push(sample);
                report.accepted += 1;
            }
            Err(reason) => report.record_skip(reason),
        }
    }

    if report.skipped_total() > 0 {
        log::debug!(
            "parser kept {} of {} lines, skipped {:?}",
            report.accepted,
            report.lines,
            report.skipped
        );
    }

    (series, report)
}

// ---------------------------------------------------------------------------
// Line level
// ---------------------------------------------------------------------------

/// Split on every line terminator: `\r\n` counts once, and a lone `\r` or
/// any other Unicode line separator also ends a line. A terminator at the
/// very end of the text does not open an extra empty line.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(at) = rest.find(is_line_break) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..at];
        let tail = &rest[at..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
        Some(line)
    })
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Turn one raw line into a sample, or say why it is not one.
pub fn parse_line(raw: &str, filter: &LineFilter) -> Result<Sample, SkipReason> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(SkipReason::Blank);
    }
    if let Some(reason) = filter.skip_reason(line) {
        return Err(reason);
    }

    let mut tokens = tokenize(line);
    let (Some(first), Some(second)) = (tokens.next(), tokens.next()) else {
        return Err(SkipReason::TooFewTokens);
    };

    match (parse_number(first), parse_number(second)) {
        (Some(x), Some(y)) => Ok(Sample::new(x, y)),
        _ => Err(SkipReason::NotNumeric),
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Lazily split a line on runs of whitespace, commas and semicolons.
/// Never yields an empty token.
pub fn tokenize(line: &str) -> impl Iterator<Item = &str> {
    line.split(is_delimiter).filter(|tok| !tok.is_empty())
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

/// Decimal float with optional sign, fraction and exponent.
///
/// `str::parse::<f64>` also accepts `inf` and `NaN`; those are refused here
/// because a series may only hold finite values.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(series: &Series) -> Vec<(f64, f64)> {
        series.iter().map(|s| (s.x, s.y)).collect()
    }

    #[test]
    fn test_header_and_mixed_delimiters() {
        let series = parse("# header\n1.0 2.0\n2.0,4.0;\n");
        assert_eq!(pairs(&series), vec![(1.0, 2.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_tokenizer_collapses_delimiter_runs() {
        let tokens: Vec<&str> = tokenize("  1.5 ,;\t-2e3;;7  ").collect();
        assert_eq!(tokens, vec!["1.5", "-2e3", "7"]);
    }

    #[test]
    fn test_tokenizer_empty_line() {
        assert_eq!(tokenize(" ,; ").count(), 0);
    }

    #[test]
    fn test_number_syntax() {
        assert_eq!(parse_number("+1.5"), Some(1.5));
        assert_eq!(parse_number("-.5"), Some(-0.5));
        assert_eq!(parse_number("3."), Some(3.0));
        assert_eq!(parse_number("1.2E-3"), Some(1.2e-3));
        assert_eq!(parse_number("1,5"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("-infinity"), None);
        assert_eq!(parse_number("1e400"), None);
        assert!(parse("nan 1\n1 inf\n").is_empty());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let series = parse("10.0 200.0 3.5 extra\n");
        assert_eq!(pairs(&series), vec![(10.0, 200.0)]);
    }

    #[test]
    fn test_partial_numeric_line_is_dropped() {
        let series = parse("1.0 abc\nxyz 2.0\n3.0 4.0\n");
        assert_eq!(pairs(&series), vec![(3.0, 4.0)]);
    }

    #[test]
    fn test_keyword_beats_numbers() {
        let series = parse("1.0 2.0 angle\n3.0 4.0\n");
        assert_eq!(pairs(&series), vec![(3.0, 4.0)]);
    }

    #[test]
    fn test_mixed_line_endings() {
        let series = parse("1 2\r\n3 4\r5 6\n7 8");
        assert_eq!(pairs(&series), vec![(1.0, 2.0), (3.0, 4.0), (5.0, 6.0), (7.0, 8.0)]);
    }

    #[test]
    fn test_single_column_is_too_few() {
        let filter = LineFilter::default();
        assert_eq!(parse_line("  42  ", &filter), Err(SkipReason::TooFewTokens));
    }

    #[test]
    fn test_report_counts_every_line() {
        let text = "# comment\n\n2Theta Intensity\n1 2\nfoo bar\n5\n";
        let (series, report) = parse_with(text, &LineFilter::default());
        assert_eq!(series.len(), 1);
        assert_eq!(report.lines, 6);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.skipped[&SkipReason::Comment], 1);
        assert_eq!(report.skipped[&SkipReason::HeaderKeyword], 1);
        assert_eq!(report.skipped[&SkipReason::NotNumeric], 1);
        assert_eq!(report.skipped[&SkipReason::TooFewTokens], 1);
        assert_eq!(report.skipped[&SkipReason::Blank], 1);

        // Windows line endings: one line per \r\n, nothing skipped
        let (series, report) = parse_with("1 2\r\n3 4\r\n5 6\r\n7 8\r\n9 10\r\n", &LineFilter::default());
        assert_eq!(series.len(), 5);
        assert_eq!(report.lines, 5);
        assert_eq!(report.skipped_total(), 0);
        assert_eq!(report.skipped.get(&SkipReason::Blank), None);
    }

    #[test]
    fn test_line_splitting() {
        let split = |text: &'static str| lines(text).collect::<Vec<_>>();
        assert_eq!(split(""), Vec::<&str>::new());
        assert_eq!(split("a\r\nb"), vec!["a", "b"]);
        assert_eq!(split("a\rb\r"), vec!["a", "b"]);
        assert_eq!(split("a\r\rb"), vec!["a", "", "b"]);
        assert_eq!(split("a\r\r\n"), vec!["a", ""]);
        assert_eq!(split("a\n\nb\n"), vec!["a", "", "b"]);
        assert_eq!(split("a\u{2028}b"), vec!["a", "b"]);
    }

    #[test]
    fn test_custom_filter() {
        let filter = LineFilter::with_extra(&['@'], ["counts"]);
        let (series, _) = parse_with("@ 1 2\n3 4 counts\n5 6\n", &filter);
        assert_eq!(pairs(&series), vec![(5.0, 6.0)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }
}
