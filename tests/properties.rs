use proptest::prelude::*;

use rusty_lattice::data::filter::{LineMarker, LINE_RULES};
use rusty_lattice::data::parser::lines;
use rusty_lattice::{detect_peaks, estimate_magnetic_properties, parse, Series};

fn pairs(series: &Series) -> Vec<(f64, f64)> {
    series.iter().map(|s| (s.x, s.y)).collect()
}

// ---------------------------------------------------------------------------
// Fixed examples
// ---------------------------------------------------------------------------

#[test]
fn parse_skips_header_and_accepts_mixed_delimiters() {
    assert_eq!(
        pairs(&parse("# header\n1.0 2.0\n2.0,4.0;\n")),
        vec![(1.0, 2.0), (2.0, 4.0)]
    );
}

#[test]
fn triangle_has_one_peak() {
    let series = Series::from_pairs([(0.0, 0.0), (1.0, 1.0), (2.0, 5.0), (3.0, 1.0), (4.0, 0.0)]);
    let peaks = detect_peaks(&series);
    assert_eq!(peaks.len(), 1);
    assert_eq!((peaks[0].angle, peaks[0].intensity), (2.0, 5.0));
}

#[test]
fn straight_line_through_origin() {
    let series = Series::from_pairs([(-2.0, -4.0), (-1.0, -2.0), (0.0, 0.0), (1.0, 2.0), (2.0, 4.0)]);
    let props = estimate_magnetic_properties(&series);
    assert_eq!((props.ms, props.mr, props.hc), (4.0, 0.0, 0.0));
}

#[test]
fn realistic_instrument_file() {
    let text = "\
; Bruker export
*RANGE 1
Scan parameters: step 0.02
2-Theta,Intensity,ESD
10.00,12.0,3.4
10.02,15.0,3.8
% calibrated
10.04 , 90.0 , 9.4
10.06\t13.0\t3.6
10.08;11.0;3.3
END
";
    let series = parse(text);
    assert_eq!(series.xs(), vec![10.0, 10.02, 10.04, 10.06, 10.08]);
    assert_eq!(series.ys(), vec![12.0, 15.0, 90.0, 13.0, 11.0]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn number() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1e6f64..1e6).prop_map(|v| v.to_string()),
        (-1e3f64..1e3).prop_map(|v| format!("{v:e}")),
        Just("NaN".to_string()),
        Just("abc".to_string()),
    ]
}

/// A line that is either data, noise, a comment, or a header.
fn any_line() -> impl Strategy<Value = String> {
    let delim = prop::sample::select(vec![" ", "\t", ",", ";", " , "]);
    let data = (number(), delim, number()).prop_map(|(a, d, b)| format!("{a}{d}{b}"));
    let marker = prop::sample::select(vec!['#', ';', '*', '!', '%']);
    let comment = (marker, "[0-9 .]{0,10}").prop_map(|(m, rest)| format!("{m}{rest}"));
    let keyword = prop::sample::select(vec![
        "theta", "ANGLE", "Field", "moment", "Temp", "intensity", "header", "scan",
    ]);
    let header = ((-10.0f64..10.0), keyword).prop_map(|(v, k)| format!("{v} {v} {k}"));
    prop_oneof![4 => data, 1 => comment, 1 => header, 1 => "[ a-z0-9,.;-]{0,12}"]
}

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(any_line(), 0..40)
}

proptest! {
    #[test]
    fn parse_never_exceeds_line_count(lines_in in lines_strategy()) {
        let text = lines_in.join("\n");
        let series = parse(&text);
        prop_assert!(series.len() <= lines(&text).count());
    }

    #[test]
    fn parse_never_keeps_marked_lines(lines_in in lines_strategy()) {
        // Parse each line alone: whatever survives must be unmarked.
        for line in &lines_in {
            if parse(line).is_empty() {
                continue;
            }
            let trimmed = line.trim();
            let lowered = trimmed.to_lowercase();
            for (marker, _) in LINE_RULES {
                let hit = match marker {
                    LineMarker::Leading(c) => trimmed.starts_with(*c),
                    LineMarker::Contains(k) => lowered.contains(&**k),
                };
                prop_assert!(!hit, "kept marked line {:?}", line);
            }
        }
    }

    #[test]
    fn parse_preserves_order_and_finiteness(lines_in in lines_strategy()) {
        let text = lines_in.join("\n");
        let whole = parse(&text);
        let piecewise: Vec<(f64, f64)> = lines_in.iter().flat_map(|l| pairs(&parse(l))).collect();
        prop_assert_eq!(pairs(&whole), piecewise);
        prop_assert!(whole.iter().all(|s| s.x.is_finite() && s.y.is_finite()));
    }

    #[test]
    fn peaks_respect_separation(y in prop::collection::vec(0.0f64..1000.0, 5..300)) {
        let series = Series::from_pairs(y.iter().enumerate().map(|(i, &v)| (i as f64, v)));
        let peaks = detect_peaks(&series);
        for pair in peaks.windows(2) {
            prop_assert!(pair[1].index >= pair[0].index + 10);
        }
        let max = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for p in &peaks {
            prop_assert!(p.prominence >= 0.02 * max);
            prop_assert!(y[p.index - 1] < p.intensity && p.intensity > y[p.index + 1]);
        }
    }

    #[test]
    fn features_are_idempotent(
        samples in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 5..100)
    ) {
        let series = Series::from_pairs(samples);
        prop_assert_eq!(detect_peaks(&series), detect_peaks(&series));
        let a = estimate_magnetic_properties(&series);
        let b = estimate_magnetic_properties(&series);
        prop_assert_eq!(a, b);
        prop_assert!(a.ms >= 0.0 && a.mr >= 0.0 && a.hc >= 0.0);
    }

    #[test]
    fn positive_field_means_no_remanence(
        samples in prop::collection::vec((0.0f64..100.0, -100.0f64..100.0), 5..100)
    ) {
        let series = Series::from_pairs(samples);
        prop_assert_eq!(estimate_magnetic_properties(&series).mr, 0.0);
    }
}
