use std::collections::BTreeSet;

use crate::config::PeakConfig;
use crate::data::model::{Peak, Series};

// ---------------------------------------------------------------------------
// Peak detection
// ---------------------------------------------------------------------------

/// Find diffraction peaks with the default thresholds
/// (prominence ≥ 2 % of the maximum intensity, 10 samples apart).
pub fn detect_peaks(series: &Series) -> Vec<Peak> {
    detect_peaks_with(series, &PeakConfig::default())
}

/// Find strict local maxima that are prominent enough and far enough apart.
///
/// Peaks come back in series order. Separation is enforced greedily from
/// the most intense peak down; every kept peak suppresses the candidates
/// closer than `min_separation` indices.
pub fn detect_peaks_with(series: &Series, config: &PeakConfig) -> Vec<Peak> {
    let y = series.ys();
    if y.len() < 3 {
        return Vec::new();
    }

    let max_intensity = y.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let threshold = config.prominence_fraction * max_intensity;

    let candidates: Vec<Peak> = local_maxima(&y)
        .filter_map(|i| {
            let prominence = prominence(&y, i);
            (prominence >= threshold).then(|| Peak {
                index: i,
                angle: series.samples()[i].x,
                intensity: y[i],
                prominence,
            })
        })
        .collect();

    let kept = enforce_separation(&candidates, config.min_separation);
    log::debug!(
        "{} local maxima above prominence {threshold:.4}, {} after separation",
        candidates.len(),
        kept.len()
    );
    kept
}

/// Indices `i` with `y[i-1] < y[i] > y[i+1]`. Plateaus never qualify.
fn local_maxima(y: &[f64]) -> impl Iterator<Item = usize> + '_ {
    (1..y.len().saturating_sub(1)).filter(move |&i| y[i] > y[i - 1] && y[i] > y[i + 1])
}

/// Drop from `y[peak]` to the higher of its two bases.
///
/// Each base is the lowest sample between the peak and the nearest sample
/// at least as high as the peak on that side, or the series end.
fn prominence(y: &[f64], peak: usize) -> f64 {
    let height = y[peak];

    let mut left_base = height;
    for &v in y[..peak].iter().rev() {
        if v >= height {
            break;
        }
        left_base = left_base.min(v);
    }

    let mut right_base = height;
    for &v in &y[peak + 1..] {
        if v >= height {
            break;
        }
        right_base = right_base.min(v);
    }

    height - left_base.max(right_base)
}

/// Greedy distance filter over `candidates` (ascending index order).
fn enforce_separation(candidates: &[Peak], min_separation: usize) -> Vec<Peak> {
    if min_separation <= 1 {
        return candidates.to_vec();
    }

    // Highest intensity first; equal heights favour the later index.
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .intensity
            .total_cmp(&candidates[a].intensity)
            .then(b.cmp(&a))
    });

    let mut suppressed: BTreeSet<usize> = BTreeSet::new();
    let mut kept: BTreeSet<usize> = BTreeSet::new();

    for &slot in &order {
        if suppressed.contains(&slot) {
            continue;
        }
        kept.insert(slot);
        let index = candidates[slot].index;

        // Candidates are sorted by index, so neighbours are contiguous slots.
        for (other, peak) in candidates.iter().enumerate().skip(slot + 1) {
            if peak.index - index >= min_separation {
                break;
            }
            suppressed.insert(other);
        }
        for (other, peak) in candidates[..slot].iter().enumerate().rev() {
            if index - peak.index >= min_separation {
                break;
            }
            suppressed.insert(other);
        }
    }

    kept.into_iter().map(|slot| candidates[slot]).collect()
}
