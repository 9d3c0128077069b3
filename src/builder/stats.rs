//! Document-wide layout statistics.
//!
//! Histograms are filled while lines are built and consumed once when the
//! document is finished.

use std::collections::{BTreeMap, HashMap};

use crate::model::{FontKey, LayoutMetrics, Line};

/// Margin assumed above and below the content area.
pub const VERTICAL_MARGIN: f32 = 40.0;

/// Margin positions are bucketed to this many units.
const MARGIN_BUCKET: i32 = 4;

/// Tie-breaking preference for [`Histogram::plurality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Ties go to the smaller key, and a smaller runner-up within ten
    /// percentage points of the winner takes over.
    Smaller,
    /// Ties go to the larger key.
    Larger,
}

/// Frequency map from a key to its total weight.
#[derive(Debug, Clone)]
pub struct Histogram<K> {
    buckets: BTreeMap<K, usize>,
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> Histogram<K> {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation.
    pub fn add(&mut self, key: K) {
        self.add_weighted(key, 1);
    }

    /// Add an observation with a weight.
    pub fn add_weighted(&mut self, key: K, weight: usize) {
        *self.buckets.entry(key).or_insert(0) += weight;
    }

    /// Total weight.
    pub fn total(&self) -> usize {
        self.buckets.values().sum()
    }

    /// Check if the histogram has no observations.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Remove all observations.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Key with the highest weight, adjusted by `bias`.
    pub fn plurality(&self, bias: Bias) -> Option<K> {
        let mut ranked: Vec<(K, usize)> = self.buckets.iter().map(|(k, w)| (*k, *w)).collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1).then_with(|| match bias {
                Bias::Smaller => a.0.cmp(&b.0),
                Bias::Larger => b.0.cmp(&a.0),
            })
        });

        let (winner, winner_weight) = *ranked.first()?;
        if let (Bias::Smaller, Some(&(runner_up, runner_up_weight))) = (bias, ranked.get(1)) {
            let total = self.total();
            let diff = percentage(winner_weight, total).abs_diff(percentage(runner_up_weight, total));
            if runner_up < winner && diff < 10 {
                return Some(runner_up);
            }
        }
        Some(winner)
    }
}

fn percentage(value: usize, total: usize) -> u64 {
    (value as f64 * 100.0 / total as f64).round() as u64
}

/// Round down to the margin bucket.
pub fn quantize_down(value: f32) -> i32 {
    let n = value.round() as i32;
    n - n % MARGIN_BUCKET
}

/// Round up past the margin bucket.
pub fn quantize_up(value: f32) -> i32 {
    let n = value.round() as i32;
    n + MARGIN_BUCKET - n % MARGIN_BUCKET
}

/// Font and margin histograms for one document.
#[derive(Debug, Clone, Default)]
pub struct LayoutStatistics {
    fonts: Histogram<FontKey>,
    font_sizes: HashMap<FontKey, f32>,
    left_margins: Histogram<i32>,
    right_margins: Histogram<i32>,
}

impl LayoutStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a kept line on a page of the given width.
    pub fn record_line(&mut self, line: &Line, page_width: f32) {
        self.fonts.add(line.font_key);
        self.font_sizes.entry(line.font_key).or_insert(line.font_size);

        let left = quantize_down(line.first_x);
        if (left as f32) < page_width * 0.25 {
            self.left_margins.add(left);
        }
        let right = quantize_up(line.last_x);
        if (right as f32) > page_width * 0.7 {
            self.right_margins.add(right);
        }
    }

    /// Remove all observations.
    pub fn clear(&mut self) {
        self.fonts.clear();
        self.font_sizes.clear();
        self.left_margins.clear();
        self.right_margins.clear();
    }

    /// Final metrics, given the width of the last page seen.
    ///
    /// Without any right-edge observation the right margin is 0.
    pub fn metrics(&self, last_page_width: f32) -> LayoutMetrics {
        let font = self.fonts.plurality(Bias::Smaller).unwrap_or_default();
        let size = self.font_sizes.get(&font).copied().unwrap_or_default();
        let left = self.left_margins.plurality(Bias::Smaller).unwrap_or_default();
        let right = self.right_margins.plurality(Bias::Larger);

        log::debug!(
            "Content font {:?} ({}pt), left edge {}, right edge {:?}",
            font,
            size,
            left,
            right
        );

        LayoutMetrics::with_margins(
            left as f32,
            right.map_or(0.0, |right| last_page_width - right as f32),
            VERTICAL_MARGIN,
            VERTICAL_MARGIN,
        )
        .with_content_font(font, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(entries: &[(i32, usize)]) -> Histogram<i32> {
        let mut histogram = Histogram::new();
        for &(key, weight) in entries {
            histogram.add_weighted(key, weight);
        }
        histogram
    }

    #[test]
    fn test_plurality_near_tie_prefers_smaller() {
        let h = histogram(&[(40, 60), (44, 55)]);
        assert_eq!(h.plurality(Bias::Smaller), Some(40));

        let h = histogram(&[(40, 55), (44, 60)]);
        assert_eq!(h.plurality(Bias::Smaller), Some(40));
        assert_eq!(h.plurality(Bias::Larger), Some(44));
    }

    #[test]
    fn test_plurality_clear_winner() {
        let h = histogram(&[(40, 60), (44, 20)]);
        assert_eq!(h.plurality(Bias::Smaller), Some(40));

        let h = histogram(&[(40, 20), (44, 60)]);
        assert_eq!(h.plurality(Bias::Smaller), Some(44));
        assert_eq!(h.plurality(Bias::Larger), Some(44));
    }

    #[test]
    fn test_plurality_ties() {
        let h = histogram(&[(540, 10), (548, 10)]);
        assert_eq!(h.plurality(Bias::Larger), Some(548));
        assert_eq!(h.plurality(Bias::Smaller), Some(540));
    }

    #[test]
    fn test_plurality_empty() {
        assert_eq!(Histogram::<i32>::new().plurality(Bias::Smaller), None);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize_down(73.4), 72);
        assert_eq!(quantize_down(72.0), 72);
        assert_eq!(quantize_up(537.0), 540);
        assert_eq!(quantize_up(540.0), 544);
    }

    #[test]
    fn test_metrics() {
        let mut stats = LayoutStatistics::new();
        for _ in 0..3 {
            stats.record_line(&Line::new("body", 10.0, 72.0, 537.0, 100.0), 612.0);
        }
        stats.record_line(&Line::new("Title", 18.0, 200.0, 400.0, 60.0), 612.0);

        let metrics = stats.metrics(612.0);
        assert_eq!(metrics.left_margin, 72.0);
        assert_eq!(metrics.right_margin, 72.0);
        assert_eq!(metrics.top_margin, 40.0);
        assert_eq!(metrics.content_font_size, 10.0);
        assert_eq!(metrics.content_font_key, FontKey::from_size(10.0));
    }

    #[test]
    fn test_metrics_without_edges() {
        let mut stats = LayoutStatistics::new();
        stats.record_line(&Line::new("Title", 18.0, 250.0, 286.0, 100.0), 612.0);
        let metrics = stats.metrics(612.0);
        assert_eq!(metrics.left_margin, 0.0);
        assert_eq!(metrics.right_margin, 0.0);
    }
}
