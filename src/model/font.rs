//! Font identity and dominant-font voting.

use serde::{Deserialize, Serialize};

const SIZE_FACTOR: f64 = 1_000_000.0;
const CAP_HEIGHT_FACTOR: f64 = 100.0;

/// Composite font identity.
///
/// Packs `size * 1_000_000 + cap_height * 100 + italic_angle` into one
/// integer so that two fonts with the same point size but different shapes
/// (cap height, slant) vote as different fonts. Ordering follows the point
/// size first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FontKey(pub i64);

impl FontKey {
    /// Build a key from font metrics. Non-finite metrics give the zero key.
    pub fn new(font_size: f32, cap_height: f32, italic_angle: f32) -> Self {
        let raw = f64::from(font_size) * SIZE_FACTOR
            + f64::from(cap_height) * CAP_HEIGHT_FACTOR
            + f64::from(italic_angle);
        if raw.is_finite() {
            FontKey(raw.round() as i64)
        } else {
            FontKey(0)
        }
    }

    /// Build a key from a point size alone.
    pub fn from_size(font_size: f32) -> Self {
        Self::new(font_size, 0.0, 0.0)
    }

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// Weighted Boyer–Moore majority scan over font keys.
///
/// Starts with the zero key and a zero count. A vote for the candidate adds
/// its weight, any other vote subtracts it; when the count drops below zero
/// the voter becomes the candidate and keeps the excess as its count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote {
    candidate: FontKey,
    size: f32,
    count: i64,
}

impl MajorityVote {
    /// Create an empty vote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote for `key` (with point size `size`) weighted by `weight`.
    pub fn push(&mut self, key: FontKey, size: f32, weight: usize) {
        let weight = weight as i64;
        if key == self.candidate {
            self.count += weight;
        } else {
            self.count -= weight;
            if self.count < 0 {
                self.candidate = key;
                self.size = size;
                self.count = -self.count;
            }
        }
    }

    /// Winning key.
    pub fn key(&self) -> FontKey {
        self.candidate
    }

    /// Point size of the winning key.
    pub fn size(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(sizes: &[f32]) -> f32 {
        let mut vote = MajorityVote::new();
        for &size in sizes {
            vote.push(FontKey::from_size(size), size, 1);
        }
        vote.size()
    }

    #[test]
    fn test_majority_prefers_leading_run() {
        assert_eq!(vote(&[10.0, 10.0, 10.0, 12.0, 12.0]), 10.0);
    }

    #[test]
    fn test_majority_swaps_candidate() {
        assert_eq!(vote(&[10.0, 12.0, 12.0, 12.0]), 12.0);
    }

    #[test]
    fn test_majority_weighted() {
        let mut vote = MajorityVote::new();
        vote.push(FontKey::from_size(9.0), 9.0, 2);
        vote.push(FontKey::from_size(14.0), 14.0, 10);
        assert_eq!(vote.key(), FontKey::from_size(14.0));
    }

    #[test]
    fn test_font_key_disambiguates_shape() {
        let upright = FontKey::new(10.0, 700.0, 0.0);
        let italic = FontKey::new(10.0, 700.0, -12.0);
        assert_ne!(upright, italic);
        assert!(FontKey::from_size(12.0) > upright);
        assert_eq!(FontKey::new(f32::NAN, 0.0, 0.0), FontKey(0));
    }
}
