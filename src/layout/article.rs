//! Article regions, duplicate suppression and diacritic merging.
//!
//! A page with `n` beads is split into `1 + 2n` regions. Glyphs inside bead
//! `i` belong to region `2i + 1`; glyphs outside every bead fall back to the
//! region in front of the first bead they precede, and otherwise to the
//! last region.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use ordered_float::OrderedFloat;

use super::{BeadRect, Glyph, GlyphPage};

type Positions = BTreeMap<OrderedFloat<f32>, BTreeSet<OrderedFloat<f32>>>;

/// Per-character position index used to drop glyphs painted twice at the
/// same spot.
#[derive(Debug, Clone, Default)]
pub struct OverlapIndex {
    by_text: HashMap<String, Positions>,
}

impl OverlapIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all recorded positions.
    pub fn clear(&mut self) {
        self.by_text.clear();
    }

    /// Number of distinct characters indexed.
    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    /// Check if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }

    /// Check whether `glyph` duplicates an indexed glyph; if not, index it.
    ///
    /// Tolerance in both axes is a third of the glyph's per-character width.
    /// Characterless glyphs are never duplicates.
    pub fn is_duplicate(&mut self, glyph: &Glyph) -> bool {
        let Some(text) = glyph.rendered_text() else {
            return false;
        };
        let tolerance = glyph.width / glyph.char_count() as f32 / 3.0;
        let tolerance = if tolerance.is_finite() { tolerance.max(0.0) } else { 0.0 };
        let (x, y) = (OrderedFloat(glyph.x), OrderedFloat(glyph.y));

        let positions = self.by_text.entry(text.to_string()).or_default();
        let found = positions
            .range(OrderedFloat(glyph.x - tolerance)..=OrderedFloat(glyph.x + tolerance))
            .any(|(_, ys)| {
                ys.range(OrderedFloat(glyph.y - tolerance)..=OrderedFloat(glyph.y + tolerance))
                    .next()
                    .is_some()
            });
        if !found {
            positions.entry(x).or_default().insert(y);
        }
        found
    }
}

/// Region index for a point, given the page's beads.
pub fn region_index(beads: &[BeadRect], x: f32, y: f32) -> usize {
    let mut left_and_above = None;
    let mut left = None;
    let mut above = None;
    for (i, bead) in beads.iter().enumerate() {
        if bead.contains(x, y) {
            return i * 2 + 1;
        }
        let is_left = x < bead.x0;
        let is_above = y < bead.y0;
        if is_left && is_above {
            left_and_above.get_or_insert(i * 2);
        } else if is_left {
            left.get_or_insert(i * 2);
        } else if is_above {
            above.get_or_insert(i * 2);
        }
    }
    left_and_above
        .or(left)
        .or(above)
        .unwrap_or(beads.len() * 2)
}

/// Split a page's glyphs into article regions.
///
/// Glyphs are sanitized, optionally checked against `overlap`, assigned to a
/// region and merged with the previous glyph of that region when one of the
/// two is a diacritic sitting on the other.
pub fn partition(
    page: &GlyphPage,
    separate_by_beads: bool,
    mut overlap: Option<&mut OverlapIndex>,
) -> Vec<Vec<Glyph>> {
    let beads: Vec<BeadRect> = if separate_by_beads {
        page.beads.iter().map(|b| b.sanitized()).collect()
    } else {
        Vec::new()
    };
    let mut regions: Vec<Vec<Glyph>> = vec![Vec::new(); 1 + beads.len() * 2];
    let mut suppressed = 0usize;

    for glyph in &page.glyphs {
        let glyph = glyph.clone().sanitized();
        if let Some(index) = overlap.as_deref_mut() {
            if index.is_duplicate(&glyph) {
                suppressed += 1;
                continue;
            }
        }

        let region = &mut regions[region_index(&beads, glyph.x, glyph.y)];
        match region.last_mut() {
            Some(previous) if glyph.is_diacritic && previous.contains(&glyph) => {
                previous.merge_diacritic(&glyph);
            }
            Some(previous) if previous.is_diacritic && glyph.contains(previous) => {
                let mut glyph = glyph;
                glyph.merge_diacritic(previous);
                *previous = glyph;
            }
            _ => region.push(glyph),
        }
    }

    if suppressed > 0 {
        log::debug!("Suppressed {} duplicate glyphs", suppressed);
    }
    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str, x: f32, y: f32) -> Glyph {
        Glyph::new(text, x, y, 6.0, 10.0)
    }

    #[test]
    fn test_region_index_inside_bead() {
        let beads = [
            BeadRect::new(50.0, 50.0, 290.0, 740.0),
            BeadRect::new(310.0, 50.0, 560.0, 740.0),
        ];
        assert_eq!(region_index(&beads, 100.0, 100.0), 1);
        assert_eq!(region_index(&beads, 400.0, 100.0), 3);
    }

    #[test]
    fn test_region_index_fallbacks() {
        let beads = [BeadRect::new(50.0, 50.0, 290.0, 740.0)];
        // Left of and above the bead.
        assert_eq!(region_index(&beads, 10.0, 10.0), 0);
        // Only left of the bead.
        assert_eq!(region_index(&beads, 10.0, 100.0), 0);
        // Only above the bead.
        assert_eq!(region_index(&beads, 400.0, 10.0), 0);
        // Right of and below: catch-all.
        assert_eq!(region_index(&beads, 400.0, 760.0), 2);
        assert_eq!(region_index(&[], 400.0, 760.0), 0);
    }

    #[test]
    fn test_region_index_prefers_left_over_above() {
        let beads = [
            BeadRect::new(50.0, 400.0, 290.0, 740.0),
            BeadRect::new(300.0, 50.0, 560.0, 380.0),
        ];
        // Above the first bead, left of the second.
        assert_eq!(region_index(&beads, 295.0, 200.0), 2);
        // Above both: the first bead wins.
        assert_eq!(region_index(&beads, 580.0, 20.0), 0);
    }

    #[test]
    fn test_overlap_index_suppresses_duplicates() {
        let mut index = OverlapIndex::new();
        assert!(!index.is_duplicate(&glyph("B", 100.0, 100.0)));
        assert!(index.is_duplicate(&glyph("B", 100.5, 100.5)));
        assert!(!index.is_duplicate(&glyph("B", 106.0, 100.0)));
        assert!(!index.is_duplicate(&glyph("C", 100.0, 100.0)));
        assert!(!index.is_duplicate(&Glyph::spacer(100.0, 100.0, 6.0, 10.0)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_partition_without_beads() {
        let mut page = GlyphPage::new(612.0, 792.0).with_bead(BeadRect::new(0.0, 0.0, 10.0, 10.0));
        page.push(glyph("a", 100.0, 100.0));
        page.push(glyph("a", 100.0, 100.0));
        let regions = partition(&page, false, None);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].len(), 2);

        let mut index = OverlapIndex::new();
        let regions = partition(&page, true, Some(&mut index));
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[2].len(), 1);
    }

    #[test]
    fn test_partition_merges_diacritic() {
        let mut page = GlyphPage::new(612.0, 792.0);
        page.push(glyph("u", 100.0, 100.0));
        page.push(Glyph::new("\u{00A8}", 101.0, 98.0, 4.0, 3.0).diacritic());
        page.push(glyph("n", 106.0, 100.0));
        let regions = partition(&page, true, None);
        let texts: Vec<_> = regions[0].iter().filter_map(|g| g.text.clone()).collect();
        assert_eq!(texts, vec!["\u{00FC}", "n"]);
    }
}
