//! Scan aggregation types.

use std::collections::HashMap;

use super::FocalLength;

/// Occurrence counts per focal length.
///
/// Keys are remembered in the order they were first recorded, which is the
/// tie-break for [`FocalCounts::most_common`]. Every stored count is at
/// least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocalCounts {
    first_seen: Vec<FocalLength>,
    counts: HashMap<FocalLength, usize>,
}

impl FocalCounts {
    /// Creates an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one image with the given focal length.
    pub fn record(&mut self, focal_length: FocalLength) {
        self.add(focal_length, 1);
    }

    fn add(&mut self, focal_length: FocalLength, count: usize) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(focal_length).or_insert_with(|| {
            self.first_seen.push(focal_length);
            0
        });
        *entry += count;
    }

    /// Returns the count for a focal length, if it was seen.
    #[must_use]
    pub fn get(&self, focal_length: FocalLength) -> Option<usize> {
        self.counts.get(&focal_length).copied()
    }

    /// Number of distinct focal lengths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterates `(focal length, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (FocalLength, usize)> + '_ {
        self.first_seen
            .iter()
            .map(|focal| (*focal, self.counts.get(focal).copied().unwrap_or_default()))
    }

    /// Returns `(focal length, count)` pairs sorted ascending by focal length.
    #[must_use]
    pub fn sorted(&self) -> Vec<(FocalLength, usize)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by_key(|(focal, _)| *focal);
        pairs
    }

    /// Returns the most frequent focal length and its count.
    ///
    /// When several focal lengths share the maximum count, the one recorded
    /// first wins.
    #[must_use]
    pub fn most_common(&self) -> Option<(FocalLength, usize)> {
        self.iter()
            .fold(None, |best: Option<(FocalLength, usize)>, (focal, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((focal, count)),
            })
    }
}

/// Builds a tally from `(focal length, count)` pairs; repeated keys are
/// summed and zero counts are ignored.
impl FromIterator<(FocalLength, usize)> for FocalCounts {
    fn from_iter<I: IntoIterator<Item = (FocalLength, usize)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (focal, count) in iter {
            counts.add(focal, count);
        }
        counts
    }
}

/// Aggregated outcome of scanning one batch of directories.
///
/// `images_with_focal + missing_exif == total_images` and the focal counts
/// sum to `images_with_focal`; the constructor derives both totals so the
/// invariant cannot be broken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    focal_counts: FocalCounts,
    missing_exif: usize,
}

impl ScanResult {
    /// Creates a scan result from resolved counts and the number of images
    /// without a resolvable focal length.
    #[must_use]
    pub const fn new(focal_counts: FocalCounts, missing_exif: usize) -> Self {
        Self {
            focal_counts,
            missing_exif,
        }
    }

    /// Images considered (matching the extension filter).
    #[must_use]
    pub fn total_images(&self) -> usize {
        self.images_with_focal() + self.missing_exif
    }

    /// Images that yielded a focal length.
    #[must_use]
    pub fn images_with_focal(&self) -> usize {
        self.focal_counts.total()
    }

    /// Images with no resolvable focal length.
    #[must_use]
    pub const fn missing_exif(&self) -> usize {
        self.missing_exif
    }

    #[must_use]
    pub const fn focal_counts(&self) -> &FocalCounts {
        &self.focal_counts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn mm(value: f64) -> FocalLength {
        FocalLength::new(value).unwrap()
    }

    #[test]
    fn test_record_merges_equal_values() {
        let mut counts = FocalCounts::new();
        counts.record(mm(50.0));
        counts.record(FocalLength::from(50u16));
        counts.record(mm(35.0));

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(mm(50.0)), Some(2));
        assert_eq!(counts.get(mm(35.0)), Some(1));
        assert_eq!(counts.get(mm(85.0)), None);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_sorted_is_ascending() {
        let counts: FocalCounts = [(mm(24.0), 3), (mm(50.0), 7), (mm(35.0), 2)]
            .into_iter()
            .collect();

        let sorted = counts.sorted();
        assert_eq!(sorted, vec![(mm(24.0), 3), (mm(35.0), 2), (mm(50.0), 7)]);
    }

    #[test]
    fn test_iter_keeps_first_seen_order() {
        let counts: FocalCounts = [(mm(85.0), 1), (mm(24.0), 1), (mm(85.0), 1)]
            .into_iter()
            .collect();

        let order: Vec<_> = counts.iter().collect();
        assert_eq!(order, vec![(mm(85.0), 2), (mm(24.0), 1)]);
    }

    #[test]
    fn test_most_common() {
        let counts: FocalCounts = [(mm(24.0), 3), (mm(50.0), 7), (mm(35.0), 2)]
            .into_iter()
            .collect();
        assert_eq!(counts.most_common(), Some((mm(50.0), 7)));
    }

    #[test]
    fn test_most_common_tie_prefers_first_seen() {
        let counts: FocalCounts = [(mm(85.0), 4), (mm(24.0), 4), (mm(50.0), 1)]
            .into_iter()
            .collect();
        assert_eq!(counts.most_common(), Some((mm(85.0), 4)));
    }

    #[test]
    fn test_most_common_empty() {
        assert_eq!(FocalCounts::new().most_common(), None);
    }

    #[test]
    fn test_zero_counts_ignored() {
        let counts: FocalCounts = [(mm(24.0), 0)].into_iter().collect();
        assert!(counts.is_empty());
    }

    #[test]
    fn test_scan_result_totals() {
        let counts: FocalCounts = [(mm(24.0), 3), (mm(50.0), 7)].into_iter().collect();
        let result = ScanResult::new(counts, 4);

        assert_eq!(result.images_with_focal(), 10);
        assert_eq!(result.missing_exif(), 4);
        assert_eq!(result.total_images(), 14);
        assert_eq!(result.focal_counts().len(), 2);
    }
}
