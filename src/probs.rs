//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn cumulative(&self) -> Vec<f64>;
    fn all_non_negative(&self) -> bool;
    fn all_finite(&self) -> bool;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Rescales the slice so that its elements add up to `target`, returning the sum prior to
    /// rescaling.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        self.scale(target / sum);
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    /// Running sum of the slice. The last element of the result equals [`SliceExt::sum`].
    fn cumulative(&self) -> Vec<f64> {
        let mut running = 0.0;
        self.iter()
            .map(|&element| {
                running += element;
                running
            })
            .collect()
    }

    fn all_non_negative(&self) -> bool {
        self.iter().all(|&element| element >= 0.0)
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|element| element.is_finite())
    }
}

/// Index of the first element in an ascending `cumulative` table that is greater than or equal
/// to `random`. Ties go to the earlier element. If `random` exceeds every element (possible only
/// through floating-point drift in the table), the result is `cumulative.len()`.
#[inline]
pub fn search_sorted(cumulative: &[f64], random: f64) -> usize {
    cumulative.partition_point(|&value| value < random)
}
