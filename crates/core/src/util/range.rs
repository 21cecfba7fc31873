use derive_more::Display;

/// A range between two floats, inclusive on both ends. Used for the valid
/// ranges of angles and for folding periodic angles back into their canonical
/// interval.
#[derive(Copy, Clone, Debug, Display, PartialEq)]
#[display(fmt = "[{}, {}]", min, max)]
pub struct NumRange {
    pub min: f64,
    pub max: f64,
}

impl NumRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Max minus min
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is in this range. Ranges are inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Force a value into this range. If it's already in the range, return
    /// that value. If it's outside the range, return the bound (lower or upper)
    /// that's closest to the value.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Fold a periodic value into `[min, max)`, where the period is the span
    /// of the range. `max` itself maps back onto `min`.
    pub fn wrap(&self, value: f64) -> f64 {
        let wrapped = (value - self.min).rem_euclid(self.span()) + self.min;
        // rem_euclid can round up to exactly the span for tiny negative inputs
        if wrapped >= self.max {
            self.min
        } else {
            wrapped
        }
    }

    /// Fold a periodic value into `[min, max]` by repeatedly shifting it by the
    /// span, the way an add-while-below/subtract-while-above loop would. Values
    /// above the range that are an exact number of spans away land on `max`,
    /// values below the range land on `min`.
    pub fn wrap_inclusive(&self, value: f64) -> f64 {
        if value > self.max {
            let wrapped = (value - self.min).rem_euclid(self.span()) + self.min;
            if wrapped == self.min {
                self.max
            } else {
                wrapped
            }
        } else if value < self.min {
            self.wrap(value)
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_span() {
        assert_approx_eq!(NumRange::new(1.0, 3.0).span(), 2.0);
    }

    #[test]
    fn test_contains() {
        let range = NumRange::new(1.0, 3.0);
        assert!(!range.contains(0.9));
        assert!(range.contains(1.0));
        assert!(range.contains(2.0));
        assert!(range.contains(3.0));
        assert!(!range.contains(3.1));
    }

    #[test]
    fn test_clamp() {
        let range = NumRange::new(1.0, 3.0);
        assert_approx_eq!(range.clamp(0.0), 1.0);
        assert_approx_eq!(range.clamp(2.0), 2.0);
        assert_approx_eq!(range.clamp(6.0), 3.0);
    }

    #[test]
    fn test_wrap() {
        let range = NumRange::new(0.0, 2.0 * PI);
        assert_eq!(range.wrap(0.0), 0.0);
        assert_eq!(range.wrap(2.0 * PI), 0.0);
        assert_approx_eq!(range.wrap(-PI / 2.0), 1.5 * PI);
        assert_approx_eq!(range.wrap(5.0 * PI), PI);
        // Tiny negatives must not round up onto the excluded upper bound
        assert!(range.wrap(-1e-300) < 2.0 * PI);
    }

    #[test]
    fn test_wrap_inclusive() {
        let range = NumRange::new(0.0, PI);
        assert_eq!(range.wrap_inclusive(PI), PI);
        assert_eq!(range.wrap_inclusive(2.0 * PI), PI);
        assert_eq!(range.wrap_inclusive(-PI), 0.0);
        assert_approx_eq!(range.wrap_inclusive(1.5 * PI), 0.5 * PI);
        assert_approx_eq!(range.wrap_inclusive(-0.25 * PI), 0.75 * PI);
        assert_approx_eq!(range.wrap_inclusive(1.0), 1.0);
    }
}
