//! Angular limits of a joint (hard mechanical stops)

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    /// Lower limit, degrees
    pub from: f64,

    /// Upper limit, degrees. Never less than `from`.
    pub to: f64,
}

impl Constraints {
    /// Creates the limits. If given in the wrong order, they are swapped.
    pub fn new(from: f64, to: f64) -> Self {
        if from <= to {
            Constraints { from, to }
        } else {
            Constraints { from: to, to: from }
        }
    }

    /// True if the angle lies within the limits, boundaries included.
    pub fn compliant(&self, angle: f64) -> bool {
        angle >= self.from && angle <= self.to
    }

    /// True if the angle touches or passes any of the limits.
    pub fn at_limit(&self, angle: f64) -> bool {
        angle <= self.from || angle >= self.to
    }

    /// Pins the angle exactly to the limit it crosses.
    pub fn clamp(&self, angle: f64) -> f64 {
        if angle <= self.from {
            self.from
        } else if angle >= self.to {
            self.to
        } else {
            angle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_limits() {
        let limits = Constraints::new(90.0, -90.0);
        assert_eq!(limits.from, -90.0);
        assert_eq!(limits.to, 90.0);
    }

    #[test]
    fn test_compliant_boundaries_included() {
        let limits = Constraints::new(0.0, 150.0);
        assert!(limits.compliant(0.0));
        assert!(limits.compliant(150.0));
        assert!(limits.compliant(75.0));
        assert!(!limits.compliant(-0.001));
        assert!(!limits.compliant(150.001));
    }

    #[test]
    fn test_at_limit() {
        let limits = Constraints::new(-100.0, 100.0);
        assert!(limits.at_limit(-100.0));
        assert!(limits.at_limit(100.0));
        assert!(limits.at_limit(120.0));
        assert!(!limits.at_limit(99.9));
    }

    #[test]
    fn test_clamp() {
        let limits = Constraints::new(-180.0, 0.0);
        assert_eq!(limits.clamp(10.0), 0.0);
        assert_eq!(limits.clamp(-190.0), -180.0);
        assert_eq!(limits.clamp(-45.0), -45.0);
    }
}
