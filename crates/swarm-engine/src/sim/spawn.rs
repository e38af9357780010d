use std::ops::RangeInclusive;

use crate::error::{RendererError, Result};

/// Uniform ranges for the randomized initial state of each object.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRanges {
    pub scale: RangeInclusive<f32>,
    /// Applied independently to both offset components.
    pub offset: RangeInclusive<f32>,
    /// Applied independently to both velocity components, units per second.
    pub velocity: RangeInclusive<f32>,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            scale: 0.2..=0.5,
            offset: -0.9..=0.9,
            velocity: -0.1..=0.1,
        }
    }
}

impl SpawnRanges {
    pub fn validate(&self) -> Result<()> {
        check_range("scale", &self.scale)?;
        check_range("offset", &self.offset)?;
        check_range("velocity", &self.velocity)
    }
}

fn check_range(name: &str, range: &RangeInclusive<f32>) -> Result<()> {
    let (lo, hi) = (*range.start(), *range.end());
    // Uniform sampling needs a finite width, not just finite bounds.
    if lo.is_finite() && hi.is_finite() && lo <= hi && (hi - lo).is_finite() {
        Ok(())
    } else {
        Err(RendererError::InvalidConfig(format!(
            "spawn {name} range {lo}..={hi} is empty or not finite"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SpawnRanges::default().validate().is_ok());
    }

    #[test]
    fn empty_range_is_rejected() {
        let ranges = SpawnRanges {
            scale: 0.5..=0.2,
            ..Default::default()
        };
        let err = ranges.validate().unwrap_err();
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn degenerate_range_is_allowed() {
        let ranges = SpawnRanges {
            velocity: 0.0..=0.0,
            ..Default::default()
        };
        assert!(ranges.validate().is_ok());
    }

    #[test]
    fn infinite_bound_is_rejected() {
        let ranges = SpawnRanges {
            offset: f32::NEG_INFINITY..=0.0,
            ..Default::default()
        };
        assert!(ranges.validate().is_err());
    }

    #[test]
    fn range_wider_than_f32_is_rejected() {
        let ranges = SpawnRanges {
            offset: -f32::MAX..=f32::MAX,
            ..Default::default()
        };
        let err = ranges.validate().unwrap_err();
        assert!(err.to_string().contains("offset"));
    }
}
