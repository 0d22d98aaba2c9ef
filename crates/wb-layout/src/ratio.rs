// ABOUTME: Split ratio arithmetic and bounds enforcement.
// ABOUTME: Converts divider pixel positions into clamped first-pane fractions.

pub const DEFAULT_RATIO: f32 = 0.5;
pub const DEFAULT_MIN_RATIO: f32 = 0.05;
pub const DEFAULT_MAX_RATIO: f32 = 0.95;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid ratio bounds [{min}, {max}]: need 0 <= min <= max <= 1")]
    InvalidBounds { min: f32, max: f32 },
}

/// Closed interval a split ratio must stay inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioBounds {
    min: f32,
    max: f32,
}

impl RatioBounds {
    pub fn new(min: f32, max: f32) -> Result<Self, LayoutError> {
        let valid = min.is_finite() && max.is_finite() && 0.0 <= min && min <= max && max <= 1.0;
        if !valid {
            return Err(LayoutError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, ratio: f32) -> bool {
        (self.min..=self.max).contains(&ratio)
    }

    /// Snap a ratio into bounds. NaN lands on the midpoint.
    pub fn clamp(&self, ratio: f32) -> f32 {
        if ratio.is_nan() {
            return self.midpoint();
        }
        ratio.clamp(self.min, self.max)
    }

    /// Convert an absolute divider position into a clamped ratio.
    ///
    /// Returns `None` when the extent is not a usable length or the position
    /// is not finite; there is no meaningful ratio in either case.
    pub fn compute_ratio(&self, container_extent: f32, divider_position: f32) -> Option<f32> {
        if !container_extent.is_finite() || container_extent <= 0.0 || !divider_position.is_finite()
        {
            return None;
        }
        Some(self.clamp(divider_position / container_extent))
    }
}

impl Default for RatioBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_RATIO,
            max: DEFAULT_MAX_RATIO,
        }
    }
}

/// Clamp against the default bounds
pub fn clamp(ratio: f32) -> f32 {
    RatioBounds::default().clamp(ratio)
}

/// Position-to-ratio conversion against the default bounds
pub fn compute_ratio(container_extent: f32, divider_position: f32) -> Option<f32> {
    RatioBounds::default().compute_ratio(container_extent, divider_position)
}
