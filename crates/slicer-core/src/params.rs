//! Slicing parameters.

use slicer_spatial::SplitStrategy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{SliceError, SliceResult};

/// Parameters for slicing operations.
///
/// # Example
///
/// ```
/// use slicer_core::SliceParams;
/// use slicer_spatial::SplitStrategy;
///
/// let params = SliceParams::default()
///     .with_thickness(0.5)
///     .with_strategy(SplitStrategy::MedianSplit);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SliceParams {
    /// Slab height between adjacent slice planes. Must be positive.
    pub thickness: f32,

    /// Split strategy for the bounding volume hierarchy. Affects build time
    /// and query throughput, never query results.
    pub bvh_strategy: SplitStrategy,

    /// Lattice spacing used to merge nearby cross-section vertices. Must be
    /// positive.
    pub quantization_epsilon: f32,

    /// Band for classifying vertices as on-plane during triangle
    /// intersection. Zero means exact comparison.
    pub classification_epsilon: f32,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            thickness: 0.2,
            bvh_strategy: SplitStrategy::SurfaceAreaHeuristic,
            quantization_epsilon: 1e-4,
            classification_epsilon: 0.0,
        }
    }
}

impl SliceParams {
    /// Set the slab thickness.
    #[must_use]
    pub const fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the BVH split strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: SplitStrategy) -> Self {
        self.bvh_strategy = strategy;
        self
    }

    /// Set the quantization lattice spacing.
    #[must_use]
    pub const fn with_quantization_epsilon(mut self, epsilon: f32) -> Self {
        self.quantization_epsilon = epsilon;
        self
    }

    /// Set the on-plane classification band.
    #[must_use]
    pub const fn with_classification_epsilon(mut self, epsilon: f32) -> Self {
        self.classification_epsilon = epsilon;
        self
    }

    /// Check every parameter against its permitted range.
    ///
    /// # Errors
    ///
    /// Returns the matching [`SliceError`] variant for the first parameter
    /// out of range.
    pub fn validate(&self) -> SliceResult<()> {
        if self.thickness <= 0.0 || !self.thickness.is_finite() {
            return Err(SliceError::InvalidThickness(self.thickness));
        }
        if self.quantization_epsilon <= 0.0 || !self.quantization_epsilon.is_finite() {
            return Err(SliceError::InvalidQuantizationEpsilon(
                self.quantization_epsilon,
            ));
        }
        if self.classification_epsilon < 0.0 || !self.classification_epsilon.is_finite() {
            return Err(SliceError::InvalidClassificationEpsilon(
                self.classification_epsilon,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = SliceParams::default();
        assert!(params.validate().is_ok());
        assert!((params.thickness - 0.2).abs() < 1e-6);
        assert_eq!(params.bvh_strategy, SplitStrategy::SurfaceAreaHeuristic);
    }

    #[test]
    fn zero_thickness_is_rejected() {
        let params = SliceParams::default().with_thickness(0.0);
        assert!(matches!(
            params.validate(),
            Err(SliceError::InvalidThickness(_))
        ));

        let params = SliceParams::default().with_thickness(f32::NAN);
        assert!(matches!(
            params.validate(),
            Err(SliceError::InvalidThickness(_))
        ));
    }

    #[test]
    fn epsilon_ranges_are_enforced() {
        let params = SliceParams::default().with_quantization_epsilon(0.0);
        assert!(matches!(
            params.validate(),
            Err(SliceError::InvalidQuantizationEpsilon(_))
        ));

        let params = SliceParams::default().with_classification_epsilon(-1e-6);
        assert!(matches!(
            params.validate(),
            Err(SliceError::InvalidClassificationEpsilon(_))
        ));

        // Zero classification epsilon means exact comparison and is fine.
        let params = SliceParams::default().with_classification_epsilon(0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn builder_chains() {
        let params = SliceParams::default()
            .with_thickness(1.5)
            .with_quantization_epsilon(1e-6)
            .with_strategy(SplitStrategy::MedianSplit);
        assert!((params.thickness - 1.5).abs() < 1e-6);
        assert!((params.quantization_epsilon - 1e-6).abs() < 1e-12);
        assert_eq!(params.bvh_strategy, SplitStrategy::MedianSplit);
    }
}
