// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual transforms applied on top of an item's laid-out position.

use kurbo::{Affine, Vec2};

/// A translate-then-scale visual offset.
///
/// This never affects layout; it is what a surface applies while an item slides
/// into place.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemTransform {
    /// Translation from the laid-out position.
    pub translate: Vec2,
    /// Uniform scale about the item's center.
    pub scale: f64,
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ItemTransform {
    /// No offset, no scale.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// A pure translation.
    pub const fn translate(translate: Vec2) -> Self {
        Self {
            translate,
            scale: 1.0,
        }
    }

    /// Replace the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns `true` for the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Interpolate towards `to` by eased progress `t`.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            translate: self.translate + (to.translate - self.translate) * t,
            scale: self.scale + (to.scale - self.scale) * t,
        }
    }

    /// Express as an affine map, scaling about `center`.
    pub fn to_affine(self, center: kurbo::Point) -> Affine {
        Affine::translate(self.translate)
            * Affine::translate(center.to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(-center.to_vec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn lerp_endpoints() {
        let from = ItemTransform::translate(Vec2::new(0.0, 40.0)).with_scale(1.02);
        let to = ItemTransform::IDENTITY.with_scale(1.02);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
        assert_eq!(from.lerp(to, 0.5).translate, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn affine_scales_about_center() {
        let t = ItemTransform::IDENTITY.with_scale(2.0);
        let center = Point::new(10.0, 10.0);
        assert_eq!(t.to_affine(center) * center, center);
        assert_eq!(t.to_affine(center) * Point::new(11.0, 10.0), Point::new(12.0, 10.0));
    }

    #[test]
    fn identity_detection() {
        assert!(ItemTransform::default().is_identity());
        assert!(!ItemTransform::translate(Vec2::new(1.0, 0.0)).is_identity());
    }
}
