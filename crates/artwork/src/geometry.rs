//! Integer rectangle geometry used for placement and canvas growth.
//!
//! Points are [`glam::IVec2`]. A [`Rect`] is an axis-aligned box with an inclusive
//! `min` and exclusive `max` corner; it is well-formed once [`Rect::canon`] has been
//! applied. Free functions implement the scaling and centering rules the compositor
//! relies on.
use glam::{I64Vec2, IVec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned integer rectangle spanning `[min, max)`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        min: IVec2::ZERO,
        max: IVec2::ZERO,
    };

    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(IVec2::ZERO, IVec2::new(width, height))
    }

    /// `max` saturates at the `i32` bounds.
    pub fn from_min_size(min: IVec2, size: IVec2) -> Self {
        Self::new(min, min.saturating_add(size))
    }

    /// Like [`Rect::from_min_size`], but `None` when `max` does not fit in `i32`.
    pub fn checked_from_min_size(min: IVec2, size: IVec2) -> Option<Self> {
        let max = IVec2::new(min.x.checked_add(size.x)?, min.y.checked_add(size.y)?);
        Some(Self::new(min, max))
    }

    /// Returns the well-formed version of this rectangle, with `min <= max` on both axes.
    pub fn canon(self) -> Self {
        Self {
            min: self.min.min(self.max),
            max: self.min.max(self.max),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> IVec2 {
        self.max - self.min
    }

    /// Size computed in `i64`, exact for any pair of corners.
    pub fn extent(&self) -> I64Vec2 {
        self.max.as_i64vec2() - self.min.as_i64vec2()
    }

    /// A rectangle is empty when it covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Midpoint of the rectangle, rounded toward `min`.
    pub fn center(&self) -> IVec2 {
        IVec2::new(
            self.min.x + self.width() / 2,
            self.min.y + self.height() / 2,
        )
    }

    pub fn translate(&self, by: IVec2) -> Self {
        Self::new(self.min + by, self.max + by)
    }

    /// Reports whether every pixel of `self` lies within `other`. An empty rectangle is
    /// contained in anything.
    pub fn contained_in(&self, other: &Rect) -> bool {
        if self.is_empty() {
            return true;
        }
        other.min.cmple(self.min).all() && self.max.cmple(other.max).all()
    }

    /// Smallest rectangle covering both inputs. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }
}

/// Non-uniform scale factor declared by a region for the asset it places.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    /// The "no scaling" sentinel.
    pub const NONE: Scale = Scale { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn uniform(s: f64) -> Self {
        Self { x: s, y: s }
    }

    /// Exact `(0, 0)` means no scaling was requested.
    pub fn is_none(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// A scale is usable by the compositor when it is the `(0, 0)` sentinel or both
    /// factors are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.is_none() || (self.x.is_finite() && self.y.is_finite() && self.x > 0.0 && self.y > 0.0)
    }
}

/// Scales `rect` about its minimum corner.
///
/// Exact `(0, 0)` returns `rect` unchanged. Otherwise each non-zero axis grows by
/// `floor(extent * (factor - 1))`; a zero axis keeps its extent. A corner that would
/// leave the `i32` range is clamped to it; [`try_scale_rectangle`] reports that case.
pub fn scale_rectangle(sx: f64, sy: f64, rect: Rect) -> Rect {
    if sx == 0.0 && sy == 0.0 {
        return rect;
    }
    Rect::new(rect.min, saturate(scaled_max(sx, sy, rect)))
}

/// Like [`scale_rectangle`], but `None` when the scaled corner does not fit in `i32`.
pub fn try_scale_rectangle(sx: f64, sy: f64, rect: Rect) -> Option<Rect> {
    if sx == 0.0 && sy == 0.0 {
        return Some(rect);
    }
    Some(Rect::new(rect.min, narrow(scaled_max(sx, sy, rect))?))
}

fn scaled_max(sx: f64, sy: f64, rect: Rect) -> I64Vec2 {
    let axis = |min: i32, extent: i64, factor: f64| {
        let factor = if factor != 0.0 { factor - 1.0 } else { 0.0 };
        // `as` saturates at the i64 bounds.
        let grow = (extent as f64 * factor).floor() as i64;
        i64::from(min).saturating_add(extent).saturating_add(grow)
    };
    let extent = rect.extent();
    I64Vec2::new(
        axis(rect.min.x, extent.x, sx),
        axis(rect.min.y, extent.y, sy),
    )
}

fn narrow(v: I64Vec2) -> Option<IVec2> {
    Some(IVec2::new(i32::try_from(v.x).ok()?, i32::try_from(v.y).ok()?))
}

fn saturate(v: I64Vec2) -> IVec2 {
    v.clamp(
        I64Vec2::splat(i64::from(i32::MIN)),
        I64Vec2::splat(i64::from(i32::MAX)),
    )
    .as_ivec2()
}

/// Offset at which the top-left corner of `rect` must sit for `rect` to be centered on
/// `center`, clamped to the `i32` range.
pub fn center_offset(center: IVec2, rect: Rect) -> IVec2 {
    saturate(center.as_i64vec2() - rect.extent() / 2)
}

/// Like [`center_offset`], but `None` when the offset does not fit in `i32`.
pub fn checked_center_offset(center: IVec2, rect: Rect) -> Option<IVec2> {
    narrow(center.as_i64vec2() - rect.extent() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rect {
        Rect::new(IVec2::new(x0, y0), IVec2::new(x1, y1))
    }

    #[test]
    fn canon_swaps_inverted_corners() {
        let r = rect(10, 0, 0, 10).canon();
        assert_eq!(r, rect(0, 0, 10, 10));
        assert_eq!(r.width(), 10);
    }

    #[test]
    fn unit_scale_is_identity() {
        for r in [rect(0, 0, 10, 10), rect(-5, 3, 17, 40), Rect::ZERO] {
            assert_eq!(scale_rectangle(1.0, 1.0, r), r);
        }
    }

    #[test]
    fn zero_scale_is_noop() {
        let r = rect(2, 2, 9, 9);
        assert_eq!(scale_rectangle(0.0, 0.0, r), r);
    }

    #[test]
    fn doubling_x_keeps_min() {
        let scaled = scale_rectangle(2.0, 1.0, rect(0, 0, 10, 10));
        assert_eq!(scaled.min, IVec2::ZERO);
        assert_eq!(scaled.width(), 20);
        assert_eq!(scaled.height(), 10);
    }

    #[test]
    fn scaling_is_anchored_at_min() {
        let scaled = scale_rectangle(0.5, 3.0, rect(4, -6, 14, 4));
        assert_eq!(scaled, rect(4, -6, 9, 24));
    }

    #[test]
    fn zero_axis_keeps_extent() {
        let scaled = scale_rectangle(0.0, 2.0, rect(0, 0, 8, 8));
        assert_eq!(scaled, rect(0, 0, 8, 16));
    }

    #[test]
    fn fractional_growth_floors() {
        // 3 * 0.5 = 1.5 -> floor 1, 3 * -0.5 = -1.5 -> floor -2
        assert_eq!(scale_rectangle(1.5, 1.0, rect(0, 0, 3, 3)).width(), 4);
        assert_eq!(scale_rectangle(0.5, 1.0, rect(0, 0, 3, 3)).width(), 1);
    }

    #[test]
    fn huge_factors_clamp_or_fail() {
        let small = rect(0, 0, 2, 2);
        let clamped = scale_rectangle(1e10, 1.0, small);
        assert_eq!(clamped.max, IVec2::new(i32::MAX, 2));
        assert_eq!(try_scale_rectangle(1e10, 1.0, small), None);
        assert_eq!(try_scale_rectangle(f64::MAX, f64::MAX, small), None);

        let shifted = rect(i32::MAX - 4, 0, i32::MAX - 2, 2);
        assert_eq!(try_scale_rectangle(4.0, 1.0, shifted), None);
        assert_eq!(
            try_scale_rectangle(2.0, 1.0, shifted),
            Some(rect(i32::MAX - 4, 0, i32::MAX, 2))
        );
        assert_eq!(try_scale_rectangle(0.0, 0.0, shifted), Some(shifted));
    }

    #[test]
    fn checked_placement_rejects_overflow() {
        assert_eq!(
            checked_center_offset(IVec2::new(i32::MIN, 0), rect(0, 0, 4, 4)),
            None
        );
        assert_eq!(
            checked_center_offset(IVec2::new(50, 50), rect(0, 0, 11, 20)),
            Some(IVec2::new(45, 40))
        );
        let near_edge = IVec2::new(i32::MAX - 1, 0);
        assert_eq!(Rect::checked_from_min_size(near_edge, IVec2::splat(2)), None);
        assert_eq!(
            Rect::from_min_size(near_edge, IVec2::splat(2)).max,
            IVec2::new(i32::MAX, 2)
        );
        assert_eq!(
            center_offset(IVec2::new(i32::MIN, 0), rect(0, 0, 4, 4)),
            IVec2::new(i32::MIN, -2)
        );
        assert_eq!(
            rect(i32::MIN, 0, i32::MAX, 1).extent(),
            I64Vec2::new(u32::MAX as i64, 1)
        );
    }

    #[test]
    fn center_offset_uses_floor_division() {
        assert_eq!(
            center_offset(IVec2::new(50, 50), rect(0, 0, 11, 20)),
            IVec2::new(45, 40)
        );
        assert_eq!(
            center_offset(IVec2::new(10, 10), rect(5, 5, 25, 25)),
            IVec2::ZERO
        );
    }

    #[test]
    fn contained_in_and_union() {
        let outer = rect(0, 0, 10, 10);
        assert!(rect(2, 2, 8, 8).contained_in(&outer));
        assert!(outer.contained_in(&outer));
        assert!(!rect(5, 5, 15, 8).contained_in(&outer));
        assert!(Rect::ZERO.contained_in(&rect(3, 3, 4, 4)));

        assert_eq!(outer.union(&rect(-5, 5, 12, 20)), rect(-5, 0, 12, 20));
        assert_eq!(Rect::ZERO.union(&outer), outer);
        assert_eq!(outer.union(&Rect::ZERO), outer);
    }

    #[test]
    fn center_rounds_toward_min() {
        assert_eq!(rect(0, 0, 5, 7).center(), IVec2::new(2, 3));
        assert_eq!(rect(10, 10, 20, 20).center(), IVec2::new(15, 15));
    }

    #[test]
    fn scale_validity() {
        assert!(Scale::NONE.is_valid());
        assert!(Scale::new(0.5, 2.0).is_valid());
        assert!(!Scale::new(0.0, 2.0).is_valid());
        assert!(!Scale::new(-1.0, 1.0).is_valid());
        assert!(!Scale::new(f64::NAN, 1.0).is_valid());
    }
}
