use crate::util::linalg::Vector2;
use crate::util::{Integral, Real, SignedIntegral};
use num_traits::AsPrimitive;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign},
};

/// A 2D vector with integral components, for texel positions, tile-grid coordinates, window
/// sizes and the like.
///
/// Any primitive integer works as the component type; [`DOWN`](Self::DOWN) and
/// [`LEFT`](Self::LEFT) exist only for signed ones.
///
/// # Examples
///
/// ```
/// use gdk_math::core::prelude::*;
///
/// let tile = IntVector2I32::new(3, 4) + IntVector2::UP;
/// assert_eq!(tile, IntVector2 { x: 3, y: 5 });
/// assert_eq!(tile.to_vector2::<f32>(), Vector2 { x: 3.0, y: 5.0 });
/// ```
#[derive(Default, Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub struct IntVector2<T: Integral = i32> {
    pub x: T,
    pub y: T,
}

pub type IntVector2I32 = IntVector2<i32>;

impl<T: Integral> IntVector2<T> {
    pub const ZERO: Self = Self { x: T::ZERO, y: T::ZERO };
    pub const UP: Self = Self { x: T::ZERO, y: T::ONE };
    pub const RIGHT: Self = Self { x: T::ONE, y: T::ZERO };

    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Converts to a floating-point [`Vector2`], rounding to the nearest representable value
    /// for components too large to be exact.
    #[must_use]
    pub fn to_vector2<F: Real>(&self) -> Vector2<F>
    where
        T: AsPrimitive<F>,
    {
        Vector2 {
            x: self.x.as_(),
            y: self.y.as_(),
        }
    }
}

impl<T: SignedIntegral> IntVector2<T> {
    pub const DOWN: Self = Self { x: T::ZERO, y: T::NEG_ONE };
    pub const LEFT: Self = Self { x: T::NEG_ONE, y: T::ZERO };
}

impl<T: Integral> From<(T, T)> for IntVector2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Integral> From<IntVector2<T>> for (T, T) {
    fn from(value: IntVector2<T>) -> Self {
        (value.x, value.y)
    }
}

impl<T: Integral> fmt::Display for IntVector2<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}}}", self.x, self.y)
    }
}

impl<T: Integral> Add<IntVector2<T>> for IntVector2<T> {
    type Output = IntVector2<T>;

    fn add(self, rhs: IntVector2<T>) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl<T: Integral> AddAssign<IntVector2<T>> for IntVector2<T> {
    fn add_assign(&mut self, rhs: IntVector2<T>) {
        *self = *self + rhs;
    }
}

impl<T: Integral> Sub<IntVector2<T>> for IntVector2<T> {
    type Output = IntVector2<T>;

    fn sub(self, rhs: IntVector2<T>) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl<T: Integral> SubAssign<IntVector2<T>> for IntVector2<T> {
    fn sub_assign(&mut self, rhs: IntVector2<T>) {
        *self = *self - rhs;
    }
}

impl<T: Integral> Mul<T> for IntVector2<T> {
    type Output = IntVector2<T>;

    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl<T: Integral> MulAssign<T> for IntVector2<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T, F> Mul<Vector2<F>> for IntVector2<T>
where
    T: Integral + AsPrimitive<F>,
    F: Real + AsPrimitive<T>,
{
    type Output = IntVector2<T>;

    /// Element-wise product, computed in floating point and truncated back towards zero.
    /// Out-of-range results saturate, and `NaN` becomes 0.
    fn mul(self, rhs: Vector2<F>) -> Self::Output {
        Self {
            x: (self.x.as_() * rhs.x).as_(),
            y: (self.y.as_() * rhs.y).as_(),
        }
    }
}
