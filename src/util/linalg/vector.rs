use crate::util::Real;
use approx::AbsDiffEq;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector, used for 2D positions, sizes and normalised coordinates.
///
/// Equality is exact per component; use [`almost_eq`](Vector2::almost_eq) for tolerance
/// comparisons.
///
/// # Examples
///
/// ```
/// use gdk_math::core::prelude::*;
///
/// let size = Vector2F32::new(16.0, 9.0);
/// assert_eq!(size.aspect_ratio(), 16.0 / 9.0);
/// assert_eq!((Vector2::RIGHT + Vector2::UP) * 2.0, Vector2F32::splat(2.0));
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Vector2<T: Real = f32> {
    pub x: T,
    pub y: T,
}

/// A 3D vector, used for positions, directions, scales and Euler angles.
///
/// # Examples
///
/// ```
/// use gdk_math::core::prelude::*;
///
/// assert_eq!(Vector3F32::new(3.0, 4.0, 0.0).length(), 5.0);
/// // Right-handed: with +Y up and +X right, the cross product points down -Z.
/// assert_eq!(Vector3F32::UP.cross_product(Vector3::RIGHT), Vector3::FORWARD);
/// ```
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct Vector3<T: Real = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
}

/// A homogeneous 4D vector. `w` is 1 for points and 0 for directions.
///
/// Unlike the other vectors, the default value is the origin point `(0, 0, 0, 1)`, not zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector4<T: Real = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vector2F32 = Vector2<f32>;
pub type Vector2F64 = Vector2<f64>;
pub type Vector3F32 = Vector3<f32>;
pub type Vector3F64 = Vector3<f64>;
pub type Vector4F32 = Vector4<f32>;
pub type Vector4F64 = Vector4<f64>;

impl<T: Real> Vector2<T> {
    pub const ZERO: Self = Self { x: T::ZERO, y: T::ZERO };
    pub const ONE: Self = Self { x: T::ONE, y: T::ONE };
    pub const UP: Self = Self { x: T::ZERO, y: T::ONE };
    pub const DOWN: Self = Self { x: T::ZERO, y: T::NEG_ONE };
    pub const LEFT: Self = Self { x: T::NEG_ONE, y: T::ZERO };
    pub const RIGHT: Self = Self { x: T::ONE, y: T::ZERO };

    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v }
    }

    /// Returns `x / y`, e.g. the aspect ratio of a viewport size.
    ///
    /// A zero `y` is not an error: the result is the IEEE infinity or `NaN`.
    #[must_use]
    pub fn aspect_ratio(&self) -> T {
        self.x / self.y
    }

    /// The z-component of the 3D cross product of `self` and `other` with zero z.
    ///
    /// Positive when `other` lies counterclockwise of `self`.
    #[must_use]
    pub fn cross_product(&self, other: Vector2<T>) -> T {
        self.x * other.y - other.x * self.y
    }
}

impl<T: Real> Vector3<T> {
    pub const ZERO: Self = Self { x: T::ZERO, y: T::ZERO, z: T::ZERO };
    pub const ONE: Self = Self { x: T::ONE, y: T::ONE, z: T::ONE };
    pub const UP: Self = Self { x: T::ZERO, y: T::ONE, z: T::ZERO };
    pub const DOWN: Self = Self { x: T::ZERO, y: T::NEG_ONE, z: T::ZERO };
    pub const LEFT: Self = Self { x: T::NEG_ONE, y: T::ZERO, z: T::ZERO };
    pub const RIGHT: Self = Self { x: T::ONE, y: T::ZERO, z: T::ZERO };
    /// -Z, the direction a camera with an identity view matrix looks along.
    pub const FORWARD: Self = Self { x: T::ZERO, y: T::ZERO, z: T::NEG_ONE };
    pub const BACKWARD: Self = Self { x: T::ZERO, y: T::ZERO, z: T::ONE };

    #[must_use]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Standard right-handed cross product.
    #[must_use]
    pub fn cross_product(&self, other: Vector3<T>) -> Vector3<T> {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }
}

impl<T: Real> Vector4<T> {
    pub const ZERO: Self = Self { x: T::ZERO, y: T::ZERO, z: T::ZERO, w: T::ZERO };

    #[must_use]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Extends `v` with an explicit `w`: pass 1 for a point, 0 for a direction.
    #[must_use]
    pub fn from_vector3(v: Vector3<T>, w: T) -> Self {
        Self { x: v.x, y: v.y, z: v.z, w }
    }

    /// Drops `w` without performing a perspective divide.
    #[must_use]
    pub fn xyz(&self) -> Vector3<T> {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }
}

impl<T: Real> Default for Vector4<T> {
    fn default() -> Self {
        Self { x: T::ZERO, y: T::ZERO, z: T::ZERO, w: T::ONE }
    }
}

impl<T: Real> From<Vector3<T>> for Vector4<T> {
    fn from(value: Vector3<T>) -> Self {
        Self::from_vector3(value, T::ONE)
    }
}

impl<T: Real> From<(T, T)> for Vector2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Operations shared by every floating-point vector, written once per field list.
macro_rules! impl_vector {
    ($name:ident, $n:literal, $fmt:literal, $($field:ident),+) => {
        impl<T: Real> $name<T> {
            /// Returns the squared Euclidean length, avoiding the square root.
            #[must_use]
            pub fn length_squared(&self) -> T {
                self.dot_product(*self)
            }

            #[must_use]
            pub fn length(&self) -> T {
                self.length_squared().sqrt()
            }

            /// Scales `self` to unit length in place.
            ///
            /// A vector of exactly zero length is left unchanged rather than divided by zero.
            pub fn normalize(&mut self) {
                let magnitude = self.length();
                if magnitude != T::ZERO {
                    $(self.$field = self.$field / magnitude;)+
                }
            }

            /// Returns a unit-length copy of `self`; see [`normalize`](Self::normalize).
            #[must_use]
            pub fn normalized(&self) -> Self {
                let mut rv = *self;
                rv.normalize();
                rv
            }

            #[must_use]
            pub fn distance(&self, other: Self) -> T {
                (other - *self).length()
            }

            #[must_use]
            pub fn dot_product(&self, other: Self) -> T {
                T::ZERO $(+ self.$field * other.$field)+
            }

            #[must_use]
            pub fn elementwise_product(&self, other: Self) -> Self {
                Self { $($field: self.$field * other.$field),+ }
            }

            /// Compares against `rhs` with an absolute per-component tolerance of
            /// [`EPSILON`](crate::core::config::EPSILON).
            #[must_use]
            pub fn almost_eq(&self, rhs: Self) -> bool {
                self.abs_diff_eq(&rhs, T::ALMOST_EQ_EPSILON)
            }
        }

        impl<T: Real> AbsDiffEq for $name<T> {
            type Epsilon = T;

            fn default_epsilon() -> Self::Epsilon {
                T::ALMOST_EQ_EPSILON
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                true $(&& self.$field.abs_diff_eq(&other.$field, epsilon))+
            }
        }

        impl<T: Real> From<[T; $n]> for $name<T> {
            fn from([$($field),+]: [T; $n]) -> Self {
                Self { $($field),+ }
            }
        }

        impl<T: Real> From<$name<T>> for [T; $n] {
            fn from(value: $name<T>) -> Self {
                [$(value.$field),+]
            }
        }

        impl<T: Real> fmt::Display for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, $fmt, $(self.$field),+)
            }
        }

        impl<T: Real> Add<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn add(self, rhs: $name<T>) -> Self::Output {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }
        impl<T: Real> AddAssign<$name<T>> for $name<T> {
            fn add_assign(&mut self, rhs: $name<T>) {
                *self = *self + rhs;
            }
        }

        impl<T: Real> Sub<$name<T>> for $name<T> {
            type Output = $name<T>;

            fn sub(self, rhs: $name<T>) -> Self::Output {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }
        impl<T: Real> SubAssign<$name<T>> for $name<T> {
            fn sub_assign(&mut self, rhs: $name<T>) {
                *self = *self - rhs;
            }
        }

        impl<T: Real> Mul<T> for $name<T> {
            type Output = $name<T>;

            fn mul(self, rhs: T) -> Self::Output {
                Self { $($field: self.$field * rhs),+ }
            }
        }
        impl<T: Real> MulAssign<T> for $name<T> {
            fn mul_assign(&mut self, rhs: T) {
                *self = *self * rhs;
            }
        }

        impl<T: Real> Neg for $name<T> {
            type Output = $name<T>;

            fn neg(self) -> Self::Output {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

impl_vector!(Vector2, 2, "{{x: {}, y: {}}}", x, y);
impl_vector!(Vector3, 3, "{{x: {}, y: {}, z: {}}}", x, y, z);
impl_vector!(Vector4, 4, "{{x: {}, y: {}, z: {}, w: {}}}", x, y, z, w);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ==================== Vector2 ====================

    #[test]
    fn vector2_default_is_zero() {
        assert_eq!(Vector2F64::default(), Vector2::ZERO);
        assert_eq!(Vector2F32::from((0.0, 1.0)), Vector2::UP);
    }

    #[test]
    fn vector2_arithmetic() {
        let a = Vector2F32::new(1.0, 2.0);
        let b = Vector2F32::new(3.0, -4.0);
        assert_eq!(a + b, Vector2::new(4.0, -2.0));
        assert_eq!(a - b, Vector2::new(-2.0, 6.0));
        assert_eq!(a * 3.0, Vector2::new(3.0, 6.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));

        let mut c = Vector2F32::RIGHT;
        c *= 5.0;
        assert_eq!(c, Vector2::new(5.0, 0.0));
        c += Vector2::UP;
        assert_eq!(c, Vector2::new(5.0, 1.0));
        c -= Vector2::ONE;
        assert_eq!(c, Vector2::new(4.0, 0.0));
    }

    #[test]
    fn vector2_products() {
        let a = Vector2F32::new(2.0, 3.0);
        let b = Vector2F32::new(4.0, -1.0);
        assert_eq!(a.dot_product(b), 5.0);
        assert_eq!(a.elementwise_product(b), Vector2::new(8.0, -3.0));
        assert_eq!(Vector2F32::RIGHT.cross_product(Vector2::UP), 1.0);
        assert_eq!(Vector2F32::UP.cross_product(Vector2::RIGHT), -1.0);
    }

    #[test]
    fn vector2_aspect_ratio() {
        assert_eq!(Vector2F32::new(1920.0, 1080.0).aspect_ratio(), 1920.0 / 1080.0);
        assert!(Vector2F32::new(1.0, 0.0).aspect_ratio().is_infinite());
        assert!(Vector2F32::ZERO.aspect_ratio().is_nan());
    }

    #[test]
    fn vector2_length_and_distance() {
        assert_eq!(Vector2F32::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vector2F32::new(3.0, 4.0).length_squared(), 25.0);
        assert_eq!(Vector2F32::new(1.0, 1.0).distance(Vector2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn vector2_display() {
        assert_eq!(Vector2F32::ZERO.to_string(), "{x: 0, y: 0}");
        assert_eq!(Vector2F64::new(1.5, -2.0).to_string(), "{x: 1.5, y: -2}");
    }

    // ==================== Vector3 ====================

    #[test]
    fn vector3_constants() {
        assert_eq!(Vector3F64::default(), Vector3::ZERO);
        assert_eq!(Vector3F32::ONE, Vector3::splat(1.0));
        assert_eq!(-Vector3F32::UP, Vector3::DOWN);
        assert_eq!(-Vector3F32::RIGHT, Vector3::LEFT);
        assert_eq!(-Vector3F32::FORWARD, Vector3::BACKWARD);
        assert_eq!(Vector3F32::FORWARD, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn vector3_length() {
        assert_eq!(Vector3F32::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vector3F64::new(2.0, 3.0, 6.0).length(), 7.0);
    }

    #[test]
    fn vector3_cross_product_is_right_handed() {
        assert_eq!(Vector3F32::UP.cross_product(Vector3::RIGHT), Vector3::FORWARD);
        assert_eq!(Vector3F32::RIGHT.cross_product(Vector3::UP), Vector3::BACKWARD);
        assert_eq!(Vector3F32::BACKWARD.cross_product(Vector3::RIGHT), Vector3::UP);
        // x cross y = z
        assert_eq!(
            Vector3F64::new(1.0, 0.0, 0.0).cross_product(Vector3::new(0.0, 1.0, 0.0)),
            Vector3::new(0.0, 0.0, 1.0)
        );

        let a = Vector3F64::new(1.0, 2.0, 3.0);
        let b = Vector3F64::new(-4.0, 0.5, 2.0);
        let c = a.cross_product(b);
        assert_abs_diff_eq!(c.dot_product(a), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.dot_product(b), 0.0, epsilon = 1e-12);
        assert_eq!(b.cross_product(a), -c);
    }

    #[test]
    fn vector3_dot_and_elementwise() {
        let a = Vector3F32::new(1.0, 2.0, 3.0);
        let b = Vector3F32::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot_product(b), 32.0);
        assert_eq!(a.elementwise_product(b), Vector3::new(4.0, 10.0, 18.0));
        assert_eq!(Vector3F32::UP.dot_product(Vector3::RIGHT), 0.0);
    }

    #[test]
    fn vector3_normalize() {
        let mut v = Vector3F32::new(0.0, 3.0, 4.0);
        v.normalize();
        assert_abs_diff_eq!(v, Vector3::new(0.0, 0.6, 0.8));
        assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-6);

        let w = Vector3F64::new(-2.0, 0.0, 0.0).normalized();
        assert_eq!(w, Vector3::LEFT);
    }

    #[test]
    fn vector3_normalize_zero_is_noop() {
        let mut v = Vector3F32::ZERO;
        v.normalize();
        assert_eq!(v, Vector3::ZERO);
        assert!(!v.x.is_nan());
        assert_eq!(Vector2F64::ZERO.normalized(), Vector2::ZERO);
        assert_eq!(Vector4F32::ZERO.normalized(), Vector4::ZERO);
    }

    #[test]
    fn vector3_distance() {
        let a = Vector3F32::new(1.0, 2.0, 3.0);
        let b = Vector3F32::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn vector3_arithmetic() {
        let a = Vector3F32::new(1.0, 2.0, 3.0);
        let b = Vector3F32::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vector3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
        c *= 4.0;
        assert_eq!(c, Vector3::splat(2.0));
    }

    #[test]
    fn vector3_equality_is_exact() {
        let a = Vector3F32::new(1.0, 2.0, 3.0);
        let b = Vector3F32::new(1.0, 2.0, 3.0 + 1e-6);
        assert_ne!(a, b);
        assert!(a.almost_eq(b));
        assert!(!a.almost_eq(Vector3::new(1.0, 2.0, 3.1)));
    }

    #[test]
    fn vector3_array_conversion() {
        let v = Vector3F32::from([1.0, 2.0, 3.0]);
        assert_eq!(v, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(<[f32; 3]>::from(v), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn vector3_display() {
        assert_eq!(Vector3F32::ZERO.to_string(), "{x: 0, y: 0, z: 0}");
        assert_eq!(Vector3F64::new(0.25, 1.0, -3.0).to_string(), "{x: 0.25, y: 1, z: -3}");
    }

    // ==================== Vector4 ====================

    #[test]
    fn vector4_default_is_homogeneous_origin() {
        assert_eq!(Vector4F32::default(), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Vector4F32::new(0.0, 0.0, 0.0, 0.0), Vector4::ZERO);
    }

    #[test]
    fn vector4_from_vector3() {
        let p = Vector4F32::from(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vector4::new(1.0, 2.0, 3.0, 1.0));
        let d = Vector4F32::from_vector3(Vector3::UP, 0.0);
        assert_eq!(d, Vector4::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(d.xyz(), Vector3::UP);
    }

    #[test]
    fn vector4_arithmetic() {
        let mut a = Vector4F64::new(1.0, 2.0, 3.0, 1.0);
        a += Vector4::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(a, Vector4::new(2.0, 3.0, 4.0, 1.0));
        a *= 2.0;
        assert_eq!(a, Vector4::new(4.0, 6.0, 8.0, 2.0));
        assert_eq!(a.dot_product(Vector4::new(0.0, 0.0, 0.0, 1.0)), 2.0);
        assert_eq!(Vector4F64::new(1.0, 1.0, 1.0, 1.0).length(), 2.0);
    }

    #[test]
    fn vector4_display() {
        assert_eq!(
            Vector4F32::default().to_string(),
            "{x: 0, y: 0, z: 0, w: 1}"
        );
    }
}
