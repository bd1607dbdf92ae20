use crate::util::linalg::Vector3;
use crate::util::Real;
use anyhow::{bail, Result};
use approx::AbsDiffEq;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Mul, MulAssign, Neg},
};

/// A rotation in 3D space.
///
/// Most operations assume unit length; [`set_rotation`](crate::util::linalg::Matrix4x4::set_rotation)
/// tolerates non-unit input, and [`inverse`](Quaternion::inverse) is the only way to invert a
/// non-unit quaternion.
///
/// Multiplication is the Hamilton product, so `a * b` is the rotation that applies `b` first and
/// then `a`. `q` and `-q` describe the same rotation.
///
/// # Examples
///
/// ```
/// use gdk_math::core::prelude::*;
/// use std::f32::consts::FRAC_PI_2;
///
/// let yaw = QuaternionF32::from_euler(Vector3 { x: 0.0, y: 0.0, z: FRAC_PI_2 });
/// assert!(yaw.to_euler().almost_eq(Vector3 { x: 0.0, y: 0.0, z: FRAC_PI_2 }));
/// assert!((yaw * yaw.inverse_unit()).almost_eq(Quaternion::IDENTITY));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion<T: Real = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type QuaternionF32 = Quaternion<f32>;
pub type QuaternionF64 = Quaternion<f64>;

impl<T: Real> Quaternion<T> {
    pub const IDENTITY: Self = Self {
        x: T::ZERO,
        y: T::ZERO,
        z: T::ZERO,
        w: T::ONE,
    };

    #[must_use]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Builds the rotation for Euler angles `(roll, pitch, yaw)` stored as `(x, y, z)`, in radians.
    ///
    /// The rotations compose as yaw ∘ pitch ∘ roll: roll about X is applied first, then pitch
    /// about Y, then yaw about Z.
    #[must_use]
    pub fn from_euler(euler_angles: Vector3<T>) -> Self {
        let mut rv = Self::IDENTITY;
        rv.set_from_euler(euler_angles);
        rv
    }

    /// Overwrites `self` with the rotation for `euler_angles`; see [`from_euler`](Self::from_euler).
    pub fn set_from_euler(&mut self, euler_angles: Vector3<T>) {
        let (sr, cr) = (euler_angles.x * T::HALF).sin_cos();
        let (sp, cp) = (euler_angles.y * T::HALF).sin_cos();
        let (sy, cy) = (euler_angles.z * T::HALF).sin_cos();

        self.w = cr * cp * cy + sr * sp * sy;
        self.x = sr * cp * cy - cr * sp * sy;
        self.y = cr * sp * cy + sr * cp * sy;
        self.z = cr * cp * sy - sr * sp * cy;
    }

    /// Recovers `(roll, pitch, yaw)` as `(x, y, z)`, inverting [`from_euler`](Self::from_euler).
    ///
    /// At gimbal lock (`|2(wy - zx)| >= 1`) the pitch is clamped to ±π/2 instead of taking the
    /// arcsine of an out-of-domain value; roll and yaw are then no longer independent.
    #[must_use]
    pub fn to_euler(&self) -> Vector3<T> {
        let Self { x, y, z, w } = *self;

        let sinr_cosp = T::TWO * (w * x + y * z);
        let cosr_cosp = T::ONE - T::TWO * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = T::TWO * (w * y - z * x);
        let pitch = if sinp.abs() >= T::ONE {
            T::FRAC_PI_2().copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = T::TWO * (w * z + x * y);
        let cosy_cosp = T::ONE - T::TWO * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        Vector3 {
            x: roll,
            y: pitch,
            z: yaw,
        }
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    #[must_use]
    pub fn dot_product(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[must_use]
    pub fn length_squared(&self) -> T {
        self.dot_product(*self)
    }

    #[must_use]
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Returns the inverse `conjugate / |q|²`, valid for any non-zero quaternion.
    ///
    /// # Errors
    /// If `self` has zero norm, since it then has no inverse.
    pub fn inverse(&self) -> Result<Self> {
        let norm_squared = self.length_squared();
        if norm_squared == T::ZERO {
            bail!("Quaternion::inverse(): zero-norm quaternion has no inverse: {self}");
        }
        Ok(self.conjugate() * norm_squared.recip())
    }

    /// Returns the conjugate, which is the inverse only when `self` has unit length.
    ///
    /// The unit-length precondition is not checked; for other input the result is silently
    /// wrong. Use [`inverse`](Self::inverse) when in doubt.
    #[must_use]
    pub fn inverse_unit(&self) -> Self {
        self.conjugate()
    }

    /// Returns a unit-length copy of `self`, or [`IDENTITY`](Self::IDENTITY) if `self` has
    /// exactly zero length.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let magnitude = self.length();
        if magnitude == T::ZERO {
            Self::IDENTITY
        } else {
            *self * magnitude.recip()
        }
    }

    #[must_use]
    pub fn almost_eq(&self, rhs: Self) -> bool {
        self.abs_diff_eq(&rhs, T::ALMOST_EQ_EPSILON)
    }

    /// Like [`almost_eq`](Self::almost_eq), but also accepts `-rhs`, which is the same rotation.
    #[must_use]
    pub fn almost_eq_rotation(&self, rhs: Self) -> bool {
        self.almost_eq(rhs) || self.almost_eq(-rhs)
    }
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Real> From<Vector3<T>> for Quaternion<T> {
    fn from(euler_angles: Vector3<T>) -> Self {
        Self::from_euler(euler_angles)
    }
}

impl<T: Real> AbsDiffEq for Quaternion<T> {
    type Epsilon = T;

    fn default_epsilon() -> Self::Epsilon {
        T::ALMOST_EQ_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: Real> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x: {}, y: {}, z: {}, w: {}}}",
            self.x, self.y, self.z, self.w
        )
    }
}

impl<T: Real> Mul<Quaternion<T>> for Quaternion<T> {
    type Output = Quaternion<T>;

    /// Hamilton product: applies `rhs`, then `self`.
    fn mul(self, rhs: Quaternion<T>) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}
impl<T: Real> MulAssign<Quaternion<T>> for Quaternion<T> {
    fn mul_assign(&mut self, rhs: Quaternion<T>) {
        *self = *self * rhs;
    }
}

impl<T: Real> Mul<T> for Quaternion<T> {
    type Output = Quaternion<T>;

    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}
impl<T: Real> MulAssign<T> for Quaternion<T> {
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: Real> Neg for Quaternion<T> {
    type Output = Quaternion<T>;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, PI};

    fn euler(roll: f64, pitch: f64, yaw: f64) -> QuaternionF64 {
        Quaternion::from_euler(Vector3::new(roll, pitch, yaw))
    }

    #[test]
    fn quaternion_default_is_identity() {
        assert_eq!(QuaternionF32::default(), Quaternion::IDENTITY);
        assert_eq!(QuaternionF64::IDENTITY, Quaternion::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn quaternion_identity_to_euler_is_zero() {
        assert_eq!(QuaternionF32::IDENTITY.to_euler(), Vector3::ZERO);
        assert_eq!(QuaternionF64::IDENTITY.to_euler(), Vector3::ZERO);
    }

    #[test]
    fn quaternion_single_axis_from_euler() {
        let roll = euler(FRAC_PI_2, 0.0, 0.0);
        assert_abs_diff_eq!(roll, Quaternion::new(FRAC_PI_4.sin(), 0.0, 0.0, FRAC_PI_4.cos()));
        let pitch = euler(0.0, FRAC_PI_2, 0.0);
        assert_abs_diff_eq!(pitch, Quaternion::new(0.0, FRAC_PI_4.sin(), 0.0, FRAC_PI_4.cos()));
        let yaw = euler(0.0, 0.0, FRAC_PI_2);
        assert_abs_diff_eq!(yaw, Quaternion::new(0.0, 0.0, FRAC_PI_4.sin(), FRAC_PI_4.cos()));
    }

    #[test]
    fn quaternion_euler_round_trip_per_axis() {
        for angle in [FRAC_PI_2, -FRAC_PI_3, 0.1, 3.0] {
            let roll = Vector3::new(angle, 0.0, 0.0);
            assert_abs_diff_eq!(Quaternion::from_euler(roll).to_euler(), roll, epsilon = 1e-9);
            let yaw = Vector3::new(0.0, 0.0, angle);
            assert_abs_diff_eq!(Quaternion::from_euler(yaw).to_euler(), yaw, epsilon = 1e-9);
        }
        // Pitch stays clear of the ±π/2 gimbal-lock poles.
        for angle in [FRAC_PI_3, -FRAC_PI_4, 0.1, -1.5] {
            let pitch = Vector3::new(0.0, angle, 0.0);
            assert_abs_diff_eq!(Quaternion::from_euler(pitch).to_euler(), pitch, epsilon = 1e-9);
        }

        let yaw = Vector3::<f32>::new(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        assert!(QuaternionF32::from(yaw).to_euler().almost_eq(yaw));
    }

    #[test]
    fn quaternion_euler_round_trip_combined() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let angles = Vector3::new(
                rng.gen_range(-PI + 0.01..PI - 0.01),
                rng.gen_range(-FRAC_PI_2 + 0.01..FRAC_PI_2 - 0.01),
                rng.gen_range(-PI + 0.01..PI - 0.01),
            );
            assert_abs_diff_eq!(Quaternion::from_euler(angles).to_euler(), angles, epsilon = 1e-7);
        }
    }

    #[test]
    fn quaternion_euler_composes_yaw_pitch_roll() {
        let (r, p, y) = (0.3, -0.7, 1.9);
        let composed = euler(0.0, 0.0, y) * euler(0.0, p, 0.0) * euler(r, 0.0, 0.0);
        assert_abs_diff_eq!(euler(r, p, y), composed, epsilon = 1e-12);
    }

    #[test]
    fn quaternion_gimbal_lock_clamps_pitch() {
        let locked = euler(0.0, FRAC_PI_2, 0.0).to_euler();
        assert!(!locked.y.is_nan());
        assert_abs_diff_eq!(locked.y, FRAC_PI_2, epsilon = 1e-6);

        // A non-unit quaternion pushes 2(wy - zx) well outside [-1, 1].
        let beyond = QuaternionF64::new(0.0, 0.8, 0.0, 0.8).to_euler();
        assert_eq!(beyond.y, FRAC_PI_2);
        let beyond = QuaternionF64::new(0.0, -0.8, 0.0, 0.8).to_euler();
        assert_eq!(beyond.y, -FRAC_PI_2);
        let beyond = QuaternionF32::new(0.0, 0.8, 0.0, 0.8).to_euler();
        assert_eq!(beyond.y, std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn quaternion_hamilton_product() {
        let i = QuaternionF64::new(1.0, 0.0, 0.0, 0.0);
        let j = QuaternionF64::new(0.0, 1.0, 0.0, 0.0);
        let k = QuaternionF64::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(j * k, i);
        assert_eq!(k * i, j);
        assert_eq!(i * i, -QuaternionF64::IDENTITY);

        let q = euler(0.4, 0.2, -1.0);
        assert_eq!(q * QuaternionF64::IDENTITY, q);
        assert_eq!(QuaternionF64::IDENTITY * q, q);
    }

    #[test]
    fn quaternion_product_composes_rotations() {
        let a = euler(0.0, 0.0, 0.5);
        let b = euler(0.0, 0.0, 0.75);
        assert_abs_diff_eq!(a * b, euler(0.0, 0.0, 1.25), epsilon = 1e-12);

        let mut c = a;
        c *= b;
        assert_eq!(c, a * b);
    }

    #[test]
    fn quaternion_inverse_unit_is_conjugate() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let q = euler(rng.gen_range(-PI..PI), rng.gen_range(-1.5..1.5), rng.gen_range(-PI..PI));
            assert_eq!(q.inverse_unit(), q.conjugate());
            assert_abs_diff_eq!(q * q.inverse_unit(), Quaternion::IDENTITY, epsilon = 1e-12);
            assert_abs_diff_eq!(q.inverse_unit() * q, Quaternion::IDENTITY, epsilon = 1e-12);
        }
    }

    #[test]
    fn quaternion_inverse_non_unit() {
        let q = QuaternionF64::new(1.0, -2.0, 0.5, 3.0);
        let inv = q.inverse().unwrap();
        assert_abs_diff_eq!(q * inv, Quaternion::IDENTITY, epsilon = 1e-12);
        assert_abs_diff_eq!(inv * q, Quaternion::IDENTITY, epsilon = 1e-12);
        // For non-unit input the fast path is wrong.
        assert!(!(q * q.inverse_unit()).almost_eq(Quaternion::IDENTITY));

        let tiny = QuaternionF32::new(0.0, 0.0, 0.0, 1e-3);
        assert!((tiny * tiny.inverse().unwrap()).almost_eq(Quaternion::IDENTITY));
    }

    #[test]
    fn quaternion_inverse_zero_norm_fails() {
        let zero = QuaternionF32::new(0.0, 0.0, 0.0, 0.0);
        let err = zero.inverse().unwrap_err();
        assert!(err.to_string().contains("zero-norm"));
        assert!(QuaternionF64::new(-0.0, 0.0, 0.0, 0.0).inverse().is_err());
    }

    #[test]
    fn quaternion_normalized() {
        let q = QuaternionF64::new(0.0, 3.0, 0.0, 4.0).normalized();
        assert_abs_diff_eq!(q, Quaternion::new(0.0, 0.6, 0.0, 0.8), epsilon = 1e-12);
        assert_abs_diff_eq!(q.length(), 1.0, epsilon = 1e-12);

        let zero = QuaternionF32::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalized(), Quaternion::IDENTITY);
    }

    #[test]
    fn quaternion_scalar_multiplication() {
        let mut q = QuaternionF32::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q * 2.0, Quaternion::new(2.0, 4.0, 6.0, 8.0));
        q *= 0.5;
        assert_eq!(q, Quaternion::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn quaternion_negation_is_same_rotation() {
        let q = euler(1.0, 0.5, -0.25);
        assert_ne!(q, -q);
        assert!(q.almost_eq_rotation(-q));
        assert_abs_diff_eq!((-q).to_euler(), q.to_euler(), epsilon = 1e-12);
        assert!(!q.almost_eq_rotation(q.conjugate()));
    }

    #[test]
    fn quaternion_display() {
        assert_eq!(QuaternionF32::IDENTITY.to_string(), "{x: 0, y: 0, z: 0, w: 1}");
    }
}
