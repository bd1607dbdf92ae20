use crate::util::linalg::{Quaternion, Vector2, Vector3, Vector4};
use crate::util::Real;
use approx::AbsDiffEq;
use itertools::{iproduct, Itertools};
use std::{
    fmt,
    fmt::Formatter,
    ops::{Index, IndexMut, Mul, MulAssign},
};

/// A 4x4 transform, stored row-major and applied to row vectors.
///
/// The upper-left 3x3 block holds rotation with scale baked into its rows, and row 3 holds the
/// translation, so a point is transformed as `point * matrix`:
/// ```text
/// | r00*sx r01*sx r02*sx 0 |
/// | r10*sy r11*sy r12*sy 0 |
/// | r20*sz r21*sz r22*sz 0 |
/// | tx     ty     tz     1 |
/// ```
/// Projection matrices also use column 3, and points transformed by them are divided by the
/// resulting `w`.
///
/// `a * b` is the transform that applies `b` first and then `a`, matching
/// [`Quaternion`]'s product.
///
/// # Examples
///
/// ```
/// use gdk_math::core::prelude::*;
///
/// let scale = Matrix4x4F32::from_translation_rotation_scale(
///     Vector3::ZERO,
///     Quaternion::IDENTITY,
///     Vector3::splat(2.0),
/// );
/// let shift = Matrix4x4F32::from_translation_rotation(Vector3::RIGHT, Quaternion::IDENTITY);
/// // Scale first, then shift.
/// assert_eq!(Vector3F32::RIGHT * (shift * scale), Vector3 { x: 3.0, y: 0.0, z: 0.0 });
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4<T: Real = f32> {
    m: [[T; 4]; 4],
}

pub type Matrix4x4F32 = Matrix4x4<f32>;
pub type Matrix4x4F64 = Matrix4x4<f64>;

impl<T: Real> Matrix4x4<T> {
    pub const IDENTITY: Self = Self {
        m: [
            [T::ONE, T::ZERO, T::ZERO, T::ZERO],
            [T::ZERO, T::ONE, T::ZERO, T::ZERO],
            [T::ZERO, T::ZERO, T::ONE, T::ZERO],
            [T::ZERO, T::ZERO, T::ZERO, T::ONE],
        ],
    };
    const ZERO: Self = Self {
        m: [[T::ZERO; 4]; 4],
    };

    #[must_use]
    pub const fn from_rows(rows: [[T; 4]; 4]) -> Self {
        Self { m: rows }
    }

    #[must_use]
    pub const fn rows(&self) -> [[T; 4]; 4] {
        self.m
    }

    /// Builds the transform that scales by `scale`, then rotates by `rotation`, then translates
    /// by `translation`.
    #[must_use]
    pub fn from_translation_rotation_scale(
        translation: Vector3<T>,
        rotation: Quaternion<T>,
        scale: Vector3<T>,
    ) -> Self {
        let mut rv = Self::IDENTITY;
        rv.set_rotation(rotation, scale);
        rv.set_translation(translation);
        rv
    }

    #[must_use]
    pub fn from_translation_rotation(translation: Vector3<T>, rotation: Quaternion<T>) -> Self {
        Self::from_translation_rotation_scale(translation, rotation, Vector3::ONE)
    }

    /// An OpenGL-style orthographic projection of a `size`-sized box centred on the view axis.
    ///
    /// `aspect` widens the horizontal extent; depth in `[-near, -far]` maps to `[-1, 1]`.
    #[must_use]
    pub fn orthographic(size: Vector2<T>, near: T, far: T, aspect: T) -> Self {
        let mut rv = Self::IDENTITY;
        rv.set_to_orthographic(size, near, far, aspect);
        rv
    }

    /// An OpenGL-style perspective projection with vertical field of view `fov` in radians.
    ///
    /// Depth in `[-near, -far]` maps to `[-1, 1]` after the perspective divide.
    #[must_use]
    pub fn perspective(fov: T, near: T, far: T, aspect: T) -> Self {
        let mut rv = Self::IDENTITY;
        rv.set_to_perspective(fov, near, far, aspect);
        rv
    }

    /// # Panics
    /// If `row` or `col` is not in `0..4`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.m[row][col]
    }

    /// # Panics
    /// If `row` or `col` is not in `0..4`.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.m[row][col] = value;
    }

    pub fn set_to_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    #[must_use]
    pub fn translation(&self) -> Vector3<T> {
        Vector3 {
            x: self.m[3][0],
            y: self.m[3][1],
            z: self.m[3][2],
        }
    }

    pub fn set_translation(&mut self, translation: Vector3<T>) {
        self.m[3][0] = translation.x;
        self.m[3][1] = translation.y;
        self.m[3][2] = translation.z;
    }

    /// Overwrites the upper-left 3x3 block with `rotation`, then multiplies row `i` of the block
    /// by `scale[i]`. Pass [`Vector3::ONE`] for a pure rotation.
    ///
    /// `rotation` need not be unit length; the block is normalised by `1 / |q|²`. The block is
    /// written for the handedness-mirrored quaternion `(x, y, -z, w)`, which
    /// [`rotation`](Self::rotation) undoes. Under `point * matrix` a positive angle therefore
    /// turns the axes as follows:
    /// - yaw (about Z) turns +X towards +Y, the right-handed sense;
    /// - roll (about X) turns +Y towards -Z, the opposite sense;
    /// - pitch (about Y) turns +X towards +Z, the opposite sense.
    pub fn set_rotation(&mut self, rotation: Quaternion<T>, scale: Vector3<T>) {
        let Quaternion { x, y, w, .. } = rotation;
        let z = -rotation.z;
        let (sqx, sqy, sqz, sqw) = (x * x, y * y, z * z, w * w);
        let invs = (sqx + sqy + sqz + sqw).recip();

        self.m[0][0] = (sqx - sqy - sqz + sqw) * invs;
        self.m[1][1] = (-sqx + sqy - sqz + sqw) * invs;
        self.m[2][2] = (-sqx - sqy + sqz + sqw) * invs;

        let (xy, zw) = (x * y, z * w);
        self.m[1][0] = T::TWO * (xy + zw) * invs;
        self.m[0][1] = T::TWO * (xy - zw) * invs;

        let (xz, yw) = (x * z, y * w);
        self.m[2][0] = T::TWO * (xz - yw) * invs;
        self.m[0][2] = T::TWO * (xz + yw) * invs;

        let (yz, xw) = (y * z, x * w);
        self.m[2][1] = T::TWO * (yz + xw) * invs;
        self.m[1][2] = T::TWO * (yz - xw) * invs;

        let scale: [T; 3] = scale.into();
        for (row, col) in iproduct!(0..3, 0..3) {
            self.m[row][col] = self.m[row][col] * scale[row];
        }
    }

    /// Extracts the rotation written by [`set_rotation`](Self::set_rotation), up to sign.
    ///
    /// The scale is divided out of the block first, so a zero [`scale`](Self::scale) component
    /// gives a `NaN` result. Shear is not supported.
    #[must_use]
    pub fn rotation(&self) -> Quaternion<T> {
        let scale: [T; 3] = self.scale().into();
        let mut r = [[T::ZERO; 3]; 3];
        for (row, col) in iproduct!(0..3, 0..3) {
            r[row][col] = self.m[row][col] / scale[row];
        }

        let quarter = T::HALF * T::HALF;
        let trace = r[0][0] + r[1][1] + r[2][2];
        let mut rv = if trace > T::ZERO {
            let s = T::HALF / (trace + T::ONE).sqrt();
            Quaternion {
                w: quarter / s,
                x: (r[2][1] - r[1][2]) * s,
                y: (r[0][2] - r[2][0]) * s,
                z: (r[1][0] - r[0][1]) * s,
            }
        } else if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
            let s = T::TWO * (T::ONE + r[0][0] - r[1][1] - r[2][2]).sqrt();
            Quaternion {
                w: (r[2][1] - r[1][2]) / s,
                x: quarter * s,
                y: (r[0][1] + r[1][0]) / s,
                z: (r[0][2] + r[2][0]) / s,
            }
        } else if r[1][1] > r[2][2] {
            let s = T::TWO * (T::ONE + r[1][1] - r[0][0] - r[2][2]).sqrt();
            Quaternion {
                w: (r[0][2] - r[2][0]) / s,
                x: (r[0][1] + r[1][0]) / s,
                y: quarter * s,
                z: (r[1][2] + r[2][1]) / s,
            }
        } else {
            let s = T::TWO * (T::ONE + r[2][2] - r[0][0] - r[1][1]).sqrt();
            Quaternion {
                w: (r[1][0] - r[0][1]) / s,
                x: (r[0][2] + r[2][0]) / s,
                y: (r[1][2] + r[2][1]) / s,
                z: quarter * s,
            }
        };
        // Right-handed fixup.
        rv.z = -rv.z;
        rv
    }

    /// The lengths of the first three rows of the 3x3 block. Always non-negative, so a mirrored
    /// scale comes back with its sign lost.
    #[must_use]
    pub fn scale(&self) -> Vector3<T> {
        let row_length = |row: usize| {
            Vector3 {
                x: self.m[row][0],
                y: self.m[row][1],
                z: self.m[row][2],
            }
            .length()
        };
        Vector3 {
            x: row_length(0),
            y: row_length(1),
            z: row_length(2),
        }
    }

    pub fn transpose(&mut self) {
        *self = self.transposed();
    }

    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut rv = Self::ZERO;
        for (row, col) in iproduct!(0..4, 0..4) {
            rv.m[row][col] = self.m[col][row];
        }
        rv
    }

    /// The 2x2 sub-determinants of the top two rows (`s`) and bottom two rows (`c`).
    fn sub_determinants(&self) -> ([T; 6], [T; 6]) {
        let a = &self.m;
        let s = [
            a[0][0] * a[1][1] - a[1][0] * a[0][1],
            a[0][0] * a[1][2] - a[1][0] * a[0][2],
            a[0][0] * a[1][3] - a[1][0] * a[0][3],
            a[0][1] * a[1][2] - a[1][1] * a[0][2],
            a[0][1] * a[1][3] - a[1][1] * a[0][3],
            a[0][2] * a[1][3] - a[1][2] * a[0][3],
        ];
        let c = [
            a[2][0] * a[3][1] - a[3][0] * a[2][1],
            a[2][0] * a[3][2] - a[3][0] * a[2][2],
            a[2][0] * a[3][3] - a[3][0] * a[2][3],
            a[2][1] * a[3][2] - a[3][1] * a[2][2],
            a[2][1] * a[3][3] - a[3][1] * a[2][3],
            a[2][2] * a[3][3] - a[3][2] * a[2][3],
        ];
        (s, c)
    }

    fn determinant_from(s: &[T; 6], c: &[T; 6]) -> T {
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    #[must_use]
    pub fn determinant(&self) -> T {
        let (s, c) = self.sub_determinants();
        Self::determinant_from(&s, &c)
    }

    /// Inverts `self` in place by cofactor expansion.
    ///
    /// There is no singularity check: a zero determinant leaves infinite and `NaN` entries. This
    /// is logged (at most once a second), but not reported to the caller.
    pub fn invert(&mut self) {
        let (s, c) = self.sub_determinants();
        let det = Self::determinant_from(&s, &c);
        if det == T::ZERO {
            crate::warn_every_seconds!(1, "Matrix4x4::invert(): singular matrix:\n{}", self);
        }
        let invdet = det.recip();
        let a = self.m;

        self.m = [
            [
                (a[1][1] * c[5] - a[1][2] * c[4] + a[1][3] * c[3]) * invdet,
                (-a[0][1] * c[5] + a[0][2] * c[4] - a[0][3] * c[3]) * invdet,
                (a[3][1] * s[5] - a[3][2] * s[4] + a[3][3] * s[3]) * invdet,
                (-a[2][1] * s[5] + a[2][2] * s[4] - a[2][3] * s[3]) * invdet,
            ],
            [
                (-a[1][0] * c[5] + a[1][2] * c[2] - a[1][3] * c[1]) * invdet,
                (a[0][0] * c[5] - a[0][2] * c[2] + a[0][3] * c[1]) * invdet,
                (-a[3][0] * s[5] + a[3][2] * s[2] - a[3][3] * s[1]) * invdet,
                (a[2][0] * s[5] - a[2][2] * s[2] + a[2][3] * s[1]) * invdet,
            ],
            [
                (a[1][0] * c[4] - a[1][1] * c[2] + a[1][3] * c[0]) * invdet,
                (-a[0][0] * c[4] + a[0][1] * c[2] - a[0][3] * c[0]) * invdet,
                (a[3][0] * s[4] - a[3][1] * s[2] + a[3][3] * s[0]) * invdet,
                (-a[2][0] * s[4] + a[2][1] * s[2] - a[2][3] * s[0]) * invdet,
            ],
            [
                (-a[1][0] * c[3] + a[1][1] * c[1] - a[1][2] * c[0]) * invdet,
                (a[0][0] * c[3] - a[0][1] * c[1] + a[0][2] * c[0]) * invdet,
                (-a[3][0] * s[3] + a[3][1] * s[1] - a[3][2] * s[0]) * invdet,
                (a[2][0] * s[3] - a[2][1] * s[1] + a[2][2] * s[0]) * invdet,
            ],
        ];
    }

    /// See [`invert`](Self::invert).
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut rv = *self;
        rv.invert();
        rv
    }

    /// Inverts a rotation-plus-translation matrix in place by transposing the rotation block.
    ///
    /// Only correct when the 3x3 block is orthonormal. Scale, shear or projection give a wrong
    /// result without any warning; use [`invert`](Self::invert) for those.
    pub fn invert_affine(&mut self) {
        let t = self.translation();
        let r = self.m;
        for (row, col) in iproduct!(0..3, 0..3) {
            self.m[row][col] = r[col][row];
        }
        for col in 0..3 {
            self.m[3][col] = -(t.x * r[col][0] + t.y * r[col][1] + t.z * r[col][2]);
        }
        for row in 0..3 {
            self.m[row][3] = T::ZERO;
        }
        self.m[3][3] = T::ONE;
    }

    /// See [`invert_affine`](Self::invert_affine).
    #[must_use]
    pub fn inverse_affine(&self) -> Self {
        let mut rv = *self;
        rv.invert_affine();
        rv
    }

    /// Sets `self` to `self * right`, i.e. `right` is applied before the old `self`.
    pub fn multiply(&mut self, right: Matrix4x4<T>) {
        *self = *self * right;
    }

    /// Prepends a translation by `v`, so that points are moved by `v` before the existing
    /// transform applies.
    pub fn translate(&mut self, v: Vector3<T>) {
        for col in 0..4 {
            self.m[3][col] =
                self.m[0][col] * v.x + self.m[1][col] * v.y + self.m[2][col] * v.z + self.m[3][col];
        }
    }

    /// Prepends a scale by `v`.
    pub fn scale_by(&mut self, v: Vector3<T>) {
        let v: [T; 3] = v.into();
        for (row, col) in iproduct!(0..3, 0..4) {
            self.m[row][col] = self.m[row][col] * v[row];
        }
    }

    pub fn set_to_orthographic(&mut self, size: Vector2<T>, near: T, far: T, aspect: T) {
        let depth = far - near;
        *self = Self::ZERO;
        self.m[0][0] = T::TWO / (size.x * aspect);
        self.m[1][1] = T::TWO / size.y;
        self.m[2][2] = -T::TWO / depth;
        self.m[3][2] = -(far + near) / depth;
        self.m[3][3] = T::ONE;
    }

    pub fn set_to_perspective(&mut self, fov: T, near: T, far: T, aspect: T) {
        let tan_half_fov = (fov * T::HALF).tan();
        let depth = far - near;
        *self = Self::ZERO;
        self.m[0][0] = (aspect * tan_half_fov).recip();
        self.m[1][1] = tan_half_fov.recip();
        self.m[2][2] = -(far + near) / depth;
        self.m[2][3] = T::NEG_ONE;
        self.m[3][2] = -(T::TWO * far * near) / depth;
    }

    #[must_use]
    pub fn almost_eq(&self, rhs: Self) -> bool {
        self.abs_diff_eq(&rhs, T::ALMOST_EQ_EPSILON)
    }
}

impl<T: Real> Default for Matrix4x4<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Real> Index<(usize, usize)> for Matrix4x4<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.m[row][col]
    }
}
impl<T: Real> IndexMut<(usize, usize)> for Matrix4x4<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.m[row][col]
    }
}

impl<T: Real> AbsDiffEq for Matrix4x4<T> {
    type Epsilon = T;

    fn default_epsilon() -> Self::Epsilon {
        T::ALMOST_EQ_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Real> fmt::Display for Matrix4x4<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = self
            .m
            .iter()
            .map(|row| format!("[{}]", row.iter().join(", ")))
            .join("\n");
        write!(f, "{rows}")
    }
}

impl<T: Real> Mul<Matrix4x4<T>> for Matrix4x4<T> {
    type Output = Matrix4x4<T>;

    fn mul(self, rhs: Matrix4x4<T>) -> Self::Output {
        let mut rv = Self::ZERO;
        for (row, col) in iproduct!(0..4, 0..4) {
            rv.m[row][col] = (0..4).fold(T::ZERO, |acc, k| acc + self.m[k][col] * rhs.m[row][k]);
        }
        rv
    }
}
impl<T: Real> MulAssign<Matrix4x4<T>> for Matrix4x4<T> {
    fn mul_assign(&mut self, rhs: Matrix4x4<T>) {
        self.multiply(rhs);
    }
}

impl<T: Real> Mul<Matrix4x4<T>> for Vector4<T> {
    type Output = Vector4<T>;

    /// The raw homogeneous product, with no perspective divide.
    fn mul(self, rhs: Matrix4x4<T>) -> Self::Output {
        let column = |col: usize| {
            self.x * rhs.m[0][col] + self.y * rhs.m[1][col] + self.z * rhs.m[2][col] + self.w * rhs.m[3][col]
        };
        Vector4 {
            x: column(0),
            y: column(1),
            z: column(2),
            w: column(3),
        }
    }
}

impl<T: Real> Mul<Matrix4x4<T>> for Vector3<T> {
    type Output = Vector3<T>;

    /// Transforms the point `self` (`w = 1`). The result is divided by the transformed `w`
    /// unless it lies within [`PERSPECTIVE_DIVIDE_EPSILON`](crate::core::config::PERSPECTIVE_DIVIDE_EPSILON)
    /// of 1.
    fn mul(self, rhs: Matrix4x4<T>) -> Self::Output {
        let Vector4 { x, y, z, w } = Vector4::from(self) * rhs;
        if (w - T::ONE).abs() > T::PERSPECTIVE_DIVIDE_EPSILON {
            Vector3 {
                x: x / w,
                y: y / w,
                z: z / w,
            }
        } else {
            Vector3 { x, y, z }
        }
    }
}
impl<T: Real> MulAssign<Matrix4x4<T>> for Vector3<T> {
    fn mul_assign(&mut self, rhs: Matrix4x4<T>) {
        *self = *self * rhs;
    }
}
