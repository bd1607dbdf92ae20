//! Fixed-size vectors, quaternions and 4x4 matrices.
//!
//! All types are plain `Copy` values generic over their component type (see
//! [`Real`](crate::util::Real) and [`Integral`](crate::util::Integral)); the `F32`/`F64`/`I32`
//! aliases are the intended public spellings.
//!
//! Conventions, shared by every type here:
//! - right-handed axes, OpenGL style: +X right, +Y up, -Z forward, and
//!   [`Vector3::cross_product`] follows the right-hand rule;
//! - matrices are row-major and act on row vectors, so the translation lives in row 3 and a point
//!   is transformed as `point * matrix`;
//! - in both `Matrix4x4` and `Quaternion` products, `a * b` applies `b` first, then `a`;
//! - rotation matrices are built from the quaternion mirrored in Z, so under `point * matrix` a
//!   positive yaw turns +X towards +Y (right-handed), while a positive roll turns +Y towards -Z
//!   and a positive pitch turns +X towards +Z (both left-handed). See
//!   [`Matrix4x4::set_rotation`].

mod int_vector;
mod matrix;
mod quaternion;
mod vector;

pub use int_vector::*;
pub use matrix::*;
pub use quaternion::*;
pub use vector::*;
