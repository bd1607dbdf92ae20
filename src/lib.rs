//! Vectors, quaternions and 4x4 matrices for graphics transform pipelines.
//!
//! The usual entry point is [`core::prelude`], which pulls in every maths type along with the
//! concrete `f32`/`f64` aliases:
//!
//! ```
//! use gdk_math::core::prelude::*;
//!
//! let model = Matrix4x4F32::from_translation_rotation_scale(
//!     Vector3 { x: 1.0, y: 2.0, z: 3.0 },
//!     Quaternion::IDENTITY,
//!     Vector3::ONE,
//! );
//! let moved = Vector3F32::ZERO * model;
//! assert_eq!(moved, Vector3 { x: 1.0, y: 2.0, z: 3.0 });
//! ```

pub mod core;
pub mod util;
