#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    util::{
        assert::*,
        linalg,
        linalg::{
            IntVector2, IntVector2I32, Matrix4x4, Matrix4x4F32, Matrix4x4F64, Quaternion,
            QuaternionF32, QuaternionF64, Vector2, Vector2F32, Vector2F64, Vector3, Vector3F32,
            Vector3F64, Vector4, Vector4F32, Vector4F64,
        },
        Integral, Real, SignedIntegral,
    },
};
