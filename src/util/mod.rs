use crate::core::config::{EPSILON, PERSPECTIVE_DIVIDE_EPSILON};
use anyhow::{anyhow, Result};
use approx::AbsDiffEq;
use num_traits::{Float, FloatConst, PrimInt, Signed};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tracing_subscriber::fmt::time::OffsetTime;

pub mod assert;
pub mod linalg;
pub mod log;

/// Floating-point component type for vectors, quaternions and matrices.
///
/// Implemented for [`f32`] and [`f64`] only. The associated constants let every named constant
/// of the maths types (`Vector3::UP`, `Matrix4x4::IDENTITY`, ...) be evaluated at compile time,
/// which [`Float`]'s `zero()`/`one()` functions cannot do.
pub trait Real:
    Float + FloatConst + AbsDiffEq<Epsilon = Self> + Debug + Display + Default + Send + Sync + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const HALF: Self;
    const TWO: Self;
    /// See [`EPSILON`](crate::core::config::EPSILON).
    const ALMOST_EQ_EPSILON: Self;
    /// See [`PERSPECTIVE_DIVIDE_EPSILON`](crate::core::config::PERSPECTIVE_DIVIDE_EPSILON).
    const PERSPECTIVE_DIVIDE_EPSILON: Self;
}

impl Real for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const NEG_ONE: Self = -1.0;
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    #[allow(clippy::cast_possible_truncation)]
    const ALMOST_EQ_EPSILON: Self = EPSILON as f32;
    #[allow(clippy::cast_possible_truncation)]
    const PERSPECTIVE_DIVIDE_EPSILON: Self = PERSPECTIVE_DIVIDE_EPSILON as f32;
}

impl Real for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const NEG_ONE: Self = -1.0;
    const HALF: Self = 0.5;
    const TWO: Self = 2.0;
    const ALMOST_EQ_EPSILON: Self = EPSILON;
    const PERSPECTIVE_DIVIDE_EPSILON: Self = PERSPECTIVE_DIVIDE_EPSILON;
}

/// Integral component type for [`IntVector2`](linalg::IntVector2), signed or unsigned.
pub trait Integral: PrimInt + Hash + Debug + Display + Default + Send + Sync + 'static {
    const ZERO: Self;
    const ONE: Self;
}

/// The signed [`Integral`] types, which also have the `-1` the `DOWN` and `LEFT` constants need.
pub trait SignedIntegral: Integral + Signed {
    const NEG_ONE: Self;
}

macro_rules! impl_integral {
    ($($t:ty),+) => {
        $(
            impl Integral for $t {
                const ZERO: Self = 0;
                const ONE: Self = 1;
            }
        )+
    };
}
impl_integral!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_signed_integral {
    ($($t:ty),+) => {
        $(
            impl SignedIntegral for $t {
                const NEG_ONE: Self = -1;
            }
        )+
    };
}
impl_signed_integral!(i8, i16, i32, i64, isize);

/// Installs a `tracing` subscriber writing to stderr, with UTC timestamps and source locations.
///
/// Fails if a global subscriber has already been set.
pub fn setup_log() -> Result<()> {
    let timer = OffsetTime::new(
        time::UtcOffset::UTC,
        time::macros::format_description!("[hour]:[minute]:[second].[subsecond digits:6]"),
    );
    tracing_subscriber::fmt()
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(timer),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
