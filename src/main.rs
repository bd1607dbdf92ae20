use gdk_math::core::prelude::*;
use gdk_math::{check, check_almost_eq, check_eq, check_le};
use itertools::iproduct;

fn main() -> Result<()> {
    gdk_math::util::setup_log()?;
    run_sanity_checks()?;

    let camera = Matrix4x4F32::from_translation_rotation(
        Vector3 { x: 0.0, y: 2.0, z: 5.0 },
        Quaternion::IDENTITY,
    );
    let view = camera.inverse_affine();
    let projection = Matrix4x4F32::perspective(60_f32.to_radians(), 0.1, 100.0, 16.0 / 9.0);
    let model = Matrix4x4F32::from_translation_rotation_scale(
        Vector3 { x: 0.0, y: 2.0, z: -5.0 },
        Quaternion::from_euler(Vector3 { x: 0.0, y: 0.0, z: 45_f32.to_radians() }),
        Vector3::splat(1.5),
    );
    info!("model:\n{model}");
    info!("view:\n{view}");
    info!("projection:\n{projection}");

    // Model first, then view, then projection.
    let mvp = projection * view * model;
    for (x, y, z) in iproduct!([-0.5, 0.5], [-0.5, 0.5], [-0.5, 0.5]) {
        let corner = Vector3 { x, y, z };
        let ndc = corner * mvp;
        info!("{corner} -> {ndc}");
        check_le!(ndc.x.abs(), 1.0);
        check_le!(ndc.y.abs(), 1.0);
        check_le!(ndc.z.abs(), 1.0);
    }

    let centre = Vector3F32::ZERO * (view * model);
    check_almost_eq!(centre, Vector3 { x: 0.0, y: 0.0, z: -10.0 });
    info!("model centre in view space: {centre}, distance {}", centre.length());
    Ok(())
}

fn run_sanity_checks() -> Result<()> {
    check_eq!(Vector3F32::new(3.0, 4.0, 0.0).length(), 5.0);
    check_eq!(Vector3F32::UP.cross_product(Vector3::RIGHT), Vector3::FORWARD);
    check_eq!(QuaternionF32::IDENTITY.to_euler(), Vector3::ZERO);

    let yaw = Vector3F32 { x: 0.0, y: 0.0, z: 90_f32.to_radians() };
    check_almost_eq!(Quaternion::from(yaw).to_euler(), yaw);

    let q = Quaternion::from_euler(Vector3F32 { x: 0.3, y: -0.6, z: 1.2 });
    check_almost_eq!(q * q.inverse()?, Quaternion::IDENTITY);
    check_almost_eq!(q * q.inverse_unit(), Quaternion::IDENTITY);
    match Quaternion::new(0.0_f32, 0.0, 0.0, 0.0).inverse() {
        Ok(inverse) => bail!("zero quaternion was inverted: {inverse}"),
        Err(e) => info!("as expected: {e}"),
    }

    let translation = Vector3F32::new(1.0, -2.0, 3.0);
    let scale = Vector3F32::new(0.5, 2.0, 4.0);
    let m = Matrix4x4::from_translation_rotation_scale(translation, q, scale);
    check_almost_eq!(m.translation(), translation);
    check_almost_eq!(m.scale(), scale);
    check!(m.rotation().almost_eq_rotation(q));
    check_almost_eq!(m * m.inverse(), Matrix4x4::IDENTITY);

    let mut v = Vector3F32::ZERO;
    v.normalize();
    check_eq!(v, Vector3::ZERO);
    Ok(())
}
