use super::CollisionParams;
use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::query::{CollisionError, DegenerateConfiguration};
use crate::scene::{NodeHandle, SceneGraph};
use crate::utils;

/// Moves a camera out of an obstacle by rotating its orbit anchor.
///
/// Instead of translating the camera by `mtv`, the lateral and vertical parts
/// of the push (expressed in the anchor frame) are turned into yaw and pitch
/// increments of the anchor's [`OrbitRotation`](crate::control::OrbitRotation),
/// which makes the camera slide around the obstacle at a constant distance.
/// The part of the push along the anchor's `Z` axis moves the camera closer
/// to (or further from) the anchor. A camera pushed further than
/// `camera_max_distance` is put back at `camera_reset_distance`.
///
/// A camera without an orbit anchor is translated by `mtv` directly.
pub fn slide_camera(
    graph: &mut SceneGraph,
    camera: NodeHandle,
    mtv: &Vector,
    params: &CollisionParams,
) -> Result<(), CollisionError> {
    let anchored = graph[camera]
        .parent()
        .and_then(|anchor| Some((anchor, graph[anchor].body().orbit?)));

    let Some((anchor, mut orbit)) = anchored else {
        log::debug!("camera {camera} has no orbit anchor, translating it directly.");
        graph.translate_by_world_offset(camera, mtv)?;
        return Ok(());
    };

    let offset = graph.world_to_parent_direction(camera, mtv)?;
    let to_camera = graph[camera].translation();
    let to_camera_dir = to_camera
        .try_normalize(DEFAULT_EPSILON)
        .ok_or(DegenerateConfiguration::CameraAtAnchor(camera))?;

    let x_proj = utils::project(&offset, &Vector::x()) + to_camera;
    let y_proj = utils::project(&offset, &Vector::y()) + to_camera;
    let z_proj = utils::project(&offset, &Vector::z());

    orbit.add_pitch(orbit_delta(&y_proj, &to_camera_dir, &-Vector::y()));
    orbit.add_yaw(orbit_delta(&x_proj, &to_camera_dir, &-Vector::x()));
    graph.body_mut(anchor).orbit = Some(orbit);
    graph.set_rotation(anchor, orbit.to_rotation());

    let mut translation = to_camera + z_proj;
    let distance = translation.norm();
    if distance > params.camera_max_distance {
        translation *= params.camera_reset_distance / distance;
    }
    graph.set_translation(camera, translation);

    Ok(())
}

/// The angle between `pushed` and `dir`, signed by the side of `reference` `pushed` lies on.
fn orbit_delta(pushed: &Vector, dir: &Vector, reference: &Vector) -> Real {
    match pushed.try_normalize(DEFAULT_EPSILON) {
        Some(pushed) => {
            utils::clamp(-1.0, pushed.dot(dir), 1.0).acos() * utils::sign(pushed.dot(reference))
        }
        None => 0.0,
    }
}
