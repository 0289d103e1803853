use fender3d::bounding_volume::{Aabb, BoundingVolume, Obb, WorldObb};
use fender3d::math::{Matrix4, Real, Rotation, Vector};
use fender3d::query::sat;
use oorandom::Rand32;

fn random_box(rng: &mut Rand32) -> WorldObb {
    let mut rand = |range: Real| (rng.rand_float() * 2.0 - 1.0) * range;
    let half_extents = Vector::new(rand(1.0).abs() + 0.1, rand(1.0).abs() + 0.1, rand(1.0).abs() + 0.1);
    let rotation = Rotation::from_euler_angles(rand(3.0), rand(3.0), rand(3.0));
    let translation = Vector::new(rand(2.0), rand(2.0), rand(2.0));

    Obb::cuboid(half_extents)
        .unwrap()
        .transform(&(Matrix4::new_translation(&translation) * rotation.to_homogeneous()))
}

#[test]
fn sat_never_reports_pairs_rejected_by_the_broad_phase() {
    let mut rng = Rand32::new(42);
    let mut hits = 0;

    for _ in 0..2000 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);
        let mtv = sat::obb_obb_minimum_translation(&a, &b, 1.0e-6);

        if !sat::obb_obb_broad_phase(&a, &b) {
            assert_eq!(mtv, None);
        }

        if mtv.is_some() {
            hits += 1;
            assert!(a.aabb.intersects(&b.aabb));
        }
    }

    assert!(hits > 0);
}

#[test]
fn moving_by_the_mtv_separates_the_boxes() {
    let mut rng = Rand32::new(7);

    for _ in 0..500 {
        let a = random_box(&mut rng);
        let b = random_box(&mut rng);

        let Some(mtv) = sat::obb_obb_minimum_translation(&a, &b, 1.0e-6) else {
            continue;
        };

        if mtv.norm() > 1.0e-4 {
            // Push slightly further than the MTV: the boxes must be disjoint.
            let vertices = a.vertices.map(|v| v + mtv * 1.01 + mtv.normalize() * 1.0e-3);
            let moved = WorldObb {
                vertices,
                aabb: Aabb::from_points(vertices),
                ..a
            };
            assert_eq!(sat::obb_obb_minimum_translation(&moved, &b, 1.0e-6), None);
        }
    }
}
