use fender3d::bounding_volume::Obb;
use fender3d::math::{Real, Vector};
use fender3d::pipeline::{CollisionParams, CollisionPipeline, Partition};
use fender3d::query::{CollisionError, DegenerateConfiguration};
use fender3d::scene::{BodyFlags, BodyKind, CameraBody, Node, NodeHandle, SceneGraph};
use fender3d::control::{OrbitRotation, VehicleBody, VehicleParams};

fn cuboid(half_extents: Vector) -> Obb {
    Obb::cuboid(half_extents).unwrap()
}

fn body(pos: Vector, half_extents: Vector, flags: BodyFlags, mass: Real) -> Node {
    Node::new()
        .with_translation(pos)
        .with_obb(cuboid(half_extents))
        .with_flags(flags)
        .with_mass(mass)
}

fn pipeline(roots: &[NodeHandle]) -> CollisionPipeline {
    CollisionPipeline::new(CollisionParams::default())
        .with_partition(Partition::with_roots("world", roots.iter().copied()).unwrap())
}

#[test]
fn overlapping_unit_cubes_are_separated_along_x() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let a = graph.insert(body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 1.0));
    let b = graph.insert(body(Vector::new(0.5, 0.0, 0.0), half, BodyFlags::COLLIDABLE, 1.0));
    let pipeline = pipeline(&[a, b]);

    assert!(pipeline.resolve_against_world(&mut graph, a, 0.02, None).unwrap());
    assert_relative_eq!(graph[a].translation(), Vector::new(-0.5, 0.0, 0.0), epsilon = 1.0e-6);
    // The obstacle is immovable.
    assert_relative_eq!(graph[b].translation(), Vector::new(0.5, 0.0, 0.0));
}

#[test]
fn distant_unit_cubes_do_not_collide() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let a = graph.insert(body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 1.0));
    let b = graph.insert(body(Vector::new(2.0, 0.0, 0.0), half, BodyFlags::COLLIDABLE, 1.0));
    let pipeline = pipeline(&[a, b]);

    assert!(!pipeline.resolve_against_world(&mut graph, a, 0.02, None).unwrap());
    assert_eq!(graph[a].translation(), Vector::zeros());
}

#[test]
fn movable_bodies_share_the_push_by_mass() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(5.0);
    let light = graph.insert(body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 1.0));
    let heavy = graph.insert(body(
        Vector::new(6.0, 0.0, 0.0),
        half,
        BodyFlags::COLLIDABLE | BodyFlags::MOVABLE,
        3.0,
    ));
    let pipeline = pipeline(&[light, heavy]);

    assert!(pipeline.resolve_against_world(&mut graph, light, 0.02, None).unwrap());

    let light_offset = graph[light].translation();
    let heavy_offset = graph[heavy].translation() - Vector::new(6.0, 0.0, 0.0);
    assert_relative_eq!(light_offset, Vector::new(-3.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(heavy_offset, Vector::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
    assert_relative_eq!(light_offset - heavy_offset, Vector::new(-4.0, 0.0, 0.0), epsilon = 1.0e-5);
}

#[test]
fn only_collidable_nodes_are_tested() {
    let mut graph = SceneGraph::new();
    let moved = graph.insert(body(Vector::zeros(), Vector::repeat(0.5), BodyFlags::empty(), 1.0));

    // A huge non-collidable parent, with a small collidable child away from the moved body.
    let parent = graph.insert(body(Vector::zeros(), Vector::repeat(5.0), BodyFlags::empty(), 1.0));
    let child = graph
        .insert_child(
            parent,
            body(Vector::new(3.0, 0.0, 0.0), Vector::repeat(0.5), BodyFlags::COLLIDABLE, 1.0),
        )
        .unwrap();
    let pipeline = pipeline(&[parent]);

    assert!(!pipeline.resolve_against_world(&mut graph, moved, 0.02, None).unwrap());

    graph.set_translation(child, Vector::new(0.75, 0.0, 0.0));
    assert!(pipeline.resolve_against_world(&mut graph, moved, 0.02, None).unwrap());
    assert_relative_eq!(graph[moved].translation(), Vector::new(-0.25, 0.0, 0.0), epsilon = 1.0e-6);
}

#[test]
fn collidable_nodes_hide_their_children() {
    let mut graph = SceneGraph::new();
    let moved = graph.insert(body(Vector::zeros(), Vector::repeat(0.5), BodyFlags::empty(), 1.0));

    // The collidable parent is far away, its overlapping child is covered by the parent box.
    let parent = graph.insert(body(
        Vector::new(10.0, 0.0, 0.0),
        Vector::repeat(0.5),
        BodyFlags::COLLIDABLE,
        1.0,
    ));
    let _ = graph
        .insert_child(
            parent,
            body(Vector::new(-10.0, 0.0, 0.0), Vector::repeat(0.5), BodyFlags::COLLIDABLE, 1.0),
        )
        .unwrap();
    let pipeline = pipeline(&[parent]);

    assert!(!pipeline.resolve_against_world(&mut graph, moved, 0.02, None).unwrap());
}

#[test]
fn a_body_never_collides_with_its_own_subtree() {
    let mut graph = SceneGraph::new();
    let moved = graph.insert(body(Vector::zeros(), Vector::repeat(0.5), BodyFlags::COLLIDABLE, 1.0));
    let _ = graph
        .insert_child(
            moved,
            body(Vector::new(0.2, 0.0, 0.0), Vector::repeat(0.5), BodyFlags::COLLIDABLE, 1.0),
        )
        .unwrap();
    let pipeline = pipeline(&[moved]);

    assert!(!pipeline.resolve_against_world(&mut graph, moved, 0.02, None).unwrap());
    assert_eq!(graph[moved].translation(), Vector::zeros());
}

#[test]
fn animated_bodies_bounce_off_walls() {
    let mut graph = SceneGraph::new();
    let wall = graph.insert(body(
        Vector::new(-1.0, 0.0, 0.0),
        Vector::new(0.5, 5.0, 5.0),
        BodyFlags::COLLIDABLE,
        1.0,
    ));
    let ball = graph.insert(
        body(Vector::new(-0.35, 0.0, 0.0), Vector::repeat(0.1), BodyFlags::ANIMATED, 1.0)
            .with_velocity(Vector::new(-0.1, 0.0, 0.1)),
    );
    let pipeline = pipeline(&[wall]);

    assert!(pipeline.integrate(&mut graph, ball, 1.0).unwrap());

    let velocity = graph[ball].body().velocity;
    assert_relative_eq!(velocity.norm(), 0.2, epsilon = 1.0e-6);
    assert!(velocity.x >= 0.0);
    assert_relative_eq!(graph[ball].translation().x, -0.4, epsilon = 1.0e-5);
}

#[test]
fn non_animated_bodies_are_not_integrated() {
    let mut graph = SceneGraph::new();
    let node = graph.insert(
        body(Vector::zeros(), Vector::repeat(0.1), BodyFlags::empty(), 1.0)
            .with_velocity(Vector::new(1.0, 0.0, 0.0)),
    );
    let pipeline = pipeline(&[]);

    assert!(!pipeline.integrate(&mut graph, node, 1.0).unwrap());
    assert_eq!(graph[node].translation(), Vector::zeros());
}

#[test]
fn head_on_impact_stops_the_vehicle() {
    let mut graph = SceneGraph::new();
    let mut vehicle = VehicleBody::new(VehicleParams::default());
    vehicle.set_speed(1.0);
    let car = graph.insert(
        body(Vector::zeros(), Vector::repeat(0.5), BodyFlags::COLLIDABLE, 100_000.0)
            .with_kind(BodyKind::Vehicle(vehicle)),
    );
    let wall = graph.insert(body(
        Vector::new(0.0, 0.0, 0.8),
        Vector::new(5.0, 5.0, 0.5),
        BodyFlags::COLLIDABLE,
        1.0,
    ));
    let pipeline = pipeline(&[wall]);

    assert!(pipeline.resolve_against_world(&mut graph, car, 0.02, None).unwrap());
    assert_relative_eq!(graph[car].translation(), Vector::new(0.0, 0.0, -0.2), epsilon = 1.0e-5);
    assert_relative_eq!(graph[car].body().kind.as_vehicle().unwrap().speed(), 0.0, epsilon = 1.0e-5);
}

#[test]
fn pushed_bodies_are_resolved_against_the_rest_of_the_world() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let pusher = graph.insert(body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 1.0));
    let pushed = graph.insert(body(
        Vector::new(0.8, 0.0, 0.0),
        half,
        BodyFlags::COLLIDABLE | BodyFlags::MOVABLE,
        1.0,
    ));
    let wall = graph.insert(body(Vector::new(1.7, 0.0, 0.0), half, BodyFlags::COLLIDABLE, 1.0));
    let pipeline = pipeline(&[pusher, pushed, wall]);

    assert!(pipeline.resolve_against_world(&mut graph, pusher, 0.02, None).unwrap());
    assert_relative_eq!(graph[pusher].translation().x, -0.1, epsilon = 1.0e-5);
    // Pushed into the wall, then out of it.
    assert_relative_eq!(graph[pushed].translation().x, 0.7, epsilon = 1.0e-5);
}

#[test]
fn massless_pairs_are_reported() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let a = graph.insert(body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 0.0));
    let b = graph.insert(body(
        Vector::new(0.5, 0.0, 0.0),
        half,
        BodyFlags::COLLIDABLE | BodyFlags::MOVABLE,
        0.0,
    ));
    let pipeline = pipeline(&[a, b]);

    assert_eq!(
        pipeline.resolve_against_world(&mut graph, a, 0.02, None),
        Err(CollisionError::Degenerate(DegenerateConfiguration::CombinedMass(0.0)))
    );
}

#[test]
fn pushing_a_massless_crate_is_reported_without_touching_the_vehicle() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let mut vehicle = VehicleBody::new(VehicleParams::default());
    vehicle.set_speed(1.0);
    let car = graph.insert(
        body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 100_000.0)
            .with_kind(BodyKind::Vehicle(vehicle)),
    );
    let crate_ = graph.insert(body(
        Vector::new(0.0, 0.0, 0.9),
        half,
        BodyFlags::COLLIDABLE | BodyFlags::MOVABLE,
        0.0,
    ));
    let pipeline = pipeline(&[car, crate_]);

    for dt in [0.0, 0.02] {
        assert_eq!(
            pipeline.resolve_against_world(&mut graph, car, dt, None),
            Err(CollisionError::Degenerate(DegenerateConfiguration::MassRatio(0.0)))
        );
        let speed = graph[car].body().kind.as_vehicle().unwrap().speed();
        assert_eq!(speed, 1.0);
        assert_eq!(graph[car].translation(), Vector::zeros());
    }
}

#[test]
fn null_timestep_push_keeps_the_vehicle_speed() {
    let mut graph = SceneGraph::new();
    let half = Vector::repeat(0.5);
    let mut vehicle = VehicleBody::new(VehicleParams::default());
    vehicle.set_speed(1.0);
    let car = graph.insert(
        body(Vector::zeros(), half, BodyFlags::COLLIDABLE, 100_000.0)
            .with_kind(BodyKind::Vehicle(vehicle)),
    );
    let crate_ = graph.insert(body(
        Vector::new(0.0, 0.0, 0.9),
        half,
        BodyFlags::COLLIDABLE | BodyFlags::MOVABLE,
        500.0,
    ));
    let pipeline = pipeline(&[car, crate_]);

    assert!(pipeline.resolve_against_world(&mut graph, car, 0.0, None).unwrap());
    let speed = graph[car].body().kind.as_vehicle().unwrap().speed();
    assert!(speed.is_finite());
    assert_relative_eq!(speed, 1.0);
}

#[test]
fn camera_hitting_a_wall_turns_its_orbit_anchor() {
    let mut graph = SceneGraph::new();
    let anchor = graph.insert(Node::new().with_orbit(OrbitRotation::default()));
    let camera_pos = Vector::new(0.0, 0.0, -3.0);
    let camera = graph
        .insert_child(
            anchor,
            Node::new()
                .with_translation(camera_pos)
                .with_obb(cuboid(Vector::repeat(0.1)))
                .with_kind(BodyKind::Camera(CameraBody {
                    default_position: camera_pos,
                })),
        )
        .unwrap();
    let wall = graph.insert(body(
        Vector::new(0.25, 0.0, -3.0),
        Vector::new(0.2, 1.0, 1.0),
        BodyFlags::COLLIDABLE,
        1.0,
    ));
    let pipeline = pipeline(&[wall]);

    assert!(pipeline.resolve_against_world(&mut graph, camera, 0.02, None).unwrap());

    // The camera slides around the wall instead of being translated.
    let orbit = graph[anchor].body().orbit.unwrap();
    let expected_yaw = (0.05 as Real / 3.0).atan();
    assert_relative_eq!(orbit.yaw(), expected_yaw, epsilon = 1.0e-4);
    assert_relative_eq!(orbit.pitch(), 0.0);
    assert_relative_eq!(graph[anchor].rotation().angle(), expected_yaw, epsilon = 1.0e-4);
    assert_relative_eq!(graph[camera].translation(), camera_pos, epsilon = 1.0e-6);
    assert_relative_eq!(graph[wall].translation(), Vector::new(0.25, 0.0, -3.0));
}
