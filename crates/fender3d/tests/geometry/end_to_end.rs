use fender3d::bounding_volume::Obb;
use fender3d::control::{
    CameraFollow, DriveInput, FollowParams, OrbitRotation, VehicleBody, VehicleController,
    VehicleParams,
};
use fender3d::math::{Real, Vector};
use fender3d::pipeline::{CollisionParams, CollisionPipeline, Partition, Simulation, SimulationParams};
use fender3d::query::sat;
use fender3d::scene::{BodyFlags, BodyKind, CameraBody, Node, SceneGraph};

#[test]
fn vehicle_pushes_a_light_crate() {
    let dt = 0.02;
    let obb = Obb::cuboid(Vector::repeat(0.5)).unwrap();
    let mut vehicle = VehicleBody::new(VehicleParams::default());
    vehicle.set_speed(1.0);

    let mut graph = SceneGraph::new();
    let car = graph.insert(
        Node::new()
            .with_obb(obb)
            .with_flags(BodyFlags::COLLIDABLE)
            .with_mass(100_000.0)
            .with_kind(BodyKind::Vehicle(vehicle)),
    );
    let crate_ = graph.insert(
        Node::new()
            .with_translation(Vector::new(0.0, 0.0, 0.9))
            .with_obb(obb)
            .with_flags(BodyFlags::COLLIDABLE | BodyFlags::MOVABLE)
            .with_mass(500.0),
    );
    let pipeline = CollisionPipeline::new(CollisionParams::default())
        .with_partition(Partition::with_roots("world", [car, crate_]).unwrap());

    // Drive head-on into the crate for one tick.
    graph.set_translation(car, Vector::new(0.0, 0.0, 1.0 * dt));
    let mtv = sat::obb_obb_minimum_translation(
        &graph.global_obb(car).unwrap(),
        &graph.global_obb(crate_).unwrap(),
        CollisionParams::default().axis_epsilon,
    )
    .unwrap();
    assert_relative_eq!(mtv, Vector::new(0.0, 0.0, -0.12), epsilon = 1.0e-5);

    assert!(pipeline.resolve_against_world(&mut graph, car, dt, None).unwrap());

    let car_offset = graph[car].translation() - Vector::new(0.0, 0.0, dt);
    let crate_offset = graph[crate_].translation() - Vector::new(0.0, 0.0, 0.9);
    assert_relative_eq!(car_offset, mtv * (500.0 / 100_500.0), epsilon = 1.0e-6);
    assert_relative_eq!(crate_offset, -mtv * (100_000.0 / 100_500.0), epsilon = 1.0e-6);

    let expected_speed = (dt * (500.0 as Real / 100_500.0).ln()).exp();
    let speed = graph[car].body().kind.as_vehicle().unwrap().speed();
    assert_relative_eq!(speed, expected_speed, epsilon = 1.0e-6);
    // A small reduction, not a full stop.
    assert!(speed > 0.85 && speed < 1.0);
}

struct Scene {
    sim: Simulation,
    car: fender3d::scene::NodeHandle,
    anchor: fender3d::scene::NodeHandle,
    camera: fender3d::scene::NodeHandle,
    chests: Vec<fender3d::scene::NodeHandle>,
    prop: fender3d::scene::NodeHandle,
}

fn driving_scene() -> Scene {
    let cube = |half: Real| Obb::cuboid(Vector::repeat(half)).unwrap();
    let in_play = BodyFlags::RENDERABLE | BodyFlags::COLLIDABLE;
    let mut graph = SceneGraph::new();

    let car = graph.insert(
        Node::new()
            .with_name("car")
            .with_obb(cube(0.5))
            .with_flags(in_play)
            .with_kind(BodyKind::Vehicle(VehicleBody::new(VehicleParams::default()))),
    );
    let anchor = graph
        .insert_child(car, Node::new().with_orbit(OrbitRotation::default()))
        .unwrap();
    let camera_pos = Vector::new(0.0, 0.5, -3.0);
    let camera = graph
        .insert_child(
            anchor,
            Node::new()
                .with_translation(camera_pos)
                .with_obb(cube(0.1))
                .with_kind(BodyKind::Camera(CameraBody {
                    default_position: camera_pos,
                })),
        )
        .unwrap();

    let ground_wall = graph.insert(
        Node::new()
            .with_translation(Vector::new(20.0, 0.0, 0.0))
            .with_obb(cube(1.0))
            .with_flags(in_play),
    );
    let chests: Vec<_> = [-10.0, 1.2, 10.0]
        .iter()
        .map(|x: &Real| {
            graph.insert(
                Node::new()
                    .with_translation(Vector::new(0.0, 0.0, *x))
                    .with_obb(cube(0.5))
                    .with_flags(in_play),
            )
        })
        .collect();

    let bounds = graph.insert(
        Node::new()
            .with_translation(Vector::new(0.0, 30.0, 0.0))
            .with_obb(cube(2.0))
            .with_flags(in_play),
    );
    let prop = graph.insert(
        Node::new()
            .with_translation(Vector::new(0.0, 20.0, 0.0))
            .with_obb(cube(0.2))
            .with_flags(BodyFlags::ANIMATED | BodyFlags::RENDERABLE),
    );

    let mut sim = Simulation::new(graph, SimulationParams::default());
    sim.world.add_partition(Partition::with_roots("world", [car, ground_wall]).unwrap());
    sim.ambient.add_partition(Partition::with_roots("bounds", [bounds]).unwrap());
    sim.ambient_bodies = Partition::with_roots("ambient", [prop]).unwrap();
    sim.set_vehicle(VehicleController::new(car));
    sim.set_camera(CameraFollow::new(camera, FollowParams::default()));
    sim.set_collectibles(&chests, chests[1]).unwrap();

    Scene {
        sim,
        car,
        anchor,
        camera,
        chests,
        prop,
    }
}

#[test]
fn driving_into_the_collectible_finds_it() {
    let mut scene = driving_scene();
    let throttle = DriveInput {
        forward: true,
        ..Default::default()
    };

    let mut found = None;
    for _ in 0..500 {
        let report = scene.sim.step(0.02, &throttle).unwrap();
        assert!(!report.camera_collided);

        if let Some(chest) = report.collectible_found {
            found = Some(chest);
            break;
        }
    }

    assert_eq!(found, Some(scene.chests[1]));
    assert_eq!(scene.sim.active_collectible(), None);
    assert!(!scene.sim.graph[scene.chests[1]].is(BodyFlags::COLLIDABLE));
    assert!(!scene.sim.graph[scene.chests[0]].is(BodyFlags::RENDERABLE));
    assert!(scene.sim.graph[scene.car].translation().z > 0.1);
    assert_eq!(scene.sim.graph.find("car"), Some(scene.car));

    // The collectible is gone: the vehicle can drive through its old spot.
    for _ in 0..100 {
        let report = scene.sim.step(0.02, &throttle).unwrap();
        assert_eq!(report.collectible_found, None);
    }
    assert!(scene.sim.graph[scene.car].translation().z > 1.2);
}

#[test]
fn ambient_bodies_drift_at_the_bounce_speed() {
    let mut scene = driving_scene();
    scene.sim.scatter_ambient_velocities().unwrap();

    let start = scene.sim.graph[scene.prop].translation();
    for _ in 0..50 {
        let _ = scene.sim.step(0.02, &DriveInput::default()).unwrap();
    }

    let travelled = scene.sim.graph[scene.prop].translation() - start;
    assert_relative_eq!(travelled.norm(), 0.2 * 0.02 * 50.0, epsilon = 1.0e-4);
}

#[test]
fn pointer_look_then_recentering() {
    let mut scene = driving_scene();

    scene.sim.pointer_moved(200.0, 0.0).unwrap();
    let yaw = scene.sim.graph[scene.anchor].body().orbit.unwrap().yaw();
    assert!(yaw > 0.0);

    for _ in 0..200 {
        let _ = scene.sim.step(0.02, &DriveInput::default()).unwrap();
    }

    let orbit = scene.sim.graph[scene.anchor].body().orbit.unwrap();
    assert!(orbit.yaw() > 6.0 || orbit.yaw() < 1.0e-3);
    assert_relative_eq!(
        scene.sim.graph[scene.camera].translation(),
        Vector::new(0.0, 0.5, -3.0),
        epsilon = 1.0e-5
    );
}
