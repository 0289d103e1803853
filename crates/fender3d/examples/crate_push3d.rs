extern crate nalgebra as na;

use fender3d::bounding_volume::Obb;
use fender3d::control::{DriveInput, VehicleBody, VehicleController, VehicleParams};
use fender3d::pipeline::{Partition, Simulation, SimulationParams};
use fender3d::scene::{BodyFlags, BodyKind, Node, SceneGraph};
use na::Vector3;

fn main() {
    let cube = Obb::cuboid(Vector3::new(0.5, 0.5, 0.5)).unwrap();
    let in_play = BodyFlags::RENDERABLE | BodyFlags::COLLIDABLE;

    /*
     * A heavy vehicle facing a light crate, with a wall behind the crate.
     */
    let mut graph = SceneGraph::new();
    let car = graph.insert(
        Node::new()
            .with_obb(cube)
            .with_flags(in_play)
            .with_kind(BodyKind::Vehicle(VehicleBody::new(VehicleParams::default()))),
    );
    let crate_ = graph.insert(
        Node::new()
            .with_translation(Vector3::new(0.0, 0.0, 2.0))
            .with_obb(cube)
            .with_flags(in_play | BodyFlags::MOVABLE)
            .with_mass(500.0),
    );
    let wall = graph.insert(
        Node::new()
            .with_translation(Vector3::new(0.0, 0.0, 6.0))
            .with_obb(Obb::cuboid(Vector3::new(5.0, 2.0, 0.5)).unwrap())
            .with_flags(in_play),
    );

    let mut sim = Simulation::new(graph, SimulationParams::default());
    sim.world
        .add_partition(Partition::with_roots("world", [car, crate_, wall]).unwrap());
    sim.set_vehicle(VehicleController::new(car));

    /*
     * Floor it for two seconds.
     */
    let throttle = DriveInput {
        forward: true,
        ..Default::default()
    };

    for tick in 0..120 {
        let report = sim.step(1.0 / 60.0, &throttle).unwrap();

        if tick % 10 == 0 {
            let speed = sim.graph[car].body().kind.as_vehicle().unwrap().speed();
            println!(
                "tick {tick}: car at {:.3}, crate at {:.3}, speed {speed:.3}, contact: {}",
                sim.graph[car].translation().z,
                sim.graph[crate_].translation().z,
                report.vehicle_collided,
            );
        }
    }

    // The crate is pushed ahead of the car, and never through the wall.
    assert!(sim.graph[crate_].translation().z <= 5.0 + 1.0e-3);
    assert!(sim.graph[car].translation().z < sim.graph[crate_].translation().z);
}
