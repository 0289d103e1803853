use super::{CollisionPipeline, Partition, SimulationParams};
use crate::control::{CameraFollow, ControlError, DriveInput, VehicleController};
use crate::math::{Real, Rotation, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::CollisionError;
use crate::scene::{BodyFlags, GraphError, NodeHandle, SceneGraph};
use oorandom::Rand32;

/// Error returned by [`Simulation::step`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum SimulationError {
    /// A controller failed to update.
    #[error(transparent)]
    Control(#[from] ControlError),
    /// The collision resolution failed.
    #[error(transparent)]
    Collision(#[from] CollisionError),
}

impl From<GraphError> for SimulationError {
    fn from(e: GraphError) -> Self {
        SimulationError::Collision(e.into())
    }
}

/// A decorative node rotating at a constant angular velocity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spinner {
    /// The rotating node.
    pub node: NodeHandle,
    /// The rotation axis, in the local frame of the node.
    pub axis: UnitVector,
    /// The rotation speed, in radians per second.
    pub angular_speed: Real,
}

/// What happened during a [`Simulation::step`].
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct TickReport {
    /// The timestep actually simulated.
    pub dt: Real,
    /// The distance travelled by the vehicle before collision resolution.
    pub travelled: Real,
    /// Did the vehicle hit anything in the world?
    pub vehicle_collided: bool,
    /// The collectible found by the vehicle during this tick.
    pub collectible_found: Option<NodeHandle>,
    /// How many ambient bodies hit something.
    pub ambient_collisions: usize,
    /// Did the camera hit anything in the world?
    pub camera_collided: bool,
}

/// The per-tick driver of a driving scene.
///
/// A tick runs, in order: the vehicle controller, the spinners, the vehicle
/// collisions against the world, the collectible check, the ambient bodies,
/// then the camera follow and the camera collisions against the world. Each
/// stage sees the state left by the previous ones.
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    /// The transform graph.
    pub graph: SceneGraph,
    /// The bodies the vehicle and the camera collide with.
    pub world: CollisionPipeline,
    /// The bodies the ambient bodies collide with.
    pub ambient: CollisionPipeline,
    /// The roots integrated every tick by the ambient pipeline.
    pub ambient_bodies: Partition,
    /// Parameters of the simulation.
    pub params: SimulationParams,
    collectibles: CollisionPipeline,
    active_collectible: Option<NodeHandle>,
    vehicle: Option<VehicleController>,
    camera: Option<CameraFollow>,
    spinners: Vec<Spinner>,
}

impl Simulation {
    /// Creates a simulation of the given graph, without any pipeline partition.
    pub fn new(graph: SceneGraph, params: SimulationParams) -> Self {
        Self {
            graph,
            params,
            ..Default::default()
        }
    }

    /// Sets the vehicle driven by the player.
    pub fn set_vehicle(&mut self, controller: VehicleController) {
        self.vehicle = Some(controller);
    }

    /// The vehicle driven by the player.
    pub fn vehicle(&self) -> Option<&VehicleController> {
        self.vehicle.as_ref()
    }

    /// Sets the camera following the vehicle.
    pub fn set_camera(&mut self, camera: CameraFollow) {
        self.camera = Some(camera);
    }

    /// The camera following the vehicle.
    pub fn camera(&self) -> Option<&CameraFollow> {
        self.camera.as_ref()
    }

    /// Adds a decorative spinning node.
    pub fn add_spinner(&mut self, spinner: Spinner) {
        self.spinners.push(spinner);
    }

    /// The collectible the vehicle is looking for.
    pub fn active_collectible(&self) -> Option<NodeHandle> {
        self.active_collectible
    }

    /// Sets up the collectibles, keeping only `active` in play.
    ///
    /// Every other candidate is cleared from play, i.e., made neither
    /// renderable nor collidable.
    pub fn set_collectibles(&mut self, candidates: &[NodeHandle], active: NodeHandle) -> Result<(), GraphError> {
        if !candidates.contains(&active) {
            return Err(GraphError::InvalidHandle(active));
        }

        let partition = Partition::with_roots("collectibles", candidates.iter().copied())?;

        for candidate in partition.roots() {
            let _ = self.graph.validate(*candidate)?;
        }

        for candidate in partition.roots() {
            if *candidate != active {
                self.graph
                    .body_mut(*candidate)
                    .flags
                    .remove(BodyFlags::RENDERABLE | BodyFlags::COLLIDABLE);
            }
        }

        self.collectibles = CollisionPipeline::new(self.world.params).with_partition(partition);
        self.active_collectible = Some(active);
        Ok(())
    }

    /// Gives every animated ambient body a random velocity with the bounce speed.
    ///
    /// The directions are drawn from `params.scatter_seed`, mostly horizontal.
    pub fn scatter_ambient_velocities(&mut self) -> Result<(), GraphError> {
        let mut rng = Rand32::new(self.params.scatter_seed);
        let speed = self.ambient.params.bounce_speed;

        for root in self.ambient_bodies.roots() {
            let root = self.graph.validate(*root)?;
            let body = self.graph.body_mut(root);

            if !body.is(BodyFlags::ANIMATED) {
                continue;
            }

            let dir = Vector::new(rng.rand_float(), rng.rand_float() * 0.2, rng.rand_float());
            match dir.try_normalize(DEFAULT_EPSILON) {
                Some(dir) => body.velocity = dir * speed,
                None => log::debug!("ambient body {root} drew a null direction, it stays still."),
            }
        }

        Ok(())
    }

    /// Updates the camera orbit from a pointer motion.
    pub fn pointer_moved(&mut self, dx: Real, dy: Real) -> Result<(), ControlError> {
        match &mut self.camera {
            Some(camera) => camera.pointer_moved(&mut self.graph, dx, dy),
            None => Ok(()),
        }
    }

    /// Advances the simulation by `real_dt` seconds, capped to `params.max_timestep`.
    pub fn step(&mut self, real_dt: Real, input: &DriveInput) -> Result<TickReport, SimulationError> {
        let dt = real_dt.max(0.0).min(self.params.max_timestep);
        let mut report = TickReport {
            dt,
            ..Default::default()
        };

        if let Some(vehicle) = &self.vehicle {
            report.travelled = vehicle.update(&mut self.graph, input, dt)?;
        }

        for spinner in &self.spinners {
            let node = self.graph.validate(spinner.node)?;
            let rotation = self.graph[node].rotation()
                * Rotation::from_axis_angle(&spinner.axis, spinner.angular_speed * dt);
            self.graph.set_rotation(node, rotation);
        }

        if let Some(vehicle) = &self.vehicle {
            report.vehicle_collided = self
                .world
                .resolve_against_world(&mut self.graph, vehicle.vehicle, dt, None)?;

            if let Some(collectible) = self.active_collectible {
                if self
                    .collectibles
                    .resolve_against_world(&mut self.graph, vehicle.vehicle, dt, None)?
                {
                    log::debug!("collectible {collectible} found.");
                    self.graph
                        .body_mut(collectible)
                        .flags
                        .remove(BodyFlags::RENDERABLE | BodyFlags::COLLIDABLE);
                    self.active_collectible = None;
                    report.collectible_found = Some(collectible);
                }
            }
        }

        for root in self.ambient_bodies.roots() {
            if self.ambient.integrate(&mut self.graph, *root, dt)? {
                report.ambient_collisions += 1;
            }
        }

        if let Some(camera) = &mut self.camera {
            camera.update(&mut self.graph, dt)?;
            report.camera_collided = self
                .world
                .resolve_against_world(&mut self.graph, camera.camera, dt, None)?;
        }

        Ok(report)
    }
}
