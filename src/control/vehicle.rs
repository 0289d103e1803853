use super::ControlError;
use crate::math::{Matrix4, Real, Rotation, Vector};
use crate::query::DegenerateConfiguration;
use crate::scene::{NodeHandle, SceneGraph};

/// The radius of the wheels, used to turn the travelled distance into a spin angle.
pub const WHEEL_RADIUS: Real = 0.1;
/// Steering angles with a smaller magnitude make the vehicle drive straight.
pub const STEERING_DEAD_ZONE: Real = 0.01;
/// Pressing the opposite pedal above this speed brakes instead of accelerating.
const BRAKING_THRESHOLD: Real = 0.05;

/// Tuning of a vehicle.
///
/// Decay factors are the fraction of the quantity lost after one second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleParams {
    /// Speed gained per second while the throttle is pressed.
    pub acceleration_factor: Real,
    /// The largest speed, forward or backward.
    pub max_velocity: Real,
    /// The largest steering angle, in radians, left or right.
    pub max_steering_angle: Real,
    /// Fraction of the speed lost per second when no pedal is pressed.
    pub velocity_decay: Real,
    /// Fraction of the steering angle lost per second when no steering key is pressed.
    pub steering_decay: Real,
    /// The distance between the front and back axles.
    pub axle_distance: Real,
    /// Fraction of the speed lost per second while braking.
    pub braking_factor: Real,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            acceleration_factor: 1.5,
            max_velocity: 4.0,
            max_steering_angle: 0.6,
            velocity_decay: 0.6,
            steering_decay: 0.95,
            axle_distance: 0.35,
            braking_factor: 0.97,
        }
    }
}

/// The payload of a vehicle node: its tuning and its driving state.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleBody {
    /// The tuning of this vehicle.
    pub params: VehicleParams,
    speed: Real,
    steering_angle: Real,
    braking: bool,
}

/// The pedals and steering keys pressed during a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveInput {
    /// Throttle.
    pub forward: bool,
    /// Reverse.
    pub backward: bool,
    /// Steer left (increases the steering angle).
    pub left: bool,
    /// Steer right (decreases the steering angle).
    pub right: bool,
}

impl VehicleBody {
    /// A vehicle at rest.
    pub fn new(params: VehicleParams) -> Self {
        Self {
            params,
            speed: 0.0,
            steering_angle: 0.0,
            braking: false,
        }
    }

    /// The signed speed along the forward axis.
    #[inline]
    pub fn speed(&self) -> Real {
        self.speed
    }

    /// Sets the speed, clamped to `[-max_velocity, max_velocity]`.
    pub fn set_speed(&mut self, speed: Real) {
        self.speed = clamp_magnitude(speed, self.params.max_velocity);
    }

    /// Multiplies the speed by `factor`.
    pub fn scale_speed(&mut self, factor: Real) {
        self.set_speed(self.speed * factor);
    }

    /// The steering angle, positive to the left.
    #[inline]
    pub fn steering_angle(&self) -> Real {
        self.steering_angle
    }

    /// Sets the steering angle, clamped to `[-max_steering_angle, max_steering_angle]`.
    pub fn set_steering_angle(&mut self, angle: Real) {
        self.steering_angle = clamp_magnitude(angle, self.params.max_steering_angle);
    }

    /// Is the vehicle braking?
    #[inline]
    pub fn braking(&self) -> bool {
        self.braking
    }

    /// The steering angle added per tick while a steering key is held.
    #[inline]
    pub fn steering_increment(&self) -> Real {
        self.params.max_steering_angle / 100.0
    }

    /// The turning radius `axle_distance / sin(steering_angle)`.
    pub fn turning_radius(&self) -> Result<Real, DegenerateConfiguration> {
        let sin = self.steering_angle.sin();

        if sin.abs() <= Real::EPSILON {
            return Err(DegenerateConfiguration::ZeroSteeringSine(self.steering_angle));
        }

        Ok(self.params.axle_distance / sin)
    }

    /// Updates the speed and steering angle from the pressed keys.
    pub fn apply_input(&mut self, input: &DriveInput, dt: Real) {
        let acceleration = self.params.acceleration_factor * dt;

        if input.forward && !self.braking {
            if self.speed >= -BRAKING_THRESHOLD {
                self.set_speed(self.speed + acceleration);
            } else {
                self.braking = true;
            }
        }

        if input.backward && !self.braking {
            if self.speed <= BRAKING_THRESHOLD {
                self.set_speed(self.speed - acceleration);
            } else {
                self.braking = true;
            }
        }

        if input.right {
            self.set_steering_angle(self.steering_angle - self.steering_increment());
        }
        if input.left {
            self.set_steering_angle(self.steering_angle + self.steering_increment());
        }

        if self.braking {
            self.scale_speed(decay(self.params.braking_factor, dt));
        }

        if !input.forward && !input.backward {
            self.braking = false;
            self.scale_speed(decay(self.params.velocity_decay, dt));
        }

        if !input.left && !input.right {
            self.set_steering_angle(self.steering_angle * decay(self.params.steering_decay, dt));
        }
    }
}

/// The four wheel nodes of a vehicle.
///
/// The front wheels are expected to be attached to steering anchors: their
/// parents are rotated about `Y` by the steering angle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WheelSet {
    /// The front-left wheel.
    pub front_left: NodeHandle,
    /// The front-right wheel.
    pub front_right: NodeHandle,
    /// The back-left wheel.
    pub back_left: NodeHandle,
    /// The back-right wheel.
    pub back_right: NodeHandle,
}

impl WheelSet {
    /// Steers the front wheels and spins all of them by the travelled `distance`.
    pub fn animate(
        &self,
        graph: &mut SceneGraph,
        steering_angle: Real,
        distance: Real,
    ) -> Result<(), ControlError> {
        let steering = Rotation::from_axis_angle(&Vector::y_axis(), steering_angle);

        for wheel in [self.front_left, self.front_right] {
            match graph.validate(wheel).map(|h| graph[h].parent())? {
                Some(anchor) => graph.set_rotation(anchor, steering),
                None => log::debug!("front wheel {wheel} has no steering anchor."),
            }
        }

        let spin = Rotation::from_axis_angle(&Vector::x_axis(), distance / WHEEL_RADIUS).to_homogeneous();

        for wheel in [self.front_left, self.front_right, self.back_left, self.back_right] {
            let wheel = graph.validate(wheel)?;
            let local = graph[wheel].local_matrix() * spin;
            graph.set_local_matrix(wheel, local);
        }

        Ok(())
    }
}

/// Drives a vehicle node from keyboard-like input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleController {
    /// The node carrying the [`VehicleBody`].
    pub vehicle: NodeHandle,
    /// The wheels to animate, if any.
    pub wheels: Option<WheelSet>,
}

impl VehicleController {
    /// Creates a controller for the given vehicle node, without wheel animation.
    pub fn new(vehicle: NodeHandle) -> Self {
        Self {
            vehicle,
            wheels: None,
        }
    }

    /// Animates these wheels along with the vehicle.
    pub fn with_wheels(mut self, wheels: WheelSet) -> Self {
        self.wheels = Some(wheels);
        self
    }

    /// Applies `input` to the vehicle and moves it for a tick of length `dt`.
    ///
    /// Outside of the steering dead zone, the vehicle moves along a circle
    /// centered at `(R, 0, 0)` in its local frame, `R` being the turning
    /// radius. Otherwise it moves straight along its forward axis. Returns the
    /// signed travelled distance.
    pub fn update(
        &self,
        graph: &mut SceneGraph,
        input: &DriveInput,
        dt: Real,
    ) -> Result<Real, ControlError> {
        let handle = graph.validate(self.vehicle)?;
        let vehicle = graph
            .body_mut(handle)
            .kind
            .as_vehicle_mut()
            .ok_or(ControlError::NotAVehicle(handle))?;
        vehicle.apply_input(input, dt);
        let vehicle = *vehicle;

        let distance = vehicle.speed() * dt;

        if vehicle.steering_angle().abs() > STEERING_DEAD_ZONE {
            let radius = vehicle.turning_radius()?;
            let center = Vector::new(radius, 0.0, 0.0);
            let turn = Matrix4::new_translation(&center)
                * Rotation::from_axis_angle(&Vector::y_axis(), distance / radius).to_homogeneous()
                * Matrix4::new_translation(&-center);
            let local = graph[handle].local_matrix() * turn;
            graph.set_local_matrix(handle, local);
        } else {
            let node = &graph[handle];
            let forward = node.rotation() * node.forward();
            let translation = node.translation() + forward * distance;
            graph.set_translation(handle, translation);
        }

        if let Some(wheels) = &self.wheels {
            wheels.animate(graph, vehicle.steering_angle(), distance)?;
        }

        Ok(distance)
    }
}

/// The factor `exp(dt * ln(1 - rate))` left after decaying for `dt` seconds.
#[inline]
fn decay(rate: Real, dt: Real) -> Real {
    (dt * (1.0 - rate).ln()).exp()
}

#[inline]
fn clamp_magnitude(val: Real, max: Real) -> Real {
    if val.abs() > max {
        max.copysign(val)
    } else {
        val
    }
}
