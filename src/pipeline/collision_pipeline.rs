use super::{camera_slide, contact_response, CollisionParams, Partition};
use crate::math::{Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::sat;
use crate::query::CollisionError;
use crate::scene::{BodyFlags, NodeHandle, SceneGraph};

/// Detects and resolves the collisions of moving bodies against a set of partitions.
///
/// The pipeline keeps no state between two calls: it reads the world-space
/// OBBs from the scene graph, and writes the collision response back into
/// the node translations, velocities, vehicle speeds and orbit anchors.
#[derive(Clone, Debug, Default)]
pub struct CollisionPipeline {
    partitions: Vec<Partition>,
    /// The parameters of the collision response.
    pub params: CollisionParams,
}

impl CollisionPipeline {
    /// Creates a pipeline without any partition.
    pub fn new(params: CollisionParams) -> Self {
        Self {
            partitions: Vec::new(),
            params,
        }
    }

    /// Adds a partition this pipeline tests bodies against.
    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partitions.push(partition);
        self
    }

    /// Adds a partition this pipeline tests bodies against.
    pub fn add_partition(&mut self, partition: Partition) {
        self.partitions.push(partition);
    }

    /// The partitions this pipeline tests bodies against.
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// The partitions this pipeline tests bodies against, mutably.
    pub fn partitions_mut(&mut self) -> &mut [Partition] {
        &mut self.partitions
    }

    /// Moves an animated body by its velocity, then resolves its collisions.
    ///
    /// Returns `Ok(false)` without doing anything if the body isn't
    /// [`BodyFlags::ANIMATED`].
    pub fn integrate(
        &self,
        graph: &mut SceneGraph,
        node: NodeHandle,
        dt: Real,
    ) -> Result<bool, CollisionError> {
        let node = graph.validate(node)?;

        if !graph[node].is(BodyFlags::ANIMATED) {
            return Ok(false);
        }

        let translation = graph[node].translation() + graph[node].body().velocity * dt;
        graph.set_translation(node, translation);
        self.resolve_against_world(graph, node, dt, None)
    }

    /// Resolves the collisions between `moved` and every body of every partition.
    ///
    /// `moved`, `exclude`, and their subtrees are never tested. Neither are
    /// the ancestors of `moved`, though their other descendants are.
    /// Returns `true` if at least one collision was detected, even if the
    /// response didn't change anything.
    pub fn resolve_against_world(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        dt: Real,
        exclude: Option<NodeHandle>,
    ) -> Result<bool, CollisionError> {
        self.resolve_with_depth(graph, moved, dt, exclude, 0)
    }

    fn resolve_with_depth(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        dt: Real,
        exclude: Option<NodeHandle>,
        depth: usize,
    ) -> Result<bool, CollisionError> {
        let moved = graph.validate(moved)?;
        if let Some(exclude) = exclude {
            let _ = graph.validate(exclude)?;
        }

        if graph[moved].obb().is_none() {
            log::debug!("body {moved} has no OBB, skipping its collision resolution.");
            return Ok(false);
        }

        let mut collided = false;

        for partition in &self.partitions {
            for root in partition.roots() {
                let root = graph.validate(*root)?;
                collided |= self.resolve_subtree(graph, moved, root, dt, exclude, depth)?;
            }
        }

        Ok(collided)
    }

    /// Tests `moved` against the first collidable nodes of the subtree rooted at `candidate`.
    fn resolve_subtree(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        candidate: NodeHandle,
        dt: Real,
        exclude: Option<NodeHandle>,
        depth: usize,
    ) -> Result<bool, CollisionError> {
        if candidate == moved || Some(candidate) == exclude {
            return Ok(false);
        }

        let is_ancestor = graph.is_ancestor(candidate, moved);

        if !is_ancestor && graph[candidate].is(BodyFlags::COLLIDABLE) {
            return self.resolve_pair(graph, moved, candidate, dt, depth);
        }

        let mut collided = false;
        // Resolving may push nodes around, but it never changes the hierarchy.
        let children = graph[candidate].children().to_vec();

        for child in children {
            collided |= self.resolve_subtree(graph, moved, child, dt, exclude, depth)?;
        }

        Ok(collided)
    }

    /// Tests two bodies against each other and applies the collision response to both.
    fn resolve_pair(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        obstacle: NodeHandle,
        dt: Real,
        depth: usize,
    ) -> Result<bool, CollisionError> {
        let (Some(obb1), Some(obb2)) = (graph.global_obb(moved), graph.global_obb(obstacle)) else {
            return Ok(false);
        };

        let Some(mtv) = sat::obb_obb_minimum_translation(&obb1, &obb2, self.params.axis_epsilon)
        else {
            return Ok(false);
        };

        log::trace!("contact between {moved} and {obstacle}, mtv: {mtv:?}");

        if graph[obstacle].is(BodyFlags::MOVABLE) {
            self.push_movable(graph, moved, obstacle, &mtv, dt, depth)?;
        } else {
            self.push_out_of_immovable(graph, moved, &mtv)?;
        }

        Ok(true)
    }

    fn push_movable(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        obstacle: NodeHandle,
        mtv: &Vector,
        dt: Real,
        depth: usize,
    ) -> Result<(), CollisionError> {
        let (mass1, mass2) = (graph[moved].body().mass, graph[obstacle].body().mass);
        let (offset1, offset2) = contact_response::mass_weighted_split(mtv, mass1, mass2)?;
        let damping = match graph[moved].body().kind.as_vehicle() {
            Some(_) => Some(contact_response::push_damping(mass1, mass2, dt)?),
            None => None,
        };

        graph.translate_by_world_offset(moved, &offset1)?;
        graph.translate_by_world_offset(obstacle, &offset2)?;

        if depth < self.params.max_push_depth {
            let _ = self.resolve_with_depth(graph, obstacle, dt, Some(moved), depth + 1)?;
        } else {
            log::debug!("push chain from {moved} reached the maximum depth, {obstacle} is left unresolved.");
        }

        if let (Some(vehicle), Some(damping)) = (graph.body_mut(moved).kind.as_vehicle_mut(), damping) {
            vehicle.scale_speed(damping);
        }

        Ok(())
    }

    fn push_out_of_immovable(
        &self,
        graph: &mut SceneGraph,
        moved: NodeHandle,
        mtv: &Vector,
    ) -> Result<(), CollisionError> {
        if graph[moved].body().kind.is_camera() {
            camera_slide::slide_camera(graph, moved, mtv, &self.params)?;
        } else {
            graph.translate_by_world_offset(moved, mtv)?;
        }

        if graph[moved].is(BodyFlags::ANIMATED) {
            let normal = graph.world_to_parent_direction(moved, mtv)?;
            // Just touching: there is no contact normal to bounce off.
            if let Some(normal) = UnitVector::try_new(normal, DEFAULT_EPSILON) {
                let body = graph.body_mut(moved);
                body.velocity =
                    contact_response::bounce_velocity(&body.velocity, &normal, self.params.bounce_speed);
            }
        } else {
            let damping = contact_response::heading_damping(&graph.world_forward(moved), mtv);
            let body = graph.body_mut(moved);

            match body.kind.as_vehicle_mut() {
                Some(vehicle) => vehicle.scale_speed(damping),
                None => body.velocity *= damping,
            }
        }

        Ok(())
    }
}
