mod broad_phase;
mod collision_resolution;
mod end_to_end;
