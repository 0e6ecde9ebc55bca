//! Systems module - all ECS systems for the golf ball simulation.

pub mod bullseye;
pub mod collision;
pub mod debug;
pub mod kinematics;
pub mod logic;
pub mod prediction;
pub mod surface;
pub mod wind;
