//! Simulation domain: body catalog, runtime state, kinematics, commands,
//! star-field generation, and the scene builder.

pub mod animation;
pub mod builder;
pub mod catalog;
pub mod commands;
pub mod starfield;
pub mod state;
