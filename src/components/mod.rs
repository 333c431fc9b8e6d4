//! ECS components for simulants.
//!
//! This module groups the data attached to entities in the world hierarchy.
//! Every addressable object (game, screen, group, entity) is an ECS entity
//! carrying a [`simulant::SimulantKind`] tag; the other components describe
//! spatial registration, transforms, and screen lifecycle.
//!
//! Submodules overview:
//! - [`bounds`] – bounding volume, presence classification, culling flags
//! - [`group`] – named group tag under a screen
//! - [`screen`] – transition state machine data for top-level screens
//! - [`simulant`] – closed simulant kind tag and rendering priority key
//! - [`transform`] – position/rotation/velocity written by the physics bridge

pub mod bounds;
pub mod group;
pub mod screen;
pub mod simulant;
pub mod transform;
