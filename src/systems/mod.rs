//! Pipeline phase systems.
//!
//! Each submodule owns one phase (or a small cluster of phases) of the frame
//! pipeline. All of them are plain functions over `&mut World`; the pipeline
//! calls them in fixed order and checks liveness in between.
//!
//! Submodules overview
//! - [`audio`] – forward accumulated audio commands, drain backend messages
//! - [`destruction`] – drain the destruction list to a fixpoint
//! - [`input`] – poll the input source and publish translated signals
//! - [`physics`] – advance the physics backend and apply its messages
//! - [`render`] – gather in-view simulants and submit the frame batch
//! - [`spatial`] – keep the spatial indexes consistent with the population
//! - [`tasklets`] – execute due tasklets, requeue future ones
//! - [`time`] – advance the logic tick at the end of the frame
//! - [`transition`] – screen transition state machine
//! - [`update`] – update/post-update traversals over gathered simulants

pub mod audio;
pub mod destruction;
pub mod input;
pub mod physics;
pub mod render;
pub mod spatial;
pub mod tasklets;
pub mod time;
pub mod transition;
pub mod update;
