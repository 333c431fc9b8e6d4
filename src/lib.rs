//! Orrery: a per-frame simulation and render orchestration core.
//!
//! The engine owns one ECS [`World`](bevy_ecs::prelude::World) populated by
//! a strict four-kind simulant hierarchy (game, screens, groups, entities)
//! and advances it through a fixed-order frame pipeline: screen transitions,
//! input, physics bridging, update/post-update traversal, deferred tasklets,
//! destruction, render gather and audio pump. Rendering, physics, audio, and
//! input are injected collaborators behind narrow traits; the core never
//! talks to a device directly.
//!
//! Typical embedding:
//!
//! ```no_run
//! use orrery::pipeline::FramePipeline;
//! use orrery::resources::backends::Backends;
//! use orrery::resources::config::EngineConfig;
//! use orrery::world::bootstrap_world;
//!
//! let config = EngineConfig::default();
//! let dt = 1.0 / config.tick_rate as f32;
//! let mut world = bootstrap_world(config, Backends::null());
//! let mut pipeline = FramePipeline::new();
//! while pipeline.run_frame(&mut world, dt) {}
//! ```

pub mod components;
pub mod events;
pub mod math;
pub mod pipeline;
pub mod resources;
pub mod systems;
pub mod world;
