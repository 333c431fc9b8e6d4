//! ECS resources made available to the frame pipeline.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by the pipeline phases: timing, liveness, configuration, the
//! spatial indexes and their cache, the tasklet queue, screen selection, the
//! destruction list, the signal bus, and the backend bridges.
//!
//! Overview
//! - `activeview` – current play/view volumes used by the gather queries
//! - `backends` – physics/renderer/audio/input collaborator traits + nulls
//! - `config` – engine configuration loaded from an INI file
//! - `destruction` – append-ordered list of simulants marked for removal
//! - `liveness` – cooperative Live/Dead early-exit flag
//! - `mutantcache` – stamp-validated memoization of derived structures
//! - `renderqueue` – double-buffered render submission, optional worker
//! - `selection` – selected/omni/desired screen bookkeeping
//! - `signalbus` – priority-ordered typed event dispatch
//! - `spatial` – bounded-region spatial tree shared by 2D and 3D
//! - `stats` – per-run frame statistics
//! - `tasklets` – time-gated deferred-operation queue
//! - `worldtime` – simulation time, delta, and tick counter

pub mod activeview;
pub mod backends;
pub mod config;
pub mod destruction;
pub mod liveness;
pub mod mutantcache;
pub mod renderqueue;
pub mod selection;
pub mod signalbus;
pub mod spatial;
pub mod stats;
pub mod tasklets;
pub mod worldtime;
