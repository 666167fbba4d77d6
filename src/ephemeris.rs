//! # Ephemeris provider contract
//!
//! The element engine never performs I/O: state vectors, gravitational
//! parameters and time conversions come from an **ephemeris provider**, an
//! external collaborator expressed here as the [`EphemerisProvider`] trait.
//! Kernel file download, caching and interpolation live entirely behind the
//! trait; once furnished, a provider must answer queries synchronously and
//! deterministically for a given (body, epoch, frame, observer) tuple.
//!
//! [`MemoryEphemeris`] is a table-backed implementation with an explicit
//! load/clear lifecycle. It stands in for a kernel-backed provider in tests
//! and small cross-check runs: states are registered up front and served
//! back by exact-epoch lookup. There is no ambient global state — whoever
//! needs ephemeris data receives a provider explicitly.

use std::collections::HashMap;

use crate::apsis_errors::ApsisError;
use crate::constants::{BodyId, Et};
use crate::ref_system::RefFrame;
use crate::state_vector::StateVector;

/// Epochs closer than this (seconds) are considered the same query instant.
const EPOCH_LOOKUP_TOL: f64 = 1e-6;

/// Synchronous, deterministic source of ephemeris data.
pub trait EphemerisProvider {
    /// State vector of `body` relative to `observer` in `frame` at `epoch`.
    fn state(
        &self,
        body: &BodyId,
        epoch: Et,
        frame: RefFrame,
        observer: &BodyId,
    ) -> Result<StateVector, ApsisError>;

    /// Gravitational parameter GM of `body` (km³/s²).
    fn grav_param(&self, body: &BodyId) -> Result<f64, ApsisError>;
}

/// In-memory ephemeris provider backed by explicit tables.
///
/// Lifecycle: [`insert_state`](MemoryEphemeris::insert_state) /
/// [`insert_grav_param`](MemoryEphemeris::insert_grav_param) load records,
/// [`clear`](MemoryEphemeris::clear) unloads everything. Lookups that find
/// no record fail with a typed error, never a panic.
#[derive(Debug, Clone, Default)]
pub struct MemoryEphemeris {
    states: HashMap<(BodyId, BodyId, RefFrame), Vec<StateVector>>,
    grav_params: HashMap<BodyId, f64>,
}

impl MemoryEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state vector of `body` relative to `observer`.
    ///
    /// The state's own frame and epoch tags index the record.
    pub fn insert_state(&mut self, body: BodyId, observer: BodyId, state: StateVector) {
        self.states
            .entry((body, observer, state.frame))
            .or_default()
            .push(state);
    }

    /// Register the gravitational parameter of `body` (km³/s²).
    pub fn insert_grav_param(&mut self, body: BodyId, grav_param: f64) {
        self.grav_params.insert(body, grav_param);
    }

    /// Unload every registered record.
    pub fn clear(&mut self) {
        self.states.clear();
        self.grav_params.clear();
    }
}

impl EphemerisProvider for MemoryEphemeris {
    fn state(
        &self,
        body: &BodyId,
        epoch: Et,
        frame: RefFrame,
        observer: &BodyId,
    ) -> Result<StateVector, ApsisError> {
        self.states
            .get(&(body.clone(), observer.clone(), frame))
            .and_then(|records| {
                records
                    .iter()
                    .find(|sv| (sv.epoch - epoch).abs() < EPOCH_LOOKUP_TOL)
            })
            .cloned()
            .ok_or_else(|| ApsisError::EphemerisNotFound(body.clone(), epoch))
    }

    fn grav_param(&self, body: &BodyId) -> Result<f64, ApsisError> {
        self.grav_params
            .get(body)
            .copied()
            .ok_or_else(|| ApsisError::UnknownBody(body.clone()))
    }
}
