use crate::{
    datatypes::{GroundMotion, Model, ModalProperties},
    error::SeismiteError,
    solver,
};

/// Owns one simulation run: a discretized frame, the ground-motion record
/// driving it, and the damping ratio applied at every step
///
/// The caller (animation loop or batch driver) holds the session and calls
/// `tick` once per frame; each tick consumes one ground-motion sample and
/// advances the whole model atomically.
#[derive(Debug)]
pub struct Session {
    pub model: Model,
    pub motion: GroundMotion,
    pub damping_ratio: f64,
}

impl Session {
    /// Creates a session over a built model and synthesized ground motion
    ///
    /// # Arguments
    /// * `model` - The discretized frame
    /// * `motion` - The ground-acceleration record
    /// * `damping_ratio` - Fraction of critical damping, e.g. 0.05 for 5%
    pub fn new(
        model: Model,
        motion: GroundMotion,
        damping_ratio: f64,
    ) -> Result<Session, SeismiteError> {
        if !damping_ratio.is_finite() || damping_ratio < 0.0 {
            return Err(SeismiteError::Input(format!(
                "Damping ratio must be a non-negative finite fraction, got {damping_ratio}"
            )));
        }
        Ok(Session {
            model,
            motion,
            damping_ratio,
        })
    }

    /// Advances the simulation by one time step
    pub fn tick(&mut self) {
        solver::simulate_step(&mut self.model, &mut self.motion, self.damping_ratio);
    }

    /// True once every sample of the ground-motion record has been consumed
    pub fn finished(&self) -> bool {
        self.motion.finished()
    }

    /// Zeroes all node state and rewinds the ground motion to its start
    pub fn reset(&mut self) {
        solver::reset_state(&mut self.model);
        self.motion.rewind();
    }

    /// Assembles the current model and estimates its fundamental mode
    pub fn modal_properties(&self) -> Result<ModalProperties, SeismiteError> {
        let (masses, stiffness) = solver::assemble_matrices(&self.model);
        solver::estimate_natural_frequency(&masses, &stiffness)
    }

    /// Simulated time covered so far
    pub fn elapsed(&self) -> f64 {
        self.motion.cursor as f64 * self.motion.time_step
    }
}
