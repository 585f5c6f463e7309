use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    datatypes::{GroundMotion, MotionKind, MotionParams},
    error::SeismiteError,
};

/// Validates the shared synthesis parameters
fn check_params(params: &MotionParams) -> Result<(), SeismiteError> {
    if !params.duration.is_finite() || params.duration <= 0.0 {
        return Err(SeismiteError::Input(format!(
            "Ground motion duration must be positive, got {}",
            params.duration
        )));
    }
    if !params.time_step.is_finite() || params.time_step <= 0.0 {
        return Err(SeismiteError::Input(format!(
            "Ground motion time step must be positive, got {}",
            params.time_step
        )));
    }
    if params.time_step > params.duration {
        return Err(SeismiteError::Input(format!(
            "Ground motion time step {} exceeds duration {}",
            params.time_step, params.duration
        )));
    }
    if !params.peak_acceleration.is_finite() || params.peak_acceleration < 0.0 {
        return Err(SeismiteError::Input(format!(
            "Peak acceleration must be a non-negative finite number, got {}",
            params.peak_acceleration
        )));
    }
    if let MotionKind::Sinusoidal { frequency } = params.kind {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SeismiteError::Input(format!(
                "Sinusoidal motion frequency must be positive, got {frequency}"
            )));
        }
    }
    Ok(())
}

/// Fills the sample array for the requested motion kind
///
/// Sinusoidal and pulse records are deterministic; filtered-random draws an
/// amplitude-enveloped uniform value per sample from the supplied generator.
fn synthesize<R: Rng>(params: &MotionParams, rng: &mut R) -> Vec<f64> {
    let count = (params.duration / params.time_step).floor() as usize;
    let peak = params.peak_acceleration;
    let mut samples = Vec::with_capacity(count);

    for i in 0..count {
        let t = i as f64 * params.time_step;
        let envelope = (-t / params.duration).exp();
        let accel = match params.kind {
            MotionKind::Sinusoidal { frequency } => {
                peak * (2.0 * std::f64::consts::PI * frequency * t).sin() * envelope
            }
            MotionKind::Pulse => {
                // triangular ramp peaking at mid-duration
                let mid = params.duration / 2.0;
                if t <= mid {
                    peak * t / mid
                } else {
                    peak * (params.duration - t) / mid
                }
            }
            MotionKind::FilteredRandom => rng.gen_range(-peak..=peak) * envelope,
        };
        samples.push(accel);
    }

    samples
}

/// Builds a ground-acceleration record from an entropy-seeded generator
///
/// # Arguments
/// * `params` - Duration, sampling interval, motion kind, and peak amplitude
///
/// # Returns
/// A GroundMotion with its playback cursor at the start of the record
pub fn build_ground_motion(params: &MotionParams) -> Result<GroundMotion, SeismiteError> {
    check_params(params)?;
    let mut rng = StdRng::from_entropy();
    Ok(GroundMotion {
        samples: synthesize(params, &mut rng),
        time_step: params.time_step,
        cursor: 0,
        current_acceleration: 0.0,
    })
}

/// Builds a ground-acceleration record from a fixed seed, for reproducible
/// runs of the filtered-random kind
///
/// # Arguments
/// * `params` - Duration, sampling interval, motion kind, and peak amplitude
/// * `seed` - Seed for the random generator
pub fn build_ground_motion_seeded(
    params: &MotionParams,
    seed: u64,
) -> Result<GroundMotion, SeismiteError> {
    check_params(params)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(GroundMotion {
        samples: synthesize(params, &mut rng),
        time_step: params.time_step,
        cursor: 0,
        current_acceleration: 0.0,
    })
}
