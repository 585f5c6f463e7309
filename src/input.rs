use json::JsonValue;

use crate::{
    datatypes::{FrameParams, MotionKind, MotionParams},
    error::SeismiteError,
};

/// A fully parsed batch job: frame geometry, ground motion, and simulation
/// settings
#[derive(Debug, Clone, Copy)]
pub struct SimulationJob {
    pub frame: FrameParams,
    pub motion: MotionParams,
    pub damping_ratio: f64,
    pub seed: Option<u64>,
}

/// Reads a required f64 field from a json section
fn require_f64(section: &JsonValue, section_name: &str, field: &str) -> Result<f64, SeismiteError> {
    match section[field].as_f64() {
        Some(v) => Ok(v),
        None => Err(SeismiteError::Input(format!(
            "Input json missing {field} field in {section_name} section"
        ))),
    }
}

/// Reads a required positive integer field from a json section
fn require_usize(
    section: &JsonValue,
    section_name: &str,
    field: &str,
) -> Result<usize, SeismiteError> {
    match section[field].as_usize() {
        Some(v) => Ok(v),
        None => Err(SeismiteError::Input(format!(
            "Input json missing {field} field in {section_name} section"
        ))),
    }
}

/// Parses the frame section of the job file
fn parse_frame(input_json: &JsonValue) -> Result<FrameParams, SeismiteError> {
    let frame = &input_json["frame"];

    Ok(FrameParams {
        stories: require_usize(frame, "frame", "stories")?,
        bays: require_usize(frame, "frame", "bays")?,
        story_height: require_f64(frame, "frame", "story_height")?,
        bay_width: require_f64(frame, "frame", "bay_width")?,
        segments: require_usize(frame, "frame", "segments")?,
        story_mass: require_f64(frame, "frame", "story_mass")?,
        column_ei: require_f64(frame, "frame", "column_ei")?,
        beam_ei: require_f64(frame, "frame", "beam_ei")?,
    })
}

/// Parses the ground_motion section of the job file
fn parse_motion(input_json: &JsonValue) -> Result<(MotionParams, Option<u64>), SeismiteError> {
    let motion = &input_json["ground_motion"];

    let kind = match motion["kind"].as_str() {
        Some("sinusoidal") => MotionKind::Sinusoidal {
            frequency: require_f64(motion, "ground_motion", "frequency")?,
        },
        Some("pulse") => MotionKind::Pulse,
        Some("filtered-random") => MotionKind::FilteredRandom,
        Some(other) => {
            return Err(SeismiteError::Input(format!(
                "Unrecognized ground motion kind {other}; expected sinusoidal, \
                 pulse, or filtered-random"
            )))
        }
        None => {
            return Err(SeismiteError::Input(
                "Input json missing kind field in ground_motion section".to_owned(),
            ))
        }
    };

    let params = MotionParams {
        duration: require_f64(motion, "ground_motion", "duration")?,
        time_step: require_f64(motion, "ground_motion", "time_step")?,
        kind,
        peak_acceleration: require_f64(motion, "ground_motion", "peak_acceleration")?,
    };

    let seed = if motion.has_key("seed") {
        match motion["seed"].as_u64() {
            Some(s) => Some(s),
            None => {
                return Err(SeismiteError::Input(
                    "Ground motion seed must be an unsigned integer".to_owned(),
                ))
            }
        }
    } else {
        None
    };

    Ok((params, seed))
}

/// Parses a simulation job file into its frame, motion, and simulation
/// settings
///
/// # Arguments
/// * `input_file` - The path to the input json file
///
/// # Returns
/// A SimulationJob ready to drive a batch run
pub fn parse_job(input_file: &str) -> Result<SimulationJob, SeismiteError> {
    let file_string = match std::fs::read_to_string(input_file) {
        Ok(contents) => contents,
        Err(err) => {
            return Err(SeismiteError::Input(format!(
                "Unable to open input file {input_file}: {err}"
            )))
        }
    };

    parse_job_str(&file_string)
}

/// Parses a simulation job from raw json text
pub fn parse_job_str(contents: &str) -> Result<SimulationJob, SeismiteError> {
    let input_json = match json::parse(contents) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(SeismiteError::Input(format!(
                "Error in input file json: {err}"
            )))
        }
    };

    if !input_json.has_key("frame") {
        return Err(SeismiteError::Input(
            "Input json missing frame section".to_owned(),
        ));
    }
    if !input_json.has_key("ground_motion") {
        return Err(SeismiteError::Input(
            "Input json missing ground_motion section".to_owned(),
        ));
    }
    if !input_json.has_key("simulation") {
        return Err(SeismiteError::Input(
            "Input json missing simulation section".to_owned(),
        ));
    }

    let frame = parse_frame(&input_json)?;
    let (motion, seed) = parse_motion(&input_json)?;
    let damping_ratio = require_f64(&input_json["simulation"], "simulation", "damping_ratio")?;

    Ok(SimulationJob {
        frame,
        motion,
        damping_ratio,
        seed,
    })
}
