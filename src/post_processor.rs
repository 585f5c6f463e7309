use std::io::Write;

use crate::{
    datatypes::{Model, NodeKind},
    error::SeismiteError,
};

/// One recorded simulation step for the history output
#[derive(Debug, Clone, Copy)]
pub struct HistorySample {
    pub time: f64,
    pub ground_acceleration: f64,
    pub roof_displacement: f64,
    pub max_story_drift: f64,
}

/// Writes final node states and the per-step response history to CSV files
///
/// # Arguments
/// * `model` - The post-simulation model
/// * `history` - The recorded response history, one entry per step
/// * `nodes_output` - The filename of the output nodes csv
/// * `history_output` - The filename of the output history csv
pub fn csv_output(
    model: &Model,
    history: &[HistorySample],
    nodes_output: &str,
    history_output: &str,
) -> Result<(), SeismiteError> {
    let mut nodes_file = match std::fs::File::create(nodes_output) {
        Ok(f) => f,
        Err(err) => {
            return Err(SeismiteError::PostProcessor(format!(
                "Failed to create {nodes_output}: {err}"
            )));
        }
    };
    let mut history_file = match std::fs::File::create(history_output) {
        Ok(f) => f,
        Err(err) => {
            return Err(SeismiteError::PostProcessor(format!(
                "Failed to create {history_output}: {err}"
            )));
        }
    };

    // Write nodes
    write_line(&mut nodes_file, "x0,y0,anchored,mass,displacement,velocity,acceleration", nodes_output)?;
    for node in &model.nodes {
        let (anchored, mass) = match node.kind {
            NodeKind::Anchored => (1, 0.0),
            NodeKind::Free { mass } => (0, mass),
        };
        write_line(
            &mut nodes_file,
            &format!(
                "{x0},{y0},{anchored},{mass},{d},{v},{a}",
                x0 = node.x0,
                y0 = node.y0,
                d = node.displacement,
                v = node.velocity,
                a = node.acceleration,
            ),
            nodes_output,
        )?;
    }

    // Write history
    write_line(
        &mut history_file,
        "time,ground_acceleration,roof_displacement,max_story_drift",
        history_output,
    )?;
    for sample in history {
        write_line(
            &mut history_file,
            &format!(
                "{t},{ag},{roof},{drift}",
                t = sample.time,
                ag = sample.ground_acceleration,
                roof = sample.roof_displacement,
                drift = sample.max_story_drift,
            ),
            history_output,
        )?;
    }

    println!(
        "info: wrote output to {} and {}",
        nodes_output, history_output
    );

    Ok(())
}

/// Writes a single newline-terminated csv row
fn write_line(file: &mut std::fs::File, line: &str, path: &str) -> Result<(), SeismiteError> {
    file.write_all(line.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|err| {
            SeismiteError::PostProcessor(format!("Failed to write to {path}: {err}"))
        })
}
