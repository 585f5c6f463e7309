use crate::{
    datatypes::{FrameParams, Model, Node, NodeKind, Spring, SpringKind},
    error::SeismiteError,
};

/// Checks that a frame parameter is a positive, finite real
///
/// # Arguments
/// * `value` - The parameter value
/// * `name` - The field name used in the error message
fn require_positive(value: f64, name: &str) -> Result<(), SeismiteError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SeismiteError::Input(format!(
            "Frame parameter {name} must be a positive finite number, got {value}"
        )));
    }
    Ok(())
}

/// Lateral stiffness of a double-fixed-end segment, k = 12 EI / L^3
fn segment_stiffness(flexural_rigidity: f64, length: f64) -> f64 {
    12.0 * flexural_rigidity / length.powi(3)
}

/// Discretizes a moment frame into a lumped-mass, lateral-spring model
///
/// The node grid has `stories * segments + 1` rows and `bays * segments + 1`
/// columns; row 0 is the anchored base. Column springs link vertically
/// adjacent nodes in every grid column, beam springs link horizontally
/// adjacent nodes in every grid row, each with the stiffness of its
/// subdivided segment length. The per-story mass is split evenly across that
/// story's top-row frame-line nodes; intermediate subdivision nodes carry no
/// mass.
///
/// # Arguments
/// * `params` - The frame geometry and material parameters
///
/// # Returns
/// A Model ready for assembly and simulation
pub fn build_model(params: &FrameParams) -> Result<Model, SeismiteError> {
    if params.stories < 1 || params.bays < 1 || params.segments < 1 {
        return Err(SeismiteError::Input(format!(
            "Frame needs at least one story, bay, and segment, got {} / {} / {}",
            params.stories, params.bays, params.segments
        )));
    }
    require_positive(params.story_height, "story_height")?;
    require_positive(params.bay_width, "bay_width")?;
    require_positive(params.story_mass, "story_mass")?;
    require_positive(params.column_ei, "column_ei")?;
    require_positive(params.beam_ei, "beam_ei")?;

    let rows = params.stories * params.segments + 1;
    let cols = params.bays * params.segments + 1;
    let dy = params.story_height / params.segments as f64;
    let dx = params.bay_width / params.segments as f64;

    let mut model = Model {
        nodes: Vec::with_capacity(rows * cols),
        springs: Vec::new(),
        rows,
        cols,
        segments: params.segments,
        total_height: params.story_height * params.stories as f64,
        total_width: params.bay_width * params.bays as f64,
    };

    // Node grid, row-major from the anchored base upward
    for row in 0..rows {
        for col in 0..cols {
            let kind = if row == 0 {
                NodeKind::Anchored
            } else {
                NodeKind::Free { mass: 0.0 }
            };
            model.nodes.push(Node {
                x0: col as f64 * dx,
                y0: row as f64 * dy,
                displacement: 0.0,
                velocity: 0.0,
                acceleration: 0.0,
                kind,
            });
        }
    }

    // Lump each story's mass onto its top-row frame-line nodes
    let node_mass = params.story_mass / (params.bays + 1) as f64;
    for story in 1..=params.stories {
        let row = story * params.segments;
        for col in (0..cols).step_by(params.segments) {
            let idx = model.node_index(row, col);
            model.nodes[idx].kind = NodeKind::Free { mass: node_mass };
        }
    }

    // Column springs between vertically adjacent nodes
    let column_k = segment_stiffness(params.column_ei, dy);
    for row in 0..rows - 1 {
        for col in 0..cols {
            model.springs.push(Spring {
                node_a: model.node_index(row, col),
                node_b: model.node_index(row + 1, col),
                stiffness: column_k,
                force: 0.0,
                kind: SpringKind::Column,
            });
        }
    }

    // Beam springs between horizontally adjacent nodes
    let beam_k = segment_stiffness(params.beam_ei, dx);
    for row in 0..rows {
        for col in 0..cols - 1 {
            model.springs.push(Spring {
                node_a: model.node_index(row, col),
                node_b: model.node_index(row, col + 1),
                stiffness: beam_k,
                force: 0.0,
                kind: SpringKind::Beam,
            });
        }
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_story_params() -> FrameParams {
        FrameParams {
            stories: 2,
            bays: 1,
            story_height: 3.0,
            bay_width: 5.0,
            segments: 2,
            story_mass: 1000.0,
            column_ei: 8.0e6,
            beam_ei: 6.0e6,
        }
    }

    #[test]
    fn grid_dimensions_and_indexing() {
        let model = build_model(&two_story_params()).unwrap();

        assert_eq!(model.rows, 5);
        assert_eq!(model.cols, 3);
        assert_eq!(model.nodes.len(), 15);
        assert_eq!(model.node_index(0, 0), 0);
        assert_eq!(model.node_index(1, 0), 3);
        assert_eq!(model.node_index(4, 2), 14);

        // one column spring per grid column and interval, one beam spring
        // per grid row and interval
        let columns = model
            .springs
            .iter()
            .filter(|s| s.kind == SpringKind::Column)
            .count();
        let beams = model
            .springs
            .iter()
            .filter(|s| s.kind == SpringKind::Beam)
            .count();
        assert_eq!(columns, (model.rows - 1) * model.cols);
        assert_eq!(beams, model.rows * (model.cols - 1));
    }

    #[test]
    fn base_row_is_anchored() {
        let model = build_model(&two_story_params()).unwrap();

        for col in 0..model.cols {
            assert!(model.nodes[model.node_index(0, col)].anchored());
        }
        for row in 1..model.rows {
            for col in 0..model.cols {
                assert!(!model.nodes[model.node_index(row, col)].anchored());
            }
        }
    }

    #[test]
    fn mass_lumped_on_frame_line_story_tops() {
        let params = two_story_params();
        let model = build_model(&params).unwrap();

        let mut total = 0.0;
        for (i, node) in model.nodes.iter().enumerate() {
            if let NodeKind::Free { mass } = node.kind {
                let row = i / model.cols;
                let col = i % model.cols;
                let on_story_top = row % params.segments == 0;
                let on_frame_line = col % params.segments == 0;
                if on_story_top && on_frame_line {
                    assert!((mass - 500.0).abs() < 1e-12);
                } else {
                    assert_eq!(mass, 0.0);
                }
                total += mass;
            }
        }
        assert!((total - params.story_mass * params.stories as f64).abs() < 1e-9);
    }

    #[test]
    fn stiffness_uses_subdivided_segment_length() {
        let params = two_story_params();
        let model = build_model(&params).unwrap();

        let dy = params.story_height / params.segments as f64;
        let dx = params.bay_width / params.segments as f64;
        for spring in &model.springs {
            let expected = match spring.kind {
                SpringKind::Column => 12.0 * params.column_ei / dy.powi(3),
                SpringKind::Beam => 12.0 * params.beam_ei / dx.powi(3),
            };
            assert!((spring.stiffness - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        let mut params = two_story_params();
        params.story_height = 0.0;
        assert!(build_model(&params).is_err());

        let mut params = two_story_params();
        params.column_ei = f64::NAN;
        assert!(build_model(&params).is_err());

        let mut params = two_story_params();
        params.stories = 0;
        assert!(build_model(&params).is_err());

        let mut params = two_story_params();
        params.story_mass = -1.0;
        assert!(build_model(&params).is_err());
    }
}
