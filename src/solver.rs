use nalgebra::{DMatrix, DVector};

use crate::{
    datatypes::{GroundMotion, Model, ModalProperties, NodeKind},
    error::SeismiteError,
};

/// Fixed iteration count for the eigen-approximation
pub const MODAL_ITERATIONS: usize = 40;

/// Newmark blending parameters, constant-average-acceleration variant
pub const NEWMARK_GAMMA: f64 = 0.5;
pub const NEWMARK_BETA: f64 = 0.25;

/// Floor applied to the local stiffness inside the damping coefficient
const STIFFNESS_EPS: f64 = 1e-9;

/// Assembles the global mass vector and stiffness matrix for a model
///
/// Masses are `None` for anchored nodes so that fixed-base elimination is a
/// filter rather than a sentinel comparison. Each spring of stiffness k
/// between nodes i and j contributes +k to the (i,i) and (j,j) diagonal
/// entries and -k to (i,j) and (j,i), so the matrix is symmetric and every
/// row of an unconstrained system sums to zero.
///
/// # Arguments
/// * `model` - The discretized frame
///
/// # Returns
/// The mass vector and the dense nodes-by-nodes stiffness matrix
pub fn assemble_matrices(model: &Model) -> (Vec<Option<f64>>, DMatrix<f64>) {
    let n = model.nodes.len();

    let masses: Vec<Option<f64>> = model
        .nodes
        .iter()
        .map(|node| match node.kind {
            NodeKind::Anchored => None,
            NodeKind::Free { mass } => Some(mass),
        })
        .collect();

    let mut stiffness: DMatrix<f64> = DMatrix::zeros(n, n);
    for spring in &model.springs {
        let (i, j, k) = (spring.node_a, spring.node_b, spring.stiffness);
        stiffness[(i, i)] += k;
        stiffness[(j, j)] += k;
        stiffness[(i, j)] -= k;
        stiffness[(j, i)] -= k;
    }

    (masses, stiffness)
}

/// Estimates the fundamental natural frequency of the fixed-base structure
///
/// Anchored degrees of freedom are eliminated, then a trial vector is run
/// through a fixed number of power iterations of the mass-normalized
/// stiffness operator: multiply by the stiffness sub-matrix, divide
/// entrywise by the mass sub-vector, take the Rayleigh quotient against the
/// previous vector as the eigenvalue estimate, and renormalize. This is the
/// reference iteration, kept as-is; it tracks the dominant stiffness-to-mass
/// ratio of the substructure rather than solving the generalized
/// eigenproblem exactly.
///
/// # Arguments
/// * `masses` - The assembled mass vector, `None` for anchored entries
/// * `stiffness` - The assembled global stiffness matrix
///
/// # Returns
/// The estimated natural frequency in Hz and period in seconds
pub fn estimate_natural_frequency(
    masses: &[Option<f64>],
    stiffness: &DMatrix<f64>,
) -> Result<ModalProperties, SeismiteError> {
    let free: Vec<usize> = masses
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.map(|_| i))
        .collect();

    if free.is_empty() {
        return Err(SeismiteError::Modal(
            "Model has no free degrees of freedom; every node is anchored".to_owned(),
        ));
    }

    let nf = free.len();
    let sub_masses: Vec<f64> = free.iter().map(|&i| masses[i].unwrap()).collect();
    if let Some(pos) = sub_masses.iter().position(|&m| m <= 0.0) {
        // the iteration divides entrywise by nodal mass
        return Err(SeismiteError::Modal(format!(
            "Free node {} carries no mass; modal estimation needs every free \
             node to have positive mass",
            free[pos]
        )));
    }

    let mut sub_stiffness: DMatrix<f64> = DMatrix::zeros(nf, nf);
    for (a, &i) in free.iter().enumerate() {
        for (b, &j) in free.iter().enumerate() {
            sub_stiffness[(a, b)] = stiffness[(i, j)];
        }
    }

    let mut trial: DVector<f64> =
        DVector::from_element(nf, 1.0 / (nf as f64).sqrt());
    let mut eigenvalue = 0.0;

    for _ in 0..MODAL_ITERATIONS {
        let mut next = &sub_stiffness * &trial;
        for (entry, mass) in next.iter_mut().zip(&sub_masses) {
            *entry /= mass;
        }

        eigenvalue = trial.dot(&next);
        let norm = next.norm();
        if !eigenvalue.is_finite() || !norm.is_finite() || norm <= 0.0 {
            return Err(SeismiteError::Modal(format!(
                "Eigenvalue estimate is not advancing (estimate {eigenvalue}, \
                 vector norm {norm}); the stiffness matrix appears singular"
            )));
        }
        trial = next / norm;
    }

    if eigenvalue <= 0.0 {
        return Err(SeismiteError::Modal(format!(
            "Eigenvalue estimate {eigenvalue} is not positive; the model has \
             no restoring stiffness on its free nodes"
        )));
    }

    let frequency_hz = eigenvalue.sqrt() / (2.0 * std::f64::consts::PI);
    Ok(ModalProperties {
        frequency_hz,
        period_s: 1.0 / frequency_hz,
    })
}

/// Advances the model one time step under the next ground-motion sample
///
/// Spring forces are recomputed from current displacements first. Anchored
/// nodes then track the ground kinematically by forward Euler, while free
/// nodes balance spring restoring forces, node-local viscous damping, and
/// the base-excitation inertial term, updated with the simplified Newmark
/// scheme (gamma = 0.5, beta = 0.25) using the freshly computed
/// acceleration. The inertia divisor is clamped at unity so zero-mass
/// subdivision nodes never divide by zero.
///
/// # Arguments
/// * `model` - The frame model, mutated in place
/// * `motion` - The ground-motion record; its cursor and current
///   acceleration advance by one sample
/// * `damping_ratio` - Fraction of critical damping, e.g. 0.05 for 5%
pub fn simulate_step(model: &mut Model, motion: &mut GroundMotion, damping_ratio: f64) {
    let dt = motion.time_step;
    let ground_accel = motion.next_sample();
    let n = model.nodes.len();

    // derived spring forces from current displacements; positive when node a
    // has moved ahead of node b
    for spring in &mut model.springs {
        let drift =
            model.nodes[spring.node_a].displacement - model.nodes[spring.node_b].displacement;
        spring.force = spring.stiffness * drift;
    }

    // per-node restoring force and attached-stiffness sums
    let mut restoring = vec![0.0; n];
    let mut local_stiffness = vec![0.0; n];
    for spring in &model.springs {
        restoring[spring.node_a] += spring.force;
        restoring[spring.node_b] -= spring.force;
        local_stiffness[spring.node_a] += spring.stiffness;
        local_stiffness[spring.node_b] += spring.stiffness;
    }

    for (i, node) in model.nodes.iter_mut().enumerate() {
        match node.kind {
            NodeKind::Anchored => {
                node.acceleration = ground_accel;
                node.velocity += node.acceleration * dt;
                node.displacement += node.velocity * dt;
            }
            NodeKind::Free { mass } => {
                let damping = 2.0
                    * damping_ratio
                    * (local_stiffness[i].max(STIFFNESS_EPS) / mass.max(1.0)).sqrt();
                let effective_force = -restoring[i] - damping * node.velocity;
                node.acceleration = (effective_force - mass * ground_accel) / mass.max(1.0);
                node.velocity += (1.0 - NEWMARK_GAMMA) * node.acceleration * dt;
                node.displacement +=
                    node.velocity * dt + NEWMARK_BETA * node.acceleration * dt * dt;
            }
        }
    }
}

/// Zeroes every node's kinematic state and all derived spring forces
///
/// # Arguments
/// * `model` - The frame model to reset
pub fn reset_state(model: &mut Model) {
    for node in &mut model.nodes {
        node.displacement = 0.0;
        node.velocity = 0.0;
        node.acceleration = 0.0;
    }
    for spring in &mut model.springs {
        spring.force = 0.0;
    }
}
