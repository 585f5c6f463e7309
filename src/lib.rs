//! Lateral seismic response of multi-story, multi-bay moment frames.
//!
//! The pipeline discretizes a frame into a lumped-mass lateral-spring model
//! (`frame`), assembles global mass/stiffness data and estimates the
//! fundamental mode (`solver`), synthesizes a ground-acceleration record
//! (`motion`), and advances the structure step by step under that excitation
//! (`solver::simulate_step`, wrapped by `session::Session`). Rendering,
//! charting, and animation scheduling live outside this crate; they consume
//! the model state the session exposes.

pub mod datatypes;
pub mod error;
pub mod frame;
pub mod input;
pub mod motion;
pub mod post_processor;
pub mod session;
pub mod solver;

pub use datatypes::{
    FrameParams, GroundMotion, Model, ModalProperties, MotionKind, MotionParams, Node, NodeKind,
    Spring, SpringKind,
};
pub use error::SeismiteError;
pub use session::Session;
