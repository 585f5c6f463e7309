/// Geometric and material description of a moment frame
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    pub stories: usize,
    pub bays: usize,
    pub story_height: f64,
    pub bay_width: f64,
    /// Segments per story height / bay width
    pub segments: usize,
    /// Total lumped mass per story
    pub story_mass: f64,
    /// Flexural rigidity EI of column segments
    pub column_ei: f64,
    /// Flexural rigidity EI of beam segments
    pub beam_ei: f64,
}

/// Shape of the synthesized ground-acceleration record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionKind {
    Sinusoidal { frequency: f64 },
    Pulse,
    FilteredRandom,
}

#[derive(Debug, Clone, Copy)]
pub struct MotionParams {
    pub duration: f64,
    pub time_step: f64,
    pub kind: MotionKind,
    pub peak_acceleration: f64,
}

/// Whether a node is rigidly tied to the ground or carries its own inertia
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Anchored,
    Free { mass: f64 },
}

/// A structural joint with a single horizontal degree of freedom
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub x0: f64,
    pub y0: f64,
    pub displacement: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub kind: NodeKind,
}

impl Node {
    pub fn anchored(&self) -> bool {
        self.kind == NodeKind::Anchored
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpringKind {
    Column,
    Beam,
}

/// A lateral-stiffness link between two nodes
///
/// `force` is derived state, recomputed every integration step: positive
/// when node `a` has moved ahead of node `b`, i.e. node `a` is being pulled
/// back toward its neighbor.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    pub node_a: usize,
    pub node_b: usize,
    pub stiffness: f64,
    pub force: f64,
    pub kind: SpringKind,
}

/// A discretized frame: node grid, spring set, and derived geometry
///
/// Node indices are dense and row-major: `node_index(row, col) = row * cols
/// + col`, rows counting upward from the anchored base (row 0). This mapping
/// is the one invariant shared by the discretizer, the assembler, and the
/// integrator.
#[derive(Debug, Clone)]
pub struct Model {
    pub nodes: Vec<Node>,
    pub springs: Vec<Spring>,
    pub rows: usize,
    pub cols: usize,
    /// Grid columns between adjacent frame lines (the subdivision factor)
    pub segments: usize,
    pub total_height: f64,
    pub total_width: f64,
}

impl Model {
    /// Maps a (row, col) grid position to a flat node index
    pub fn node_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Mean displacement of the frame-line nodes in the roof row
    pub fn roof_displacement(&self) -> f64 {
        let roof = self.rows - 1;
        let mut sum = 0.0;
        let mut count = 0;
        for col in (0..self.cols).step_by(self.segments) {
            sum += self.nodes[self.node_index(roof, col)].displacement;
            count += 1;
        }
        sum / count as f64
    }

    /// Largest absolute end-to-end displacement across all column springs
    pub fn max_story_drift(&self) -> f64 {
        self.springs
            .iter()
            .filter(|s| s.kind == SpringKind::Column)
            .map(|s| (self.nodes[s.node_b].displacement - self.nodes[s.node_a].displacement).abs())
            .fold(0.0, f64::max)
    }
}

/// A synthesized ground-acceleration record plus playback state
#[derive(Debug, Clone)]
pub struct GroundMotion {
    pub samples: Vec<f64>,
    pub time_step: f64,
    /// Index of the next sample to consume
    pub cursor: usize,
    /// The acceleration most recently handed to the integrator
    pub current_acceleration: f64,
}

impl GroundMotion {
    /// Consumes the next sample, holding zero once the record is exhausted
    pub fn next_sample(&mut self) -> f64 {
        let accel = self.samples.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        self.current_acceleration = accel;
        accel
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.samples.len()
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.current_acceleration = 0.0;
    }
}

/// Fundamental-mode estimate reported by the modal estimator
#[derive(Debug, Clone, Copy)]
pub struct ModalProperties {
    pub frequency_hz: f64,
    pub period_s: f64,
}
