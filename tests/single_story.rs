use seismite::{
    datatypes::{FrameParams, MotionKind, MotionParams},
    frame, motion, Session,
};

const DT: f64 = 1.0 / 60.0;

fn single_story_params() -> FrameParams {
    FrameParams {
        stories: 1,
        bays: 1,
        story_height: 10.0,
        bay_width: 10.0,
        segments: 1,
        story_mass: 1.0,
        column_ei: 1.0e5,
        beam_ei: 1.0e5,
    }
}

fn quiet_motion(steps: usize) -> seismite::GroundMotion {
    // a zero record long enough for the requested number of ticks
    motion::build_ground_motion(&MotionParams {
        duration: steps as f64 * DT + DT,
        time_step: DT,
        kind: MotionKind::Pulse,
        peak_acceleration: 0.0,
    })
    .unwrap()
}

fn sinusoidal_motion(duration: f64) -> seismite::GroundMotion {
    motion::build_ground_motion(&MotionParams {
        duration,
        time_step: DT,
        kind: MotionKind::Sinusoidal { frequency: 1.0 },
        peak_acceleration: 2.0,
    })
    .unwrap()
}

#[test]
fn free_vibration_stays_bounded() {
    let model = frame::build_model(&single_story_params()).unwrap();
    let mut session = Session::new(model, quiet_motion(100), 0.05).unwrap();

    // displace the roof and let the damped integrator ring down
    let initial = 0.01;
    let roof_row = session.model.rows - 1;
    for col in 0..session.model.cols {
        let idx = session.model.node_index(roof_row, col);
        session.model.nodes[idx].displacement = initial;
    }

    for _ in 0..100 {
        session.tick();
        for node in &session.model.nodes {
            assert!(node.displacement.is_finite());
            assert!(
                node.displacement.abs() <= 2.0 * initial,
                "displacement {} escaped the free-vibration envelope",
                node.displacement
            );
        }
    }
}

#[test]
fn undisturbed_frame_never_moves() {
    let model = frame::build_model(&single_story_params()).unwrap();
    let mut session = Session::new(model, quiet_motion(100), 0.05).unwrap();

    for _ in 0..100 {
        session.tick();
    }
    for node in &session.model.nodes {
        assert_eq!(node.displacement, 0.0);
        assert_eq!(node.velocity, 0.0);
        assert_eq!(node.acceleration, 0.0);
    }
}

#[test]
fn anchored_nodes_track_the_consumed_ground_samples() {
    let model = frame::build_model(&single_story_params()).unwrap();
    let ground = sinusoidal_motion(2.0);
    let expected = ground.samples.clone();
    let mut session = Session::new(model, ground, 0.05).unwrap();

    for step in 0..expected.len() {
        session.tick();
        for node in &session.model.nodes {
            if node.anchored() {
                assert_eq!(node.acceleration, expected[step]);
            }
        }
    }
}

#[test]
fn reset_restores_the_initial_state() {
    let model = frame::build_model(&single_story_params()).unwrap();
    let mut session = Session::new(model, sinusoidal_motion(2.0), 0.05).unwrap();

    for _ in 0..60 {
        session.tick();
    }
    session.reset();

    assert_eq!(session.motion.cursor, 0);
    assert_eq!(session.elapsed(), 0.0);
    for node in &session.model.nodes {
        assert_eq!(node.displacement, 0.0);
        assert_eq!(node.velocity, 0.0);
        assert_eq!(node.acceleration, 0.0);
    }
}

#[test]
fn driven_frame_responds_and_stays_finite() {
    let model = frame::build_model(&single_story_params()).unwrap();
    let mut session = Session::new(model, sinusoidal_motion(5.0), 0.05).unwrap();
    let modal = session.modal_properties().unwrap();
    assert!(modal.frequency_hz > 0.0 && modal.frequency_hz.is_finite());

    let mut peak_roof = 0.0_f64;
    while !session.finished() {
        session.tick();
        let roof = session.model.roof_displacement();
        assert!(roof.is_finite());
        peak_roof = peak_roof.max(roof.abs());
    }

    // base excitation must actually move the free nodes
    assert!(peak_roof > 0.0);
    assert!(session.model.max_story_drift().is_finite());
}
