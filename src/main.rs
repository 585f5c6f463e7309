use clap::Parser;
use indicatif::ProgressBar;

use seismite::{
    error::SeismiteError,
    frame, input, motion,
    post_processor::{self, HistorySample},
    Session,
};

/// Batch driver for the seismic moment-frame response core
#[derive(Parser)]
#[command(name = "seismite")]
struct Args {
    /// Path to the simulation job json
    input_json: String,

    /// Output csv of final node states
    #[arg(long, default_value = "nodes.csv")]
    nodes_output: String,

    /// Output csv of the per-step response history
    #[arg(long, default_value = "history.csv")]
    history_output: String,
}

fn run(args: &Args) -> Result<(), SeismiteError> {
    let job = input::parse_job(&args.input_json)?;

    println!("info: building model...");
    let model = frame::build_model(&job.frame)?;
    println!(
        "info: discretized frame into {} nodes and {} springs",
        model.nodes.len(),
        model.springs.len()
    );

    let ground_motion = match job.seed {
        Some(seed) => motion::build_ground_motion_seeded(&job.motion, seed)?,
        None => motion::build_ground_motion(&job.motion)?,
    };
    let steps = ground_motion.samples.len();

    let mut session = Session::new(model, ground_motion, job.damping_ratio)?;

    match session.modal_properties() {
        Ok(modal) => println!(
            "info: estimated natural frequency {:.4} Hz (period {:.4} s)",
            modal.frequency_hz, modal.period_s
        ),
        Err(err) => println!("warning: skipping modal report: {err}"),
    }

    println!("info: simulating {} steps...", steps);
    let mut history: Vec<HistorySample> = Vec::with_capacity(steps);
    let bar = ProgressBar::new(steps as u64);
    while !session.finished() {
        session.tick();
        history.push(HistorySample {
            time: session.elapsed(),
            ground_acceleration: session.motion.current_acceleration,
            roof_displacement: session.model.roof_displacement(),
            max_story_drift: session.model.max_story_drift(),
        });
        bar.inc(1);
    }
    bar.finish();

    let peak_roof = history
        .iter()
        .map(|s| s.roof_displacement.abs())
        .fold(0.0, f64::max);
    if !peak_roof.is_finite() {
        return Err(SeismiteError::Solver(
            "Simulation diverged; roof displacement is not finite. Try a \
             smaller time step or a higher damping ratio"
                .to_owned(),
        ));
    }
    println!("info: peak roof displacement {:.6}", peak_roof);

    post_processor::csv_output(
        &session.model,
        &history,
        &args.nodes_output,
        &args.history_output,
    )?;

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
