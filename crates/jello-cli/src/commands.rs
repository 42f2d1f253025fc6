//! CLI command implementations.

use std::error::Error;
use std::path::Path;

use jello_contact::Scene;
use jello_io::snapshot::axis_range;
use jello_io::{create_sink, load_mesh, read_tetgen, AnimationData, FrameSnapshot};
use jello_mesh::TetMesh;
use jello_solver::element::ElementData;
use jello_solver::{FemSolver, SimulationConfig};

/// Arguments of `jello simulate`.
pub struct SimulateArgs<'a> {
    pub config: Option<&'a str>,
    pub preset: &'a str,
    pub scene: Option<&'a str>,
    pub output: Option<&'a str>,
    pub frames: Option<u32>,
}

/// Run a simulation and write its frames.
pub fn simulate(args: SimulateArgs<'_>) -> Result<(), Box<dyn Error>> {
    let (mut config, stem) = match args.config {
        Some(path) => (SimulationConfig::load(path)?, file_stem(path)),
        None => {
            let config = SimulationConfig::preset(args.preset).ok_or_else(|| {
                format!(
                    "Unknown preset: '{}'. Available: default, rubber, implicit, debug, constrained_top",
                    args.preset
                )
            })?;
            (config, args.preset.to_string())
        }
    };
    if let Some(frames) = args.frames {
        config.frame_count = frames;
    }
    if let Some(dir) = args.output {
        config.output.directory = dir.to_string();
    }

    tracing::debug!(
        run = %stem,
        dt = config.dt,
        frames = config.frame_count,
        "configuration resolved"
    );

    let mesh = load_mesh(&config.mesh)?;
    if let Some(name) = args.scene {
        config.scene = Scene::preset(name, mesh.dim).ok_or_else(|| {
            format!("Unknown scene: '{name}'. Available: empty, ground, plinko, bulldoze")
        })?;
    }

    println!("Jello Simulation");
    println!("────────────────");
    println!("Run:          {stem}");
    println!(
        "Mesh:         {}-D, {} particles, {} elements",
        mesh.dim.size(),
        mesh.vertex_count(),
        mesh.element_count()
    );
    println!("Integrator:   {:?}", config.integrator);
    println!("Scene:        {} shapes", config.scene.shape_count());
    println!(
        "Steps:        {} ({} frames × {})",
        config.total_steps(),
        config.frame_count,
        config.steps_per_frame
    );

    let mut solver = FemSolver::new(&mesh, config)?;
    let pinned = solver.state().pinned_count();
    if pinned > 0 {
        println!("Pinned:       {pinned} particles");
    }
    println!();

    let mut sink = create_sink(&solver.config().output, &stem)?;
    let summary = solver.run(sink.as_mut())?;

    println!("  Frames:        {}", summary.frames);
    println!("  Wall time:     {:.3}s", summary.wall_time);
    println!("  Contacts:      {}", summary.total_contacts);
    println!("  Unconverged:   {}", summary.unconverged_solves);
    println!("  Final KE:      {:.6e}", summary.final_kinetic_energy);
    println!("  Final strain:  {:.6e}", summary.final_elastic_energy);
    println!("  Output:        {} ({})", solver.config().output.directory, sink.name());
    Ok(())
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "simulation".to_string())
}

/// Validate a config file or a TetGen mesh.
pub fn validate(path: &str) -> Result<(), Box<dyn Error>> {
    println!("Jello Validator");
    println!("───────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let config = SimulationConfig::load(path)?;
        config.validate(None)?;
        let mesh = load_mesh(&config.mesh)?;
        config.validate(Some(mesh.dim))?;
        report_mesh(&mesh);
        println!("✅ Config is valid.");
    } else {
        let base = path
            .strip_suffix(".node")
            .or_else(|| path.strip_suffix(".ele"))
            .unwrap_or(path);
        println!("Validating mesh: {base}.node / {base}.ele");
        let mesh = read_tetgen(base)?;
        report_mesh(&mesh);
        println!("✅ Mesh is valid.");
    }
    Ok(())
}

fn report_mesh(mesh: &TetMesh) {
    let elements = ElementData::from_mesh(mesh);
    let (lo, hi) = mesh.bounds();
    println!("  Dimension:     {}", mesh.dim.size());
    println!("  Particles:     {}", mesh.vertex_count());
    println!("  Elements:      {}", elements.len());
    println!("  Degenerate:    {}", elements.degenerate_count());
    println!("  Volume:        {:.6e}", elements.total_volume());
    println!("  Bounds:        {lo:.4?} .. {hi:.4?}");
}

/// Inspect a JSON animation or a binary snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn Error>> {
    println!("Jello Frame Inspector");
    println!("─────────────────────");
    println!();

    if path.ends_with(".json") {
        let data = AnimationData::load(path)?;
        println!("Dimension:    {}", data.dim);
        println!("Particles:    {}", data.particle_count);
        println!("Elements:     {}", data.element_count);
        println!("Frames:       {}", data.frames.len());
        println!("Interval:     {:.4}s", data.frame_interval);
        if let (Some(first), Some(last)) = (data.frames.first(), data.frames.last()) {
            for (label, frame) in [("First", first), ("Last", last)] {
                if let Some((lo, hi)) = axis_range(&frame.positions, data.dim, 1) {
                    println!("{label} Y:      [{lo:.4}, {hi:.4}] (frame {})", frame.frame);
                }
            }
        }
        if let Some(scene) = data.frames.last().and_then(|f| f.scene.as_ref()) {
            println!("Scene:        {} shapes", scene.shape_count());
        }
    } else {
        let snapshot = FrameSnapshot::load(path)?;
        println!("Frame:        {}", snapshot.frame);
        println!("Sim time:     {:.4}s", snapshot.time);
        println!("Dimension:    {}", snapshot.dim);
        println!("Particles:    {}", snapshot.particle_count());
        for (axis, name) in ["X", "Y", "Z"].iter().enumerate().take(snapshot.dim) {
            if let Some((lo, hi)) = snapshot.axis_range(axis) {
                println!("{name} range:      [{lo:.4}, {hi:.4}]");
            }
        }
    }
    Ok(())
}
