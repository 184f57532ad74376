//! Terrain LOD probe.
//!
//! Flies the camera of a scenario file over the terrain, runs the selector
//! every frame and logs what it picked: tiles per level, culled regions,
//! global level switches and instance-buffer truncation.
//!
//! ```text
//! RUST_LOG=terrain_lod=debug lod_probe --config scenario.toml --strategy rings
//! lod_probe --config scenario.toml --realtime
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use terrain_lod::atlas::channel_manifest;
use terrain_lod::metrics::SelectionMetrics;
use terrain_lod::timing::micros_since;
use terrain_lod::{FrameClock, LodStrategy, TerrainLodSelector, TextureChannel};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use scenario::Scenario;

/// Strategy names accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
	Global,
	Rings,
	ScreenSpace,
}

impl From<StrategyArg> for LodStrategy {
	fn from(arg: StrategyArg) -> Self {
		match arg {
			StrategyArg::Global => LodStrategy::GlobalHysteresis,
			StrategyArg::Rings => LodStrategy::DistanceRings,
			StrategyArg::ScreenSpace => LodStrategy::ScreenSpaceError,
		}
	}
}

/// Replays a scripted camera over a terrain and logs the LOD selection.
#[derive(Parser, Debug)]
#[command(name = "lod_probe")]
#[command(about = "Logs terrain LOD selection along a scripted camera path")]
struct Args {
	/// Path to scenario TOML file.
	#[arg(short, long, required_unless_present = "manifest")]
	config: Option<PathBuf>,

	/// Override the strategy from the scenario.
	#[arg(short, long, value_enum)]
	strategy: Option<StrategyArg>,

	/// Override the number of frames.
	#[arg(short, long)]
	frames: Option<u32>,

	/// Override the seconds per frame.
	#[arg(long)]
	dt: Option<f32>,

	/// Pace frames at `dt` on the wall clock and feed the measured frame time.
	#[arg(long)]
	realtime: bool,

	/// Print the texture files each channel expects, in texture-index order, and exit.
	#[arg(long)]
	manifest: bool,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();
	if args.manifest {
		print_manifest();
		return Ok(());
	}

	let config_path = args.config.context("--config is required")?;
	let mut scenario = Scenario::load(&config_path)?;
	if let Some(strategy) = args.strategy {
		scenario.lod.strategy = strategy.into();
	}
	let frames = args.frames.unwrap_or(scenario.camera.frames);
	let dt = args.dt.unwrap_or(scenario.camera.dt);
	if !(dt >= 0.0) {
		anyhow::bail!("dt must be >= 0, got {}", dt);
	}

	info!(
		config = %config_path.display(),
		strategy = ?scenario.lod.strategy,
		frames,
		dt,
		realtime = args.realtime,
		"starting probe"
	);

	let mut selector = TerrainLodSelector::new(scenario.terrain.clone(), scenario.lod.clone())
		.context("Failed to build selector")?;
	let mut metrics = SelectionMetrics::new();
	let mut truncated_frames = 0u32;
	let mut clock = FrameClock::new();

	for frame in 0..frames {
		let view = scenario.camera.view_at(frame, frames);
		let frame_dt = if args.realtime { paced_dt(&mut clock, dt) } else { dt };

		let start = Instant::now();
		let selection = selector.select(&view, frame_dt);
		let instances = selector.instances(&selection, view.camera_position);
		metrics.record(&selection.stats, micros_since(start));

		if instances.len() < selection.len() {
			truncated_frames += 1;
		}
		if selection.stats.level_switched {
			info!(frame, level = selector.hysteresis_state().level, "global level switched");
		}
		debug!(
			frame,
			dt = frame_dt,
			camera = ?view.camera_position,
			tiles = ?selection.stats.tiles_per_level,
			culled = selection.stats.culled,
			visited = selection.stats.nodes_visited,
			instances = instances.len(),
			"frame"
		);
	}

	let (min_us, max_us) = metrics.select_timings.min_max().unwrap_or((0, 0));
	info!(
		frames = metrics.frames,
		level_switches = metrics.level_switches,
		truncated_frames,
		avg_tiles = metrics.tile_counts.average(),
		avg_select_us = metrics.average_select_us(),
		min_us,
		max_us,
		wall_secs = clock.elapsed().as_secs_f32(),
		"probe finished"
	);

	Ok(())
}

/// Wait out one frame of `dt` seconds and return the measured frame time.
fn paced_dt(clock: &mut FrameClock, dt: f32) -> f32 {
	std::thread::sleep(Duration::from_secs_f32(dt));
	clock.tick()
}

fn print_manifest() {
	for channel in TextureChannel::ALL {
		println!("[{:?}]", channel);
		for (index, path) in channel_manifest(channel).iter().enumerate() {
			println!("  {:2}  {}", index, path);
		}
	}
}
