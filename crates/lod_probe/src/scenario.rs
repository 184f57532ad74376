//! Scenario file: terrain, LOD settings and a scripted camera path.

use std::path::Path;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use serde::Deserialize;
use terrain_lod::{Frustum, LodConfig, TerrainConfig, ViewState};
use tracing::warn;

/// Root of a scenario TOML file.
#[derive(Debug, Deserialize)]
pub struct Scenario {
	/// Terrain footprint (defaults to the 512 x 150 reference terrain).
	#[serde(default)]
	pub terrain: TerrainConfig,
	/// Selector configuration.
	#[serde(default)]
	pub lod: LodConfig,
	/// Camera flight.
	pub camera: CameraPath,
}

/// Camera flying a polyline of waypoints while looking at a fixed target.
#[derive(Debug, Deserialize)]
pub struct CameraPath {
	/// World-space positions visited in order.
	pub waypoints: Vec<[f32; 3]>,
	/// Point the camera keeps looking at.
	#[serde(default)]
	pub look_at: [f32; 3],
	/// Vertical field of view in degrees.
	#[serde(default = "default_fov_y")]
	pub fov_y_degrees: f32,
	/// Viewport width / height.
	#[serde(default = "default_aspect")]
	pub aspect: f32,
	#[serde(default = "default_near")]
	pub near: f32,
	#[serde(default = "default_far")]
	pub far: f32,
	/// Frames spent on the whole path.
	#[serde(default = "default_frames")]
	pub frames: u32,
	/// Seconds per frame.
	#[serde(default = "default_dt")]
	pub dt: f32,
}

/// Closest a camera may come to its look-at target.
const MIN_TARGET_DISTANCE: f32 = 1e-3;

fn closest_on_segment(a: Vec3, b: Vec3, point: Vec3) -> Vec3 {
	let ab = b - a;
	let len_sq = ab.length_squared();
	if len_sq <= f32::EPSILON {
		return a;
	}
	a + ab * ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0)
}

fn default_fov_y() -> f32 {
	45.0
}

fn default_aspect() -> f32 {
	16.0 / 9.0
}

fn default_near() -> f32 {
	0.5
}

fn default_far() -> f32 {
	5000.0
}

fn default_frames() -> u32 {
	240
}

fn default_dt() -> f32 {
	1.0 / 60.0
}

impl Scenario {
	/// Load and validate a scenario from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate scenario TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let mut scenario: Scenario =
			toml::from_str(content).with_context(|| "Failed to parse scenario TOML")?;

		scenario.terrain.validate().context("Invalid [terrain] section")?;
		scenario.camera.validate()?;
		scenario.sync_fov();
		scenario.lod.validate().context("Invalid [lod] section")?;
		Ok(scenario)
	}

	/// The error metric measures with the camera's FOV; a differing
	/// `[lod.screen_space] fov_y` is overridden.
	fn sync_fov(&mut self) {
		let camera_fov = self.camera.fov_y_degrees.to_radians();
		let configured = self.lod.screen_space.fov_y;
		if (configured - camera_fov).abs() > 1e-4 {
			warn!(
				configured,
				camera = camera_fov,
				"screen-space fov_y differs from the camera, using the camera fov"
			);
		}
		self.lod.screen_space.fov_y = camera_fov;
	}
}

impl CameraPath {
	fn validate(&self) -> Result<()> {
		if self.waypoints.is_empty() {
			anyhow::bail!("Camera path needs at least one waypoint");
		}
		if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
			anyhow::bail!("fov_y_degrees must be in (0, 180), got {}", self.fov_y_degrees);
		}
		if !(self.aspect > 0.0) {
			anyhow::bail!("aspect must be positive, got {}", self.aspect);
		}
		if !(self.near > 0.0 && self.near < self.far) {
			anyhow::bail!("need 0 < near < far, got near {} far {}", self.near, self.far);
		}
		if !(self.dt >= 0.0) {
			anyhow::bail!("dt must be >= 0, got {}", self.dt);
		}

		// A camera sitting on its target has no view direction
		let target = Vec3::from_array(self.look_at);
		let points: Vec<Vec3> = self.waypoints.iter().copied().map(Vec3::from_array).collect();
		let mut segments: Vec<(Vec3, Vec3)> = points.windows(2).map(|w| (w[0], w[1])).collect();
		if let [only] = points.as_slice() {
			segments.push((*only, *only));
		}
		for (index, (a, b)) in segments.into_iter().enumerate() {
			if closest_on_segment(a, b, target).distance(target) < MIN_TARGET_DISTANCE {
				anyhow::bail!(
					"Camera path passes through look_at {:?} between waypoints {} and {}",
					self.look_at,
					index,
					index + 1
				);
			}
		}
		Ok(())
	}

	/// Camera position at `t` in `[0, 1]` along the polyline.
	///
	/// Waypoints are spaced evenly in `t` regardless of segment length.
	pub fn position_at(&self, t: f32) -> Vec3 {
		let points: Vec<Vec3> = self.waypoints.iter().copied().map(Vec3::from_array).collect();
		match points.as_slice() {
			[] => Vec3::ZERO,
			[only] => *only,
			_ => {
				let segments = (points.len() - 1) as f32;
				let scaled = t.clamp(0.0, 1.0) * segments;
				let index = (scaled.floor() as usize).min(points.len() - 2);
				points[index].lerp(points[index + 1], scaled - index as f32)
			}
		}
	}

	/// View for frame `frame` out of `frames`.
	pub fn view_at(&self, frame: u32, frames: u32) -> ViewState {
		let t = if frames > 1 {
			frame as f32 / (frames - 1) as f32
		} else {
			0.0
		};
		let eye = self.position_at(t);
		let target = Vec3::from_array(self.look_at);

		let projection =
			Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far);
		// Straight down would make Y a degenerate up vector
		let forward = (target - eye).normalize_or_zero();
		let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
			Vec3::NEG_Z
		} else {
			Vec3::Y
		};
		let view = Mat4::look_at_rh(eye, target, up);

		ViewState::new(eye, Frustum::from_view_projection(projection * view))
	}
}
