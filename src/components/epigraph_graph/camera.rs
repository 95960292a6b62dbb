//! Keyboard-driven camera navigation.
//!
//! Two separate paths mutate the renderer's camera:
//! - the continuous path, [`CameraController::tick`], run once per animation
//!   frame and driven by whatever keys are held down;
//! - the discrete path, [`fly_to`], which produces a [`CameraTransition`]
//!   that the renderer animates on its own.
//!
//! Both share one camera, so a fly-to in flight and a held movement key will
//! fight each other until one of them stops.

use std::collections::HashSet;

use glam::{DQuat, DVec3};

use super::config::NavigationConfig;

/// Keys the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
	/// `w`: move along the view direction.
	Forward,
	/// `s`: move against the view direction.
	Back,
	/// `a`
	StrafeLeft,
	/// `d`
	StrafeRight,
	/// Arrow up: orbit over the target.
	LookUp,
	/// Arrow down
	LookDown,
	/// Arrow left
	LookLeft,
	/// Arrow right
	LookRight,
}

impl NavKey {
	/// Map a lowercased `KeyboardEvent.key` to a navigation key.
	pub fn from_key(key: &str) -> Option<Self> {
		Some(match key {
			"w" => NavKey::Forward,
			"s" => NavKey::Back,
			"a" => NavKey::StrafeLeft,
			"d" => NavKey::StrafeRight,
			"arrowup" => NavKey::LookUp,
			"arrowdown" => NavKey::LookDown,
			"arrowleft" => NavKey::LookLeft,
			"arrowright" => NavKey::LookRight,
			_ => return None,
		})
	}
}

/// Set of navigation keys currently held.
#[derive(Clone, Debug, Default)]
pub struct KeyState {
	pressed: HashSet<NavKey>,
}

impl KeyState {
	/// Record a key press. Ignored while a text field has focus.
	pub fn key_down(&mut self, key: &str, in_text_entry: bool) {
		if in_text_entry {
			return;
		}
		if let Some(k) = NavKey::from_key(&key.to_lowercase()) {
			self.pressed.insert(k);
		}
	}

	/// Record a key release, even inside a text field.
	pub fn key_up(&mut self, key: &str) {
		if let Some(k) = NavKey::from_key(&key.to_lowercase()) {
			self.pressed.remove(&k);
		}
	}

	/// Whether `key` is currently held.
	pub fn is_pressed(&self, key: NavKey) -> bool {
		self.pressed.contains(&key)
	}

	/// No navigation key held.
	pub fn is_idle(&self) -> bool {
		self.pressed.is_empty()
	}
}

/// The renderer's camera and orbit controls, seen through the operations the
/// controller needs. The controller never owns the camera.
pub trait CameraRig {
	/// Camera position in world space.
	fn position(&self) -> DVec3;
	/// Move the camera without touching its orientation.
	fn set_position(&mut self, position: DVec3);
	/// Unit vector the camera looks along.
	fn forward(&self) -> DVec3;
	/// Camera up vector.
	fn up(&self) -> DVec3;
	/// Orbit target, if the controls expose one.
	fn target(&self) -> Option<DVec3>;
	/// Move the orbit target. No-op without controls.
	fn set_target(&mut self, target: DVec3);
	/// Point the camera at `target`.
	fn look_at(&mut self, target: DVec3);
}

/// Result of one frame of the continuous loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
	/// Camera not available yet; nothing happened.
	NotReady,
	/// No key held.
	Idle,
	/// The camera was moved or rotated.
	Moved,
}

/// Requested animated camera move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
	/// Final camera position.
	pub position: DVec3,
	/// Point the camera faces when it arrives.
	pub look_at: DVec3,
	/// Animation length.
	pub duration_ms: f64,
}

const MOVES: [(NavKey, Axis, f64); 4] = [
	(NavKey::Forward, Axis::Forward, 1.0),
	(NavKey::Back, Axis::Forward, -1.0),
	(NavKey::StrafeLeft, Axis::Right, -1.0),
	(NavKey::StrafeRight, Axis::Right, 1.0),
];

const ROTATIONS: [(NavKey, Axis, f64); 4] = [
	(NavKey::LookUp, Axis::Right, -1.0),
	(NavKey::LookDown, Axis::Right, 1.0),
	(NavKey::LookLeft, Axis::Up, 1.0),
	(NavKey::LookRight, Axis::Up, -1.0),
];

#[derive(Clone, Copy, Debug)]
enum Axis {
	Forward,
	Right,
	Up,
}

/// Translates held keys into constant-velocity camera motion.
#[derive(Clone, Debug)]
pub struct CameraController {
	move_speed: f64,
	rotate_speed: f64,
}

impl CameraController {
	/// Controller with the configured per-frame speeds.
	pub fn new(config: &NavigationConfig) -> Self {
		Self {
			move_speed: config.move_speed,
			rotate_speed: config.rotate_speed,
		}
	}

	/// Advance one frame. Movement is applied before rotation, each in a fixed
	/// key order, using the basis sampled at the start of the frame.
	pub fn tick<R: CameraRig>(&self, keys: &KeyState, rig: Option<&mut R>) -> TickOutcome {
		let Some(rig) = rig else {
			return TickOutcome::NotReady;
		};
		if keys.is_idle() {
			return TickOutcome::Idle;
		}

		let forward = rig.forward();
		let up = rig.up().normalize_or_zero();
		let right = forward.cross(rig.up()).normalize_or_zero();
		let axis = |a: Axis| match a {
			Axis::Forward => forward,
			Axis::Right => right,
			Axis::Up => up,
		};

		for (key, a, sign) in MOVES {
			if !keys.is_pressed(key) {
				continue;
			}
			let step = axis(a) * (sign * self.move_speed);
			rig.set_position(rig.position() + step);
			if let Some(target) = rig.target() {
				rig.set_target(target + step);
			}
		}

		for (key, a, sign) in ROTATIONS {
			if !keys.is_pressed(key) {
				continue;
			}
			let Some(target) = rig.target() else {
				continue;
			};
			let offset = rotate_about(rig.position() - target, axis(a), sign * self.rotate_speed);
			rig.set_position(target + offset);
			rig.look_at(target);
		}

		TickOutcome::Moved
	}
}

fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
	if axis.length_squared() == 0.0 {
		return v;
	}
	DQuat::from_axis_angle(axis.normalize(), angle) * v
}

/// Frame `node` from outside: along the ray from the origin through the node,
/// `fly_distance` beyond it. A node at (or numerically at) the origin is
/// framed from `+z` instead.
pub fn fly_to(node: DVec3, config: &NavigationConfig) -> CameraTransition {
	let node = if node.is_finite() { node } else { DVec3::ZERO };
	let len = node.length();
	let position = if len > f64::EPSILON {
		node * (1.0 + config.fly_distance / len)
	} else {
		node + DVec3::Z * config.fly_distance
	};
	CameraTransition {
		position,
		look_at: node,
		duration_ms: config.fly_duration_ms,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	struct MockRig {
		position: DVec3,
		target: Option<DVec3>,
		up: DVec3,
		looked_at: Vec<DVec3>,
	}

	impl MockRig {
		/// Camera at +z looking at the origin.
		fn facing_origin(distance: f64) -> Self {
			Self {
				position: DVec3::new(0.0, 0.0, distance),
				target: Some(DVec3::ZERO),
				up: DVec3::Y,
				looked_at: Vec::new(),
			}
		}
	}

	impl CameraRig for MockRig {
		fn position(&self) -> DVec3 {
			self.position
		}
		fn set_position(&mut self, position: DVec3) {
			self.position = position;
		}
		fn forward(&self) -> DVec3 {
			match self.target {
				Some(t) => (t - self.position).normalize(),
				None => DVec3::NEG_Z,
			}
		}
		fn up(&self) -> DVec3 {
			self.up
		}
		fn target(&self) -> Option<DVec3> {
			self.target
		}
		fn set_target(&mut self, target: DVec3) {
			self.target = Some(target);
		}
		fn look_at(&mut self, target: DVec3) {
			self.looked_at.push(target);
		}
	}

	fn controller() -> CameraController {
		CameraController::new(&NavigationConfig::default())
	}

	fn held(keys: &[&str]) -> KeyState {
		let mut state = KeyState::default();
		for k in keys {
			state.key_down(k, false);
		}
		state
	}

	#[test]
	fn not_ready_without_camera() {
		let outcome = controller().tick::<MockRig>(&held(&["w"]), None);
		assert_eq!(outcome, TickOutcome::NotReady);
	}

	#[test]
	fn forward_moves_camera_and_target_together() {
		let mut rig = MockRig::facing_origin(100.0);
		let outcome = controller().tick(&held(&["w"]), Some(&mut rig));

		assert_eq!(outcome, TickOutcome::Moved);
		assert!((rig.position - DVec3::new(0.0, 0.0, 97.0)).length() < EPS);
		assert!((rig.target.unwrap() - DVec3::new(0.0, 0.0, -3.0)).length() < EPS);
	}

	#[test]
	fn movement_is_constant_per_tick() {
		let mut rig = MockRig::facing_origin(100.0);
		let keys = held(&["D"]);
		for _ in 0..10 {
			controller().tick(&keys, Some(&mut rig));
		}
		// right = forward x up = (-z) x y = +x
		assert!((rig.position - DVec3::new(30.0, 0.0, 100.0)).length() < EPS);
	}

	#[test]
	fn opposite_keys_cancel() {
		let mut rig = MockRig::facing_origin(50.0);
		controller().tick(&held(&["w", "s", "a", "d"]), Some(&mut rig));
		assert!((rig.position - DVec3::new(0.0, 0.0, 50.0)).length() < EPS);
	}

	#[test]
	fn rotation_orbits_at_fixed_radius() {
		let mut rig = MockRig::facing_origin(100.0);
		let keys = held(&["arrowleft"]);
		for _ in 0..20 {
			controller().tick(&keys, Some(&mut rig));
		}
		assert!((rig.position.length() - 100.0).abs() < 1e-6);
		assert!(rig.position.x > 0.0);
		assert_eq!(rig.target, Some(DVec3::ZERO));
		assert_eq!(rig.looked_at.len(), 20);
	}

	#[test]
	fn arrow_up_raises_camera_over_target() {
		let mut rig = MockRig::facing_origin(100.0);
		controller().tick(&held(&["arrowup"]), Some(&mut rig));
		assert!(rig.position.y > 0.0);
		assert!((rig.position.length() - 100.0).abs() < 1e-6);
	}

	#[test]
	fn rotation_needs_a_target() {
		let mut rig = MockRig::facing_origin(100.0);
		rig.target = None;
		controller().tick(&held(&["arrowright"]), Some(&mut rig));
		assert_eq!(rig.position, DVec3::new(0.0, 0.0, 100.0));
		assert!(rig.looked_at.is_empty());
	}

	#[test]
	fn movement_applies_before_rotation() {
		let mut rig = MockRig::facing_origin(100.0);
		controller().tick(&held(&["arrowleft", "w"]), Some(&mut rig));
		// the orbit happens around the already-moved target
		let target = rig.target.unwrap();
		assert!((target - DVec3::new(0.0, 0.0, -3.0)).length() < EPS);
		assert!(((rig.position - target).length() - 100.0).abs() < 1e-6);
	}

	#[test]
	fn keys_ignored_in_text_entry() {
		let mut keys = KeyState::default();
		keys.key_down("w", true);
		assert!(keys.is_idle());
		keys.key_down("W", false);
		assert!(keys.is_pressed(NavKey::Forward));
		keys.key_up("w");
		assert!(keys.is_idle());
		keys.key_down("q", false);
		assert!(keys.is_idle());
	}

	#[test]
	fn fly_to_keeps_fixed_standoff() {
		let config = NavigationConfig::default();
		let node = DVec3::new(30.0, 40.0, 0.0);
		let t = fly_to(node, &config);

		assert!(((t.position - node).length() - 200.0).abs() < 1e-9);
		assert_eq!(t.look_at, node);
		assert_eq!(t.duration_ms, 1500.0);
	}

	#[test]
	fn fly_to_origin_is_finite() {
		let config = NavigationConfig::default();
		let t = fly_to(DVec3::ZERO, &config);
		assert!(t.position.is_finite());
		assert_eq!(t.position, DVec3::new(0.0, 0.0, 200.0));

		let t = fly_to(DVec3::new(f64::NAN, 0.0, 0.0), &config);
		assert!(t.position.is_finite());
	}
}
