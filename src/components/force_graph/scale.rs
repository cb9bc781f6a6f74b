//! Visual sizing policy and zoom-dependent scaling.
//!
//! # Sizing
//!
//! - Node radius grows with the node's link count, clamped so isolated notes
//!   stay visible and hubs never dominate.
//! - Edge stroke grows with edge weight (shared keyword count), clamped.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: graph coordinates, scaled by the zoom transform.
//! - **Screen-space**: canvas pixels, unaffected by zoom.
//!
//! [`ScaleBehavior`] converts a configured size into the world-space value to
//! draw with after the zoom transform is applied.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World variant completes the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size in pixels.
		min_screen: f64,
		/// Largest on-screen size in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space value for a configured base value at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Node radius as a clamped linear function of link count.
#[derive(Clone, Debug)]
pub struct NodeSizing {
	/// Radius of an unlinked node.
	pub base: f64,
	/// Radius added per incident link.
	pub per_link: f64,
	/// Lower radius bound.
	pub min: f64,
	/// Upper radius bound.
	pub max: f64,
}

impl Default for NodeSizing {
	fn default() -> Self {
		Self {
			base: 3.0,
			per_link: 0.8,
			min: 3.0,
			max: 15.0,
		}
	}
}

impl NodeSizing {
	/// Drawn radius of a node with `degree` links.
	pub fn radius(&self, degree: usize) -> f64 {
		(self.base + self.per_link * degree as f64).clamp(self.min, self.max)
	}
}

/// Edge stroke as a clamped linear function of edge weight.
#[derive(Clone, Debug)]
pub struct EdgeSizing {
	/// Stroke width per shared keyword.
	pub per_weight: f64,
	/// Thinnest stroke.
	pub min: f64,
	/// Thickest stroke.
	pub max: f64,
}

impl Default for EdgeSizing {
	fn default() -> Self {
		Self {
			per_weight: 0.5,
			min: 0.5,
			max: 3.0,
		}
	}
}

impl EdgeSizing {
	/// Stroke width of an edge of `weight`.
	pub fn width(&self, weight: u32) -> f64 {
		(self.per_weight * weight as f64).clamp(self.min, self.max)
	}
}

/// Pan/zoom limits and the startup framing.
#[derive(Clone, Debug)]
pub struct ZoomConfig {
	/// Furthest zoom out.
	pub min_scale: f64,
	/// Furthest zoom in.
	pub max_scale: f64,
	/// Scale applied when the view is (re)initialized.
	pub initial_scale: f64,
	/// Initial translation as a fraction of the viewport size.
	pub initial_offset: (f64, f64),
	/// Wheel delta (pixels) to log2 zoom factor.
	pub wheel_sensitivity: f64,
}

impl Default for ZoomConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.1,
			max_scale: 4.0,
			initial_scale: 0.8,
			initial_offset: (0.1, 0.1),
			wheel_sensitivity: 0.002,
		}
	}
}

/// Complete sizing configuration for the graph view.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node radii.
	pub node: NodeSizing,
	/// Edge strokes.
	pub edge: EdgeSizing,
	/// Zoom limits and framing.
	pub zoom: ZoomConfig,
	/// Extra pointer reach around nodes when hit testing.
	pub hit_slack: f64,
	/// How `hit_slack` follows the zoom.
	pub hit_behavior: ScaleBehavior,
	/// Hover/selection outline stroke.
	pub outline_width: f64,
	/// How `outline_width` follows the zoom.
	pub outline_behavior: ScaleBehavior,
	/// Screen-space pointer movement below which a press is a click.
	pub click_tolerance: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeSizing::default(),
			edge: EdgeSizing::default(),
			zoom: ZoomConfig::default(),
			hit_slack: 3.0,
			hit_behavior: ScaleBehavior::Screen,
			outline_width: 2.0,
			outline_behavior: ScaleBehavior::Clamped {
				min_screen: 1.0,
				max_screen: 4.0,
			},
			click_tolerance: 3.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom level these values were computed for.
	pub k: f64,
	/// Hit slack in world-space.
	pub hit_slack: f64,
	/// Outline stroke in world-space.
	pub outline_width: f64,
}

impl ScaledValues {
	/// Resolve `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			hit_slack: config.hit_behavior.apply(config.hit_slack, k),
			outline_width: config.outline_behavior.apply(config.outline_width, k),
		}
	}
}
