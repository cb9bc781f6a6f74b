//! Force-directed layout engine.
//!
//! Positions every note of a [`GraphDocument`] with an iterative physical
//! simulation. Each tick combines four forces:
//!
//! - springs along edges pulling endpoints toward a rest distance
//! - pairwise repulsion between nodes, skipped beyond a cutoff distance
//! - a centering shift keeping the mass centroid on the viewport center
//! - collision avoidance keeping node circles apart
//!
//! A cooling parameter `alpha` scales the forces and decays every tick. Once
//! it falls below `alpha_min` the simulation settles and stops producing
//! position updates until something perturbs it (a drag raises the alpha
//! target again). Mutable physical state lives here, keyed by note index;
//! the note records themselves are shared read-only through the document.
//!
//! Repulsion and collision are O(n²) per tick. That is the scaling ceiling:
//! past a few thousand nodes a quadtree approximation would be needed.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::rc::Rc;

use log::debug;

use super::scale::NodeSizing;
use crate::document::{GraphDocument, NoteRecord};

/// Tunables for the simulation. Defaults reproduce the classic d3-force setup
/// used for note maps: 80px links, -60 charge, 300-tick cooling.
#[derive(Clone, Debug)]
pub struct SimulationParameters {
	/// Rest length of every link spring.
	pub link_distance: f64,
	/// Many-body strength; negative repels.
	pub charge_strength: f64,
	/// Distances below this are clamped to avoid infinite repulsion.
	pub charge_distance_min: f64,
	/// Pairs further apart than this ignore each other.
	pub charge_distance_max: f64,
	/// Extra clearance added to each node's drawn radius for collisions.
	pub collide_padding: f64,
	/// How much of an overlap is resolved per tick, 0 to 1.
	pub collide_strength: f64,
	/// Fraction of the centroid offset removed each tick.
	pub center_strength: f64,
	/// Settling threshold for alpha.
	pub alpha_min: f64,
	/// Per-tick approach rate of alpha toward its target.
	pub alpha_decay: f64,
	/// Fraction of velocity lost per tick.
	pub velocity_decay: f64,
	/// Alpha target held while a node is being dragged.
	pub drag_alpha_target: f64,
	/// Spacing of the initial phyllotaxis seed layout.
	pub seed_radius: f64,
}

impl Default for SimulationParameters {
	fn default() -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 80.0,
			charge_strength: -60.0,
			charge_distance_min: 1.0,
			charge_distance_max: 800.0,
			collide_padding: 2.0,
			collide_strength: 1.0,
			center_strength: 1.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_alpha_target: 0.3,
			seed_radius: 10.0,
		}
	}
}

/// Lifecycle of a simulation. Initialization happens in [`Simulation::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Forces are applied every tick.
	Simulating,
	/// Alpha fell below its minimum; ticks are no-ops until woken.
	Settled,
	/// Torn down; nothing can wake it.
	Disposed,
}

/// Physical state of one note.
#[derive(Clone, Debug)]
pub struct SimNode {
	/// World position.
	pub x: f64,
	/// World position.
	pub y: f64,
	/// Velocity carried into the next tick.
	pub vx: f64,
	/// Velocity carried into the next tick.
	pub vy: f64,
	/// Fixed position while held by a drag.
	pub pinned: Option<(f64, f64)>,
	/// Incident link count; drives the drawn radius.
	pub degree: usize,
	/// Drawn radius in world units.
	pub radius: f64,
}

/// A document edge resolved to node indices.
#[derive(Clone, Copy, Debug)]
pub struct SimLink {
	/// Index of the source node.
	pub source: usize,
	/// Index of the target node.
	pub target: usize,
	/// Shared keyword count of the edge.
	pub weight: u32,
	strength: f64,
	bias: f64,
}

/// Layout state for one document at one viewport size.
pub struct Simulation {
	document: Rc<GraphDocument>,
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	index: HashMap<String, usize>,
	params: SimulationParameters,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	phase: Phase,
	rng: Lcg,
}

impl Simulation {
	/// Seed nodes around the viewport center and start simulating hot.
	pub fn new(
		document: Rc<GraphDocument>,
		width: f64,
		height: f64,
		params: SimulationParameters,
		sizing: &NodeSizing,
	) -> Self {
		let index: HashMap<String, usize> = document
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();

		let mut degree = vec![0usize; document.nodes.len()];
		let mut links = Vec::with_capacity(document.links.len());
		for edge in &document.links {
			let (Some(&source), Some(&target)) = (index.get(&edge.source), index.get(&edge.target))
			else {
				debug!("dropping link {} -> {}: unknown endpoint", edge.source, edge.target);
				continue;
			};
			if source == target {
				continue;
			}
			degree[source] += 1;
			degree[target] += 1;
			links.push(SimLink {
				source,
				target,
				weight: edge.weight,
				strength: 0.0,
				bias: 0.0,
			});
		}
		for link in &mut links {
			let (ds, dt) = (degree[link.source] as f64, degree[link.target] as f64);
			link.strength = 1.0 / ds.min(dt);
			link.bias = ds / (ds + dt);
		}

		let center = (width / 2.0, height / 2.0);
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let nodes = degree
			.iter()
			.enumerate()
			.map(|(i, &degree)| {
				let r = params.seed_radius * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				SimNode {
					x: center.0 + r * angle.cos(),
					y: center.1 + r * angle.sin(),
					vx: 0.0,
					vy: 0.0,
					pinned: None,
					degree,
					radius: sizing.radius(degree),
				}
			})
			.collect();

		Self {
			document,
			nodes,
			links,
			index,
			params,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			phase: Phase::Simulating,
			rng: Lcg::default(),
		}
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Current cooling parameter.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Tunables this simulation was built with.
	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	/// The document being laid out.
	pub fn document(&self) -> &Rc<GraphDocument> {
		&self.document
	}

	/// Per-note physical state, in document order. Empty once disposed.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Edges resolved to node indices.
	pub fn links(&self) -> &[SimLink] {
		&self.links
	}

	/// Physical state of one note.
	pub fn node(&self, idx: usize) -> Option<&SimNode> {
		self.nodes.get(idx)
	}

	/// The note behind a simulation node.
	pub fn note(&self, idx: usize) -> Option<&NoteRecord> {
		if self.phase == Phase::Disposed {
			return None;
		}
		self.document.nodes.get(idx)
	}

	/// Node index of a note id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Total kinetic energy, ½·Σ|v|².
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes
			.iter()
			.map(|n| 0.5 * (n.vx * n.vx + n.vy * n.vy))
			.sum()
	}

	/// Advance one step. Returns whether positions changed.
	pub fn tick(&mut self) -> bool {
		if self.phase != Phase::Simulating {
			return false;
		}

		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;
		self.apply_links();
		self.apply_charge();
		self.apply_center();
		self.apply_collisions();
		self.integrate();

		if self.alpha < self.params.alpha_min {
			self.phase = Phase::Settled;
			debug!("simulation settled, kinetic energy {:.5}", self.kinetic_energy());
		}
		true
	}

	/// Hold a node at a fixed position and wake the simulation.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pinned = Some((x, y));
			self.wake();
		}
	}

	/// Return a node to free simulation.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.pinned = None;
		}
	}

	/// Raise energy for an interaction: alpha is pulled toward the drag target
	/// until [`Simulation::release`] drops it again.
	pub fn perturb(&mut self) {
		self.alpha_target = self.params.drag_alpha_target;
		self.wake();
	}

	/// Let the simulation cool back down after an interaction.
	pub fn release(&mut self) {
		self.alpha_target = 0.0;
	}

	/// Resume ticking after settling. A disposed simulation stays disposed.
	pub fn wake(&mut self) {
		if self.phase == Phase::Settled {
			self.phase = Phase::Simulating;
		}
	}

	/// Stop for good and drop the per-node state.
	pub fn dispose(&mut self) {
		self.phase = Phase::Disposed;
		self.nodes.clear();
		self.links.clear();
		self.index.clear();
	}

	/// Topmost node whose circle (plus `slack`) contains the world point.
	pub fn node_at(&self, x: f64, y: f64, slack: f64) -> Option<usize> {
		self.nodes.iter().enumerate().rev().find_map(|(i, n)| {
			let (dx, dy) = (n.x - x, n.y - y);
			let reach = n.radius + slack;
			(dx * dx + dy * dy <= reach * reach).then_some(i)
		})
	}

	fn jiggle(&mut self) -> f64 {
		(self.rng.next_f64() - 0.5) * 1e-6
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for k in 0..self.links.len() {
			let link = self.links[k];
			let (s, t) = (&self.nodes[link.source], &self.nodes[link.target]);
			let mut x = t.x + t.vx - s.x - s.vx;
			let mut y = t.y + t.vy - s.y - s.vy;
			if x == 0.0 {
				x = self.jiggle();
			}
			if y == 0.0 {
				y = self.jiggle();
			}

			let l = (x * x + y * y).sqrt();
			let l = (l - self.params.link_distance) / l * alpha * link.strength;
			let (x, y) = (x * l, y * l);

			let t = &mut self.nodes[link.target];
			t.vx -= x * link.bias;
			t.vy -= y * link.bias;
			let s = &mut self.nodes[link.source];
			s.vx += x * (1.0 - link.bias);
			s.vy += y * (1.0 - link.bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.params.charge_strength * self.alpha;
		let min2 = self.params.charge_distance_min.powi(2);
		let max2 = self.params.charge_distance_max.powi(2);

		let n = self.nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut x = self.nodes[j].x - self.nodes[i].x;
				let mut y = self.nodes[j].y - self.nodes[i].y;
				let mut l = x * x + y * y;
				if l >= max2 {
					continue;
				}
				if x == 0.0 {
					x = self.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle();
					l += y * y;
				}
				if l < min2 {
					l = (min2 * l).sqrt();
				}

				let w = strength / l;
				self.nodes[i].vx += x * w;
				self.nodes[i].vy += y * w;
				self.nodes[j].vx -= x * w;
				self.nodes[j].vy -= y * w;
			}
		}
	}

	fn apply_center(&mut self) {
		if self.nodes.is_empty() {
			return;
		}
		let n = self.nodes.len() as f64;
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let dx = (sx / n - self.center.0) * self.params.center_strength;
		let dy = (sy / n - self.center.1) * self.params.center_strength;
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn apply_collisions(&mut self) {
		let padding = self.params.collide_padding;
		let strength = self.params.collide_strength;

		let n = self.nodes.len();
		for i in 0..n {
			let ri = self.nodes[i].radius + padding;
			let ri2 = ri * ri;
			let xi = self.nodes[i].x + self.nodes[i].vx;
			let yi = self.nodes[i].y + self.nodes[i].vy;

			for j in (i + 1)..n {
				let rj = self.nodes[j].radius + padding;
				let r = ri + rj;
				let mut x = xi - self.nodes[j].x - self.nodes[j].vx;
				let mut y = yi - self.nodes[j].y - self.nodes[j].vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = self.jiggle();
					l += x * x;
				}
				if y == 0.0 {
					y = self.jiggle();
					l += y * y;
				}

				let l = l.sqrt();
				let push = (r - l) / l * strength;
				let (x, y) = (x * push, y * push);
				let share = rj * rj / (ri2 + rj * rj);
				self.nodes[i].vx += x * share;
				self.nodes[i].vy += y * share;
				self.nodes[j].vx -= x * (1.0 - share);
				self.nodes[j].vy -= y * (1.0 - share);
			}
		}
	}

	fn integrate(&mut self) {
		let keep = 1.0 - self.params.velocity_decay;
		for node in &mut self.nodes {
			match node.pinned {
				Some((px, py)) => {
					node.x = px;
					node.y = py;
					node.vx = 0.0;
					node.vy = 0.0;
				}
				None => {
					node.vx *= keep;
					node.vy *= keep;
					node.x += node.vx;
					node.y += node.vy;
				}
			}
		}
	}
}

/// Deterministic linear congruential generator for tie-breaking jitter, so a
/// given document always lays out the same way.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Default for Lcg {
	fn default() -> Self {
		Self(1)
	}
}

impl Lcg {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 4_294_967_296;

	fn next_f64(&mut self) -> f64 {
		self.0 = (Self::A * self.0 + Self::C) % Self::M;
		self.0 as f64 / Self::M as f64
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::document::NoteType;
	use crate::document::tests::{edge, note};

	pub(crate) fn chain_document() -> Rc<GraphDocument> {
		Rc::new(GraphDocument {
			nodes: vec![
				note("a", NoteType::Learning, &[]),
				note("b", NoteType::Dialogue, &[]),
				note("c", NoteType::Journal, &[]),
			],
			links: vec![edge("a", "b", 2), edge("b", "c", 3)],
		})
	}

	fn simulation(document: Rc<GraphDocument>) -> Simulation {
		Simulation::new(
			document,
			800.0,
			600.0,
			SimulationParameters::default(),
			&NodeSizing::default(),
		)
	}

	fn run_until_settled(sim: &mut Simulation, limit: usize) -> usize {
		let mut ticks = 0;
		while sim.phase() == Phase::Simulating && ticks < limit {
			sim.tick();
			ticks += 1;
		}
		ticks
	}

	fn distance(a: &SimNode, b: &SimNode) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn small_graph_settles_in_bounded_steps() {
		let mut sim = simulation(chain_document());
		let ticks = run_until_settled(&mut sim, 1_000);

		assert_eq!(sim.phase(), Phase::Settled);
		assert!(ticks <= 400, "took {ticks} ticks");
		assert!(sim.alpha() < sim.params().alpha_min);
		assert!(sim.kinetic_energy() < 0.05, "energy {}", sim.kinetic_energy());
		assert!(!sim.tick(), "settled simulation keeps emitting");
	}

	#[test]
	fn settled_layout_is_reasonable() {
		let mut sim = simulation(chain_document());
		run_until_settled(&mut sim, 1_000);
		let nodes = sim.nodes();

		for node in nodes {
			assert!(node.x.is_finite() && node.y.is_finite());
		}
		let ab = distance(&nodes[0], &nodes[1]);
		let bc = distance(&nodes[1], &nodes[2]);
		assert!((60.0..130.0).contains(&ab), "a-b at {ab}");
		assert!((60.0..130.0).contains(&bc), "b-c at {bc}");
		assert!(distance(&nodes[0], &nodes[2]) > nodes[0].radius + nodes[2].radius);

		let cx = nodes.iter().map(|n| n.x).sum::<f64>() / 3.0;
		let cy = nodes.iter().map(|n| n.y).sum::<f64>() / 3.0;
		assert!((cx - 400.0).abs() < 1.0 && (cy - 300.0).abs() < 1.0);
	}

	#[test]
	fn degree_and_radius_follow_links() {
		let sim = simulation(chain_document());
		let degrees: Vec<usize> = sim.nodes().iter().map(|n| n.degree).collect();
		assert_eq!(degrees, vec![1, 2, 1]);
		assert!(sim.nodes()[1].radius > sim.nodes()[0].radius);
		assert_eq!(sim.links()[1].weight, 3);
		assert_eq!(sim.index_of("c"), Some(2));
	}

	#[test]
	fn unknown_link_endpoints_are_dropped() {
		let doc = Rc::new(GraphDocument {
			nodes: vec![note("a", NoteType::Learning, &[])],
			links: vec![edge("a", "ghost", 2)],
		});
		let sim = simulation(doc);
		assert!(sim.links().is_empty());
		assert_eq!(sim.nodes()[0].degree, 0);
	}

	#[test]
	fn empty_graph_is_harmless() {
		let mut sim = simulation(Rc::new(GraphDocument::default()));
		let ticks = run_until_settled(&mut sim, 1_000);
		assert_eq!(sim.phase(), Phase::Settled);
		assert!(ticks <= 400);
		assert_eq!(sim.kinetic_energy(), 0.0);
		assert_eq!(sim.node_at(400.0, 300.0, 5.0), None);
	}

	#[test]
	fn isolated_node_sits_at_center() {
		let doc = Rc::new(GraphDocument {
			nodes: vec![note("solo", NoteType::Clips, &[])],
			links: vec![],
		});
		let mut sim = simulation(doc);
		run_until_settled(&mut sim, 1_000);
		let node = &sim.nodes()[0];
		assert!((node.x - 400.0).abs() < 1e-6 && (node.y - 300.0).abs() < 1e-6);
	}

	#[test]
	fn pinned_node_holds_position() {
		let mut sim = simulation(chain_document());
		sim.pin(1, 100.0, 50.0);
		for _ in 0..20 {
			sim.tick();
		}
		let node = &sim.nodes()[1];
		assert_eq!((node.x, node.y), (100.0, 50.0));
		assert_eq!((node.vx, node.vy), (0.0, 0.0));
	}

	#[test]
	fn perturbation_wakes_settled_simulation() {
		let mut sim = simulation(chain_document());
		run_until_settled(&mut sim, 1_000);
		assert_eq!(sim.phase(), Phase::Settled);

		sim.perturb();
		assert_eq!(sim.phase(), Phase::Simulating);
		for _ in 0..50 {
			assert!(sim.tick());
		}
		assert_eq!(sim.phase(), Phase::Simulating, "drag target keeps it warm");

		sim.release();
		let ticks = run_until_settled(&mut sim, 2_000);
		assert_eq!(sim.phase(), Phase::Settled);
		assert!(ticks < 2_000);
	}

	#[test]
	fn disposed_simulation_never_ticks_again() {
		let mut sim = simulation(chain_document());
		sim.tick();
		sim.dispose();
		assert_eq!(sim.phase(), Phase::Disposed);
		assert!(sim.nodes().is_empty());
		assert!(sim.note(0).is_none());

		sim.perturb();
		sim.pin(0, 1.0, 1.0);
		assert_eq!(sim.phase(), Phase::Disposed);
		assert!(!sim.tick());
	}

	#[test]
	fn hit_testing_prefers_topmost() {
		let mut sim = simulation(chain_document());
		run_until_settled(&mut sim, 1_000);
		let b = sim.nodes()[1].clone();
		assert_eq!(sim.node_at(b.x, b.y, 0.0), Some(1));
		assert_eq!(sim.node_at(b.x + b.radius + 0.5, b.y, 1.0), Some(1));
		assert_eq!(sim.node_at(-500.0, -500.0, 5.0), None);
	}

	#[test]
	fn layout_is_deterministic() {
		let mut first = simulation(chain_document());
		let mut second = simulation(chain_document());
		run_until_settled(&mut first, 1_000);
		run_until_settled(&mut second, 1_000);
		for (a, b) in first.nodes().iter().zip(second.nodes()) {
			assert_eq!((a.x, a.y), (b.x, b.y));
		}
	}
}
