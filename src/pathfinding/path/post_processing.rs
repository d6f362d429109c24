//! Optional passes run over a found [Path].
//!
//! Smoothing fits a Catmull-Rom spline through the waypoints, inserting
//! three [PathPointType::Curve] points between each pair at `t = 0.25`,
//! `0.5` and `0.75`. The end points are duplicated so the stencil of four
//! never reaches past either end, which yields `4n - 3` points from `n`.
//!
//! Collinear removal drops any waypoint lying on the straight line between
//! the last kept waypoint and the next one.
//!

use crate::prelude::*;
use bevy::prelude::*;

/// Stencil weight of the outer point nearest the sample at `t = 0.25` and `0.75`
const V07: f32 = -0.0703125;
/// Stencil weight of the inner point nearest the sample at `t = 0.25` and `0.75`
const V86: f32 = 0.8671875;
/// Stencil weight of the inner point furthest from the sample at `t = 0.25` and `0.75`
const V22: f32 = 0.2265625;
/// Stencil weight of the outer point furthest from the sample at `t = 0.25` and `0.75`
const V02: f32 = -0.0234375;
/// Stencil weight of the outer points at `t = 0.5`
const V06: f32 = -0.0625;
/// Stencil weight of the inner points at `t = 0.5`
const V56: f32 = 0.5625;

/// Smooth a path into a spline. Paths of fewer than 3 points are returned unchanged
pub fn smooth_path(path: &Path) -> Path {
	let points = path.get_points();
	if points.len() < 3 {
		return path.clone();
	}
	let mut smooth = Path::new();
	let last = points.len() - 1;
	let position = |i: usize| points[i].get_position();

	smooth.add_point(points[0]);
	add_curve(&mut smooth, [position(0), position(0), position(1), position(2)]);
	for i in 1..last - 1 {
		smooth.add_point(points[i]);
		add_curve(
			&mut smooth,
			[position(i - 1), position(i), position(i + 1), position(i + 2)],
		);
	}
	smooth.add_point(points[last - 1]);
	add_curve(
		&mut smooth,
		[position(last - 2), position(last - 1), position(last), position(last)],
	);
	smooth.add_point(points[last]);
	smooth
}

/// Sample the spline segment between `stencil[1]` and `stencil[2]`
fn add_curve(path: &mut Path, stencil: [Vec3; 4]) {
	let [a, b, c, d] = stencil;
	path.add_point(PathPoint::curve(a * V07 + b * V86 + c * V22 + d * V02));
	path.add_point(PathPoint::curve(a * V06 + b * V56 + c * V56 + d * V06));
	path.add_point(PathPoint::curve(a * V02 + b * V22 + c * V86 + d * V07));
}

/// Drop waypoints that sit on a straight line between their neighbours,
/// the first and last waypoints are always kept. Paths of fewer than 3
/// points are returned unchanged
pub fn remove_collinear_points(path: &Path) -> Path {
	let points = path.get_points();
	if points.len() < 3 {
		return path.clone();
	}
	let mut pruned = Path::new();
	let mut anchor = points[0];
	pruned.add_point(anchor);
	for i in 1..points.len() - 1 {
		let a = anchor.get_position();
		let b = points[i].get_position();
		let c = points[i + 1].get_position();
		if !approximately(a.distance(b) + b.distance(c), a.distance(c)) {
			anchor = points[i];
			pruned.add_point(anchor);
		}
	}
	pruned.add_point(points[points.len() - 1]);
	pruned
}
