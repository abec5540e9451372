//! Plane geometry shared by rendering and hit-testing.
//!
//! Positions are [`Point`]s, displacements are [`Vector`]s. Subtracting two
//! points yields a vector; adding a vector to a point yields a point.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Shortest distance between node centers for which a relationship still has a direction.
const MIN_CENTER_DISTANCE: f64 = 0.001;

/// A position in either world or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// `(0, 0)`.
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance_to(self, other: Point) -> f64 {
		(other - self).length()
	}

	/// Point halfway to `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// A displacement (or direction) in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
	/// Horizontal component.
	pub dx: f64,
	/// Vertical component.
	pub dy: f64,
}

impl Vector {
	/// The null vector.
	pub const ZERO: Vector = Vector { dx: 0.0, dy: 0.0 };

	/// Vector `(dx, dy)`.
	pub const fn new(dx: f64, dy: f64) -> Self {
		Self { dx, dy }
	}

	/// Euclidean length.
	pub fn length(self) -> f64 {
		self.length_squared().sqrt()
	}

	/// Squared length, avoiding the square root.
	pub fn length_squared(self) -> f64 {
		self.dx * self.dx + self.dy * self.dy
	}

	/// Dot product.
	pub fn dot(self, other: Vector) -> f64 {
		self.dx * other.dx + self.dy * other.dy
	}

	/// Angle of the vector in radians, measured from +x towards +y.
	pub fn angle(self) -> f64 {
		self.dy.atan2(self.dx)
	}

	/// Unit vector pointing at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}
}

impl Add<Vector> for Point {
	type Output = Point;

	fn add(self, v: Vector) -> Point {
		Point::new(self.x + v.dx, self.y + v.dy)
	}
}

impl AddAssign<Vector> for Point {
	fn add_assign(&mut self, v: Vector) {
		self.x += v.dx;
		self.y += v.dy;
	}
}

impl Sub<Vector> for Point {
	type Output = Point;

	fn sub(self, v: Vector) -> Point {
		Point::new(self.x - v.dx, self.y - v.dy)
	}
}

impl Sub for Point {
	type Output = Vector;

	fn sub(self, other: Point) -> Vector {
		Vector::new(self.x - other.x, self.y - other.y)
	}
}

impl Add for Vector {
	type Output = Vector;

	fn add(self, other: Vector) -> Vector {
		Vector::new(self.dx + other.dx, self.dy + other.dy)
	}
}

impl Sub for Vector {
	type Output = Vector;

	fn sub(self, other: Vector) -> Vector {
		Vector::new(self.dx - other.dx, self.dy - other.dy)
	}
}

impl Neg for Vector {
	type Output = Vector;

	fn neg(self) -> Vector {
		Vector::new(-self.dx, -self.dy)
	}
}

impl Mul<f64> for Vector {
	type Output = Vector;

	fn mul(self, k: f64) -> Vector {
		Vector::new(self.dx * k, self.dy * k)
	}
}

impl Div<f64> for Vector {
	type Output = Vector;

	fn div(self, k: f64) -> Vector {
		Vector::new(self.dx / k, self.dy / k)
	}
}

/// The visible part of a relationship: a straight segment running from the
/// boundary of the source node's circle to the boundary of the target's.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	/// Where the segment begins.
	pub start: Point,
	/// Where the segment ends.
	pub end: Point,
}

impl Segment {
	/// Offsets both ends inward by the node radii so the shaft starts and ends
	/// on the circles rather than at their centers.
	///
	/// Returns `None` when the centers coincide, since no direction exists.
	pub fn between_circles(
		from: Point,
		from_radius: f64,
		to: Point,
		to_radius: f64,
	) -> Option<Self> {
		let delta = to - from;
		let dist = delta.length();
		if dist < MIN_CENTER_DISTANCE {
			return None;
		}
		let unit = delta / dist;
		Some(Self {
			start: from + unit * from_radius,
			end: to - unit * to_radius,
		})
	}

	/// Unnormalised vector from start to end.
	pub fn direction(&self) -> Vector {
		self.end - self.start
	}

	/// Point halfway along the segment.
	pub fn midpoint(&self) -> Point {
		self.start.midpoint(self.end)
	}

	/// Perpendicular distance from `p` to the segment, or `None` when `p`
	/// projects outside it (or the segment has zero length).
	pub fn perpendicular_distance(&self, p: Point) -> Option<f64> {
		let dir = self.direction();
		let len_sq = dir.length_squared();
		if len_sq == 0.0 {
			return None;
		}
		let t = (p - self.start).dot(dir) / len_sq;
		if !(0.0..=1.0).contains(&t) {
			return None;
		}
		let projected = self.start + dir * t;
		Some(p.distance_to(projected))
	}
}
