use super::PathCommand;
use crate::graph::Graph;

use glam::DVec2;
use kurbo::{BezPath, PathEl, Point};

fn to_point(point: DVec2) -> Point {
	Point::new(point.x, point.y)
}

fn to_dvec2(point: Point) -> DVec2 {
	DVec2::new(point.x, point.y)
}

impl From<PathEl> for PathCommand {
	fn from(element: PathEl) -> Self {
		match element {
			PathEl::MoveTo(point) => PathCommand::MoveTo(to_dvec2(point)),
			PathEl::LineTo(point) => PathCommand::LineTo(to_dvec2(point)),
			PathEl::QuadTo(handle, end) => PathCommand::QuadTo {
				handle: to_dvec2(handle),
				end: to_dvec2(end),
			},
			PathEl::CurveTo(handle_start, handle_end, end) => PathCommand::CubicTo {
				handle_start: to_dvec2(handle_start),
				handle_end: to_dvec2(handle_end),
				end: to_dvec2(end),
			},
			PathEl::ClosePath => PathCommand::Close,
		}
	}
}

impl From<PathCommand> for PathEl {
	fn from(command: PathCommand) -> Self {
		match command {
			PathCommand::MoveTo(point) => PathEl::MoveTo(to_point(point)),
			PathCommand::LineTo(point) => PathEl::LineTo(to_point(point)),
			PathCommand::QuadTo { handle, end } => PathEl::QuadTo(to_point(handle), to_point(end)),
			PathCommand::CubicTo { handle_start, handle_end, end } => PathEl::CurveTo(to_point(handle_start), to_point(handle_end), to_point(end)),
			PathCommand::Close => PathEl::ClosePath,
		}
	}
}

impl From<&BezPath> for Graph {
	fn from(path: &BezPath) -> Self {
		Graph::from_commands(path.elements().iter().copied().map(PathCommand::from))
	}
}

impl From<&Graph> for BezPath {
	fn from(graph: &Graph) -> Self {
		BezPath::from_vec(graph.to_commands().into_iter().map(PathEl::from).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bez_path_conversion() {
		let mut path = BezPath::new();
		path.move_to((0., 0.));
		path.line_to((10., 0.));
		path.quad_to((10., 10.), (0., 10.));
		path.close_path();

		let graph = Graph::from(&path);
		assert_eq!(graph.contours().len(), 1);
		assert_eq!(graph.contours()[0].edges().len(), 3);

		let back = BezPath::from(&graph);
		let elements = back.elements();
		assert_eq!(elements.len(), 4);
		assert_eq!(elements[0], PathEl::MoveTo(Point::new(0., 0.)));
		assert!(matches!(elements[2], PathEl::CurveTo(..)));
		assert_eq!(elements[3], PathEl::ClosePath);
	}
}
