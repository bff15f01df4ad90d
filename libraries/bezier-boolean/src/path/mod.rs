#[cfg(feature = "parsing")]
mod data;
#[cfg(feature = "kurbo")]
mod to_kurbo;

#[cfg(feature = "parsing")]
pub use data::{PathDataError, parse_path_data};

use crate::contour::Contour;
use crate::curve::Curve;
use crate::graph::Graph;

use glam::DVec2;
use thiserror::Error;

/// One drawing instruction of a path, in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathCommand {
	MoveTo(DVec2),
	LineTo(DVec2),
	QuadTo { handle: DVec2, end: DVec2 },
	CubicTo { handle_start: DVec2, handle_end: DVec2, end: DVec2 },
	Close,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
	#[error("Command {index} ({command:?}) draws before any MoveTo")]
	MissingMoveTo { index: usize, command: PathCommand },
}

/// Turns a stream of commands into contours.
#[derive(Default)]
struct GraphBuilder {
	graph: Graph,
	contour: Contour,
	/// Where the current subpath started, once there has been a `MoveTo`.
	start: Option<DVec2>,
	current: DVec2,
}

impl GraphBuilder {
	fn push(&mut self, index: usize, command: PathCommand) -> Result<(), PathError> {
		let current = self.current;

		let edge = match command {
			PathCommand::MoveTo(point) => {
				self.finish_contour();
				self.start = Some(point);
				self.current = point;
				return Ok(());
			}
			PathCommand::Close => {
				self.finish_contour();
				self.current = self.start.unwrap_or_default();
				return Ok(());
			}
			_ if self.start.is_none() => return Err(PathError::MissingMoveTo { index, command }),
			PathCommand::LineTo(end) => (end != current).then(|| Curve::line(current, end)),
			PathCommand::QuadTo { handle, end } => (handle != current || end != current).then(|| Curve::from_quadratic(current, handle, end)),
			PathCommand::CubicTo { handle_start, handle_end, end } => {
				(handle_start != current || handle_end != current || end != current).then(|| Curve::new(current, handle_start, handle_end, end))
			}
		};

		if let Some(edge) = edge {
			self.current = edge.end();
			self.contour.add_edge(edge);
		}
		Ok(())
	}

	fn finish_contour(&mut self) {
		if self.contour.is_empty() {
			return;
		}
		let mut contour = std::mem::take(&mut self.contour);
		contour.close();
		self.graph.add_contour(contour);
	}

	fn finish(mut self) -> Graph {
		self.finish_contour();
		self.graph.classify_insides();
		self.graph
	}
}

impl Graph {
	/// Builds a graph from path commands, closing every subpath. Drawing commands that come before the first `MoveTo` are skipped.
	pub fn from_commands(commands: impl IntoIterator<Item = PathCommand>) -> Graph {
		let mut builder = GraphBuilder::default();
		for (index, command) in commands.into_iter().enumerate() {
			if let Err(error) = builder.push(index, command) {
				log::warn!("Skipping path command: {error}");
			}
		}
		builder.finish()
	}

	/// Like [`Graph::from_commands`] but fails on drawing commands that come before the first `MoveTo`.
	pub fn try_from_commands(commands: impl IntoIterator<Item = PathCommand>) -> Result<Graph, PathError> {
		let mut builder = GraphBuilder::default();
		for (index, command) in commands.into_iter().enumerate() {
			builder.push(index, command)?;
		}
		Ok(builder.finish())
	}

	/// The contours as path commands, one closed subpath each. A straight last edge back to the start is left to the `Close`.
	pub fn to_commands(&self) -> Vec<PathCommand> {
		let mut commands = Vec::new();

		for contour in self.contours().iter().filter(|contour| !contour.is_empty()) {
			commands.push(PathCommand::MoveTo(contour.first_point()));

			let edges = contour.edges();
			let implied_by_close = edges.last().is_some_and(|edge| edge.is_line() && edges.len() > 1);
			let drawn = if implied_by_close { &edges[..edges.len() - 1] } else { edges };

			commands.extend(drawn.iter().map(|edge| {
				if edge.is_line() {
					PathCommand::LineTo(edge.end())
				} else {
					PathCommand::CubicTo {
						handle_start: edge.handle_start(),
						handle_end: edge.handle_end(),
						end: edge.end(),
					}
				}
			}));
			commands.push(PathCommand::Close);
		}

		commands
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::contour::ContourInside;
	use pretty_assertions::assert_eq;

	fn square_commands(min: f64, max: f64) -> Vec<PathCommand> {
		vec![
			PathCommand::MoveTo(DVec2::new(min, min)),
			PathCommand::LineTo(DVec2::new(max, min)),
			PathCommand::LineTo(DVec2::new(max, max)),
			PathCommand::LineTo(DVec2::new(min, max)),
			PathCommand::Close,
		]
	}

	#[test]
	fn test_close_adds_closing_edge() {
		let graph = Graph::from_commands(square_commands(0., 10.));
		assert_eq!(graph.contours().len(), 1);
		assert_eq!(graph.contours()[0].edges().len(), 4);
		assert_eq!(graph, Graph::rectangle(DVec2::ZERO, DVec2::splat(10.)));
	}

	#[test]
	fn test_move_to_closes_previous_contour() {
		let commands = [
			PathCommand::MoveTo(DVec2::ZERO),
			PathCommand::LineTo(DVec2::new(10., 0.)),
			PathCommand::LineTo(DVec2::new(10., 10.)),
			PathCommand::MoveTo(DVec2::new(20., 0.)),
			PathCommand::LineTo(DVec2::new(30., 0.)),
			PathCommand::LineTo(DVec2::new(30., 10.)),
		];
		let graph = Graph::from_commands(commands);
		assert_eq!(graph.contours().len(), 2);
		assert!(graph.contours().iter().all(|contour| contour.edges().len() == 3));
	}

	#[test]
	fn test_zero_length_segments_are_skipped() {
		let commands = [
			PathCommand::MoveTo(DVec2::ZERO),
			PathCommand::LineTo(DVec2::ZERO),
			PathCommand::LineTo(DVec2::new(10., 0.)),
			PathCommand::CubicTo {
				handle_start: DVec2::new(10., 0.),
				handle_end: DVec2::new(10., 0.),
				end: DVec2::new(10., 0.),
			},
			PathCommand::QuadTo { handle: DVec2::new(10., 10.), end: DVec2::new(0., 10.) },
			PathCommand::Close,
		];
		let graph = Graph::from_commands(commands);
		let edges = graph.contours()[0].edges();
		assert_eq!(edges.len(), 3);
		assert!(!edges[1].is_line());
		assert_eq!(edges[1].handle_start(), DVec2::new(10., 0.) + (DVec2::new(10., 10.) - DVec2::new(10., 0.)) * (2. / 3.));
	}

	#[test]
	fn test_commands_before_move_to() {
		let commands = [PathCommand::LineTo(DVec2::new(5., 5.))].into_iter().chain(square_commands(0., 10.));
		let error = Graph::try_from_commands(commands.clone()).unwrap_err();
		assert_eq!(
			error,
			PathError::MissingMoveTo {
				index: 0,
				command: PathCommand::LineTo(DVec2::new(5., 5.))
			}
		);
		assert_eq!(Graph::from_commands(commands).contours().len(), 1);
	}

	#[test]
	fn test_holes_are_classified() {
		let commands = square_commands(0., 10.).into_iter().chain(square_commands(3., 6.));
		let graph = Graph::from_commands(commands);
		assert_eq!(graph.contours()[1].inside(), ContourInside::Hole);
	}

	#[test]
	fn test_to_commands() {
		let graph = Graph::rectangle(DVec2::ZERO, DVec2::splat(10.));
		assert_eq!(graph.to_commands(), square_commands(0., 10.));

		let circle = Graph::circle(DVec2::ZERO, 1.);
		let commands = circle.to_commands();
		assert_eq!(commands.len(), 6);
		assert!(matches!(commands[4], PathCommand::CubicTo { .. }));
		assert_eq!(Graph::from_commands(commands), circle);
	}
}
