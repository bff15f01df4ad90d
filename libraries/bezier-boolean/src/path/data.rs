use super::PathCommand;
use crate::graph::Graph;

use glam::DVec2;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?P<command>[MmLlHhVvQqTtCcSsZz])|(?P<number>[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)|(?P<separator>[\s,]+)|(?P<other>.)").expect("path data token pattern should compile")
});

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
	#[error("Unexpected character {character:?} at byte {position}")]
	UnexpectedCharacter { character: char, position: usize },
	#[error("Command '{command}' needs {expected} numbers but {found} were given")]
	MissingCoordinates { command: char, expected: usize, found: usize },
	#[error("Command '{command}' comes before the first move command")]
	CommandBeforeMove { command: char },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
	Command(char),
	Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<(usize, Token)>, PathDataError> {
	let mut tokens = Vec::new();
	for captures in TOKEN.captures_iter(data) {
		let position = captures.get(0).map_or(0, |whole| whole.start());
		let unexpected = || PathDataError::UnexpectedCharacter {
			character: data[position..].chars().next().unwrap_or_default(),
			position,
		};

		if let Some(command) = captures.name("command") {
			tokens.push((position, Token::Command(command.as_str().chars().next().ok_or_else(unexpected)?)));
		} else if let Some(number) = captures.name("number") {
			tokens.push((position, Token::Number(number.as_str().parse().map_err(|_| unexpected())?)));
		} else if captures.name("other").is_some() {
			return Err(unexpected());
		}
	}
	Ok(tokens)
}

fn argument_count(command: char) -> usize {
	match command.to_ascii_uppercase() {
		'M' | 'L' | 'T' => 2,
		'H' | 'V' => 1,
		'Q' | 'S' => 4,
		'C' => 6,
		_ => 0,
	}
}

fn reflect_control_point(point: DVec2, control_point: DVec2) -> DVec2 {
	point * 2. - control_point
}

/// The handle a smooth command mirrors, if the command before it was of the same kind.
#[derive(Clone, Copy, Debug, Default)]
enum PreviousHandle {
	#[default]
	None,
	Cubic(DVec2),
	Quadratic(DVec2),
}

#[derive(Default)]
struct Parser {
	commands: Vec<PathCommand>,
	current: DVec2,
	start: DVec2,
	previous_handle: PreviousHandle,
	has_moved: bool,
}

impl Parser {
	fn apply(&mut self, command: char, arguments: &[f64]) -> Result<(), PathDataError> {
		let relative = command.is_ascii_lowercase();
		let origin = if relative { self.current } else { DVec2::ZERO };
		let point = |index: usize| origin + DVec2::new(arguments[index], arguments[index + 1]);

		let command_upper = command.to_ascii_uppercase();
		if command_upper != 'M' && !self.has_moved {
			return Err(PathDataError::CommandBeforeMove { command });
		}

		let (path_command, previous_handle) = match command_upper {
			'M' => {
				self.has_moved = true;
				self.start = point(0);
				(PathCommand::MoveTo(point(0)), PreviousHandle::None)
			}
			'L' => (PathCommand::LineTo(point(0)), PreviousHandle::None),
			'H' => (PathCommand::LineTo(DVec2::new(origin.x + arguments[0], self.current.y)), PreviousHandle::None),
			'V' => (PathCommand::LineTo(DVec2::new(self.current.x, origin.y + arguments[0])), PreviousHandle::None),
			'C' => {
				let (handle_start, handle_end, end) = (point(0), point(2), point(4));
				(PathCommand::CubicTo { handle_start, handle_end, end }, PreviousHandle::Cubic(handle_end))
			}
			'S' => {
				let handle_start = match self.previous_handle {
					PreviousHandle::Cubic(handle) => reflect_control_point(self.current, handle),
					_ => self.current,
				};
				let (handle_end, end) = (point(0), point(2));
				(PathCommand::CubicTo { handle_start, handle_end, end }, PreviousHandle::Cubic(handle_end))
			}
			'Q' => {
				let (handle, end) = (point(0), point(2));
				(PathCommand::QuadTo { handle, end }, PreviousHandle::Quadratic(handle))
			}
			'T' => {
				let handle = match self.previous_handle {
					PreviousHandle::Quadratic(handle) => reflect_control_point(self.current, handle),
					_ => self.current,
				};
				(PathCommand::QuadTo { handle, end: point(0) }, PreviousHandle::Quadratic(handle))
			}
			_ => (PathCommand::Close, PreviousHandle::None),
		};

		self.current = match path_command {
			PathCommand::MoveTo(end) | PathCommand::LineTo(end) | PathCommand::QuadTo { end, .. } | PathCommand::CubicTo { end, .. } => end,
			PathCommand::Close => self.start,
		};
		self.previous_handle = previous_handle;
		self.commands.push(path_command);
		Ok(())
	}
}

/// Parses the `d` attribute of an SVG path element into absolute commands.
///
/// Supports the move, line, horizontal, vertical, quadratic, smooth quadratic, cubic, smooth cubic and close commands in their absolute and relative forms. Numbers that follow a command's arguments repeat it, with a move repeating as a line.
pub fn parse_path_data(data: &str) -> Result<Vec<PathCommand>, PathDataError> {
	let tokens = tokenize(data)?;
	let mut parser = Parser::default();
	let mut index = 0;

	while let Some(&(position, token)) = tokens.get(index) {
		index += 1;
		let Token::Command(mut command) = token else {
			let character = data[position..].chars().next().unwrap_or_default();
			return Err(PathDataError::UnexpectedCharacter { character, position });
		};

		loop {
			let expected = argument_count(command);
			let arguments: Vec<f64> = tokens[index..]
				.iter()
				.take(expected)
				.map_while(|&(_, token)| match token {
					Token::Number(number) => Some(number),
					Token::Command(_) => None,
				})
				.collect();
			if arguments.len() < expected {
				return Err(PathDataError::MissingCoordinates {
					command,
					expected,
					found: arguments.len(),
				});
			}
			index += expected;
			parser.apply(command, &arguments)?;

			let repeats = expected > 0 && matches!(tokens.get(index), Some((_, Token::Number(_))));
			if !repeats {
				break;
			}
			command = match command {
				'M' => 'L',
				'm' => 'l',
				other => other,
			};
		}
	}

	Ok(parser.commands)
}

impl Graph {
	/// Builds a graph from the `d` attribute of an SVG path element.
	pub fn from_svg_path_data(data: &str) -> Result<Graph, PathDataError> {
		Ok(Graph::from_commands(parse_path_data(data)?))
	}

	/// Writes the graph as the `d` attribute of an SVG path element, to be filled with the even-odd rule.
	pub fn to_svg_path_data(&self) -> String {
		let commands: Vec<String> = self
			.to_commands()
			.into_iter()
			.map(|command| match command {
				PathCommand::MoveTo(point) => format!("M {} {}", point.x, point.y),
				PathCommand::LineTo(point) => format!("L {} {}", point.x, point.y),
				PathCommand::QuadTo { handle, end } => format!("Q {} {} {} {}", handle.x, handle.y, end.x, end.y),
				PathCommand::CubicTo { handle_start, handle_end, end } => format!("C {} {} {} {} {} {}", handle_start.x, handle_start.y, handle_end.x, handle_end.y, end.x, end.y),
				PathCommand::Close => "Z".to_string(),
			})
			.collect();
		commands.join(" ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_absolute_commands() {
		let commands = parse_path_data("M 0,0 L 10 0 C 10 5, 5 10, 0 10 Z").unwrap();
		assert_eq!(
			commands,
			[
				PathCommand::MoveTo(DVec2::new(0., 0.)),
				PathCommand::LineTo(DVec2::new(10., 0.)),
				PathCommand::CubicTo {
					handle_start: DVec2::new(10., 5.),
					handle_end: DVec2::new(5., 10.),
					end: DVec2::new(0., 10.)
				},
				PathCommand::Close,
			]
		);
	}

	#[test]
	fn test_relative_and_implicit_commands() {
		let commands = parse_path_data("m10 10h5v5h-5z l 1 1 2 2").unwrap();
		assert_eq!(
			commands,
			[
				PathCommand::MoveTo(DVec2::new(10., 10.)),
				PathCommand::LineTo(DVec2::new(15., 10.)),
				PathCommand::LineTo(DVec2::new(15., 15.)),
				PathCommand::LineTo(DVec2::new(10., 15.)),
				PathCommand::Close,
				PathCommand::LineTo(DVec2::new(11., 11.)),
				PathCommand::LineTo(DVec2::new(13., 13.)),
			]
		);

		let commands = parse_path_data("M 0 0 10 0 10 10").unwrap();
		assert_eq!(commands[1], PathCommand::LineTo(DVec2::new(10., 0.)));
		assert_eq!(commands[2], PathCommand::LineTo(DVec2::new(10., 10.)));
	}

	#[test]
	fn test_smooth_commands_reflect_handles() {
		let commands = parse_path_data("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0 Q 25 5 30 0 T 40 0").unwrap();
		assert_eq!(
			commands[2],
			PathCommand::CubicTo {
				handle_start: DVec2::new(10., -10.),
				handle_end: DVec2::new(20., -10.),
				end: DVec2::new(20., 0.)
			}
		);
		assert_eq!(
			commands[4],
			PathCommand::QuadTo {
				handle: DVec2::new(35., -5.),
				end: DVec2::new(40., 0.)
			}
		);
	}

	#[test]
	fn test_numbers_without_separators() {
		let commands = parse_path_data("M.5-1L1.5.5e1").unwrap();
		assert_eq!(commands, [PathCommand::MoveTo(DVec2::new(0.5, -1.)), PathCommand::LineTo(DVec2::new(1.5, 5.))]);
	}

	#[test]
	fn test_errors() {
		assert_eq!(parse_path_data("M 0"), Err(PathDataError::MissingCoordinates { command: 'M', expected: 2, found: 1 }));
		assert_eq!(parse_path_data("L 1 1"), Err(PathDataError::CommandBeforeMove { command: 'L' }));
		assert_eq!(parse_path_data("M 0 0 A 1 1"), Err(PathDataError::UnexpectedCharacter { character: 'A', position: 6 }));
		assert_eq!(parse_path_data("5 5"), Err(PathDataError::UnexpectedCharacter { character: '5', position: 0 }));
	}

	#[test]
	fn test_svg_path_data() {
		let graph = Graph::from_svg_path_data("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
		assert_eq!(graph, Graph::rectangle(DVec2::ZERO, DVec2::splat(10.)));
		assert_eq!(graph.to_svg_path_data(), "M 0 0 L 10 0 L 10 10 L 0 10 Z");
		assert_eq!(Graph::new().to_svg_path_data(), "");

		let mut two_squares = graph.clone();
		two_squares.add_contour(Graph::rectangle(DVec2::splat(20.), DVec2::splat(30.)).contours()[0].clone());
		assert_eq!(two_squares.to_svg_path_data(), "M 0 0 L 10 0 L 10 10 L 0 10 Z M 20 20 L 30 20 L 30 30 L 20 30 Z");

		let circle = Graph::circle(DVec2::ZERO, 1.).to_svg_path_data();
		assert_eq!(circle.matches('C').count(), 4);
		assert!(circle.starts_with("M ") && circle.ends_with(" Z"));
	}
}
