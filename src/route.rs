use std::slice;
use thiserror::Error;

pub type Path<'a> = Vec<PathSegment<'a>>;

/// Builds a [`Path`] from literal segments and `{name}` parameters.
///
/// Unlike [`parse`], the macro does not reject a repeated parameter name. Registering such a path
/// panics in debug builds.
///
/// ```
/// use pathway::{path, PathSegment};
///
/// assert_eq!(
/// 	path![products / {product_name}],
/// 	vec![PathSegment::Literal("products"), PathSegment::Param("product_name")]
/// );
/// ```
#[macro_export]
macro_rules! path {
	[] => { $crate::Path::new() };
	[ @single { $name:ident } ] => {
		$crate::PathSegment::Param(stringify!($name))
	};
	[ @single $segment:tt ] => {
		$crate::PathSegment::Literal(stringify!($segment))
	};
	[ $($segment:tt) / * ] => {
		vec![$($crate::path![@single $segment]), *]
	};
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PathSegment<'a> {
	Literal(&'a str),
	Param(&'a str),
}

/// Syntax errors in a string route pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
	#[error("pattern `{0}` must start with `/`")]
	MissingLeadingSlash(String),

	#[error("parameter at segment {index} has no name")]
	EmptyParameterName { index: usize },

	#[error("segment {index} is empty")]
	EmptySegment { index: usize },

	#[error("parameter `{0}` appears more than once")]
	DuplicateParameter(String),
}

/// Parses a pattern such as `/products/:productName/:color`.
///
/// Segments are separated by `/` and parameters are marked with a leading `:`. A single trailing
/// slash is ignored.
pub fn parse(pattern: &str) -> Result<Path<'_>, PatternError> {
	let rest = pattern
		.strip_prefix('/')
		.ok_or_else(|| PatternError::MissingLeadingSlash(pattern.to_owned()))?;
	let rest = rest.strip_suffix('/').unwrap_or(rest);

	let mut path = Path::new();
	if rest.is_empty() {
		return Ok(path);
	}

	for (index, segment) in rest.split('/').enumerate() {
		let parsed = match segment.strip_prefix(':') {
			Some("") => return Err(PatternError::EmptyParameterName { index }),
			Some(name) => {
				if path.contains(&PathSegment::Param(name)) {
					return Err(PatternError::DuplicateParameter(name.to_owned()));
				}
				PathSegment::Param(name)
			}
			None if segment.is_empty() => return Err(PatternError::EmptySegment { index }),
			None => PathSegment::Literal(segment),
		};
		path.push(parsed);
	}

	Ok(path)
}

/// Returns the first parameter name that occurs more than once in `path`.
pub(crate) fn duplicate_param<'a>(path: &[PathSegment<'a>]) -> Option<&'a str> {
	path.iter().enumerate().find_map(|(i, segment)| match segment {
		PathSegment::Param(name) if path[..i].contains(segment) => Some(*name),
		_ => None,
	})
}

/// Parameter values bound from a request path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn iter(&self) -> slice::Iter<'_, (String, String)> {
		self.0.iter()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Binds `raw` to `name`, percent-decoding it. Undecodable values are kept as-is.
	pub(crate) fn bind(&mut self, name: &str, raw: &str) {
		let value = match urlencoding::decode(raw) {
			Ok(decoded) => decoded.into_owned(),
			Err(e) => {
				tracing::debug!(
					param = name,
					value = raw,
					error = %e,
					"keeping undecodable parameter"
				);
				raw.to_owned()
			}
		};
		self.0.push((name.to_owned(), value));
	}
}

impl<'p> IntoIterator for &'p Params {
	type Item = &'p (String, String);
	type IntoIter = slice::Iter<'p, (String, String)>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod test {
	use super::{duplicate_param, parse, Params, PathSegment, PatternError};

	#[test]
	fn macro_builds_segments() {
		assert!(path![].is_empty());
		assert_eq!(path![about], vec![PathSegment::Literal("about")]);
		assert_eq!(
			path![addition / {first} / {second}],
			vec![
				PathSegment::Literal("addition"),
				PathSegment::Param("first"),
				PathSegment::Param("second"),
			]
		);
	}

	#[test]
	fn parses_literals_and_params() {
		assert_eq!(parse("/"), Ok(vec![]));
		assert_eq!(
			parse("/products/:productName/:color"),
			Ok(vec![
				PathSegment::Literal("products"),
				PathSegment::Param("productName"),
				PathSegment::Param("color"),
			])
		);
	}

	#[test]
	fn ignores_one_trailing_slash() {
		assert_eq!(parse("/products/:productName/"), parse("/products/:productName"));
	}

	#[test]
	fn rejects_bad_syntax() {
		assert_eq!(
			parse("about"),
			Err(PatternError::MissingLeadingSlash("about".into()))
		);
		assert_eq!(
			parse("/products/:"),
			Err(PatternError::EmptyParameterName { index: 1 })
		);
		assert_eq!(
			parse("/products//red"),
			Err(PatternError::EmptySegment { index: 1 })
		);
		assert_eq!(
			parse("/a/:x/:x"),
			Err(PatternError::DuplicateParameter("x".into()))
		);
	}

	#[test]
	fn finds_repeated_macro_params() {
		assert_eq!(duplicate_param(&path![a / {x} / {x}]), Some("x"));
		assert_eq!(duplicate_param(&path![a / {x} / {y}]), None);
		assert_eq!(duplicate_param(&path![x / {x}]), None);
	}

	#[test]
	fn params_decode_values() {
		let mut params = Params::new();
		params.bind("name", "sticky%20notes");
		params.bind("color", "%FF");

		assert_eq!(params.get("name"), Some("sticky notes"));
		assert_eq!(params.get("color"), Some("%FF"));
		assert_eq!(params.get("size"), None);
		assert_eq!(params.len(), 2);
	}
}
