use crate::route::{self, Params, Path, PathSegment, PatternError};
use std::fmt::{self, Debug, Formatter};

/// A boxed route handler: receives the bound parameters and the request.
pub type Handler<Req, Res> = Box<dyn Fn(Params, Req) -> Res + Send + Sync>;

struct Registration<'a, M, Req, Res> {
	method: M,
	path: Path<'a>,
	handler: Handler<Req, Res>,
}

impl<'a, M: Debug, Req, Res> Debug for Registration<'a, M, Req, Res> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("method", &self.method)
			.field("path", &self.path)
			.finish()
	}
}

/// An ordered route table. The first registration that matches a request wins.
pub struct Router<'a, M, Req, Res> {
	routes: Vec<Registration<'a, M, Req, Res>>,
}

impl<'a, M, Req, Res> Default for Router<'a, M, Req, Res> {
	fn default() -> Self {
		Self { routes: Vec::new() }
	}
}

impl<'a, M: Debug, Req, Res> Debug for Router<'a, M, Req, Res> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(&self.routes).finish()
	}
}

impl<'a, M, Req, Res> Router<'a, M, Req, Res> {
	pub fn register<F>(mut self, method: M, path: Path<'a>, handler: F) -> Self
	where
		F: Fn(Params, Req) -> Res + Send + Sync + 'static,
	{
		debug_assert!(
			route::duplicate_param(&path).is_none(),
			"route {:?} names a parameter more than once",
			path
		);
		self.routes.push(Registration {
			method,
			path,
			handler: Box::new(handler),
		});
		self
	}

	/// Registers a route from a string pattern like `/products/:productName`.
	pub fn try_register<F>(
		self,
		method: M,
		pattern: &'a str,
		handler: F,
	) -> Result<Self, PatternError>
	where
		F: Fn(Params, Req) -> Res + Send + Sync + 'static,
	{
		let path = route::parse(pattern)?;
		Ok(self.register(method, path, handler))
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl<'a, M: PartialEq, Req, Res> Router<'a, M, Req, Res> {
	/// Finds the first route matching `method` and `path`, binding its parameters.
	pub fn find(&self, method: &M, path: &str) -> Option<(Params, &Handler<Req, Res>)> {
		let segments = split(path);

		self.routes
			.iter()
			.filter(|route| route.method == *method)
			.find_map(|route| bind(&route.path, &segments).map(|params| (params, &route.handler)))
	}

	/// Invokes the matching handler, or returns `None` if nothing matched.
	pub fn dispatch(&self, method: &M, path: &str, req: Req) -> Option<Res> {
		self.find(method, path)
			.map(|(params, handler)| handler(params, req))
	}
}

fn split(path: &str) -> Vec<&str> {
	let path = path.strip_prefix('/').unwrap_or(path);
	let path = path.strip_suffix('/').unwrap_or(path);

	if path.is_empty() {
		Vec::new()
	} else {
		path.split('/').collect()
	}
}

fn bind(pattern: &[PathSegment<'_>], segments: &[&str]) -> Option<Params> {
	if pattern.len() != segments.len() {
		return None;
	}

	let mut params = Params::new();
	for (expected, actual) in pattern.iter().zip(segments) {
		match expected {
			PathSegment::Literal(literal) => {
				if literal != actual {
					return None;
				}
			}
			PathSegment::Param(_) if actual.is_empty() => return None,
			PathSegment::Param(name) => params.bind(name, actual),
		}
	}

	Some(params)
}
