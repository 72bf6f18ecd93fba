//! A dead simple ordered HTTP router with named route parameters, built on hyper.
//!
//! ```no_run
//! use pathway::{handler_fn, path, text, HttpRouter, Method, Params, Request, Response, Router};
//!
//! async fn product(params: Params, _req: Request) -> Response {
//! 	text(format!("Buy this {}!", params.get("name").unwrap_or_default()))
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! 	let addr = ([127, 0, 0, 1], 4000).into();
//! 	let router: HttpRouter = Router::default()
//! 		.register(Method::GET, path![products / {name}], handler_fn(product))
//! 		.try_register(Method::GET, "/products/:name/:color", handler_fn(product))?
//! 		.into();
//!
//! 	let server = pathway::hyper::Server::bind(&addr).serve(router);
//! 	println!("Listening on http://{}", addr);
//!
//! 	server.await?;
//! 	Ok(())
//! }
//! ```
//!
//! Routes are tried in registration order and the first one whose method, segment count and
//! literal segments all match wins. Parameter segments (`{name}` in [`path!`], `:name` in string
//! patterns) bind the request segment in the same position and are handed to the handler as
//! [`Params`].
//!
//! [`HttpRouter`] exposes `internal_error_handler` and `not_found_handler` which can handle
//! errors returned from handlers and unmatched requests respectively.

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::*;

#[cfg(feature = "server")]
pub mod config;

/// The demonstration storefront: six routes showing literal and parameter matching.
#[cfg(feature = "http")]
pub mod storefront;

/// Various types and utilities for defining routes and route handlers.
pub mod route;

/// Contains the core structs of the router.
pub mod router;

pub use route::{parse, Params, Path, PathSegment, PatternError};
pub use router::*;
