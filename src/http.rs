use crate::{Params, Router};
use anyhow::{Error, Result};
use hyper::{
	header::{self, HeaderValue},
	service::Service,
};
use std::{
	convert::Infallible,
	future::{ready, Future, Ready},
	pin::Pin,
	sync::Arc,
	task::{Context, Poll},
};

pub use hyper;
pub use hyper::{Body, Method, StatusCode};

pub use hyper::http::response::Builder as ResponseBuilder;
pub type Request = hyper::Request<Body>;
pub type Response = Result<hyper::Response<Body>>;

/// The future returned by every HTTP route handler.
pub type RouteFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

const TEXT_HTML: &str = "text/html; charset=utf-8";

/// Adapts an async handler function into a route handler.
///
/// ```
/// use pathway::{handler_fn, path, text, Method, Params, Request, Response, Router};
///
/// async fn about(_params: Params, _req: Request) -> Response {
/// 	text("This page is all about me!")
/// }
///
/// let router = Router::default().register(Method::GET, path![about], handler_fn(about));
/// ```
pub fn handler_fn<F, Fut>(f: F) -> impl Fn(Params, Request) -> RouteFuture + Send + Sync + 'static
where
	F: Fn(Params, Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Response> + Send + 'static,
{
	move |params: Params, req: Request| -> RouteFuture { Box::pin(f(params, req)) }
}

/// A `200 OK` response carrying `body` as HTML text.
pub fn text(body: impl Into<String>) -> Response {
	text_with_status(StatusCode::OK, body)
}

pub fn text_with_status(status: StatusCode, body: impl Into<String>) -> Response {
	Ok(ResponseBuilder::default()
		.status(status)
		.header(header::CONTENT_TYPE, TEXT_HTML)
		.body(Body::from(body.into()))?)
}

fn fallback(status: StatusCode, body: String) -> hyper::Response<Body> {
	let mut res = hyper::Response::new(Body::from(body));
	*res.status_mut() = status;
	res.headers_mut()
		.insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML));
	res
}

fn default_error_handler(e: Error) -> hyper::Response<Body> {
	tracing::error!(error = %e, "route handler failed");
	fallback(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

fn default_not_found_handler(req: Request) -> hyper::Response<Body> {
	fallback(
		StatusCode::NOT_FOUND,
		format!("Cannot {} {}", req.method(), req.uri().path()),
	)
}

/// A function that can convert an error into a response.
pub type ErrorHandler = fn(e: Error) -> hyper::Response<Body>;

/// A function that handles unroutable requests and creates a response.
pub type NotFoundHandler = fn(req: Request) -> hyper::Response<Body>;

pub type InnerHttpRouter<'a> = Router<'a, Method, Request, RouteFuture>;

/// The hyper make-service: hands every connection a [`RouteHandler`] sharing one route table.
pub struct HttpRouter {
	router: Arc<InnerHttpRouter<'static>>,
	internal_error: ErrorHandler,
	not_found: NotFoundHandler,
}

impl HttpRouter {
	pub fn internal_error_handler(mut self, handler: ErrorHandler) -> Self {
		self.internal_error = handler;
		self
	}

	pub fn not_found_handler(mut self, handler: NotFoundHandler) -> Self {
		self.not_found = handler;
		self
	}

	/// Creates the per-connection request service.
	pub fn handler(&self) -> RouteHandler<'static> {
		RouteHandler {
			router: Arc::clone(&self.router),
			internal_error: self.internal_error,
			not_found: self.not_found,
		}
	}
}

impl From<InnerHttpRouter<'static>> for HttpRouter {
	fn from(inner: InnerHttpRouter<'static>) -> Self {
		Self {
			router: Arc::new(inner),
			internal_error: default_error_handler,
			not_found: default_not_found_handler,
		}
	}
}

impl<T> Service<T> for HttpRouter {
	type Response = RouteHandler<'static>;
	type Error = Infallible;
	type Future = Ready<Result<Self::Response, Self::Error>>;

	fn poll_ready(&mut self, _: &mut Context) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, _: T) -> Self::Future {
		ready(Ok(self.handler()))
	}
}

/// Responsible for handling the actual HTTP requests from hyper.
pub struct RouteHandler<'a> {
	router: Arc<InnerHttpRouter<'a>>,
	internal_error: ErrorHandler,
	not_found: NotFoundHandler,
}

impl<'a> Service<Request> for RouteHandler<'a> {
	type Response = hyper::Response<Body>;
	type Error = Infallible;
	type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

	fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
		Poll::Ready(Ok(()))
	}

	fn call(&mut self, req: Request) -> Self::Future {
		let method = req.method().clone();
		let path = req.uri().path().to_owned();

		// hyper omits the body of HEAD responses but keeps the GET content length
		let found = self.router.find(&method, &path).or_else(|| {
			if method == Method::HEAD {
				self.router.find(&Method::GET, &path)
			} else {
				None
			}
		});

		match found {
			Some((params, route)) => {
				tracing::debug!(%method, %path, params = params.len(), "dispatching");
				let fut = route(params, req);
				let err = self.internal_error;
				Box::pin(async move { Ok(fut.await.unwrap_or_else(err)) })
			}
			None => {
				tracing::debug!(%method, %path, "no route matched");
				let response = (self.not_found)(req);
				Box::pin(async { Ok(response) })
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::{handler_fn, text, HttpRouter, Request, Response};
	use crate::{path, Params, Router};
	use hyper::{body, body::HttpBody, service::Service, Body, Method, StatusCode};

	async fn hello(params: Params, _req: Request) -> Response {
		text(format!("hello {}", params.get("name").unwrap_or_default()))
	}

	async fn broken(_params: Params, _req: Request) -> Response {
		Err(anyhow::anyhow!("storage offline"))
	}

	fn router() -> HttpRouter {
		Router::default()
			.register(Method::GET, path![hello / {name}], handler_fn(hello))
			.register(Method::GET, path![broken], handler_fn(broken))
			.into()
	}

	async fn call(router: &HttpRouter, method: Method, uri: &str) -> (StatusCode, String) {
		let req = hyper::Request::builder()
			.method(method)
			.uri(uri)
			.body(Body::empty())
			.unwrap();
		let res = router.handler().call(req).await.unwrap();
		let status = res.status();
		let bytes = body::to_bytes(res.into_body()).await.unwrap();
		(status, String::from_utf8(bytes.to_vec()).unwrap())
	}

	#[tokio::test]
	async fn routes_to_handler() {
		let router = router();
		let (status, body) = call(&router, Method::GET, "/hello/world").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, "hello world");
	}

	#[tokio::test]
	async fn sets_text_content_type() {
		let req = hyper::Request::get("/hello/you").body(Body::empty()).unwrap();
		let res = router().handler().call(req).await.unwrap();
		assert_eq!(
			res.headers().get(hyper::header::CONTENT_TYPE).unwrap(),
			"text/html; charset=utf-8"
		);
	}

	#[tokio::test]
	async fn not_found_names_the_request() {
		let router = router();
		let (status, body) = call(&router, Method::POST, "/hello/world").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body, "Cannot POST /hello/world");
	}

	#[tokio::test]
	async fn handler_errors_become_500() {
		let router = router();
		let (status, body) = call(&router, Method::GET, "/broken").await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, "storage offline");
	}

	#[tokio::test]
	async fn custom_not_found_handler() {
		let router = router().not_found_handler(|_req| {
			let mut res = hyper::Response::new(Body::from("nope"));
			*res.status_mut() = StatusCode::IM_A_TEAPOT;
			res
		});
		let (status, body) = call(&router, Method::GET, "/missing").await;
		assert_eq!(status, StatusCode::IM_A_TEAPOT);
		assert_eq!(body, "nope");
	}

	#[tokio::test]
	async fn head_falls_back_to_get() {
		let req = hyper::Request::head("/hello/world").body(Body::empty()).unwrap();
		let res = router().handler().call(req).await.unwrap();
		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.body().size_hint().exact(), Some("hello world".len() as u64));
	}
}
