use crate::{
	handler_fn, text, text_with_status, HttpRouter, Method, Params, PatternError, Request, Response,
	Router, StatusCode,
};
use num_bigint::BigInt;
use thiserror::Error;

pub const OUT_OF_STOCK: &str = "Sorry. We are out of that product!";

const SOLD_OUT_PRODUCT: &str = "sticky-notes";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdditionError {
	#[error("`{0}` is not a number")]
	NotANumber(String),
}

/// Parses an optionally signed run of ASCII digits of any length.
fn parse_operand(value: &str) -> Result<BigInt, AdditionError> {
	let digits = value.strip_prefix(&['+', '-'][..]).unwrap_or(value);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(AdditionError::NotANumber(value.to_owned()));
	}

	value
		.parse()
		.map_err(|_| AdditionError::NotANumber(value.to_owned()))
}

/// Sums two base-10 integers given as text.
pub fn add(first: &str, second: &str) -> Result<BigInt, AdditionError> {
	Ok(parse_operand(first)? + parse_operand(second)?)
}

async fn about(_params: Params, _req: Request) -> Response {
	text("This page is all about me!")
}

async fn projects(_params: Params, _req: Request) -> Response {
	text("Here are all of my projects!")
}

async fn products(_params: Params, _req: Request) -> Response {
	text("These are all my products!")
}

async fn product(params: Params, _req: Request) -> Response {
	let name = params.get("productName").unwrap_or_default();
	text(format!("Buy this {}!", name))
}

async fn product_in_color(params: Params, _req: Request) -> Response {
	let name = params.get("productName").unwrap_or_default();
	let color = params.get("color").unwrap_or_default();

	if name == SOLD_OUT_PRODUCT {
		return text(OUT_OF_STOCK);
	}

	text(format!("Buy this {} {}", color, name))
}

async fn addition(params: Params, _req: Request) -> Response {
	let first = params.get("firstNum").unwrap_or_default();
	let second = params.get("secondNum").unwrap_or_default();

	match add(first, second) {
		Ok(sum) => text(sum.to_string()),
		Err(e) => {
			tracing::debug!(first, second, error = %e, "rejecting addition");
			text_with_status(StatusCode::BAD_REQUEST, e.to_string())
		}
	}
}

/// Builds the storefront's route table.
pub fn router() -> Result<HttpRouter, PatternError> {
	let router = Router::default()
		.try_register(Method::GET, "/about", handler_fn(about))?
		.try_register(Method::GET, "/projects", handler_fn(projects))?
		.try_register(Method::GET, "/products", handler_fn(products))?
		.try_register(Method::GET, "/products/:productName/", handler_fn(product))?
		.try_register(
			Method::GET,
			"/products/:productName/:color",
			handler_fn(product_in_color),
		)?
		.try_register(
			Method::GET,
			"/addition/:firstNum/:secondNum",
			handler_fn(addition),
		)?;

	tracing::debug!(routes = router.len(), "storefront routes registered");
	Ok(router.into())
}
