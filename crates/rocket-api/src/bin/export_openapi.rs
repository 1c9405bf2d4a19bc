//! OpenAPI schema export
//!
//! Prints the OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p rocket-api --bin export-openapi > openapi.json

use rocket_api::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    let openapi_json = ApiDoc::openapi().to_pretty_json()?;
    println!("{}", openapi_json);
    Ok(())
}
