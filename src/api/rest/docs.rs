use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::rest::{locations, riders};
use crate::models::location::Location;
use crate::models::rider::{NearbyRider, Rider};

pub const OPENAPI_JSON_PATH: &str = "/api-docs-json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rider API",
        description = "The Rider API description",
        version = "1.0"
    ),
    paths(
        riders::create_rider,
        riders::list_riders,
        riders::search_riders,
        riders::get_rider,
        riders::update_rider,
        riders::remove_rider,
        locations::create_location,
        locations::get_location,
    ),
    components(schemas(
        Rider,
        Location,
        NearbyRider,
        riders::CreateRiderRequest,
        riders::UpdateRiderRequest,
        locations::CreateLocationRequest,
    )),
    tags((name = "riders", description = "Rider registry and proximity search"))
)]
pub struct ApiDoc;

/// Swagger UI at `/api-docs`, backed by the generated OpenAPI document.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_rider_route() {
        let doc = ApiDoc::openapi();

        assert_eq!(doc.info.title, "Rider API");
        for path in [
            "/riders",
            "/riders/search",
            "/riders/{id}",
            "/riders/{id}/locations",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
