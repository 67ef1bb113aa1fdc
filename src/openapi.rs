use utoipa::OpenApi;

use crate::person::{PersonDto, Sex};

/// Base document; paths are registered by the router.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "pagefilter",
        description = "Filtered, sorted and paginated person records"
    ),
    components(schemas(PersonDto, Sex)),
    tags((name = "person", description = "Person records"))
)]
pub struct ApiDoc;
