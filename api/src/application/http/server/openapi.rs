use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Carb Vision API",
    description = "Food photo nutrition estimates and insulin dose estimation"
))]
pub struct ApiDoc;
