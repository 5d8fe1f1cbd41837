use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use microtrack_core::{ErrorResponse, MessageResponse};
use microtrack_models::{
    CreatePlantDto, DeleteByNameResponse, LoginRequest, LoginResponse, Plant, PlantListResponse,
    Role, SignupDto, UpdatePlantDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::promote_user,
        crate::modules::plants::controller::list_plants,
        crate::modules::plants::controller::search_plants,
        crate::modules::plants::controller::create_plant,
        crate::modules::plants::controller::update_plant,
        crate::modules::plants::controller::delete_plant,
        crate::modules::plants::controller::delete_plants_by_name,
    ),
    components(
        schemas(
            Role,
            SignupDto,
            LoginRequest,
            LoginResponse,
            Plant,
            CreatePlantDto,
            UpdatePlantDto,
            PlantListResponse,
            DeleteByNameResponse,
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and login"),
        (name = "Users", description = "Account administration"),
        (name = "Plants", description = "Plant records and search")
    ),
    info(
        title = "MicroTrack API",
        version = "0.1.0",
        description = "Inventory tracking for plants in a grow facility, with JWT authentication and admin-gated writes.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
