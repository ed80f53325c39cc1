//! HTTP routing and OpenAPI documentation configuration.
//!
//! All endpoints are registered here with their utoipa specifications, which
//! are collected into one OpenAPI document. Swagger UI serves interactive
//! documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{controller, model::app::AppState};

/// Builds the application's router with every API endpoint and Swagger UI.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "gastrack",
            description = "Subscriber, agreement, and installed-equipment tracking API"
        ),
        tags(
            (name = controller::auth::AUTH_TAG, description = "Authentication and activation"),
            (name = controller::activation::ACTIVATION_TAG, description = "Standalone activation route"),
            (name = controller::subscriber::SUBSCRIBER_TAG, description = "Subscriber management"),
            (name = controller::address::ADDRESS_TAG, description = "Address reference data"),
            (name = controller::agreement::AGREEMENT_TAG, description = "Service agreements"),
            (name = controller::installed_equipment::INSTALLED_EQUIPMENT_TAG, description = "Installed equipment records"),
            (name = controller::equipment::EQUIPMENT_TAG, description = "Equipment catalog and lookups"),
            (name = controller::organization::ORGANIZATION_TAG, description = "Verification organizations"),
        )
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // auth
        .routes(routes!(controller::auth::registration))
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::activate))
        .routes(routes!(controller::auth::resend_activation))
        .routes(routes!(controller::auth::check))
        // standalone activation
        .routes(routes!(controller::activation::activate))
        // subscribers
        .routes(routes!(controller::subscriber::list))
        .routes(routes!(
            controller::subscriber::get_one,
            controller::subscriber::update,
            controller::subscriber::delete
        ))
        .routes(routes!(controller::subscriber::change_password))
        .routes(routes!(controller::subscriber::delete_account))
        // addresses
        .routes(routes!(
            controller::address::create,
            controller::address::list
        ))
        .routes(routes!(
            controller::address::get_one,
            controller::address::update,
            controller::address::delete
        ))
        // agreements
        .routes(routes!(controller::agreement::list))
        .routes(routes!(controller::agreement::by_subscriber))
        .routes(routes!(controller::agreement::create))
        .routes(routes!(
            controller::agreement::get_one,
            controller::agreement::update,
            controller::agreement::delete
        ))
        // installed equipment
        .routes(routes!(
            controller::installed_equipment::create,
            controller::installed_equipment::list
        ))
        .routes(routes!(controller::installed_equipment::create_multiple))
        .routes(routes!(controller::installed_equipment::update_multiple))
        .routes(routes!(controller::installed_equipment::by_subscriber))
        .routes(routes!(
            controller::installed_equipment::get_one,
            controller::installed_equipment::update,
            controller::installed_equipment::delete
        ))
        // equipment catalog
        .routes(routes!(
            controller::equipment::list,
            controller::equipment::create
        ))
        .routes(routes!(controller::equipment::types))
        .routes(routes!(controller::equipment::statuses))
        .routes(routes!(
            controller::equipment::get_one,
            controller::equipment::update,
            controller::equipment::delete
        ))
        // organizations
        .routes(routes!(
            controller::organization::create,
            controller::organization::list
        ))
        .routes(routes!(
            controller::organization::get_one,
            controller::organization::update,
            controller::organization::delete
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
