use axum::middleware;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::extractors::permission::{require_admin, require_member};
use crate::handlers;
use crate::state::AppState;

/// All API routes. The permission layers wrap every method of their routes,
/// so a disallowed method is answered by the policy rather than the router.
pub fn api_routes(state: &AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(public_routes())
        .merge(
            member_routes().layer(middleware::from_fn_with_state(
                state.clone(),
                require_member,
            )),
        )
        .merge(admin_routes(state).layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        )))
}

fn public_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::admin_login))
}

fn member_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::specimen::list_prime_details))
        .routes(routes!(handlers::specimen::get_prime_details))
        .routes(routes!(handlers::specimen::list_other_details))
        .routes(routes!(handlers::specimen::get_other_details))
        .routes(routes!(handlers::specimen::get_select_options))
        .routes(routes!(handlers::tissue_request::add_new_tissue_request))
        .routes(routes!(handlers::download::download_data))
}

fn admin_routes(state: &AppState) -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::upload::file_upload))
        .layer(handlers::upload::upload_body_limit(
            state.config.upload.max_file_size,
        ));

    OpenApiRouter::new()
        .routes(routes!(handlers::specimen::add_new_data))
        .routes(routes!(handlers::auth::add_user))
        .routes(routes!(handlers::tissue_request::list_tissue_requests))
        .routes(routes!(handlers::tissue_request::approve_tissue_request))
        .routes(routes!(handlers::tissue_request::revert_tissue_request))
        .merge(upload)
}
