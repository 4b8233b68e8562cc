use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;
use users_shared::errors::UserError;
use users_shared::response::{error_response, json_response};
use users_shared::store::UserStore;
use users_shared::{users, AppState};

/// Main Lambda handler - routes requests to a user operation by HTTP method
pub(crate) async fn function_handler<S: UserStore>(
    event: Request,
    state: Arc<AppState<S>>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    tracing::info!(
        "Users API Lambda invoked - Method: {} Path: {} Query: {:?}",
        method,
        path,
        event.query_string_parameters_ref()
    );
    tracing::debug!("Body: {}", String::from_utf8_lossy(event.body()));

    match method {
        // GET /users with no email parameter lists the whole table
        &Method::GET if is_list_request(&event) => get_users(&state).await,
        &Method::GET => get_user(&event, &state).await,
        &Method::POST => create_user(&event, &state).await,
        &Method::PUT => update_user(&event, &state).await,
        &Method::DELETE => delete_user(&event, &state).await,
        _ => error_response(&UserError::MethodNotAllowed(method.to_string())),
    }
}

fn email_query_parameter(event: &Request) -> Option<&str> {
    event
        .query_string_parameters_ref()
        .and_then(|params| params.first("email"))
}

fn is_list_request(event: &Request) -> bool {
    email_query_parameter(event).is_none()
        && event.uri().path().trim_end_matches('/').ends_with("/users")
}

async fn get_user<S: UserStore>(
    event: &Request,
    state: &AppState<S>,
) -> Result<Response<Body>, Error> {
    let email = email_query_parameter(event).unwrap_or_default();

    match users::fetch_user(&state.store, email).await {
        Ok(user) => json_response(StatusCode::OK, &user),
        Err(e) => error_response(&e),
    }
}

async fn get_users<S: UserStore>(state: &AppState<S>) -> Result<Response<Body>, Error> {
    match users::fetch_users(&state.store).await {
        Ok(users) => json_response(StatusCode::OK, &users),
        Err(e) => error_response(&e),
    }
}

async fn create_user<S: UserStore>(
    event: &Request,
    state: &AppState<S>,
) -> Result<Response<Body>, Error> {
    let user = match users::unmarshal_user(event.body()) {
        Ok(user) => user,
        Err(e) => return error_response(&e),
    };

    match users::create_user(&state.store, &user, state.settings.email_validation).await {
        Ok(()) => json_response(StatusCode::CREATED, &user),
        Err(e) => error_response(&e),
    }
}

async fn update_user<S: UserStore>(
    event: &Request,
    state: &AppState<S>,
) -> Result<Response<Body>, Error> {
    let user = match users::unmarshal_user(event.body()) {
        Ok(user) => user,
        Err(e) => return error_response(&e),
    };

    match users::update_user(&state.store, &user, state.settings.email_validation).await {
        Ok(()) => json_response(StatusCode::OK, &user),
        Err(e) => error_response(&e),
    }
}

async fn delete_user<S: UserStore>(
    event: &Request,
    state: &AppState<S>,
) -> Result<Response<Body>, Error> {
    let email = email_query_parameter(event).unwrap_or_default();

    match users::delete_user(&state.store, email).await {
        Ok(user) => json_response(StatusCode::OK, &user),
        Err(e) => error_response(&e),
    }
}
