use super::filter::*;
use super::handler;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

const LOGIN_BODY_LIMIT: u64 = 4 * 1024;

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let login = warp::path("login")
        .and(warp::path::end())
        .and(warp::post())
        .and(check_not_authorized(server.session_manager.clone()))
        .and(warp::body::content_length_limit(LOGIN_BODY_LIMIT))
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and(with(server.cookie_policy.clone()))
        .and_then(handler::login);

    let csrf = warp::path("csrf")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_session(server.session_manager.clone()))
        .and(with(server.csrf_service.clone()))
        .and(with(server.cookie_policy.clone()))
        .and_then(handler::issue_csrf_token);

    let logout = warp::path("logout")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_csrf(
            with_session(server.session_manager.clone()),
            server.csrf_service.clone(),
        ))
        .and(with(server.auth_service.clone()))
        .and(with(server.cookie_policy.clone()))
        .and_then(handler::logout);

    let whoami = warp::path("whoami")
        .and(warp::path::end())
        .and(warp::get())
        .and(add_user_id(server.session_manager.clone()))
        .and_then(handler::whoami);

    login.or(csrf).or(logout).or(whoami)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}
