use super::handler;
use crate::application_port::SessionManager;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

/// Routes of the session service. Mounted at the root of its own process.
pub fn routes(
    manager: Arc<dyn SessionManager>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let sessions = warp::path("internal").and(warp::path("v1")).and(warp::path("sessions"));

    let create = sessions
        .clone()
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with(manager.clone()))
        .and_then(handler::create_session);

    let check = sessions
        .clone()
        .and(warp::path("check"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with(manager.clone()))
        .and_then(handler::check_session);

    let delete = sessions
        .and(warp::path("delete"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with(manager))
        .and_then(handler::delete_session);

    let health = warp::path("internal")
        .and(warp::path("v1"))
        .and(warp::path("health"))
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handler::health);

    create.or(check).or(delete).or(health)
}

fn with(
    manager: Arc<dyn SessionManager>,
) -> impl Filter<Extract = (Arc<dyn SessionManager>,), Error = Infallible> + Clone {
    warp::any().map(move || manager.clone())
}
