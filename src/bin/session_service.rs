//! Session service: owns the session store and exposes the manager over HTTP
//! to front ends configured with `session.backend = "remote"`.

use gatekeeper::api;
use gatekeeper::logger::*;
use gatekeeper::server::build_local_manager;
use gatekeeper::settings::*;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig {
        filter: project_settings.log.filter.clone(),
    })?;

    let address: std::net::SocketAddr = project_settings.session_service.address.parse()?;
    let manager =
        build_local_manager(&project_settings, &project_settings.session_service.store).await?;

    let routes = api::internal::routes(manager)
        .recover(api::internal::recover_error)
        .with(warp::trace::request());

    let (bound, serving) = warp::serve(routes).try_bind_with_graceful_shutdown(address, async {
        if let Err(e) = signal::ctrl_c().await {
            error!("could not listen for SIGINT: {}", e);
        }
    })?;
    info!(%bound, "session service listening");
    serving.await;

    info!("session service stopped");
    Ok(())
}
