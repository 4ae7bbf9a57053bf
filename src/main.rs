use gatekeeper::api;
use gatekeeper::logger::*;
use gatekeeper::server::*;
use gatekeeper::settings::*;
use std::fs;
use std::sync::Arc;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;
    let tls = match (&project_settings.http.cert_path, &project_settings.http.key_path) {
        (Some(cert), Some(key)) => {
            for path in [cert, key] {
                if !fs::metadata(path)?.is_file() {
                    return Err(anyhow::anyhow!("TLS file is not a regular file: {:?}", path));
                }
            }
            Some((cert.clone(), key.clone()))
        }
        (None, None) => None,
        _ => {
            return Err(anyhow::anyhow!(
                "http.cert_path and http.key_path must be set together"
            ));
        }
    };

    let server = Arc::new(Server::try_new(&project_settings).await?);

    let api_v1 = warp::path("api")
        .and(warp::path("v1"))
        .and(api::v1::routes(server.clone()))
        .recover(api::v1::recover_error)
        .with(warp::trace::request());

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("could not listen for SIGINT: {}", e);
        }
    };

    match tls {
        Some((cert, key)) => {
            let (bound, serving) = warp::serve(api_v1)
                .tls()
                .cert_path(cert)
                .key_path(key)
                .bind_with_graceful_shutdown(address, shutdown);
            info!(%bound, "listening (tls)");
            serving.await;
        }
        None => {
            warn!("no TLS material configured; serving plain HTTP");
            let (bound, serving) = warp::serve(api_v1).try_bind_with_graceful_shutdown(address, shutdown)?;
            info!(%bound, "listening");
            serving.await;
        }
    }

    info!("server stopped");
    Ok(())
}
