use std::net::SocketAddr;
use std::sync::Arc;

use giveaway_engine::config::{AppConfig, DatabaseConfig};
use giveaway_engine::engine::{GiveawayService, LogAnnouncer, Sweeper};
use giveaway_engine::{metrics, repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    dotenvy::dotenv()?;

    pretty_env_logger::init();

    let app_config = AppConfig::from_env();
    let database_config = DatabaseConfig::from_env()?;
    let db_conn = repo::establish_database_connection(&database_config).await?;
    let repos = repo::Repositories::new(&db_conn);
    let service = GiveawayService::new(repos.clone());

    let sweeper = Sweeper::new(repos, service, Arc::new(LogAnnouncer), &app_config);
    let sweep_task = tokio::spawn(sweeper.run(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
    }));

    let metrics_router = metrics::init();
    let addr = SocketAddr::from(([0, 0, 0, 0], app_config.metrics_port));
    let srv = tokio::spawn(async move {
        let tcp_listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(tcp_listener, metrics_router)
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("failed to install CTRL+C signal handler");
                log::info!("shutdown of the metrics server")
            })
            .await
    });

    let (srv_res, sweep_res) = futures::join!(srv, sweep_task);
    sweep_res?;
    srv_res?.map_err(Into::into)
}
