use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use bites::{config::Settings, session::Sessions};
use std::sync::Arc;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    let settings = Settings::from_env()?;
    let catalog = settings.load_catalog()?;
    tracing::info!("serving {} dishes, {} per page", catalog.len(), settings.page_size);

    let sessions = Arc::new(
        Sessions::new(Arc::new(catalog), settings.page_size).with_capacity(settings.max_sessions),
    );
    let state = web::Data::new(api::ApiState::new(sessions));
    let origin = settings.cors_origin.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&origin)
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(settings.bind.as_str())
    .with_context(|| format!("fail to bind {}", settings.bind))?
    .run()
    .await?;
    Ok(())
}
