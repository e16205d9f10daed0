use anyhow::Context;
use bites::{config::Settings, session::Sessions};
use std::sync::Arc;
use teloxide::{
    dptree,
    prelude::{Dispatcher, LoggingErrorHandler},
    Bot,
};

mod handlers;
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(true)
        .with_file(false)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("fail to setup logging")?;

    // also loads .env
    let settings = Settings::from_env()?;
    let catalog = settings.load_catalog()?;
    let sessions = Arc::new(
        Sessions::new(Arc::new(catalog), settings.page_size).with_capacity(settings.max_sessions),
    );

    let token = std::env::var("TGBOT_TOKEN").context("TGBOT_TOKEN env not found")?;
    let bot = Bot::new(token);

    Dispatcher::builder(bot, handlers::handler_schema())
        .dependencies(dptree::deps![sessions])
        .enable_ctrlc_handler()
        .default_handler(|_| async move {})
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error occur when handling update",
        ))
        .build()
        .dispatch()
        .await;
    Ok(())
}
