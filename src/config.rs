use crate::{catalog::Catalog, pager::DEFAULT_PAGE_SIZE, session::DEFAULT_MAX_SESSIONS};
use anyhow::Context;
use derive_builder::Builder;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Debug, Clone, Builder)]
pub struct Settings {
    #[builder(setter(into), default = "\"127.0.0.1:8080\".to_string()")]
    pub bind: String,
    #[builder(setter(into), default = "\"http://localhost:3000\".to_string()")]
    pub cors_origin: String,
    /// use the builtin menu when unset
    #[builder(setter(into, strip_option), default)]
    pub catalog: Option<PathBuf>,
    #[builder(default = "DEFAULT_PAGE_SIZE")]
    pub page_size: NonZeroUsize,
    /// live sessions kept before the least recently used is dropped
    #[builder(default = "DEFAULT_MAX_SESSIONS")]
    pub max_sessions: NonZeroUsize,
}

impl Settings {
    /// Read `BITES_*` variables, after loading `.env` when there is one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut builder = SettingsBuilder::default();
        if let Some(bind) = var("BITES_BIND") {
            builder.bind(bind);
        }
        if let Some(origin) = var("BITES_CORS_ORIGIN") {
            builder.cors_origin(origin);
        }
        if let Some(path) = var("BITES_CATALOG") {
            builder.catalog(path);
        }
        if let Some(size) = var("BITES_PAGE_SIZE") {
            let size = size
                .parse::<NonZeroUsize>()
                .with_context(|| format!("BITES_PAGE_SIZE must be a positive number, got {size:?}"))?;
            builder.page_size(size);
        }
        if let Some(max) = var("BITES_MAX_SESSIONS") {
            let max = max
                .parse::<NonZeroUsize>()
                .with_context(|| format!("BITES_MAX_SESSIONS must be a positive number, got {max:?}"))?;
            builder.max_sessions(max);
        }

        Ok(builder.build()?)
    }

    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}
