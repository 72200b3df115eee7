use std::{path::PathBuf, sync::Arc};

use clap::Args;
use esfiharia::{
    api::{ApiContext, FixtureMenuService, MenuService},
    catalog::fixtures::MenuFixture,
    config::ApiConfig,
};

/// Where menu data comes from.
#[derive(Debug, Args)]
pub(crate) struct MenuSourceArgs {
    /// Read the menu from a YAML fixture instead of the backend
    #[arg(long, value_name = "PATH")]
    fixture: Option<PathBuf>,

    /// Use the bundled menu instead of the backend
    #[arg(long, conflicts_with = "fixture")]
    offline: bool,
}

impl MenuSourceArgs {
    pub(crate) fn service(&self, api: &ApiConfig) -> Result<Arc<dyn MenuService>, String> {
        if let Some(path) = &self.fixture {
            let items = MenuFixture::load(path)
                .map_err(|error| format!("failed to load {}: {error}", path.display()))?;

            return Ok(Arc::new(FixtureMenuService::new(items)));
        }

        if self.offline {
            let service = FixtureMenuService::bundled()
                .map_err(|error| format!("failed to load bundled menu: {error}"))?;

            return Ok(Arc::new(service));
        }

        Ok(context(api)?.menu)
    }
}

pub(crate) fn context(api: &ApiConfig) -> Result<ApiContext, String> {
    ApiContext::from_config(api).map_err(|error| format!("failed to create api client: {error}"))
}
