use std::sync::Arc;

use anyhow::Result;
use briefme_core::api::{ApiError, ApiGateway};
use briefme_core::config::ClientConfig;
use briefme_core::session::SessionStore;
use briefme_core::storage::{ClientStorage, read_token};
use briefme_infrastructure::{BriefMePaths, ConfigService, FileClientStorage, ReqwestApiGateway};

use crate::navigator::CliNavigator;

/// Everything a command needs, wired once per invocation.
pub struct AppContext {
    pub config: ClientConfig,
    pub storage: Arc<dyn ClientStorage>,
    pub gateway: Arc<dyn ApiGateway>,
    pub session: SessionStore,
    pub navigator: CliNavigator,
}

impl AppContext {
    pub async fn build(paths: BriefMePaths, current_path: String) -> Result<Self> {
        let config = ConfigService::new(paths.clone()).load()?;

        let storage: Arc<dyn ClientStorage> =
            Arc::new(FileClientStorage::new(paths.storage_file()?));

        let gateway: Arc<dyn ApiGateway> =
            Arc::new(ReqwestApiGateway::new(&config.api_base_url)?);
        let token = read_token(storage.as_ref()).await?;
        gateway.set_bearer_token(token.as_deref());

        let session = SessionStore::load(storage.clone())
            .await?
            .with_routes(config.login_path.clone(), config.public_paths.clone());

        Ok(Self {
            config,
            storage,
            gateway,
            session,
            navigator: CliNavigator::new(current_path),
        })
    }

    /// Applies the redirect-to-login rule when the server rejected the credential.
    pub async fn handle_unauthorized(&self, err: &ApiError) -> Result<()> {
        if err.status == Some(401) {
            self.session.goto_login(&self.navigator).await?;
        }
        Ok(())
    }
}
