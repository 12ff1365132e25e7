pub mod app_closer;
pub mod auth_callback;
pub mod config_service;
pub mod http_gateway;
pub mod paths;
pub mod storage;

pub use app_closer::SystemAppCloser;
pub use auth_callback::parse_auth_callback;
pub use config_service::ConfigService;
pub use http_gateway::ReqwestApiGateway;
pub use paths::BriefMePaths;
pub use storage::FileClientStorage;
