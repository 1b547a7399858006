pub mod common;

pub use common::auth_config::{AuthConfig, BootstrapAdmin, get_auth_config, get_bootstrap_admin};
pub use common::cors::allowed_origins;
pub use common::db_env::{get_database_url, get_db_pool};
pub use common::health::health_check;
pub use common::hostname::{HostPortError, get_api_base_url};
pub use common::logging::setup_logging;
