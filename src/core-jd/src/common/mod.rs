pub mod auth_config;
pub mod cors;
pub mod db_env;
pub mod health;
pub mod hostname;
pub mod logging;
