use std::net::SocketAddr;
use std::num::ParseIntError;

/// Gets the bind address from the env vars HOST and PORT.
/// Uses the default `127.0.0.1:8080` where they are unset.
pub fn get_api_base_url() -> Result<SocketAddr, HostPortError> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = match std::env::var("PORT") {
        Ok(p) => p.parse::<u16>()?,
        Err(_) => 8080,
    };
    let address = format!("{host}:{port}").parse::<SocketAddr>()?;
    Ok(address)
}

#[derive(Debug, thiserror::Error)]
pub enum HostPortError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] std::net::AddrParseError),
}
