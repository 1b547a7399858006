use axum::http::HeaderValue;

/// Development origins the API trusts when CORS_ALLOWED_ORIGINS is unset:
/// the Vite dev server and a locally served production build.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Browser origins allowed to call the API. Reads the comma-separated
/// CORS_ALLOWED_ORIGINS env var, falling back to the development defaults.
/// Panics on an unparsable origin so a typo stops startup.
pub fn allowed_origins() -> Vec<HeaderValue> {
    match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(list) => list
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect(),
        Err(_) => DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(|origin| parse_origin(origin))
            .collect(),
    }
}

fn parse_origin(origin: &str) -> HeaderValue {
    origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| panic!("Invalid CORS origin: {origin}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Use a mutex to ensure tests that modify env vars run serially
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn development_defaults() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("CORS_ALLOWED_ORIGINS");
        }
        let origins = allowed_origins();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], HeaderValue::from_static("http://localhost:5173"));
    }

    #[test]
    fn env_list_is_split_and_trimmed() {
        let _guard = TEST_MUTEX.lock().unwrap();
        unsafe {
            env::set_var(
                "CORS_ALLOWED_ORIGINS",
                "https://jobs.example.com , https://admin.example.com",
            );
        }
        let origins = allowed_origins();
        assert_eq!(origins.len(), 2);
        assert_eq!(
            origins[1],
            HeaderValue::from_static("https://admin.example.com")
        );
        unsafe {
            env::remove_var("CORS_ALLOWED_ORIGINS");
        }
    }
}
