//! Build time configuration.

macro_rules! env_or {
    ($name:literal, $default:literal) => {
        match option_env!($name) {
            Some(value) => value,
            None => $default,
        }
    };
}

/// Base URL of the VisaMaster API.
pub const API_URL: &str = env_or!("VISAMASTER_API_URL", "https://visa-master-server.vercel.app");

pub const IDENTITY_URL: &str = env_or!(
    "VISAMASTER_IDENTITY_URL",
    "https://identitytoolkit.googleapis.com/v1"
);

pub const TOKEN_URL: &str = env_or!("VISAMASTER_TOKEN_URL", "https://securetoken.googleapis.com/v1");

/// Web API key of the identity provider project.
pub const IDENTITY_API_KEY: &str = env_or!("VISAMASTER_IDENTITY_API_KEY", "");
