//! Version information for servicify

/// Crate version, e.g. "0.4.2"
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Version plus git hash and build date when CI provides them
pub fn get_version_long() -> String {
    let git_hash = option_env!("SERVICIFY_GIT_HASH").unwrap_or("unknown");
    let build_date = option_env!("SERVICIFY_BUILD_DATE").unwrap_or("unknown");
    format!("{} (git: {git_hash}, built: {build_date})", get_version())
}
