/// Get the version string for dockup and libdockup
pub fn get_version_string() -> String {
    format!(
        "dockup {}\nlibdockup {}",
        env!("CARGO_PKG_VERSION"),
        libdockup::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
