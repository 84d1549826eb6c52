use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level.
const TARGETS: [&str; 3] = ["radiostation", "tower_http", "sea_orm"];

/// `RUST_LOG` wins over the configured level when set.
pub fn set(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(directives(level))))
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();
}

fn directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives() {
        assert_eq!(
            "radiostation=warn,tower_http=warn,sea_orm=warn",
            directives("warn")
        );
        assert!(EnvFilter::try_new(directives("debug")).is_ok());
    }
}
