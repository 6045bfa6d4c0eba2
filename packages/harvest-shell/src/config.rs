use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Shell configuration, loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Public entry; anonymous users are redirected here
    pub auth_path: String,
    /// Protected entry; authenticated users are redirected here from the public entry
    pub protected_entry_path: String,
    /// Send users back to the page they asked for after signing in
    pub remember_destination: bool,
    /// Redirect hops followed per navigation before giving up
    pub max_redirects: usize,
    /// Navigation history entries kept
    pub history_limit: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            auth_path: "/auth".to_string(),
            protected_entry_path: "/dashboard".to_string(),
            remember_destination: false,
            max_redirects: 8,
            history_limit: 64,
        }
    }
}

impl ShellConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            auth_path: absolute_path(
                env::var("HARVEST_AUTH_PATH").unwrap_or(defaults.auth_path),
            ),
            protected_entry_path: absolute_path(
                env::var("HARVEST_ENTRY_PATH").unwrap_or(defaults.protected_entry_path),
            ),
            remember_destination: match env::var("HARVEST_REMEMBER_DESTINATION") {
                Ok(value) => parse_flag(&value)
                    .context("HARVEST_REMEMBER_DESTINATION must be true or false")?,
                Err(_) => defaults.remember_destination,
            },
            max_redirects: env::var("HARVEST_MAX_REDIRECTS")
                .unwrap_or_else(|_| defaults.max_redirects.to_string())
                .parse()
                .context("HARVEST_MAX_REDIRECTS must be a valid number")?,
            history_limit: env::var("HARVEST_HISTORY_LIMIT")
                .unwrap_or_else(|_| defaults.history_limit.to_string())
                .parse()
                .context("HARVEST_HISTORY_LIMIT must be a valid number")?,
        })
    }
}

fn absolute_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized flag value: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use crate::guard::RedirectTargets;
    use crate::routes::RouteTable;
    use crate::session::Phase;
    use crate::shell::check_targets;
    use std::sync::Mutex;

    // Environment variables are process-wide
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "HARVEST_AUTH_PATH",
        "HARVEST_ENTRY_PATH",
        "HARVEST_REMEMBER_DESTINATION",
        "HARVEST_MAX_REDIRECTS",
        "HARVEST_HISTORY_LIMIT",
    ];

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for var in VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = f();
        for var in VARS {
            env::remove_var(var);
        }
        result
    }

    #[test]
    fn test_from_env_defaults() {
        let config = with_env(&[], ShellConfig::from_env).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_from_env_overrides() {
        let config = with_env(
            &[
                ("HARVEST_AUTH_PATH", "sign-in"),
                ("HARVEST_ENTRY_PATH", " /home "),
                ("HARVEST_REMEMBER_DESTINATION", "yes"),
                ("HARVEST_MAX_REDIRECTS", "3"),
                ("HARVEST_HISTORY_LIMIT", "10"),
            ],
            ShellConfig::from_env,
        )
        .unwrap();

        assert_eq!(config.auth_path, "/sign-in");
        assert_eq!(config.protected_entry_path, "/home");
        assert!(config.remember_destination);
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.history_limit, 10);
    }

    #[test]
    fn test_from_env_malformed_number() {
        let err = with_env(&[("HARVEST_MAX_REDIRECTS", "many")], ShellConfig::from_env)
            .unwrap_err();
        assert_eq!(err.to_string(), "HARVEST_MAX_REDIRECTS must be a valid number");

        let err = with_env(&[("HARVEST_HISTORY_LIMIT", "-1")], ShellConfig::from_env)
            .unwrap_err();
        assert_eq!(err.to_string(), "HARVEST_HISTORY_LIMIT must be a valid number");
    }

    #[test]
    fn test_from_env_malformed_flag() {
        let err = with_env(
            &[("HARVEST_REMEMBER_DESTINATION", "sometimes")],
            ShellConfig::from_env,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HARVEST_REMEMBER_DESTINATION must be true or false"
        );
        assert!(format!("{:#}", err).contains("sometimes"));
    }

    #[test]
    fn test_default_targets_land_in_allowing_subtrees() {
        let targets = RedirectTargets::from_config(&ShellConfig::default());
        assert!(check_targets(&RouteTable::standard(), &targets).is_ok());
    }

    #[test]
    fn test_empty_auth_path_is_rejected() {
        let config = with_env(&[("HARVEST_AUTH_PATH", "")], ShellConfig::from_env).unwrap();
        assert_eq!(config.auth_path, "/");

        let targets = RedirectTargets::from_config(&config);
        let result = check_targets(&RouteTable::standard(), &targets);

        assert!(matches!(
            result,
            Err(ShellError::UnreachableTarget {
                phase: Phase::Anonymous,
                ..
            })
        ));
    }

    #[test]
    fn test_entry_path_inside_public_branch_is_rejected() {
        let config = ShellConfig {
            protected_entry_path: "/auth".to_string(),
            ..ShellConfig::default()
        };
        let targets = RedirectTargets::from_config(&config);

        assert!(matches!(
            check_targets(&RouteTable::standard(), &targets),
            Err(ShellError::UnreachableTarget {
                phase: Phase::Authenticated,
                ..
            })
        ));
    }

    #[test]
    fn test_defaults_match_fixed_targets() {
        let config = ShellConfig::default();
        assert_eq!(config.auth_path, "/auth");
        assert_eq!(config.protected_entry_path, "/dashboard");
        assert!(!config.remember_destination);
    }

    #[test]
    fn test_absolute_path() {
        assert_eq!(absolute_path("auth".to_string()), "/auth");
        assert_eq!(absolute_path(" /dashboard ".to_string()), "/dashboard");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("TRUE").unwrap());
        assert!(!parse_flag("off").unwrap());
        assert!(parse_flag("maybe").is_err());
    }
}
