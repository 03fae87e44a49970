use crate::{
    cli::commands::{ARG_BASE, ARG_ROUTES, ARG_SIGN_IN_PATH},
    navigation::{Navigator, NavigatorConfig},
    routes::RouteTable,
    session::SessionProvider,
};
use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tracing::{info, instrument};

/// Arguments shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub routes: Option<PathBuf>,
    pub config: NavigatorConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn parse(matches: &clap::ArgMatches) -> Self {
        let defaults = NavigatorConfig::default();
        Self {
            routes: matches.get_one::<PathBuf>(ARG_ROUTES).cloned(),
            config: NavigatorConfig {
                base_path: matches
                    .get_one::<String>(ARG_BASE)
                    .cloned()
                    .unwrap_or(defaults.base_path),
                sign_in_path: matches
                    .get_one::<String>(ARG_SIGN_IN_PATH)
                    .cloned()
                    .unwrap_or(defaults.sign_in_path),
            },
        }
    }

    /// Loads the route table from `--routes`, or the built-in table.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the table is invalid.
    #[instrument(skip(self))]
    pub fn load_table(&self) -> Result<RouteTable> {
        match &self.routes {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("failed to read route table {}", path.display()))?;
                let table = RouteTable::from_json(&json)
                    .with_context(|| format!("invalid route table {}", path.display()))?;
                info!(routes = table.len(), path = %path.display(), "loaded route table");
                Ok(table)
            }
            None => RouteTable::builtin().context("invalid built-in route table"),
        }
    }

    /// Builds a navigator over the configured table.
    ///
    /// # Errors
    /// Returns an error if the table or the guard configuration is invalid.
    pub fn navigator<P: SessionProvider>(&self, provider: P) -> Result<Navigator<P>> {
        let table = self.load_table()?;
        Navigator::new(table, provider, &self.config).context("invalid guard configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticSession;
    use std::io::Write;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::default();
        assert_eq!(args.routes, None);
        assert_eq!(args.config.base_path, "/");
        assert_eq!(args.config.sign_in_path, "/login");
        assert_eq!(args.load_table().unwrap().len(), 19);
    }

    #[test]
    fn test_load_table_from_file() {
        let path = std::env::temp_dir().join(format!(
            "navgate-routes-{}-{}.json",
            std::process::id(),
            line!()
        ));
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"path": "/", "name": "home", "component": "HomeView"}},
                {{"path": "/signin", "name": "SignIn", "component": "SignIn"}},
                {{"path": "/*rest", "name": "not-found", "component": "NotFoundView"}}
            ]"#
        )
        .unwrap();

        let mut args = GlobalArgs {
            routes: Some(path.clone()),
            ..GlobalArgs::default()
        };
        assert_eq!(args.load_table().unwrap().len(), 3);

        // The default sign-in path does not exist in this table.
        assert!(args.navigator(StaticSession::signed_out()).is_err());
        args.config.sign_in_path = "/signin".to_string();
        assert!(args.navigator(StaticSession::signed_out()).is_ok());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_table_missing_file() {
        let args = GlobalArgs {
            routes: Some(PathBuf::from("/nonexistent/navgate/routes.json")),
            ..GlobalArgs::default()
        };
        let err = args.load_table().unwrap_err();
        assert!(err.to_string().contains("failed to read route table"));
    }
}
