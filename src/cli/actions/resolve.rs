use crate::{
    cli::globals::GlobalArgs,
    navigation::NavigationAttempt,
    session::{CurrentUser, StaticSession},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
    pub user: Option<String>,
    pub from: Option<String>,
}

impl Args {
    fn session(&self) -> StaticSession {
        match &self.user {
            Some(uid) => StaticSession::signed_in(CurrentUser::new(uid)),
            None => StaticSession::signed_out(),
        }
    }

    fn attempt(&self) -> NavigationAttempt {
        let attempt = NavigationAttempt::new(&self.path);
        match &self.from {
            Some(from) => attempt.from_path(from),
            None => attempt,
        }
    }
}

/// Handle the resolve action
///
/// # Errors
/// Returns an error if the navigator cannot be built or the outcome cannot be
/// serialized.
pub async fn handle(args: &Args) -> Result<()> {
    println!("{}", resolve(args).await?);

    Ok(())
}

async fn resolve(args: &Args) -> Result<String> {
    let navigator = args.globals.navigator(args.session())?;
    let resolution = navigator.navigate(&args.attempt()).await;

    Ok(serde_json::to_string_pretty(&resolution)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn args(path: &str, user: Option<&str>) -> Args {
        Args {
            globals: GlobalArgs::default(),
            path: path.to_string(),
            user: user.map(str::to_string),
            from: None,
        }
    }

    #[tokio::test]
    async fn signed_out_dashboard_redirects() {
        let output = resolve(&args("/dashboard", None)).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "Login");
        assert_eq!(value["path"], "/login");
        assert_eq!(value["redirectedFrom"], "/dashboard");
    }

    #[tokio::test]
    async fn signed_in_dashboard_renders() {
        let output = resolve(&args("/dashboard", Some("u-1"))).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "Dashboard");
        assert_eq!(value["requiresAuth"], true);
        assert!(value.get("redirectedFrom").is_none());
    }

    #[tokio::test]
    async fn relative_path_uses_from() {
        let mut args = args("pricing", None);
        args.from = Some("/login".to_string());
        let output = resolve(&args).await.unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["name"], "Pricing");
        assert_eq!(value["notFound"], false);
    }
}
