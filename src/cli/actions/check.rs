use crate::{cli::globals::GlobalArgs, navigation::NavigationAttempt, session::StaticSession};
use anyhow::{Result, bail};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Handle the check action
///
/// # Errors
/// Returns an error if the table or the guard configuration is invalid.
pub async fn handle(args: &Args) -> Result<()> {
    let navigator = args.globals.navigator(StaticSession::signed_out())?;
    let table = navigator.table();

    let sign_in_path = navigator.policy().sign_in_path().to_string();
    let sign_in = navigator
        .navigate(&NavigationAttempt::new(&navigator.href(&sign_in_path)))
        .await;
    if sign_in.is_redirect() || sign_in.not_found {
        bail!("sign-in path {sign_in_path} is not reachable while signed out");
    }

    let guarded = table.iter().filter(|r| r.meta().requires_auth).count();
    info!(routes = table.len(), guarded, "route table is valid");

    println!(
        "ok: {} routes, {guarded} require authentication, sign-in at {} ({}), fallback {}",
        table.len(),
        navigator.href(&sign_in_path),
        sign_in.name,
        table.fallback().name(),
    );

    Ok(())
}
