//! Maps validated CLI matches to an [`Action`].

use crate::cli::{
    actions::{Action, check, resolve, routes},
    commands::{CMD_CHECK, CMD_RESOLVE, CMD_ROUTES},
    globals::GlobalArgs,
};
use anyhow::{Context, Result, bail};

/// # Errors
/// Returns an error if the subcommand or a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let Some((name, sub)) = matches.subcommand() else {
        bail!("missing subcommand");
    };

    // Global arguments are propagated into the subcommand matches.
    let globals = GlobalArgs::parse(sub);

    match name {
        CMD_ROUTES => Ok(Action::Routes(routes::Args {
            globals,
            json: sub.get_flag("json"),
        })),
        CMD_CHECK => Ok(Action::Check(check::Args { globals })),
        CMD_RESOLVE => Ok(Action::Resolve(resolve::Args {
            globals,
            path: sub
                .get_one::<String>("path")
                .cloned()
                .context("missing required argument: <path>")?,
            user: sub.get_one::<String>("user").cloned(),
            from: sub.get_one::<String>("from").cloned(),
        })),
        other => bail!("unknown subcommand: {other}"),
    }
}
