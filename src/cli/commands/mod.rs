use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

pub mod logging;

pub const ARG_ROUTES: &str = "routes";
pub const ARG_BASE: &str = "base";
pub const ARG_SIGN_IN_PATH: &str = "sign-in-path";

pub const CMD_ROUTES: &str = "routes";
pub const CMD_CHECK: &str = "check";
pub const CMD_RESOLVE: &str = "resolve";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("navgate")
        .about("Route table and authentication guard for single-page front ends")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_ROUTES)
                .short('r')
                .long("routes")
                .help("JSON route table, defaults to the built-in table")
                .env("NAVGATE_ROUTES")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_BASE)
                .long("base")
                .help("Base path the application is served under")
                .default_value("/")
                .env("NAVGATE_BASE_PATH")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SIGN_IN_PATH)
                .long("sign-in-path")
                .help("Where unauthenticated navigations to guarded routes are sent")
                .default_value("/login")
                .env("NAVGATE_SIGN_IN_PATH")
                .global(true),
        )
        .subcommand(
            Command::new(CMD_ROUTES).about("List the route table").arg(
                Arg::new("json")
                    .long("json")
                    .help("Print the route declarations as JSON")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(
            Command::new(CMD_CHECK).about("Validate the route table and guard configuration"),
        )
        .subcommand(
            Command::new(CMD_RESOLVE)
                .about("Resolve a navigation and print the outcome as JSON")
                .arg(Arg::new("path").help("Target path").required(true))
                .arg(
                    Arg::new("user")
                        .short('u')
                        .long("user")
                        .help("Resolve as this signed-in user id, signed out when omitted"),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Path the navigation starts from"),
                ),
        );

    logging::with_args(command)
}
