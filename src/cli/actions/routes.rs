use crate::{cli::globals::GlobalArgs, routes::RouteTable};
use anyhow::Result;
use std::fmt::Write;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub json: bool,
}

/// Handle the routes action
///
/// # Errors
/// Returns an error if the route table cannot be loaded.
pub fn handle(args: &Args) -> Result<()> {
    let table = args.globals.load_table()?;
    let output = if args.json {
        table.to_json()?
    } else {
        render(&table)
    };

    println!("{output}");

    Ok(())
}

/// One line per route, in declaration order.
#[must_use]
pub fn render(table: &RouteTable) -> String {
    let path_width = table.iter().map(|r| r.path().len()).max().unwrap_or(0);
    let name_width = table.iter().map(|r| r.name().len()).max().unwrap_or(0);

    let mut output = String::new();
    for record in table.iter() {
        let auth = if record.meta().requires_auth {
            "auth"
        } else {
            "-"
        };
        let _ = writeln!(
            output,
            "{:<path_width$}  {:<name_width$}  {:<4}  {}",
            record.path(),
            record.name(),
            auth,
            record.component(),
        );
    }

    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteDescriptor;

    #[test]
    fn test_render() {
        let table = RouteTable::new(vec![
            RouteDescriptor::new("/", "home", "HomeView"),
            RouteDescriptor::new("/settings", "Settings", "Settings").requires_auth(),
            RouteDescriptor::new("/*rest", "not-found", "NotFoundView"),
        ])
        .unwrap();

        let output = render(&table);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "/          home       -     HomeView");
        assert_eq!(lines[1], "/settings  Settings   auth  Settings");
        assert_eq!(lines[2], "/*rest     not-found  -     NotFoundView");
    }

    #[test]
    fn test_render_builtin() {
        let table = RouteTable::builtin().unwrap();
        let output = render(&table);
        assert_eq!(output.lines().count(), table.len());
        assert!(output.lines().any(|line| line.starts_with("/dashboard ") && line.contains(" auth ")));
    }
}
