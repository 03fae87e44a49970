use anyhow::Result;
use navgate::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let action = start()?;

    // Handle the action
    match action {
        Action::Routes(args) => actions::routes::handle(&args)?,
        Action::Check(args) => actions::check::handle(&args).await?,
        Action::Resolve(args) => actions::resolve::handle(&args).await?,
    }

    Ok(())
}
