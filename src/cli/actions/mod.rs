pub mod check;
pub mod resolve;
pub mod routes;

#[derive(Debug)]
pub enum Action {
    Routes(routes::Args),
    Check(check::Args),
    Resolve(resolve::Args),
}
