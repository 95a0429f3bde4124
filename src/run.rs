mod cli;
mod fmt;

pub(crate) use cli::{as_cli, print_usage};
