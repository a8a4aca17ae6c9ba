//! Test support

mod db;
mod remote;

pub(crate) use db::TestDb;
pub(crate) use remote::InMemoryRemoteCarts;
