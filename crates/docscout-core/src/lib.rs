pub mod config;
pub mod logging;

pub mod crawl;
pub mod fetch;
pub mod links;
pub mod pipeline;
pub mod report;
pub mod search;
pub mod url_scope;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;
