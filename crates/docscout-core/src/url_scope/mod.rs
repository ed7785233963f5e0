//! URL handling for the crawl: resolving hrefs, scoping hosts to the allow-list,
//! spotting download-shaped links and unwrapping search-engine redirect links.

mod download;
mod domain;
mod normalize;
mod unwrap;

pub use domain::DomainScope;
pub use download::DownloadHeuristic;
pub use normalize::normalize;
pub use unwrap::{unwrap_redirect, REDIRECT_PATH_PREFIX};
