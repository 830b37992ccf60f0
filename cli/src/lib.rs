//! Host side of purl: the ureq transport and the terminal presenter that
//! plug into `purl_core`.

pub mod render;
pub mod transport;

pub use render::TerminalPresenter;
pub use transport::UreqTransport;
