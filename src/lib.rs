//! content-interactions library: typed social interactions over a shared typed-edge graph.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
