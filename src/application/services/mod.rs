pub mod gallery;
pub mod layout_engine;
pub mod resolver;
