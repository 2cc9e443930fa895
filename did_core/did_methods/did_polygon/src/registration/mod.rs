pub mod options;
mod registrar;

pub use registrar::PolygonDidRegistrar;
