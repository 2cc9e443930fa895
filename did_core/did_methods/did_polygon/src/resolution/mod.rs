mod resolver;

pub use resolver::PolygonDidResolver;
