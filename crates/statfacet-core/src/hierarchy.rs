pub mod builder;
pub mod disambiguate;
pub mod geojson;

pub use builder::build_options;
pub use geojson::GeoJsonIndex;
