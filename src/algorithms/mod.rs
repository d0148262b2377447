pub mod geometry;

pub use geometry::{
    bearing_in_sector, build_geometry, haversine_nm, initial_bearing, midpoint,
    perpendicular_bearing,
};
