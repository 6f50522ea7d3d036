//! Landmark placement and the roads joining them

pub mod landmarks;
pub mod roads;

pub use landmarks::{
    annulus, find_docks_site, find_temple_site, place_town_square, temple_candidates,
};
pub use roads::{RoadPathfinder, connect_docks, connect_temple};
