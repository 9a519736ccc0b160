pub mod environments;
pub mod graph;
pub mod tags;
