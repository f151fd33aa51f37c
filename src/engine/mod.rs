// Presentation logic layered on top of the store

pub mod route_planner;
