pub mod audit;
pub mod component;
pub mod decision;
pub mod dispatch;
pub mod model;
pub mod predict;
pub mod project;
pub mod score;
pub mod seed;
pub mod shared;
pub mod train;
pub mod zone;
