pub mod arrow;
pub mod compose;
pub mod curves;
pub mod partial;
pub mod shapes;
