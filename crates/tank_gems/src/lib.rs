mod error;
mod geometry;
mod newton_root_solver;
mod quadrature;
mod tank;
mod units;

pub use error::*;
pub use geometry::*;
pub use newton_root_solver::*;
pub use quadrature::*;
pub use tank::*;
pub use units::*;
