//! Travelling salesman circuits: exhaustive search for small graphs and a
//! polynomial heuristic for the rest

mod approx;
mod closure;
mod exact;
mod solution;
mod two_opt;

pub use approx::{ApproxOptions, solve_tsp_approx, solve_tsp_approx_with};
pub use exact::solve_tsp_exact;
pub use solution::{ApproxMethod, ApproxTour, TspSolution};
