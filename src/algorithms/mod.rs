pub mod collision;
pub mod forces;
pub mod integrator;
pub mod metrics;
pub mod trajectory;
pub mod vectors;
