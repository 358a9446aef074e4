pub mod assessment;
pub mod campaign;
pub mod cv;
