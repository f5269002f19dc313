pub mod assessment;
pub mod diagnostics;
pub mod feedback;
pub mod health;
pub mod ranking;
pub mod roadmap;
