pub mod career;
pub mod forum;
pub mod job;
