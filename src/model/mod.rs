pub mod job;
pub mod verdict;
