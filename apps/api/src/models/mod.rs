pub mod faculty;
pub mod letter;
pub mod student;
pub mod workflow;
