// Mock interview question generation from a job description and resume.

pub mod handlers;
pub mod prompts;
pub mod questions;
