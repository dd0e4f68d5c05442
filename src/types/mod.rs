// src/types/mod.rs
//! Data exchanged between the optimization model, the renderer and the API

pub mod resume_data;
pub mod response;

pub use resume_data::{Education, Experience, OptimizationResult, PersonalInfo, ResumeData};
