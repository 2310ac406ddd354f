pub mod app;
pub mod cli;
pub mod config;
pub mod duration;
pub mod llm;
pub mod models;
pub mod normalize;
pub mod paths;
pub mod pipeline;
pub mod prompt;
