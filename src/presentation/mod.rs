// Presentation layer - Text rendering and the CLI
pub mod cli;
pub mod render;
