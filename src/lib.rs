// Headless view models for the analytics asset dashboard
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
