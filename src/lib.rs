//! Clinical Analyst - multimodal clinical case analysis CLI
//!
//! This crate assembles a clinician's case notes, clinical images, documents
//! and an optional audio clip into one request for a Google Gemini model, and
//! renders the returned analysis in the terminal.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini, filesystem, settings, telemetry)
//! - **CLI**: Command-line interface, argument parsing, and output rendering

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
