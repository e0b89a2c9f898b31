//! Docker scaffolding for Laravel projects
//!
//! Copies Docker Compose stacks, Dockerfiles and env examples from a template
//! tree into a project, choosing compose variants by preset and database
//! flavor.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod copier;
pub mod database;
pub mod error;
pub mod fs;
pub mod observability;
pub mod preset;
pub mod report;
pub mod scaffold;
pub mod template_tree;

pub use copier::{CopyAction, CopyOutcome, CopySpec, FileCopier, Summary};
pub use database::DbFlavor;
pub use error::{DockerizeError, Result};
pub use fs::{Filesystem, LocalFs, MemoryFs};
pub use preset::{Preset, Selection};
pub use report::{ConsoleReporter, RecordingReporter, Reporter};
pub use scaffold::{Mode, Options};
pub use template_tree::TemplateTree;
