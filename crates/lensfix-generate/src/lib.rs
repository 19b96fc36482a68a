//! Fixture generation for lensfix.
//!
//! Runs chart configurations through a [`ConfigBuilder`] backed by the mock
//! catalog and persists the results as versioned JSON fixtures. Examples are
//! registered explicitly in an [`ExampleRegistry`] and executed in name order
//! by the [`BatchOrchestrator`].

pub mod builder;
pub mod dual;
pub mod errors;
pub mod gallery;
pub mod orchestrator;
pub mod output;
pub mod registry;
pub mod writer;

pub use builder::{BuildError, ConfigBuilder, LensAttributesBuilder};
pub use dual::DualFixture;
pub use errors::FixtureError;
pub use orchestrator::{BatchOrchestrator, BatchSummary, ExampleFailure, format_display_name};
pub use output::{DEFAULT_OUTPUT_ROOT, OutputLayout, VERSION_TAG_ENV, validate_output_filename};
pub use registry::{ENTRY_POINT_PREFIX, ExampleGenerator, ExampleRegistry};
pub use writer::FixtureWriter;
