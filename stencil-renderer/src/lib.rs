//! # stencil-renderer
//!
//! Tera-based renderer that turns an environment [`Config`] into the fixed
//! set of Kubernetes and Argo CD manifests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use stencil_core::{config, Environment};
//! use stencil_renderer::pipeline;
//!
//! fn render_dev() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = config::load_for(Path::new("config"), Environment::Dev)?;
//!     let files = pipeline::render_all(
//!         &config,
//!         Path::new("templates"),
//!         Path::new("rendered/dev"),
//!         false,
//!         |file| println!("{}", file.path.display()),
//!     )?;
//!     assert_eq!(files.len(), 5);
//!     Ok(())
//! }
//! ```
//!
//! [`Config`]: stencil_core::Config

pub mod context;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod templates;
pub mod writer;

pub use engine::TemplateEngine;
pub use error::RenderError;
pub use pipeline::RenderedFile;
pub use templates::{Family, TemplateRef};
pub use writer::WriteResult;
