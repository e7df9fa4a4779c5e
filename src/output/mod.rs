//! Output module for light curves
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs          ← Exporter trait, ExportError, default path
//!     └── table.rs        ← Plain-text light-curve table
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use transit_rs::output::{export_light_curve, TableConfig};
//!
//! export_light_curve(&curve, "wasp49b_lightcurve.txt", Some(&TableConfig::default()))?;
//! ```

pub mod export;

pub use export::{
    default_output_path, export_light_curve, write_light_curve, ExportError, Exporter, TableConfig, TableExporter,
    TableMetadata,
};
