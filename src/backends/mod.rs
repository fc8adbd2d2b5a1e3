// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Leaf processor backends.
//!
//! Composites are generic over the item type; leaves are not. A backend
//! provides leaves for one item type together with a factory that builds them
//! from the `name` and `cfg` of a `processor` node in a pipeline descriptor.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process text processors over [`TextItem`](crate::item::TextItem):
//! - **Text Transformation**: case conversion, reversal, prefix/suffix addition
//! - **Text Analysis**: token counting, word splitting
//! - **Plumbing**: passthrough
//!
//! ## Stub Backend (Test-Only)
//! Integer leaves used to exercise the composites (only available in test builds):
//! pass-through, add-one, recording, delaying and stuck processors.
//!
//! # Examples
//!
//! ```rust
//! use the_conduit::backends::local::LocalProcessorFactory;
//! use the_conduit::traits::{Processor, ProcessorConfig};
//!
//! let mut cfg = ProcessorConfig::new();
//! cfg.insert("impl".to_string(), serde_json::json!("change_text_case"));
//! cfg.insert("case".to_string(), serde_json::json!("upper"));
//!
//! let processor = LocalProcessorFactory::create_processor("shout", &cfg)?;
//! assert_eq!(processor.name(), "shout");
//! # Ok::<(), String>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
