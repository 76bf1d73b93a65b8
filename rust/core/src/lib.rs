// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # StairScan Core
//!
//! Boundary-representation model types for stair analysis, expressed as a
//! hierarchy of solids → faces → loops → line segments, plus the JSON loader
//! that produces them.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stairscan_core::parse_models;
//!
//! let models = parse_models(&json)?;
//! for (id, lp) in models[0].loops() {
//!     println!("loop {} has {} segments", id, lp.len());
//! }
//! ```
//!
//! Loops are always enumerated solid → face → loop in source order; callers
//! that group or deduplicate geometry depend on that order.

pub mod bounds;
pub mod error;
pub mod loader;
pub mod model;

pub use bounds::BoundingBox;
pub use error::{Error, Result};
pub use loader::{load_models, parse_model, parse_models};
pub use model::{Face, Loop, LoopId, Point, Segment, Solid, StairModel};
