//! Physical description of a heat-conduction problem
//!
//! This module holds everything the solvers need to know about the physics,
//! independently of how the equation is discretized:
//!
//! - **Material**: conductivity, density, specific heat and the derived
//!   diffusivity α = λ/(ρc)
//! - **Source term**: heat injected at every step
//! - **Temperature field**: read-only snapshot of the solution
//!
//! # Architecture
//!
//! Physics is **separate from numerics**:
//! - This module says WHAT is being heated (material, sources)
//! - [`crate::solver`] says HOW the heat equation is advanced in time
//!
//! # Example
//!
//! ```rust
//! use heat_rs::physics::{Material, SourceTerm};
//!
//! let glass = Material::glass();
//! let source = SourceTerm::Bands { amplitude: 80.0 };
//!
//! // 1001 nodes on a 1 m bar, 16 s horizon
//! let rates = source.sample_line(&glass, 1.0, 16.0, 1001).unwrap();
//! assert_eq!(rates.len(), 1001);
//! ```

pub mod field;
pub mod material;
pub mod source;
pub mod units;

pub use field::TemperatureField;
pub use material::Material;
pub use source::SourceTerm;
pub use units::{celsius_to_kelvin, kelvin_to_celsius, KELVIN_OFFSET};
