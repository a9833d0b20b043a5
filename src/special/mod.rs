//! Special functions used by the diffraction models.
//!
//! Currently the Fresnel integrals C(x), S(x), which underlie the
//! Sommerfeld/Penney-Price diffraction factor for a semi-infinite barrier.

pub mod fresnel;

pub use fresnel::{fresnel, FresnelPair};
