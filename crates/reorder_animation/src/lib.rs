//! Reorder Animation
//!
//! Spring physics and poll-driven animated values used by the drag-to-reorder
//! engine to settle released rows.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Damping Ratios**: Build critically damped springs from a stiffness level
//! - **Poll-driven values**: [`Animatable`] is ticked by whatever frame source
//!   the host environment provides

pub mod animatable;
pub mod spring;

pub use animatable::Animatable;
pub use spring::{Spring, SpringConfig, DEFAULT_REST_THRESHOLD};
