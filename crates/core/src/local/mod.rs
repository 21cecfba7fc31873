//! Flat geometry within a small area of the surface, such as a settlement.
//! Distances are in meters. Each settlement has its own frame, and each object
//! placed in it (building, vehicle, etc.) has its own frame as well, relative
//! to the settlement's.
//!
//! Settlement maps are drawn with +y pointing north and +x pointing west.

pub mod bounds;
pub mod position;
pub mod transform;
