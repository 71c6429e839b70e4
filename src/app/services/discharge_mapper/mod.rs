//! Mapping of gaugings to discharge activities
//!
//! A [`DischargeActivityMapper`] turns one assembled [`GaugingSummaryItem`]
//! into the host's [`DischargeActivity`]: local logger times become
//! offset-aware times using the location's UTC offset, the logger's
//! calculation method becomes a host monitoring method code, and the panels
//! become verticals of a single point-velocity sub-activity.
//!
//! [`GaugingSummaryItem`]: crate::app::models::GaugingSummaryItem
//! [`DischargeActivity`]: crate::app::models::DischargeActivity

pub mod mapper;
pub mod timing;

#[cfg(test)]
pub mod tests;

pub use mapper::DischargeActivityMapper;
pub use timing::{localize, midpoint};
