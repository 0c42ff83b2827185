//! Server-rendered HTML fragments for the profile pages.

pub mod footer;
mod html;
pub mod plans;

pub use footer::{FooterLink, ProfileFooter};
pub use plans::{Navigator, PlanSummary, PlansAction, PlansPage};
