//! Roster domain models.
//!
//! Provides the typed inputs to section scheduling: weekly time slots,
//! students, facilitators, and the facilitator slots they expand into.
//!
//! # Domain Mappings
//!
//! | section-csp | CSP role | Example |
//! |-------------|----------|---------|
//! | FacilitatorSlot | variable over TimeSlot | "Ada 1" meets "M 3:00-4:20 PM" |
//! | Student | variable over FacilitatorSlot ids | "Bo" joins "Ada 1" |
//! | TimeSlot | value | "Tu 4:30-5:50 PM" |

mod person;
mod roster;
mod time_slot;

pub use person::{Facilitator, FacilitatorSlot, Student};
pub use roster::{Role, Roster, RosterRecord};
pub use time_slot::{SlotKey, TimeSlot, Weekday};
