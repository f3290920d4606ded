//! # Domain Entities
//!
//! The three registry record types and their lifecycle state machines.

mod deed;
mod mortgage;
mod title;

pub use deed::{Deed, DeedType};
pub use mortgage::{Mortgage, MortgageState};
pub use title::{LandTitle, TitleState};
