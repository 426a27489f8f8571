//! egui surface over the dashboard state. Nothing outside this module
//! depends on egui.

pub mod panels;
pub mod plot;
pub mod table;
