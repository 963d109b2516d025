pub mod cache;
pub mod events;
pub mod memory;
pub mod site;
