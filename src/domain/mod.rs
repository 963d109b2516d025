pub mod node;
pub mod edge;
pub mod edge_type;
pub mod error;
pub mod event;
pub mod ports;
pub mod type_registry;
pub mod interaction;
pub mod capability;
pub mod reverse;
