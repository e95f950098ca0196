//! Clients for the gateway's external collaborators.

pub mod generation;
pub mod media;
