//! Domain models

mod contact;

pub use contact::{Contact, ContactResponse, NewContact};
