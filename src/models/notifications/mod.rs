pub mod entities;
pub mod events;
pub mod requests;
pub mod responses;
