pub mod crud;
pub mod helpers;
pub mod list;

pub use crud::{create, delete, edit_form, update, CsrfOnly};
pub use list::{home, show};
