pub mod appointment;
pub mod list_query;
