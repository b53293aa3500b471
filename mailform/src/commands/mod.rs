pub mod form;
pub mod send;
