pub mod form;
pub mod home;
