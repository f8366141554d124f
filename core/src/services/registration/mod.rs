//! Registration of a new user after email verification

mod service;


pub use service::RegistrationService;
