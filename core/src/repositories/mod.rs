pub mod token;
pub mod user;
pub mod verification;

pub use token::RefreshTokenRepository;
pub use user::UserRepository;
pub use verification::VerificationCodeRepository;

#[cfg(test)]
pub use token::MockRefreshTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use verification::MockVerificationCodeRepository;
