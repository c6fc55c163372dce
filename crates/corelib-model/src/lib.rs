//! Wire types shared by corelib services

#![allow(clippy::must_use_candidate)]

pub mod onboarding;
mod response;

pub use onboarding::{ClientContactDto, ClientDto, CountryDto};
pub use response::{ResponseStatus, SuccessResponse};
