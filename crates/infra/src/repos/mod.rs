pub mod companies;
pub mod owners;

pub use companies::{CreateCompanyData, UpdateCompanyData};
pub use owners::{CreateOwnerData, UpdateOwnerData};
