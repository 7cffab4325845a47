pub mod resolvers;

pub use resolvers::{CompanyMutation, CompanyQuery};
