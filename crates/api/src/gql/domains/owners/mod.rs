pub mod resolvers;

pub use resolvers::{OwnerMutation, OwnerQuery};
