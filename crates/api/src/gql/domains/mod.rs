// Each domain contains: mod.rs and resolvers.rs; shared object types live
// in crate::gql::types.

pub mod companies;
pub mod owners;
