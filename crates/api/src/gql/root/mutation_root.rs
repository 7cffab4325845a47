use async_graphql::MergedObject;

use crate::gql::domains::companies::CompanyMutation;
use crate::gql::domains::owners::OwnerMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(CompanyMutation, OwnerMutation);
