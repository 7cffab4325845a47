use async_graphql::MergedObject;

use crate::gql::domains::companies::CompanyQuery;
use crate::gql::domains::owners::OwnerQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(CompanyQuery, OwnerQuery);
