use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetPlayerByName},
    uow::UnitOfWork,
};

pub struct GetPlayerByNameHandler {}

impl GetPlayerByNameHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPlayerByName> for GetPlayerByNameHandler {
    async fn handle(
        &self,
        query: GetPlayerByName,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetPlayerByName as Query>::Output, ApplicationError> {
        let repo = uow.players();
        repo.get_by_name(&query.name).await
    }
}
