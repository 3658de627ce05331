use async_trait::async_trait;
use std::sync::Arc;

use bazaar_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::CountPlayers},
    uow::UnitOfWork,
};

pub struct CountPlayersHandler {}

impl CountPlayersHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<CountPlayers> for CountPlayersHandler {
    async fn handle(
        &self,
        _query: CountPlayers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<CountPlayers as Query>::Output, ApplicationError> {
        let repo = uow.players();
        repo.count().await
    }
}
