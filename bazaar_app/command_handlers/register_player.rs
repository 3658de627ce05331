use std::sync::Arc;

use bazaar_types::{Result, common::NewPlayer};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::RegisterPlayer},
    uow::UnitOfWork,
};

pub struct RegisterPlayerCommandHandler {}

impl RegisterPlayerCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RegisterPlayer> for RegisterPlayerCommandHandler {
    async fn handle(
        &self,
        command: RegisterPlayer,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        let player = uow
            .players()
            .create(&NewPlayer::new(command.name, command.coins, command.goods))
            .await?;

        tracing::debug!(player_id = player.id, name = %player.name, "player registered");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cqrs::CommandHandler, test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    #[tokio::test]
    async fn test_register_and_read_back_by_name() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(MockUnitOfWork::new());

        let handler = RegisterPlayerCommandHandler::new();
        let command = RegisterPlayer {
            name: "test".to_string(),
            coins: 1,
            goods: 1,
        };

        handler.handle(command, &uow, &config).await?;

        // The row read back by name carries the same field values.
        let player = uow.players().get_by_name("test").await?;
        assert!(player.id > 0);
        assert_eq!(player.name, "test");
        assert_eq!(player.coins, 1);
        assert_eq!(player.goods, 1);

        Ok(())
    }
}
