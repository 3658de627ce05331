use std::sync::Arc;

use bazaar_types::{
    Result,
    common::NewPlayer,
    errors::{AppError, ApplicationError},
};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::SeedPlayers},
    uow::UnitOfWork,
};

/// Bulk-inserts demo players, chunking the set into fixed-size batches so a
/// large seed doesn't turn into one oversized statement.
pub struct SeedPlayersCommandHandler {}

impl SeedPlayersCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<SeedPlayers> for SeedPlayersCommandHandler {
    async fn handle(
        &self,
        command: SeedPlayers,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        if command.batch_size == 0 {
            return Err(ApplicationError::App(AppError::InvalidBatchSize));
        }

        let players: Vec<NewPlayer> = (0..command.count)
            .map(|i| {
                NewPlayer::new(
                    format!("{}_{}", command.prefix, i),
                    command.coins,
                    command.goods,
                )
            })
            .collect();

        let repo = uow.players();
        for batch in players.chunks(command.batch_size) {
            let inserted = repo.create_batch(batch).await?;
            tracing::debug!(inserted, "seeded player batch");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cqrs::CommandHandler,
        test_utils::tests::{MockPlayerRepository, MockUnitOfWork},
        uow::UnitOfWork,
    };

    fn seed_command(count: u32, batch_size: usize) -> SeedPlayers {
        SeedPlayers {
            prefix: "player".to_string(),
            count,
            coins: 10_000,
            goods: 100,
            batch_size,
        }
    }

    #[tokio::test]
    async fn test_seed_inserts_all_players_in_batches() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let players = Arc::new(MockPlayerRepository::new());
        let uow: Box<dyn UnitOfWork<'static> + 'static> =
            Box::new(MockUnitOfWork::with_players(players.clone()));

        let handler = SeedPlayersCommandHandler::new();
        handler.handle(seed_command(200, 50), &uow, &config).await?;

        assert_eq!(uow.players().count().await?, 200);
        assert_eq!(players.batch_sizes(), vec![50, 50, 50, 50]);

        let first = uow.players().list_by_id_asc(3).await?;
        let names: Vec<&str> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["player_0", "player_1", "player_2"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_last_batch_may_be_short() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let players = Arc::new(MockPlayerRepository::new());
        let uow: Box<dyn UnitOfWork<'static> + 'static> =
            Box::new(MockUnitOfWork::with_players(players.clone()));

        let handler = SeedPlayersCommandHandler::new();
        handler.handle(seed_command(7, 3), &uow, &config).await?;

        assert_eq!(uow.players().count().await?, 7);
        assert_eq!(players.batch_sizes(), vec![3, 3, 1]);

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_zero_batch_size_rejected() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(MockUnitOfWork::new());

        let handler = SeedPlayersCommandHandler::new();
        let result = handler.handle(seed_command(10, 0), &uow, &config).await;

        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::App(AppError::InvalidBatchSize)
        ));
        assert_eq!(uow.players().count().await?, 0);

        Ok(())
    }
}
