#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use bazaar_app::{
        app_bus::AppBus,
        command_handlers::SeedPlayersCommandHandler,
        config::Config,
        cqrs::{
            commands::SeedPlayers,
            queries::{CountPlayers, ListPlayers},
        },
        queries_handlers::{CountPlayersHandler, ListPlayersHandler},
        test_utils::tests::MockUnitOfWorkProvider,
    };
    use bazaar_types::Result;

    fn setup_bus() -> AppBus {
        let config = Arc::new(Config::from_env());
        AppBus::new(config, Arc::new(MockUnitOfWorkProvider::new()))
    }

    #[tokio::test]
    async fn test_seed_count_and_list() -> Result<()> {
        let bus = setup_bus();

        bus.execute(
            SeedPlayers {
                prefix: "player".to_string(),
                count: 200,
                coins: 10_000,
                goods: 100,
                batch_size: 50,
            },
            SeedPlayersCommandHandler::new(),
        )
        .await?;

        let count = bus.query(CountPlayers {}, CountPlayersHandler::new()).await?;
        assert_eq!(count, 200);

        let three_players = bus
            .query(ListPlayers { limit: 3 }, ListPlayersHandler::new())
            .await?;
        assert_eq!(three_players.len(), 3);
        assert_eq!(three_players[0].name, "player_0");
        assert!(three_players.iter().all(|p| p.coins == 10_000 && p.goods == 100));

        Ok(())
    }
}
