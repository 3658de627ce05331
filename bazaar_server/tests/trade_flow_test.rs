#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use bazaar_app::{
        app_bus::AppBus,
        command_handlers::{RegisterPlayerCommandHandler, TradeGoodsCommandHandler},
        config::Config,
        cqrs::{
            commands::{RegisterPlayer, TradeGoods},
            queries::{GetPlayerById, GetPlayerByName},
        },
        queries_handlers::{GetPlayerByIdHandler, GetPlayerByNameHandler},
        test_utils::tests::MockUnitOfWorkProvider,
    };
    use bazaar_types::{
        Result,
        common::Player,
        errors::{ApplicationError, DbError, MarketError},
    };

    fn setup_bus() -> AppBus {
        let config = Arc::new(Config::from_env());
        AppBus::new(config, Arc::new(MockUnitOfWorkProvider::new()))
    }

    async fn register(bus: &AppBus, name: &str, coins: i64, goods: i64) -> Result<Player> {
        bus.execute(
            RegisterPlayer {
                name: name.to_string(),
                coins,
                goods,
            },
            RegisterPlayerCommandHandler::new(),
        )
        .await?;

        bus.query(
            GetPlayerByName {
                name: name.to_string(),
            },
            GetPlayerByNameHandler::new(),
        )
        .await
    }

    async fn get(bus: &AppBus, name: &str) -> Result<Player> {
        bus.query(
            GetPlayerByName {
                name: name.to_string(),
            },
            GetPlayerByNameHandler::new(),
        )
        .await
    }

    #[tokio::test]
    async fn test_rejected_then_accepted_trade() -> Result<()> {
        let bus = setup_bus();

        let buyer = register(&bus, "buyer", 100, 0).await?;
        let seller = register(&bus, "seller", 0, 100).await?;

        // 10 goods for 500 coins: over the buyer's budget, rejected.
        let result = bus
            .execute(
                TradeGoods {
                    buyer_id: buyer.id,
                    seller_id: seller.id,
                    amount: 10,
                    price: 500,
                },
                TradeGoodsCommandHandler::new(),
            )
            .await;
        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Market(MarketError::InsufficientCoins { .. })
        ));

        let buyer_after = get(&bus, "buyer").await?;
        let seller_after = get(&bus, "seller").await?;
        assert_eq!((buyer_after.coins, buyer_after.goods), (100, 0));
        assert_eq!((seller_after.coins, seller_after.goods), (0, 100));

        // Same 10 goods for 100 coins: affordable, commits.
        bus.execute(
            TradeGoods {
                buyer_id: buyer.id,
                seller_id: seller.id,
                amount: 10,
                price: 100,
            },
            TradeGoodsCommandHandler::new(),
        )
        .await?;

        let buyer_after = get(&bus, "buyer").await?;
        let seller_after = get(&bus, "seller").await?;
        assert_eq!((buyer_after.coins, buyer_after.goods), (0, 10));
        assert_eq!((seller_after.coins, seller_after.goods), (100, 90));

        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_a_rejection() -> Result<()> {
        let bus = setup_bus();

        let result = bus
            .query(GetPlayerById { id: 42 }, GetPlayerByIdHandler::new())
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Db(DbError::PlayerNotFound(42))
        ));

        Ok(())
    }
}
