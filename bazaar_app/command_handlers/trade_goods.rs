use std::sync::Arc;

use bazaar_types::{
    Result,
    errors::{ApplicationError, MarketError},
};

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::TradeGoods},
    uow::UnitOfWork,
};

/// Executes a two-party exchange of goods for coins.
///
/// Both rows are read with an exclusive row lock (`SELECT ... FOR UPDATE`)
/// inside the surrounding transaction, buyer first and then seller. Every
/// invocation takes the locks in that same order, so trades over overlapping
/// players serialize on the shared row instead of deadlocking, and neither
/// side can act on stale balances. Trades over disjoint player pairs don't
/// contend at all. Requires at least read-committed isolation with row
/// locking from the storage engine.
pub struct TradeGoodsCommandHandler {}

impl Default for TradeGoodsCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeGoodsCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<TradeGoods> for TradeGoodsCommandHandler {
    async fn handle(
        &self,
        command: TradeGoods,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<()> {
        if command.amount <= 0 || command.price <= 0 {
            return Err(ApplicationError::Market(MarketError::NonPositiveTrade));
        }

        // A player cannot trade with themselves.
        if command.buyer_id == command.seller_id {
            return Err(ApplicationError::Market(MarketError::SelfTrade));
        }

        let repo = uow.players();

        // Lock order is buyer-then-seller, always.
        let buyer = repo.get_by_id_for_update(command.buyer_id).await?;
        if buyer.coins < command.price {
            return Err(ApplicationError::Market(MarketError::InsufficientCoins {
                buyer_id: buyer.id,
                coins: buyer.coins,
                price: command.price,
            }));
        }

        let seller = repo.get_by_id_for_update(command.seller_id).await?;
        if seller.goods < command.amount {
            return Err(ApplicationError::Market(MarketError::InsufficientGoods {
                seller_id: seller.id,
                goods: seller.goods,
                amount: command.amount,
            }));
        }

        // Both checks passed under lock; apply the exchange.
        repo.adjust_balances(command.buyer_id, -command.price, command.amount)
            .await?;
        repo.adjust_balances(command.seller_id, command.price, -command.amount)
            .await?;

        tracing::info!(
            buyer_id = command.buyer_id,
            seller_id = command.seller_id,
            amount = command.amount,
            price = command.price,
            "trade completed"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bazaar_types::{common::NewPlayer, errors::DbError};

    use super::*;
    use crate::{cqrs::CommandHandler, test_utils::tests::MockUnitOfWork, uow::UnitOfWork};

    async fn setup_traders(
        buyer: (i64, i64),
        seller: (i64, i64),
    ) -> Result<(Box<dyn UnitOfWork<'static> + 'static>, i64, i64)> {
        let uow: Box<dyn UnitOfWork<'static> + 'static> = Box::new(MockUnitOfWork::new());
        let repo = uow.players();

        let buyer = repo.create(&NewPlayer::new("buyer", buyer.0, buyer.1)).await?;
        let seller = repo
            .create(&NewPlayer::new("seller", seller.0, seller.1))
            .await?;

        Ok((uow, buyer.id, seller.id))
    }

    #[tokio::test]
    async fn test_trade_success() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, buyer_id, seller_id) = setup_traders((100, 0), (0, 100)).await?;

        let handler = TradeGoodsCommandHandler::new();
        let command = TradeGoods {
            buyer_id,
            seller_id,
            amount: 10,
            price: 100,
        };

        handler.handle(command, &uow, &config).await?;

        let buyer = uow.players().get_by_id(buyer_id).await?;
        let seller = uow.players().get_by_id(seller_id).await?;
        assert_eq!((buyer.coins, buyer.goods), (0, 10));
        assert_eq!((seller.coins, seller.goods), (100, 90));

        // The exchange moves value around; it never creates or destroys it.
        assert_eq!(buyer.coins + seller.coins, 100);
        assert_eq!(buyer.goods + seller.goods, 100);

        Ok(())
    }

    #[tokio::test]
    async fn test_trade_buyer_cannot_afford() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, buyer_id, seller_id) = setup_traders((100, 0), (0, 100)).await?;

        let handler = TradeGoodsCommandHandler::new();
        let command = TradeGoods {
            buyer_id,
            seller_id,
            amount: 10,
            price: 500,
        };

        let result = handler.handle(command, &uow, &config).await;
        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Market(MarketError::InsufficientCoins { .. })
        ));

        // Nothing changed for either party.
        let buyer = uow.players().get_by_id(buyer_id).await?;
        let seller = uow.players().get_by_id(seller_id).await?;
        assert_eq!((buyer.coins, buyer.goods), (100, 0));
        assert_eq!((seller.coins, seller.goods), (0, 100));

        Ok(())
    }

    #[tokio::test]
    async fn test_trade_seller_lacks_goods() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, buyer_id, seller_id) = setup_traders((1000, 0), (0, 5)).await?;

        let handler = TradeGoodsCommandHandler::new();
        let command = TradeGoods {
            buyer_id,
            seller_id,
            amount: 10,
            price: 100,
        };

        let result = handler.handle(command, &uow, &config).await;
        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Market(MarketError::InsufficientGoods { .. })
        ));

        let buyer = uow.players().get_by_id(buyer_id).await?;
        let seller = uow.players().get_by_id(seller_id).await?;
        assert_eq!((buyer.coins, buyer.goods), (1000, 0));
        assert_eq!((seller.coins, seller.goods), (0, 5));

        Ok(())
    }

    #[tokio::test]
    async fn test_trade_with_self_rejected() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, buyer_id, _) = setup_traders((100, 100), (100, 100)).await?;

        let handler = TradeGoodsCommandHandler::new();
        let command = TradeGoods {
            buyer_id,
            seller_id: buyer_id,
            amount: 1,
            price: 1,
        };

        let result = handler.handle(command, &uow, &config).await;
        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Market(MarketError::SelfTrade)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_trade_non_positive_quantities_rejected() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, buyer_id, seller_id) = setup_traders((100, 0), (0, 100)).await?;

        let handler = TradeGoodsCommandHandler::new();

        for (amount, price) in [(0, 100), (10, 0), (-1, 100), (10, -1)] {
            let command = TradeGoods {
                buyer_id,
                seller_id,
                amount,
                price,
            };
            let result = handler.handle(command, &uow, &config).await;
            assert!(matches!(
                result.unwrap_err(),
                ApplicationError::Market(MarketError::NonPositiveTrade)
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_trade_unknown_buyer() -> Result<()> {
        let config = Arc::new(Config::from_env());
        let (uow, _, seller_id) = setup_traders((100, 0), (0, 100)).await?;

        let handler = TradeGoodsCommandHandler::new();
        let command = TradeGoods {
            buyer_id: 9999,
            seller_id,
            amount: 10,
            price: 100,
        };

        let result = handler.handle(command, &uow, &config).await;
        assert!(matches!(
            result.unwrap_err(),
            ApplicationError::Db(DbError::PlayerNotFound(9999))
        ));

        Ok(())
    }
}
