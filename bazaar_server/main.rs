use std::sync::Arc;

use bazaar_app::{
    app_bus::AppBus,
    command_handlers::{
        RegisterPlayerCommandHandler, SeedPlayersCommandHandler, TradeGoodsCommandHandler,
    },
    config::Config,
    cqrs::{
        commands::{RegisterPlayer, SeedPlayers, TradeGoods},
        queries::{CountPlayers, GetPlayerByName, ListPlayers},
    },
    queries_handlers::{CountPlayersHandler, GetPlayerByNameHandler, ListPlayersHandler},
};
use bazaar_db::{DbPool, establish_connection_pool, uow::MysqlUnitOfWorkProvider};
use bazaar_types::{
    Result,
    errors::{ApplicationError, DbError},
};

mod logs;
use logs::setup_logging;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    setup_logging();
    let (bus, db_pool) = setup_app().await?;

    reset_players(&db_pool).await?;

    simple_example(&bus).await?;
    trade_example(&bus).await?;

    Ok(())
}

async fn setup_app() -> Result<(AppBus, DbPool), ApplicationError> {
    let config = Arc::new(Config::from_env());
    let db_pool = establish_connection_pool(&config).await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Unknown(e.to_string()))?;

    let uow_provider = Arc::new(MysqlUnitOfWorkProvider::new(db_pool.clone()));
    let bus = AppBus::new(config, uow_provider);

    Ok((bus, db_pool))
}

/// The demo owns its table contents, so reruns start from an empty table.
/// Schema lifecycle itself is the migration's job.
async fn reset_players(pool: &DbPool) -> Result<(), ApplicationError> {
    sqlx::query("DELETE FROM players")
        .execute(pool)
        .await
        .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

    Ok(())
}

/// Basic CRUD walk-through: one insert, a read-back by name, a bulk seed,
/// and a couple of reads.
async fn simple_example(bus: &AppBus) -> Result<(), ApplicationError> {
    // Create a player who has a coin and a goods.
    bus.execute(
        RegisterPlayer {
            name: "test".to_string(),
            coins: 1,
            goods: 1,
        },
        RegisterPlayerCommandHandler::new(),
    )
    .await?;

    // Get this player back and print it.
    let player = bus
        .query(
            GetPlayerByName {
                name: "test".to_string(),
            },
            GetPlayerByNameHandler::new(),
        )
        .await?;
    tracing::info!("{player}");

    // Create players with bulk inserts: 200 players, 50 per batch.
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
    tracing::info!("number of players: {count}");

    let three_players = bus
        .query(ListPlayers { limit: 3 }, ListPlayersHandler::new())
        .await?;
    for player in three_players {
        tracing::info!("{player}");
    }

    Ok(())
}

/// Two trades between a buyer and a seller: the first is over the buyer's
/// budget and gets rejected, the second commits.
async fn trade_example(bus: &AppBus) -> Result<(), ApplicationError> {
    bus.execute(
        RegisterPlayer {
            name: "buyer".to_string(),
            coins: 100,
            goods: 0,
        },
        RegisterPlayerCommandHandler::new(),
    )
    .await?;
    bus.execute(
        RegisterPlayer {
            name: "seller".to_string(),
            coins: 0,
            goods: 100,
        },
        RegisterPlayerCommandHandler::new(),
    )
    .await?;

    let buyer = bus
        .query(
            GetPlayerByName {
                name: "buyer".to_string(),
            },
            GetPlayerByNameHandler::new(),
        )
        .await?;
    let seller = bus
        .query(
            GetPlayerByName {
                name: "seller".to_string(),
            },
            GetPlayerByNameHandler::new(),
        )
        .await?;

    // The buyer wants 10 goods for 500 coins but cannot afford them, so the
    // trade fails and nobody loses coins or goods.
    tracing::info!("============== trade 1 start =================");
    run_trade(
        bus,
        TradeGoods {
            buyer_id: buyer.id,
            seller_id: seller.id,
            amount: 10,
            price: 500,
        },
    )
    .await?;
    tracing::info!("============== trade 1 end ===================");

    // At 100 coins for the same 10 goods, the trade goes through.
    tracing::info!("============== trade 2 start =================");
    run_trade(
        bus,
        TradeGoods {
            buyer_id: buyer.id,
            seller_id: seller.id,
            amount: 10,
            price: 100,
        },
    )
    .await?;
    tracing::info!("============== trade 2 end ===================");

    for name in ["buyer", "seller"] {
        let player = bus
            .query(
                GetPlayerByName {
                    name: name.to_string(),
                },
                GetPlayerByNameHandler::new(),
            )
            .await?;
        tracing::info!("{player}");
    }

    Ok(())
}

/// Runs one trade, reporting business rejections instead of failing on them.
/// Lookup and infrastructure failures still propagate to the caller.
async fn run_trade(bus: &AppBus, trade: TradeGoods) -> Result<(), ApplicationError> {
    match bus.execute(trade, TradeGoodsCommandHandler::new()).await {
        Ok(()) => tracing::info!("trade success"),
        Err(ApplicationError::Market(rejection)) => {
            // Expected outcome; the transaction was rolled back untouched.
            tracing::warn!("trade rejected: {rejection}");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
