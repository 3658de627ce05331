use thiserror::Error;

/// Errors for market rules.
///
/// These are expected rejections, not faults: the request was well-formed
/// but one party cannot satisfy the exchange. Callers handle them and carry
/// on; nothing has been written when one of these comes back.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Trade amount and price must be positive")]
    NonPositiveTrade,

    #[error("Buyer and seller must be different players")]
    SelfTrade,

    #[error("Buyer {buyer_id} has {coins} coins, cannot pay {price}")]
    InsufficientCoins {
        buyer_id: i64,
        coins: i64,
        price: i64,
    },

    #[error("Seller {seller_id} has {goods} goods, cannot deliver {amount}")]
    InsufficientGoods {
        seller_id: i64,
        goods: i64,
        amount: i64,
    },
}
