use log::warn;

/// Display-ready token figures
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCard {
    pub title: String,
    pub price: String,
    pub change: String,
    pub market_cap: String,
    pub volume: String,
    pub total_supply: String,
    pub circulating_supply: String,
    pub status: &'static str,
    pub address: String,
    pub trading_url: String,
}

pub trait TokenView: Send + Sync {
    fn display_card(&self, card: &TokenCard);
    fn display_warning(&self, message: &str);
}

/// Writes cards to stdout
pub struct ConsoleTokenView;

impl TokenView for ConsoleTokenView {
    fn display_card(&self, card: &TokenCard) {
        println!(
            "{} [{}]\n  Price:        {} ({})\n  Market cap:   {}\n  24h volume:   {}\n  Total supply: {}\n  Circulating:  {}\n  Contract:     {}\n  Trade:        {}\n",
            card.title,
            card.status,
            card.price,
            card.change,
            card.market_cap,
            card.volume,
            card.total_supply,
            card.circulating_supply,
            card.address,
            card.trading_url,
        );
    }

    fn display_warning(&self, message: &str) {
        warn!("{}", message);
        println!("⚠️ {}", message);
    }
}
