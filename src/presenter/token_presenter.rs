use std::sync::Arc;

use crate::entity::TokenSnapshot;
use crate::utils::{format_change, format_currency, format_number, shorten_address};
use crate::view::{TokenCard, TokenView};

pub const LIVE_STATUS: &str = "LIVE";
pub const DEMO_STATUS: &str = "DEMO MODE";

pub trait TokenPresenter: Send + Sync {
    fn show_snapshot(&self, snapshot: &TokenSnapshot);
    fn show_api_status(&self, healthy: bool);
}

pub struct TokenPresenterImpl<V> {
    view: Arc<V>,
}

impl<V> TokenPresenterImpl<V>
where
    V: TokenView,
{
    pub fn new(view: Arc<V>) -> Self {
        Self { view }
    }
}

/// Turns a snapshot into the strings the coin page shows
pub fn build_card(snapshot: &TokenSnapshot) -> TokenCard {
    let price = if snapshot.has_usd_price() {
        format_currency(snapshot.price, "$")
    } else if snapshot.price_in_sol > 0.0 {
        // Show SOL price if USD not available
        format!("{:.10} SOL", snapshot.price_in_sol)
    } else {
        format_currency(0.0, "$")
    };

    TokenCard {
        title: format!("{} ({})", snapshot.name, snapshot.symbol),
        price,
        change: format_change(snapshot.price_change_24h),
        market_cap: format_currency(snapshot.market_cap, "$"),
        volume: format_currency(snapshot.volume_24h, "$"),
        total_supply: format_number(snapshot.total_supply),
        circulating_supply: format_number(snapshot.circulating_supply),
        status: if snapshot.is_mock { DEMO_STATUS } else { LIVE_STATUS },
        address: shorten_address(&snapshot.address),
        trading_url: snapshot.trading_url.clone(),
    }
}

impl<V> TokenPresenter for TokenPresenterImpl<V>
where
    V: TokenView,
{
    fn show_snapshot(&self, snapshot: &TokenSnapshot) {
        self.view.display_card(&build_card(snapshot));
    }

    fn show_api_status(&self, healthy: bool) {
        if !healthy {
            self.view
                .display_warning("Token API is unavailable, prices may be demo data");
        }
    }
}
