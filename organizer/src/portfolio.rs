//! Stock holding arithmetic.

use serde::Serialize;

use crate::types::Stock;

impl Stock {
    pub fn total_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    pub fn total_cost(&self) -> f64 {
        self.quantity * self.purchase_price
    }

    pub fn gain_loss(&self) -> f64 {
        self.total_value() - self.total_cost()
    }

    /// Percentage change against the purchase price; zero when that price is
    /// zero.
    pub fn gain_loss_percentage(&self) -> f64 {
        if self.purchase_price == 0.0 {
            return 0.0;
        }
        (self.current_price - self.purchase_price) / self.purchase_price * 100.0
    }

    pub fn is_gainer(&self) -> bool {
        self.gain_loss() > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.gain_loss() < 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub holdings: usize,
    pub total_value: f64,
    pub total_cost: f64,
    pub gain_loss: f64,
    pub gain_loss_percentage: f64,
    pub gainers: usize,
    pub losers: usize,
}

impl PortfolioSummary {
    pub fn from_stocks(stocks: &[Stock]) -> Self {
        let total_value: f64 = stocks.iter().map(Stock::total_value).sum();
        let total_cost: f64 = stocks.iter().map(Stock::total_cost).sum();
        let gain_loss = total_value - total_cost;
        let gain_loss_percentage = if total_cost == 0.0 {
            0.0
        } else {
            gain_loss / total_cost * 100.0
        };
        Self {
            holdings: stocks.len(),
            total_value,
            total_cost,
            gain_loss,
            gain_loss_percentage,
            gainers: stocks.iter().filter(|s| s.is_gainer()).count(),
            losers: stocks.iter().filter(|s| s.is_loser()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stock(symbol: &str, quantity: f64, bought: f64, current: f64) -> Stock {
        Stock {
            id: format!("s_{symbol}"),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            quantity,
            purchase_price: bought,
            current_price: current,
        }
    }

    #[test]
    fn single_holding_figures() {
        let s = stock("ACME", 10.0, 20.0, 25.0);
        assert_eq!(s.total_value(), 250.0);
        assert_eq!(s.total_cost(), 200.0);
        assert_eq!(s.gain_loss(), 50.0);
        assert_eq!(s.gain_loss_percentage(), 25.0);
        assert!(s.is_gainer());
        assert!(!s.is_loser());
    }

    #[test]
    fn zero_purchase_price_has_zero_percentage() {
        let s = stock("FREE", 5.0, 0.0, 3.0);
        assert_eq!(s.gain_loss_percentage(), 0.0);
    }

    #[test]
    fn summary_totals() {
        let stocks = vec![
            stock("UP", 10.0, 10.0, 15.0),
            stock("DOWN", 4.0, 25.0, 20.0),
            stock("FLAT", 1.0, 50.0, 50.0),
        ];
        let summary = PortfolioSummary::from_stocks(&stocks);
        assert_eq!(summary.holdings, 3);
        assert_eq!(summary.total_value, 280.0);
        assert_eq!(summary.total_cost, 250.0);
        assert_eq!(summary.gain_loss, 30.0);
        assert!((summary.gain_loss_percentage - 12.0).abs() < 1e-9);
        assert_eq!((summary.gainers, summary.losers), (1, 1));
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        assert_eq!(
            PortfolioSummary::from_stocks(&[]),
            PortfolioSummary::default()
        );
    }
}
