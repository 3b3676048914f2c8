//! Plain-text lines for list output.

use chrono::NaiveDateTime;
use organizer_core::portfolio::PortfolioSummary;
use organizer_core::reminders;
use organizer_core::types::Appointment;
use organizer_core::types::Contact;
use organizer_core::types::Stock;
use organizer_core::types::Task;
use organizer_core::types::Website;

fn optional(label: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("  {label}{value}")
    }
}

pub(crate) fn contact(c: &Contact) -> String {
    format!(
        "{}  {}  {}{}  [{}]",
        c.id,
        c.name,
        c.phone,
        optional("", &c.email),
        c.category
    )
}

pub(crate) fn appointment(a: &Appointment, now: NaiveDateTime) -> String {
    let marker = if reminders::is_due_soon(a, now) {
        "  (soon)"
    } else if !a.is_upcoming(now) {
        "  (past)"
    } else {
        ""
    };
    format!(
        "{}  {} {}  {}  [{}]{}{}",
        a.id,
        a.date.format("%Y-%m-%d"),
        a.time.format("%H:%M"),
        a.title,
        a.category,
        optional("@ ", &a.location),
        marker
    )
}

pub(crate) fn task(t: &Task) -> String {
    let check = if t.completed { "[x]" } else { "[ ]" };
    let due = t
        .due_date
        .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    format!("{}  {check} {}  ({}){due}", t.id, t.title, t.priority)
}

pub(crate) fn stock(s: &Stock) -> String {
    format!(
        "{}  {}  {} @ {:.2} (bought {:.2})  value {:.2}  {:+.2} ({:+.2}%)",
        s.id,
        s.symbol,
        s.quantity,
        s.current_price,
        s.purchase_price,
        s.total_value(),
        s.gain_loss(),
        s.gain_loss_percentage()
    )
}

pub(crate) fn website(w: &Website) -> String {
    let category = if w.category.is_empty() {
        String::new()
    } else {
        format!("  [{}]", w.category)
    };
    format!("{}  {}  {}{category}", w.id, w.name, w.url)
}

pub(crate) fn portfolio(stocks: &[Stock], summary: &PortfolioSummary) -> String {
    let mut lines: Vec<String> = stocks.iter().map(stock).collect();
    lines.push(format!(
        "total value {:.2}  cost {:.2}  gain/loss {:+.2} ({:+.2}%)",
        summary.total_value, summary.total_cost, summary.gain_loss, summary.gain_loss_percentage
    ));
    lines.push(format!(
        "{} holdings, {} gainers, {} losers",
        summary.holdings, summary.gainers, summary.losers
    ));
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use organizer_core::types::Priority;
    use pretty_assertions::assert_eq;

    #[test]
    fn task_line_shows_check_priority_and_due() {
        let t = Task {
            id: "t_1".to_string(),
            title: "Pay rent".to_string(),
            description: String::new(),
            due_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1),
            priority: Priority::High,
            completed: true,
            created_at: None,
        };
        assert_eq!(task(&t), "t_1  [x] Pay rent  (high)  due 2025-07-01");
    }

    fn acme() -> Stock {
        Stock {
            id: "s_1".to_string(),
            symbol: "ACME".to_string(),
            name: "Acme".to_string(),
            quantity: 10.0,
            purchase_price: 20.0,
            current_price: 25.0,
        }
    }

    #[test]
    fn portfolio_lists_holdings_then_totals() {
        let stocks = vec![acme()];
        let summary = PortfolioSummary::from_stocks(&stocks);
        assert_eq!(
            portfolio(&stocks, &summary),
            "s_1  ACME  10 @ 25.00 (bought 20.00)  value 250.00  +50.00 (+25.00%)\n\
             total value 250.00  cost 200.00  gain/loss +50.00 (+25.00%)\n\
             1 holdings, 1 gainers, 0 losers\n"
        );
    }

    #[test]
    fn stock_line_signs_gain() {
        let s = acme();
        assert_eq!(
            stock(&s),
            "s_1  ACME  10 @ 25.00 (bought 20.00)  value 250.00  +50.00 (+25.00%)"
        );
    }
}
