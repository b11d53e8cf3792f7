//! Formatted terminal and notification output.
//!
//! We keep formatting code in one place so the query engine stays free of
//! presentation concerns and output changes stay localized.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::ProductRecord;
use crate::index::CategoryDetail;

/// Notification body: one `"<name>: <rate>%"` line per detail, in order.
pub fn format_details_message(details: &[CategoryDetail]) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}%", d.name, d.rate))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Headline posted before the details reply.
pub fn format_change_headline(category: &str, day: NaiveDate) -> String {
    format!("{category} rates changed on {day}")
}

/// Product summary: identity plus its full history, newest first.
pub fn format_product(code: &str, record: &ProductRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Product: {code}\n"));
    out.push_str(&format!(
        "Key: type={} terms={} currency={}\n",
        record.product_type, record.terms, record.currency
    ));
    out.push_str(&format!("History ({} changes):\n", record.rates.len()));
    out.push_str(&format!("{:<12} {:>8}\n", "effective", "rate"));
    out.push_str(&format!("{:-<12} {:-<8}\n", "", ""));
    for e in record.rates.entries() {
        out.push_str(&format!("{:<12} {:>8}\n", e.effective.to_string(), fmt_rate(e.rate)));
    }
    out
}

/// Category summary for the `category` command.
pub fn format_category(
    category: &str,
    day: NaiveDate,
    changed: bool,
    details: &[CategoryDetail],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {category} as of {day} ===\n"));
    out.push_str(&format!(
        "Changed on {day}: {}\n",
        if changed { "yes" } else { "no" }
    ));
    let width = details
        .iter()
        .map(|d| d.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);
    for d in details {
        out.push_str(&format!("{:<width$} {:>8}\n", d.name, fmt_rate(d.rate)));
    }
    out
}

fn fmt_rate(rate: Decimal) -> String {
    format!("{rate}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateEntry, RateSeries};
    use std::str::FromStr;

    fn detail(name: &str, rate: &str) -> CategoryDetail {
        CategoryDetail {
            name: name.to_string(),
            rate: Decimal::from_str(rate).unwrap(),
        }
    }

    #[test]
    fn details_message_is_one_line_per_product() {
        let msg = format_details_message(&[detail("90 Day GIC", "0.50"), detail("1 Year GIC", "2.30")]);
        assert_eq!(msg, "90 Day GIC: 0.50%\n1 Year GIC: 2.30%");
    }

    #[test]
    fn details_message_empty_category() {
        assert_eq!(format_details_message(&[]), "");
    }

    #[test]
    fn headline_names_category_and_day() {
        let day = NaiveDate::from_ymd_opt(2020, 4, 2).unwrap();
        assert_eq!(format_change_headline("GIC", day), "GIC rates changed on 2020-04-02");
    }

    #[test]
    fn product_lists_history_newest_first() {
        let record = ProductRecord {
            product_type: "3500".to_string(),
            currency: "CAD".to_string(),
            terms: "1".to_string(),
            rates: RateSeries::new([
                RateEntry::new(NaiveDate::from_ymd_opt(2007, 5, 25).unwrap(), Decimal::from_str("4.20").unwrap()),
                RateEntry::new(NaiveDate::from_ymd_opt(2020, 4, 2).unwrap(), Decimal::from_str("2.30").unwrap()),
            ])
            .unwrap(),
        };
        let out = format_product("gic1yr", &record);
        let newer = out.find("2020-04-02").unwrap();
        let older = out.find("2007-05-25").unwrap();
        assert!(newer < older);
        assert!(out.contains("2.30%"));
        assert!(out.contains("type=3500 terms=1 currency=CAD"));
    }

    #[test]
    fn category_summary_reports_change_flag() {
        let day = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let out = format_category("GIC", day, false, &[detail("1 Year GIC", "2.80")]);
        assert!(out.contains("Changed on 2020-04-01: no"));
        assert!(out.contains("1 Year GIC"));
        assert!(out.contains("2.80%"));
    }
}
