use crate::application::dto::ChartPoint;
use crate::domain::entities::{read_tag, tags};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::Money;
use crate::ports::PageConfigSource;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month of donations, as the page embeds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    /// Cents
    pub amount: i64,
}

/// Monthly donation totals prepared for the line chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySeries {
    totals: Vec<(NaiveDate, MonthlyTotal)>,
}

impl MonthlySeries {
    pub fn new(totals: Vec<MonthlyTotal>) -> DomainResult<Self> {
        let totals = totals
            .into_iter()
            .map(|t| parse_month(&t.month).map(|date| (date, t)))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self { totals })
    }

    /// Read the `monthly` tag
    pub fn load<C: PageConfigSource + ?Sized>(source: &C) -> DomainResult<Self> {
        let totals: Vec<MonthlyTotal> = read_tag(source, tags::MONTHLY)?;
        Self::new(totals)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn points(&self) -> Vec<ChartPoint> {
        self.totals
            .iter()
            .map(|(_, t)| ChartPoint {
                x: t.month.clone(),
                y: t.amount,
            })
            .collect()
    }

    /// x-axis tick for the point at `index`; empty past the end
    pub fn axis_label(&self, index: usize) -> String {
        self.totals
            .get(index)
            .map(|(date, _)| month_label(date))
            .unwrap_or_default()
    }

    /// y-axis tick for a value in cents
    pub fn tick_label(cents: i64) -> String {
        Money::from_cents(cents).to_string()
    }

    /// Tooltip for the point at `index`
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        self.totals.get(index).map(|(date, t)| {
            format!("{}: {}", month_label(date), Money::from_cents(t.amount))
        })
    }

    pub fn total(&self) -> Money {
        Money::from_cents(self.totals.iter().map(|(_, t)| t.amount).sum())
    }
}

fn parse_month(month: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").map_err(|e| {
        DomainError::Configuration(format!("invalid month `{}`: {}", month, e))
    })
}

fn month_label(date: &NaiveDate) -> String {
    format!("{:02}-{}", date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EmbeddedPageConfig;

    fn series() -> MonthlySeries {
        MonthlySeries::new(vec![
            MonthlyTotal {
                month: "2024-01".to_string(),
                amount: 2500,
            },
            MonthlyTotal {
                month: "2024-02".to_string(),
                amount: 123456,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_points_keep_cents() {
        let points = series().points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].x, "2024-02");
        assert_eq!(points[1].y, 123456);
    }

    #[test]
    fn test_labels() {
        let series = series();
        assert_eq!(series.axis_label(0), "01-2024");
        assert_eq!(series.axis_label(5), "");
        assert_eq!(series.tooltip_label(1).unwrap(), "02-2024: $1,234.56");
        assert_eq!(MonthlySeries::tick_label(150000), "$1,500.00");
        assert_eq!(series.total(), Money::from_cents(125956));
    }

    #[test]
    fn test_load_from_page() {
        let page = EmbeddedPageConfig::from_pairs([(
            "monthly",
            r#"[{"month":"2023-12","amount":100}]"#,
        )]);
        let series = MonthlySeries::load(&page).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.axis_label(0), "12-2023");
    }

    #[test]
    fn test_invalid_month_rejected() {
        let result = MonthlySeries::new(vec![MonthlyTotal {
            month: "2024-13".to_string(),
            amount: 1,
        }]);
        assert!(matches!(result, Err(DomainError::Configuration(_))));
    }
}
