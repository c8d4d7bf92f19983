use serde::Deserialize;
use serde_json::Value;

use crate::{
    models::price::{PricePoint, PriceSeries},
    providers::{ApiSnafu, MalformedRecordSnafu, ProviderError},
};

/// A price field as sent by SMM: sometimes a JSON number, sometimes a numeric string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    pub fn value(&self) -> Result<f64, ProviderError> {
        match self {
            PriceField::Number(n) => Ok(*n),
            PriceField::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                MalformedRecordSnafu {
                    message: format!("price is not a number: {s:?}"),
                }
                .build()
            }),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct SmmRow {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub avg_price: Option<PriceField>,
    #[serde(default)]
    pub low_price: Option<PriceField>,
    #[serde(default)]
    pub high_price: Option<PriceField>,
}

impl SmmRow {
    /// The average price if reported, else the midpoint of the low/high band.
    ///
    /// `Ok(None)` when neither is available.
    pub fn resolve_price(&self) -> Result<Option<f64>, ProviderError> {
        if let Some(avg) = &self.avg_price {
            return avg.value().map(Some);
        }
        match (&self.low_price, &self.high_price) {
            (Some(low), Some(high)) => Ok(Some((low.value()? + high.value()?) / 2.0)),
            _ => Ok(None),
        }
    }

    /// Converts the row into a point; rows without a date or a price are skipped.
    pub fn into_point(self) -> Result<Option<PricePoint>, ProviderError> {
        let price = self.resolve_price()?;
        match (self.date, price) {
            (Some(date), Some(price)) if !date.is_empty() => Ok(Some(PricePoint { date, price })),
            _ => Ok(None),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct SmmData {
    #[serde(default)]
    pub rows: Option<Vec<SmmRow>>,
}

#[derive(Deserialize, Debug)]
pub struct SmmResponse {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub data: Option<SmmData>,
}

impl SmmResponse {
    pub fn is_ok(&self) -> bool {
        matches!(&self.status, Some(Value::String(s)) if s == "ok")
    }

    /// Normalizes the payload into a date-sorted series.
    ///
    /// A status other than `"ok"` is reported as [`ProviderError::Api`].
    pub fn into_series(self) -> Result<PriceSeries, ProviderError> {
        if !self.is_ok() {
            let status = self
                .status
                .as_ref()
                .map_or_else(|| "<missing>".to_string(), Value::to_string);
            return ApiSnafu {
                message: format!("status {status}"),
            }
            .fail();
        }

        let rows = self.data.and_then(|d| d.rows).unwrap_or_default();
        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(point) = row.into_point()? {
                points.push(point);
            }
        }
        Ok(PriceSeries::from_points(points))
    }
}
