#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use page_sync::sink::{DataSink, SinkError};
use spot_price_ingestor::{
    models::{
        data_set::DataSet,
        price::{PricePoint, PriceSeries},
        product::{Category, Product},
        request_params::HistoryRequestParams,
    },
    providers::{DataProvider, HttpStatusSnafu, ProviderError},
};
use tempfile::TempDir;

pub const PAGE_HEAD: &str = concat!(
    "<!DOCTYPE html>\n",
    "<html lang=\"zh\">\n",
    "<head><meta charset=\"utf-8\"><title>光伏成本看板</title></head>\n",
    "<body>\n",
    "<div class=\"logo-update\">数据更新时间: 2024-01-01</div>\n",
    "<script>\n",
);

pub const OLD_BLOCK: &str = concat!(
    "        // SMM真实数据 (2024-01-01获取)\n",
    "        const smmData = {\n",
    "            // 原材料\n",
    "            silver: [\n",
    "                {date: \"2023-12-29\", price: 7400.0}, {date: \"2024-01-01\", price: 7420.5}\n",
    "            ],\n",
    "            wafer: []\n",
    "        };",
);

pub const PAGE_TAIL: &str = concat!(
    "\n",
    "        const chart = buildChart(smmData);\n",
    "</script>\n",
    "<p class=\"note\">价格单位: 元/片 · 数据更新时间: 2024-01-01</p>\n",
    "</body>\n",
    "</html>\n",
);

pub fn sample_page() -> String {
    format!("{PAGE_HEAD}{OLD_BLOCK}{PAGE_TAIL}")
}

pub struct TestPage {
    _dir: TempDir, // keep alive for the life of the test
    pub path: PathBuf,
}

pub fn write_page(content: &str) -> TestPage {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("index.html");
    std::fs::write(&path, content).expect("write page");
    TestPage { _dir: dir, path }
}

pub fn read_page(page: &TestPage) -> String {
    std::fs::read_to_string(&page.path).expect("read page")
}

pub fn series(points: &[(&str, f64)]) -> PriceSeries {
    PriceSeries::from_points(
        points
            .iter()
            .map(|(d, p)| PricePoint::new(*d, *p))
            .collect(),
    )
}

/// The shipped catalog shape, trimmed to one product per category plus the
/// other required raw materials.
pub fn products() -> Vec<Product> {
    vec![
        Product::new("silver", "202512220022", "Topcon正面细栅银浆", Category::RawMaterial)
            .required()
            .in_summary(),
        Product::new("wafer", "202303220001", "N型硅片-183mm", Category::RawMaterial)
            .required()
            .in_summary(),
        Product::new("silicon", "202501060003", "N型多晶硅", Category::RawMaterial).required(),
        Product::new("cell", "202210280001", "单晶Topcon电池片-183mm", Category::RawMaterial)
            .required(),
        Product::new("bcModule", "202506060001", "BC组件-210R(分布式)", Category::Component),
        Product::new("topconSemi", "202412190005", "Topcon183成本指数-半一体化", Category::CostIndex)
            .in_summary(),
    ]
}

/// Serves canned series by provider id; unknown ids answer HTTP 500.
#[derive(Default)]
pub struct FakeProvider {
    series: HashMap<String, PriceSeries>,
    pub requests: Mutex<Vec<HistoryRequestParams>>,
}

impl FakeProvider {
    pub fn with(mut self, id: &str, series: PriceSeries) -> Self {
        self.series.insert(id.to_string(), series);
        self
    }

    pub fn requested(&self) -> Vec<HistoryRequestParams> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataProvider for FakeProvider {
    async fn fetch_history(
        &self,
        params: &HistoryRequestParams,
    ) -> Result<PriceSeries, ProviderError> {
        self.requests.lock().unwrap().push(params.clone());
        match self.series.get(&params.product_id) {
            Some(s) => Ok(s.clone()),
            None => HttpStatusSnafu { status: 500u16 }.fail(),
        }
    }
}

/// Counts writes and keeps the last data set it was given.
#[derive(Default)]
pub struct RecordingSink {
    pub writes: AtomicUsize,
    pub last: Mutex<Option<(DataSet, String)>>,
}

#[async_trait]
impl DataSink for RecordingSink {
    type Output = usize;

    async fn write(&self, data: &DataSet, update_date: &str) -> Result<usize, SinkError> {
        *self.last.lock().unwrap() = Some((data.clone(), update_date.to_string()));
        Ok(self.writes.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl RecordingSink {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}
