use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, ResultExt, Snafu};
use spot_price_ingestor::models::{data_set::DataSet, product::Product};

use crate::{
    document::{DocumentError, UpdateOptions, UpdateOutcome, update_document},
    render::render_block,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// The target page could not be read, written, or did not contain a data block.
    #[snafu(display("Page update failed"))]
    Document {
        source: DocumentError,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait DataSink: Send + Sync {
    /// The type of output returned after a successful write operation.
    ///
    /// The HTML page sink returns an [`UpdateOutcome`]; test sinks may return
    /// whatever they recorded.
    type Output: Send;

    /// Writes a complete data set, stamped with `update_date` (`YYYY-MM-DD`).
    async fn write(&self, data: &DataSet, update_date: &str) -> Result<Self::Output, SinkError>;
}

/// Writes the data set into the `smmData` block of an HTML page.
#[derive(Debug, Clone)]
pub struct HtmlPageSink {
    path: PathBuf,
    products: Vec<Product>,
    options: UpdateOptions,
}

impl HtmlPageSink {
    /// `products` fixes which keys appear in the block, and in what order.
    pub fn new(path: impl Into<PathBuf>, products: Vec<Product>) -> Self {
        Self {
            path: path.into(),
            products,
            options: UpdateOptions::default(),
        }
    }

    /// Fail when the page has no data block.
    pub fn require_block(mut self, yes: bool) -> Self {
        self.options.require_block = yes;
        self
    }

    /// Render and match, but leave the file untouched.
    pub fn dry_run(mut self, yes: bool) -> Self {
        self.options.dry_run = yes;
        self
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl DataSink for HtmlPageSink {
    type Output = UpdateOutcome;

    async fn write(&self, data: &DataSet, update_date: &str) -> Result<UpdateOutcome, SinkError> {
        let block = render_block(&self.products, data, update_date);
        update_document(&self.path, &block, update_date, self.options)
            .await
            .context(DocumentSnafu)
    }
}
