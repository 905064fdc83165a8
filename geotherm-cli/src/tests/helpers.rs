//! Test helpers for building command lines and stub scoring services.

use std::sync::Arc;

use camino::Utf8Path;
use geotherm_client::HttpScoringClientConfig;
use geotherm_core::ScoringService;
use geotherm_core::test_support::StubScoringService;

use super::*;
use crate::score::ServiceBuilder;

/// Hands out clones of one shared stub and records the endpoint it was
/// configured with.
#[derive(Debug)]
pub(super) struct StubServiceBuilder {
    pub(super) service: Arc<StubScoringService>,
    pub(super) configured: std::cell::RefCell<Option<HttpScoringClientConfig>>,
}

impl StubServiceBuilder {
    pub(super) fn new(service: StubScoringService) -> Self {
        Self {
            service: Arc::new(service),
            configured: std::cell::RefCell::new(None),
        }
    }
}

impl ServiceBuilder for StubServiceBuilder {
    fn build(
        &self,
        config: &HttpScoringClientConfig,
    ) -> Result<Box<dyn ScoringService>, CliError> {
        self.configured.replace(Some(config.clone()));
        Ok(Box::new(Arc::clone(&self.service)))
    }
}

/// `geotherm <command>` followed by whitespace-separated `extra` words.
pub(super) fn argv(command: &str, extra: &str) -> Vec<String> {
    ["geotherm", command]
        .into_iter()
        .chain(extra.split_whitespace())
        .map(str::to_owned)
        .collect()
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn output_lines(buffer: &[u8]) -> Vec<String> {
    String::from_utf8(buffer.to_vec())
        .expect("stdout utf-8")
        .lines()
        .map(str::to_owned)
        .collect()
}
