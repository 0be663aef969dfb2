use std::time::Duration;
use ureq::Agent;
use crate::errors::FeedError;

/// Thin wrapper around a blocking HTTP agent, one per feed manager
pub struct Upstream {
    agent: Agent,
}

impl Upstream {
    /// Returns an Upstream with a bounded global timeout. Hitting the
    /// timeout surfaces as a transport error like any other network
    /// failure.
    ///
    /// # Arguments
    ///
    /// * 'timeout_secs' - upper bound in seconds for the whole fetch
    pub fn new(timeout_secs: u64) -> Upstream {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build();

        Upstream { agent: config.into() }
    }

    /// Retrieves the body of the given URL as text. The agent reports
    /// non-2xx statuses as errors, so they end up as transport failures
    /// together with network errors and timeouts. No retries.
    ///
    /// # Arguments
    ///
    /// * 'url' - the upstream URL to fetch
    pub fn get_text(&self, url: &str) -> Result<String, FeedError> {
        let body = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(body)
    }
}
