//! Device state probe
//!
//! One GET against the controller's JSON API. Any failure is reported and
//! swallowed; file generation never depends on the device being reachable.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::constants::device::STATE_PATH;

/// Fields worth a log line from `/json/state`
#[derive(Debug, Clone, PartialEq)]
pub struct StateSummary {
    pub on: Option<bool>,
    pub brightness: Option<u8>,
    pub transition: Option<u16>,
    /// Active preset id, -1 when none
    pub preset: Option<i64>,
    pub segments: usize,
}

impl StateSummary {
    pub fn from_json(data: &Value) -> Self {
        Self {
            on: data.get("on").and_then(|v| v.as_bool()),
            brightness: data
                .get("bri")
                .and_then(|v| v.as_u64())
                .and_then(|v| u8::try_from(v).ok()),
            transition: data
                .get("transition")
                .and_then(|v| v.as_u64())
                .and_then(|v| u16::try_from(v).ok()),
            preset: data.get("ps").and_then(|v| v.as_i64()),
            segments: data
                .get("seg")
                .and_then(|v| v.as_array())
                .map_or(0, |segs| segs.len()),
        }
    }
}

pub struct DeviceProbe {
    agent: ureq::Agent,
    url: String,
}

impl DeviceProbe {
    /// `host` may carry a port; a missing scheme defaults to http
    pub fn new(host: &str, timeout: Duration) -> Self {
        let base = host.trim().trim_end_matches('/');
        let url = if base.contains("://") {
            format!("{base}{STATE_PATH}")
        } else {
            format!("http://{base}{STATE_PATH}")
        };
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the state object, failing on transport errors, non-2xx status or a non-object body
    pub fn fetch_state(&self) -> Result<Value> {
        debug!(url = %self.url, "Requesting device state");
        let response = self
            .agent
            .get(&self.url)
            .call()
            .with_context(|| format!("Request to {} failed", self.url))?;

        let state: Value = response
            .into_json()
            .with_context(|| format!("Invalid JSON from {}", self.url))?;

        if !state.is_object() {
            return Err(anyhow!("Expected a JSON object from {}, got {}", self.url, state));
        }
        Ok(state)
    }

    /// Fetch the state, or report the error and return `None`
    pub fn probe(&self) -> Option<Value> {
        match self.fetch_state() {
            Ok(state) => {
                let summary = StateSummary::from_json(&state);
                info!(
                    url = %self.url,
                    on = ?summary.on,
                    bri = ?summary.brightness,
                    transition = ?summary.transition,
                    preset = ?summary.preset,
                    segments = summary.segments,
                    "Device state received"
                );
                Some(state)
            }
            Err(e) => {
                let message = format!("{e:#}");
                warn!(url = %self.url, error = %message, "Device unavailable");
                println!("Error: {message}");
                None
            }
        }
    }
}

/// Probe and pretty-print the state if the device answered
pub fn print_device_state(probe: &DeviceProbe) -> Option<Value> {
    let state = probe.probe()?;
    match serde_json::to_string_pretty(&state) {
        Ok(text) => println!("{text}"),
        Err(e) => warn!(error = %e, "Failed to format device state"),
    }
    Some(state)
}
