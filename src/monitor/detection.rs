//! Monitor detection and brightness control
//!
//! One `ddcutil detect` pass enumerates every reachable display, then each
//! accepted monitor gets its own concurrent brightness query. Failures stay
//! per-monitor: a display that stops answering VCP queries must not hide the
//! ones that still do.

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::identity::MonitorId;
use crate::ddcutil::{BRIGHTNESS_CODE, CommandRunner};
use crate::error::{BackendError, Result};
use crate::parse::Node;

static DISPLAY_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Display \d+$").unwrap());
static TRAILING_INT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// One detected monitor with its current brightness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Monitor {
    /// ddcutil display index (1..)
    pub id: u32,
    /// Model name from the EDID synopsis
    pub name: String,
    /// I2C bus number, e.g. 7 for /dev/i2c-7
    pub bus_id: u32,
    /// Current brightness as reported by getvcp
    pub brightness: u32,
}

/// Detect all monitors and query their brightness.
///
/// Returns one outcome per accepted monitor, in the order the `Display N`
/// blocks appear in the detect output. A non-zero exit of `ddcutil detect`
/// itself aborts the whole pass; a failed per-monitor query only occupies
/// that monitor's slot in the result.
pub async fn detect(runner: &impl CommandRunner) -> Result<Vec<Result<Monitor>>> {
    let detect_output = runner.run("ddcutil detect")?;
    let root = Node::parse(detect_output.stdout.lines());

    let mut accepted: Vec<MonitorId> = Vec::new();
    let mut pending = Vec::new();
    for block in &root.children {
        if !DISPLAY_KEY.is_match(block.key.trim()) {
            continue;
        }
        let id = MonitorId::from_display_block(block);
        if accepted.contains(&id) {
            debug!("{}: duplicate monitor entry removed", block.key);
            continue;
        }
        accepted.push(id);
        pending.push(fetch_monitor(runner, block));
    }

    // join_all preserves the acceptance order and never cancels siblings.
    Ok(join_all(pending).await)
}

/// Set the brightness for the monitor on one I2C bus.
///
/// Range checking is left to ddcutil.
pub fn set_brightness(runner: &impl CommandRunner, bus_id: u32, brightness: u32) -> Result<()> {
    runner.run(&format!(
        "ddcutil setvcp --bus {bus_id} {BRIGHTNESS_CODE:x} {brightness}"
    ))?;
    Ok(())
}

async fn fetch_monitor(runner: &impl CommandRunner, block: &Node) -> Result<Monitor> {
    let id = parse_trailing_int("display index", block.key.trim())?;
    let name = block.require("EDID synopsis")?.require("Model")?.value.clone();
    let bus_id = parse_trailing_int("I2C bus", &block.require("I2C bus")?.value)?;

    let query = format!("ddcutil getvcp --bus {bus_id} --brief {BRIGHTNESS_CODE:x}");
    let reply = match runner.run_async(&query).await {
        Ok(reply) => reply,
        Err(err) => {
            debug!("{name} id={id}: brightness query failed: {err}");
            return Err(err);
        }
    };
    let brightness = parse_brief_brightness(&reply.stdout)?;

    Ok(Monitor {
        id,
        name,
        bus_id,
        brightness,
    })
}

fn parse_trailing_int(field: &'static str, text: &str) -> Result<u32> {
    TRAILING_INT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .ok_or_else(|| BackendError::InvalidNumber {
            field,
            text: text.to_owned(),
        })
}

/// The brief getvcp format is one line of space-separated tokens, brightness
/// in the fourth slot: `VCP 10 C 42 100`.
fn parse_brief_brightness(reply: &str) -> Result<u32> {
    let token = reply
        .split_whitespace()
        .nth(3)
        .ok_or_else(|| BackendError::MalformedReply {
            reply: reply.to_owned(),
        })?;
    token.parse().map_err(|_| BackendError::InvalidNumber {
        field: "brightness",
        text: token.to_owned(),
    })
}
