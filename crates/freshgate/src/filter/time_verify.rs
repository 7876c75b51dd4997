//! Request freshness gate.
//!
//! Callers declare when they sent a request in the `timestamp` attribute of
//! the request descriptor, formatted as [`TIMESTAMP_FORMAT`] in the gateway's
//! local time (`2024-05-01 13:45:00`).  A request is fresh when fewer than
//! `time_delay_minutes` whole minutes have passed since that instant; anything
//! else is answered with `408 Request Timeout`:
//!
//! ```json
//! { "status": "error", "message": "timestamp is not passed validation" }
//! ```
//!
//! Missing, blank and unparseable timestamps are all denied the same way, so
//! a client with a broken clock format gets a normal 408 rather than a 500.
//! The check keeps no state: this bounds the replay window, it does not
//! remember which timestamps it has seen.

use crate::result::ApiResult;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use freshgate_kernel::gateway::{
    Gate, GateOrder, GatewayContext, GatewayError, GatewayResponse, TimeVerifyConfig,
};
use tracing::warn;

/// Wire format of the descriptor timestamp.  Callers must send exactly this.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body message of every freshness denial.
pub const DENY_MESSAGE: &str = "timestamp is not passed validation";

const REQUEST_TIMEOUT: u16 = 408;

/// Why a request failed the freshness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No descriptor, no timestamp, or a whitespace-only timestamp.
    MissingTimestamp,
    /// The timestamp is present but not in [`TIMESTAMP_FORMAT`].
    MalformedTimestamp,
    /// The timestamp parsed but is at least the allowed delay old.
    StaleTimestamp { elapsed_minutes: i64 },
}

impl DenyReason {
    fn as_str(&self) -> &'static str {
        match self {
            DenyReason::MissingTimestamp => "missing_timestamp",
            DenyReason::MalformedTimestamp => "malformed_timestamp",
            DenyReason::StaleTimestamp { .. } => "stale_timestamp",
        }
    }
}

/// Verdict of the freshness check for one timestamp at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh { elapsed_minutes: i64 },
    Denied(DenyReason),
}

/// Gate that denies requests whose declared timestamp is missing or too old.
#[derive(Debug, Clone)]
pub struct TimeVerifyGate {
    time_delay_minutes: i64,
}

impl TimeVerifyGate {
    pub const NAME: &'static str = "time-verify";

    /// Build the gate from validated startup configuration.
    pub fn new(config: &TimeVerifyConfig) -> Self {
        Self {
            time_delay_minutes: config.time_delay_minutes,
        }
    }

    pub fn time_delay_minutes(&self) -> i64 {
        self.time_delay_minutes
    }

    /// Decide freshness of `timestamp` as seen at `now`.
    ///
    /// Elapsed time is counted in whole minutes, truncated toward zero, and
    /// compared strictly: a request exactly `time_delay_minutes` old is stale.
    /// A timestamp in the future yields a zero or negative elapsed value and
    /// goes through the same comparison.
    pub fn verify_at(&self, timestamp: Option<&str>, now: NaiveDateTime) -> Freshness {
        let Some(timestamp) = timestamp.filter(|ts| !ts.trim().is_empty()) else {
            return Freshness::Denied(DenyReason::MissingTimestamp);
        };
        let Ok(sent_at) = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT) else {
            return Freshness::Denied(DenyReason::MalformedTimestamp);
        };

        let elapsed_minutes = now.signed_duration_since(sent_at).num_minutes();
        if elapsed_minutes < self.time_delay_minutes {
            Freshness::Fresh { elapsed_minutes }
        } else {
            Freshness::Denied(DenyReason::StaleTimestamp { elapsed_minutes })
        }
    }

    /// `true` when [`verify_at`](Self::verify_at) says the request is fresh.
    pub fn is_fresh_at(&self, timestamp: Option<&str>, now: NaiveDateTime) -> bool {
        matches!(self.verify_at(timestamp, now), Freshness::Fresh { .. })
    }
}

#[async_trait]
impl Gate for TimeVerifyGate {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn order(&self) -> GateOrder {
        GateOrder::TIME_VERIFY
    }

    async fn check(&self, ctx: &GatewayContext) -> Result<bool, GatewayError> {
        let now = Local::now().naive_local();
        match self.verify_at(ctx.timestamp(), now) {
            Freshness::Fresh { .. } => Ok(true),
            Freshness::Denied(reason) => {
                let elapsed_minutes = match reason {
                    DenyReason::StaleTimestamp { elapsed_minutes } => Some(elapsed_minutes),
                    _ => None,
                };
                warn!(
                    request_id = %ctx.request.id,
                    reason = reason.as_str(),
                    elapsed_minutes = ?elapsed_minutes,
                    allowed_minutes = self.time_delay_minutes,
                    "request timestamp rejected"
                );
                Ok(false)
            }
        }
    }

    async fn deny(&self, _ctx: &GatewayContext) -> Result<GatewayResponse, GatewayError> {
        ApiResult::error(DENY_MESSAGE)
            .to_response(REQUEST_TIMEOUT)
            .map_err(|e| GatewayError::GateFailed {
                gate: Self::NAME.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use freshgate_kernel::gateway::{GatewayRequest, HttpMethod, RequestDescriptor};

    fn gate() -> TimeVerifyGate {
        TimeVerifyGate::new(&TimeVerifyConfig::new(10))
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|d| d.and_hms_opt(13, 45, 0))
            .unwrap()
    }

    fn minutes_before(now: NaiveDateTime, minutes: i64) -> String {
        (now - TimeDelta::minutes(minutes))
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    fn ctx_with(timestamp: Option<&str>) -> GatewayContext {
        let mut descriptor = RequestDescriptor::default();
        descriptor.timestamp = timestamp.map(str::to_string);
        GatewayContext::new(GatewayRequest::new("req-1", "/order", HttpMethod::Post))
            .with_descriptor(descriptor)
    }

    #[test]
    fn five_minutes_old_is_fresh() {
        let ts = minutes_before(now(), 5);
        assert_eq!(
            gate().verify_at(Some(&ts), now()),
            Freshness::Fresh { elapsed_minutes: 5 }
        );
    }

    #[test]
    fn fifteen_minutes_old_is_stale() {
        let ts = minutes_before(now(), 15);
        assert_eq!(
            gate().verify_at(Some(&ts), now()),
            Freshness::Denied(DenyReason::StaleTimestamp { elapsed_minutes: 15 })
        );
    }

    #[test]
    fn exact_boundary_is_stale() {
        let ts = minutes_before(now(), 10);
        assert!(!gate().is_fresh_at(Some(&ts), now()));
    }

    #[test]
    fn just_under_boundary_is_fresh() {
        // 9m59s truncates to 9 whole minutes.
        let ts = (now() - TimeDelta::seconds(599))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert!(gate().is_fresh_at(Some(&ts), now()));
    }

    #[test]
    fn blank_and_missing_are_denied_without_parsing() {
        for ts in [None, Some(""), Some("   ")] {
            assert_eq!(
                gate().verify_at(ts, now()),
                Freshness::Denied(DenyReason::MissingTimestamp)
            );
        }
    }

    #[test]
    fn malformed_timestamp_is_denied() {
        for ts in ["yesterday", "2024-05-01T13:40:00", "1714570800", "2024-13-01 00:00:00"] {
            assert_eq!(
                gate().verify_at(Some(ts), now()),
                Freshness::Denied(DenyReason::MalformedTimestamp),
                "{ts}"
            );
        }
    }

    #[test]
    fn future_timestamp_goes_through_same_comparison() {
        let ts = (now() + TimeDelta::minutes(30))
            .format(TIMESTAMP_FORMAT)
            .to_string();
        assert_eq!(
            gate().verify_at(Some(&ts), now()),
            Freshness::Fresh { elapsed_minutes: -30 }
        );
    }

    #[test]
    fn same_inputs_same_verdict() {
        let ts = minutes_before(now(), 7);
        let g = gate();
        assert_eq!(g.verify_at(Some(&ts), now()), g.verify_at(Some(&ts), now()));
    }

    #[tokio::test]
    async fn check_uses_wall_clock() {
        let wall = Local::now().naive_local();
        let g = gate();

        let fresh = ctx_with(Some(&minutes_before(wall, 5)));
        assert!(g.check(&fresh).await.unwrap());

        let stale = ctx_with(Some(&minutes_before(wall, 15)));
        assert!(!g.check(&stale).await.unwrap());

        // Formatting drops sub-seconds and the clock moves on, so this is
        // never less than ten minutes old by the time it is checked.
        let boundary = ctx_with(Some(&minutes_before(wall, 10)));
        assert!(!g.check(&boundary).await.unwrap());
    }

    #[tokio::test]
    async fn check_denies_when_descriptor_missing() {
        let ctx = GatewayContext::new(GatewayRequest::new("req-2", "/order", HttpMethod::Get));
        assert!(!gate().check(&ctx).await.unwrap());
    }

    #[tokio::test]
    async fn check_does_not_touch_descriptor() {
        let ctx = ctx_with(Some("not a time"));
        let before = ctx.descriptor.clone();
        assert!(!gate().check(&ctx).await.unwrap());
        assert_eq!(ctx.descriptor, before);
    }

    #[tokio::test]
    async fn deny_writes_408_with_fixed_message() {
        let resp = gate().deny(&ctx_with(None)).await.unwrap();
        assert_eq!(resp.status, 408);
        assert_eq!(
            resp.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "status": "error", "message": "timestamp is not passed validation" })
        );
    }
}
