//! Lot pagination
//!
//! Paginated ChessERP endpoints return one lot per call together with a
//! counter string like `"1/70. Total: 6912"`. [`BatchFetcher`] requests lot 1,
//! reads the total from that counter and walks the remaining lots strictly in
//! order, concatenating raw items without deduplication.

use crate::adapters::chess::extractor::{Endpoint, LotEnvelope};
use crate::adapters::chess::session::SessionManager;
use crate::adapters::chess::transport::HttpRequest;
use crate::domain::{ChessError, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

/// How the total in a lot counter is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotCounterRule {
    /// Total is a plain run of digits
    Plain,
    /// Total may carry thousands separators (`1.234`, `1,234`) that are removed
    StripTotalSeparators,
}

/// Position parsed from a lot counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotPosition {
    pub current: u32,
    pub total: u32,
}

fn plain_counter_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*/\s*(\d+)").ok())
        .as_ref()
}

fn grouped_counter_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*/\s*(\d{1,3}(?:[.,]\d{3})+|\d+)").ok())
        .as_ref()
}

/// Parses `"<current>/<total>"` out of free text
///
/// Returns `None` when the text holds no `digits/digits` pair.
///
/// # Examples
///
/// ```
/// use chess_erp::core::batch::{parse_lot_counter, LotCounterRule, LotPosition};
///
/// let pos = parse_lot_counter("1/70.", LotCounterRule::Plain).unwrap();
/// assert_eq!(pos, LotPosition { current: 1, total: 70 });
///
/// let pos = parse_lot_counter("1/1.234. Total", LotCounterRule::StripTotalSeparators).unwrap();
/// assert_eq!(pos.total, 1234);
/// ```
pub fn parse_lot_counter(text: &str, rule: LotCounterRule) -> Option<LotPosition> {
    let re = match rule {
        LotCounterRule::Plain => plain_counter_regex()?,
        LotCounterRule::StripTotalSeparators => grouped_counter_regex()?,
    };
    let caps = re.captures(text)?;
    let current = caps.get(1)?.as_str().parse().ok()?;
    let total_digits: String = caps
        .get(2)?
        .as_str()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let total = total_digits.parse().ok()?;
    Some(LotPosition { current, total })
}

/// Sequential lot pagination over an authenticated session
#[derive(Debug)]
pub struct BatchFetcher {
    session: SessionManager,
    strip_total_separators: HashSet<Endpoint>,
}

impl BatchFetcher {
    /// Creates a fetcher; `strip_total_separators` lists the endpoints whose
    /// counter totals may carry thousands separators
    pub fn new(session: SessionManager, strip_total_separators: impl IntoIterator<Item = Endpoint>) -> Self {
        Self {
            session,
            strip_total_separators: strip_total_separators.into_iter().collect(),
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    /// Counter rule in effect for an endpoint
    pub fn counter_rule(&self, endpoint: Endpoint) -> LotCounterRule {
        if self.strip_total_separators.contains(&endpoint) {
            LotCounterRule::StripTotalSeparators
        } else {
            LotCounterRule::Plain
        }
    }

    /// Fetches one raw envelope
    ///
    /// `lot` is only sent on endpoints that paginate; it is ignored elsewhere.
    pub async fn fetch_lot(
        &mut self,
        endpoint: Endpoint,
        base_params: &[(String, String)],
        lot: Option<u32>,
    ) -> Result<Value> {
        let mut query = base_params.to_vec();
        if let (Some(param), Some(lot)) = (endpoint.lot_param(), lot) {
            query.retain(|(k, _)| k != param);
            query.push((param.to_string(), lot.to_string()));
        }

        let url = format!("{}{}", self.session.instance().api_base(), endpoint.path());
        tracing::debug!(
            instance = %self.session.instance_name(),
            endpoint = %endpoint,
            lot = ?lot,
            "Requesting lot"
        );

        let response = self
            .session
            .execute(HttpRequest::get(url).with_query(query))
            .await?;

        response.json().map_err(|e| {
            ChessError::api(
                Some(response.status),
                format!("Invalid JSON from {endpoint} endpoint"),
                Some(e.to_string()),
            )
        })
    }

    /// Fetches every lot of an endpoint and returns the concatenated raw items
    ///
    /// Items keep lot order, and server order within each lot.
    pub async fn fetch_all(
        &mut self,
        endpoint: Endpoint,
        base_params: &[(String, String)],
    ) -> Result<Vec<Value>> {
        self.session.ensure_session().await?;

        let extractor = endpoint.extractor();
        let mut items = Vec::new();

        if endpoint.lot_param().is_none() {
            let envelope = extractor.extract(self.fetch_lot(endpoint, base_params, None).await?);
            self.accumulate(endpoint, 1, envelope, &mut items);
            return Ok(items);
        }

        let first = extractor.extract(self.fetch_lot(endpoint, base_params, Some(1)).await?);
        let position = self.lot_position(endpoint, first.counter_text.as_deref(), extractor.has_counter());
        self.accumulate(endpoint, 1, first, &mut items);

        if position.total > position.current {
            tracing::info!(
                instance = %self.session.instance_name(),
                endpoint = %endpoint,
                total_lots = position.total,
                "Fetching remaining lots"
            );
        }

        for lot in position.current.saturating_add(1)..=position.total {
            let envelope = extractor.extract(self.fetch_lot(endpoint, base_params, Some(lot)).await?);
            self.accumulate(endpoint, lot, envelope, &mut items);
        }

        tracing::info!(
            instance = %self.session.instance_name(),
            endpoint = %endpoint,
            items = items.len(),
            "Fetch complete"
        );
        Ok(items)
    }

    fn lot_position(&self, endpoint: Endpoint, counter: Option<&str>, expects_counter: bool) -> LotPosition {
        let single = LotPosition { current: 1, total: 1 };
        let Some(text) = counter else {
            if expects_counter {
                tracing::warn!(endpoint = %endpoint, "Lot counter missing, assuming a single lot");
            } else {
                tracing::debug!(endpoint = %endpoint, "No lot counter for endpoint");
            }
            return single;
        };

        match parse_lot_counter(text, self.counter_rule(endpoint)) {
            Some(position) => {
                tracing::debug!(
                    endpoint = %endpoint,
                    current = position.current,
                    total = position.total,
                    counter = %text,
                    "Parsed lot counter"
                );
                position
            }
            None => {
                tracing::warn!(
                    endpoint = %endpoint,
                    counter = %text,
                    "Unrecognized lot counter, assuming a single lot"
                );
                single
            }
        }
    }

    fn accumulate(&self, endpoint: Endpoint, lot: u32, envelope: LotEnvelope, items: &mut Vec<Value>) {
        match envelope.into_items() {
            Value::Array(lot_items) => {
                if lot_items.is_empty() {
                    tracing::info!(endpoint = %endpoint, lot = lot, "Lot returned no items");
                } else {
                    tracing::debug!(endpoint = %endpoint, lot = lot, count = lot_items.len(), "Lot received");
                }
                items.extend(lot_items);
            }
            other => {
                tracing::warn!(
                    endpoint = %endpoint,
                    lot = lot,
                    kind = json_kind(&other),
                    "Lot items are not a list, counting zero items"
                );
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::chess::transport::testing::ScriptedTransport;
    use crate::config::InstanceConfig;
    use serde_json::json;
    use std::sync::Arc;
    use test_case::test_case;

    #[test_case("1/70.", LotCounterRule::Plain, Some((1, 70)) ; "trailing period")]
    #[test_case("1/3. Total: 250", LotCounterRule::Plain, Some((1, 3)) ; "with total suffix")]
    #[test_case("Lote 2 / 5", LotCounterRule::Plain, Some((2, 5)) ; "spaced slash")]
    #[test_case("1/1.234. Total", LotCounterRule::StripTotalSeparators, Some((1, 1234)) ; "dot grouping stripped")]
    #[test_case("1/12,500", LotCounterRule::StripTotalSeparators, Some((1, 12500)) ; "comma grouping stripped")]
    #[test_case("1/70.", LotCounterRule::StripTotalSeparators, Some((1, 70)) ; "strip keeps bare trailing period")]
    #[test_case("1/1.234. Total", LotCounterRule::Plain, Some((1, 1)) ; "plain ignores grouping")]
    #[test_case("sin lotes", LotCounterRule::Plain, None ; "no digits")]
    #[test_case("", LotCounterRule::StripTotalSeparators, None ; "empty")]
    fn test_parse_lot_counter(text: &str, rule: LotCounterRule, expected: Option<(u32, u32)>) {
        let parsed = parse_lot_counter(text, rule).map(|p| (p.current, p.total));
        assert_eq!(parsed, expected);
    }

    fn fetcher(transport: &Arc<ScriptedTransport>) -> BatchFetcher {
        let instance = InstanceConfig::new("s", "http://erp.local", "u", "p");
        BatchFetcher::new(SessionManager::new(instance, transport.clone()), [Endpoint::Sales])
    }

    fn sales_lot(ids: &[i64], counter: &str) -> Value {
        let items: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        json!({
            "dsReporteComprobantesApi": {"VentasResumen": items},
            "cantComprobantesVentas": counter
        })
    }

    fn ids(items: &[Value]) -> Vec<i64> {
        items.iter().filter_map(|v| v["id"].as_i64()).collect()
    }

    #[test]
    fn test_counter_rule_per_endpoint() {
        let transport = Arc::new(ScriptedTransport::new());
        let fetcher = fetcher(&transport);
        assert_eq!(fetcher.counter_rule(Endpoint::Sales), LotCounterRule::StripTotalSeparators);
        assert_eq!(fetcher.counter_rule(Endpoint::Articles), LotCounterRule::Plain);
    }

    #[tokio::test]
    async fn test_two_lots_in_order() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "ABC123"}))
            .push_json(200, sales_lot(&[1, 2], "1/2. Total: 3"))
            .push_json(200, sales_lot(&[3], "2/2. Total: 3"));

        let mut fetcher = fetcher(&transport);
        let params = vec![("fechaDesde".to_string(), "2025-01-01".to_string())];
        let items = fetcher.fetch_all(Endpoint::Sales, &params).await.unwrap();
        assert_eq!(ids(&items), vec![1, 2, 3]);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].url, "http://erp.local/web/api/chess/v1/ventas/");
        assert_eq!(requests[1].query_param("nroLote"), Some("1"));
        assert_eq!(requests[1].query_param("fechaDesde"), Some("2025-01-01"));
        assert_eq!(requests[2].query_param("nroLote"), Some("2"));
    }

    #[tokio::test]
    async fn test_empty_lot_does_not_stop_pagination() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "ABC123"}))
            .push_json(200, sales_lot(&[1], "1/3"))
            .push_json(200, sales_lot(&[], "2/3"))
            .push_json(200, sales_lot(&[5], "3/3"));

        let items = fetcher(&transport)
            .fetch_all(Endpoint::Sales, &[])
            .await
            .unwrap();
        assert_eq!(ids(&items), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_unrecognized_counter_means_single_lot() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "ABC123"}))
            .push_json(200, sales_lot(&[1, 2], "sin datos"));

        let items = fetcher(&transport)
            .fetch_all(Endpoint::Sales, &[])
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_unpaginated_endpoint_sends_no_lot() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "ABC123"}))
            .push_json(200, json!({"dsStockFisicoApi": {"dsStock": [{"id": 9}]}}));

        let items = fetcher(&transport)
            .fetch_all(Endpoint::Stock, &[])
            .await
            .unwrap();
        assert_eq!(ids(&items), vec![9]);
        assert_eq!(transport.requests()[1].query_param("nroLote"), None);
    }

    #[tokio::test]
    async fn test_reauth_mid_pagination_resumes() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_json(200, sales_lot(&[1], "1/2"))
            .push_text(401, "expired")
            .push_json(200, json!({"sessionId": "B"}))
            .push_json(200, sales_lot(&[2], "2/2"));

        let items = fetcher(&transport)
            .fetch_all(Endpoint::Sales, &[])
            .await
            .unwrap();
        assert_eq!(ids(&items), vec![1, 2]);
        assert_eq!(transport.requests()[4].query_param("nroLote"), Some("2"));
    }

    #[tokio::test]
    async fn test_server_error_aborts_fetch() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_json(200, sales_lot(&[1], "1/3"))
            .push_text(502, "bad gateway");

        let err = fetcher(&transport)
            .fetch_all(Endpoint::Sales, &[])
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_non_json_body_is_api_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_text(200, "<html>maintenance</html>");

        let err = fetcher(&transport)
            .fetch_all(Endpoint::Stock, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ChessError::Api { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_fetch_lot_overrides_lot_param() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .push_json(200, json!({"sessionId": "A"}))
            .push_json(200, json!({"Clientes": {"eClientes": []}}));

        let mut fetcher = fetcher(&transport);
        let params = vec![("nroLote".to_string(), "1".to_string())];
        fetcher
            .fetch_lot(Endpoint::Customers, &params, Some(4))
            .await
            .unwrap();

        let query = &transport.requests()[1].query;
        assert_eq!(query, &vec![("nroLote".to_string(), "4".to_string())]);
    }
}
