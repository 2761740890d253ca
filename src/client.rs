//! The shared CMS query client.
//!
//! One [`CmsClient`] is constructed per generation pass and handed by
//! reference to the orchestrator — there is no global lookup. It owns the
//! HTTP connection and the pass-wide result cache.
//!
//! ## Cache-merge policy
//!
//! The cache is keyed per the [`CachePolicy`] declared on each operation
//! (see [`queries`](crate::queries)) and is strictly replace-only:
//!
//! - A repeated identical `(operation, variables)` query within one pass
//!   is answered from the cache without a network call.
//! - For by-URI operations, all lookups of the same URI share one cache
//!   slot. A query with a different field selection misses, goes to the
//!   network, and its result **fully replaces** the stored node — no
//!   structural merge, because resolved node shapes change across CMS
//!   edits and a merge would let stale fields linger.
//! - Denormalized field groups have no identity of their own; they are
//!   stored inline on their parent node, never normalized out.
//!
//! ## Failure
//!
//! Network and GraphQL errors surface as a failed operation. The client
//! never retries; required-vs-optional handling is the orchestrator's
//! job. An unconfigured endpoint still yields a working client whose
//! every query fails with [`ClientError::EndpointUnset`], so a build
//! pass can start and report per-route failures instead of crashing.

use crate::queries::{CachePolicy, Operation};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(
        "no GraphQL endpoint configured: set HOMEPRESS_GRAPHQL_ENDPOINT or HOMEPRESS_CMS_URL"
    )]
    EndpointUnset,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GraphQL error: {0}")]
    Graphql(String),
}

/// Transport seam between the client and the wire.
///
/// The production implementation is [`HttpTransport`]; tests use the
/// recording mock in [`tests`] so orchestration logic runs without a
/// network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one operation and return the `data` portion of the
    /// response.
    async fn execute(&self, operation: &Operation, variables: &Value)
    -> Result<Value, ClientError>;
}

/// reqwest-backed transport posting standard GraphQL request bodies.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        operation: &Operation,
        variables: &Value,
    ) -> Result<Value, ClientError> {
        let endpoint = self.endpoint.as_deref().ok_or(ClientError::EndpointUnset)?;
        let response = self
            .http
            .post(endpoint)
            .json(&json!({
                "query": operation.document,
                "operationName": operation.name,
                "variables": variables,
            }))
            .send()
            .await?
            .error_for_status()?;
        let mut body: Value = response.json().await?;
        if let Some(errors) = body["errors"].as_array()
            && !errors.is_empty()
        {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e["message"].as_str())
                .collect();
            return Err(ClientError::Graphql(messages.join("; ")));
        }
        Ok(body
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }
}

/// One cached result: the operation that produced it plus its data. The
/// operation name makes a shared by-URI slot distinguishable, so a
/// repeat of the *same* selection hits while a different selection
/// misses and replaces.
struct CacheSlot {
    operation: &'static str,
    data: Value,
}

/// The shared query client. See the module docs for the cache contract.
pub struct CmsClient {
    transport: Box<dyn Transport>,
    cache: Mutex<HashMap<String, CacheSlot>>,
}

impl CmsClient {
    /// Production client over HTTP. `endpoint` is the resolved GraphQL
    /// URL, or `None` when no configuration source provided one.
    pub fn new(endpoint: Option<String>) -> Self {
        Self::with_transport(Box::new(HttpTransport::new(endpoint)))
    }

    /// Client over an arbitrary transport (tests).
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Issue a query, answering from the pass cache when the same
    /// operation and variables were already resolved. New results
    /// unconditionally replace whatever their cache slot held.
    pub async fn query(
        &self,
        operation: &'static Operation,
        variables: Value,
    ) -> Result<Value, ClientError> {
        let key = cache_key(operation, &variables);
        {
            let cache = self.cache.lock().unwrap();
            if let Some(slot) = cache.get(&key)
                && slot.operation == operation.name
            {
                return Ok(slot.data.clone());
            }
        }
        let data = self.transport.execute(operation, &variables).await?;
        self.cache.lock().unwrap().insert(
            key,
            CacheSlot {
                operation: operation.name,
                data: data.clone(),
            },
        );
        Ok(data)
    }

    /// Raw view of a cache slot, for asserting replace semantics.
    #[cfg(test)]
    fn peek_slot(&self, operation: &Operation, variables: &Value) -> Option<Value> {
        self.cache
            .lock()
            .unwrap()
            .get(&cache_key(operation, variables))
            .map(|slot| slot.data.clone())
    }
}

/// Derive the cache key for an operation per its declared policy.
fn cache_key(operation: &Operation, variables: &Value) -> String {
    match operation.cache_policy {
        CachePolicy::ByUriArgument => {
            // The URI argument alone; other arguments and the selection
            // are ignored so all by-URI lookups share the slot.
            format!("nodeByUri:{}", variables["uri"].as_str().unwrap_or(""))
        }
        CachePolicy::ByFullArguments => {
            let serialized = serde_json::to_string(variables).unwrap_or_default();
            format!("{}:{}", operation.name, serialized)
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::queries::{HOME_CONTACT, HOME_PAGE, LISTINGS, MENU_BY_SLUG};

    /// Mock transport serving canned responses keyed by operation name,
    /// recording every executed call. Cheaply cloneable so a test can
    /// keep a handle for assertions after the client takes its copy.
    /// Uses Mutex (not RefCell) so it satisfies the `Send + Sync`
    /// transport bound.
    #[derive(Default, Clone)]
    pub struct MockTransport {
        state: std::sync::Arc<MockState>,
    }

    #[derive(Default)]
    struct MockState {
        responses: Mutex<HashMap<String, Result<Value, String>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve `data` for every execution of `operation`.
        pub fn respond(self, operation: &Operation, data: Value) -> Self {
            self.state
                .responses
                .lock()
                .unwrap()
                .insert(operation.name.to_string(), Ok(data));
            self
        }

        /// Fail every execution of `operation` with a GraphQL error.
        pub fn fail(self, operation: &Operation, message: &str) -> Self {
            self.state
                .responses
                .lock()
                .unwrap()
                .insert(operation.name.to_string(), Err(message.to_string()));
            self
        }

        /// Build a client over a clone of this transport.
        pub fn into_client(&self) -> CmsClient {
            CmsClient::with_transport(Box::new(self.clone()))
        }

        /// Every `(operation name, variables)` pair that reached the wire.
        pub fn calls(&self) -> Vec<(String, Value)> {
            self.state.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self, operation: &Operation) -> usize {
            self.state
                .calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(name, _)| name == operation.name)
                .count()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(
            &self,
            operation: &Operation,
            variables: &Value,
        ) -> Result<Value, ClientError> {
            self.state
                .calls
                .lock()
                .unwrap()
                .push((operation.name.to_string(), variables.clone()));
            match self.state.responses.lock().unwrap().get(operation.name) {
                Some(Ok(data)) => Ok(data.clone()),
                Some(Err(message)) => Err(ClientError::Graphql(message.clone())),
                None => Err(ClientError::Graphql(format!(
                    "no canned response for {}",
                    operation.name
                ))),
            }
        }
    }

    // =========================================================================
    // Cache behavior
    // =========================================================================

    #[tokio::test]
    async fn identical_query_is_answered_from_cache() {
        let transport =
            MockTransport::new().respond(&LISTINGS, json!({"listings": {"nodes": []}}));
        let client = transport.into_client();

        let first = client.query(&LISTINGS, json!({"first": 4})).await.unwrap();
        let second = client.query(&LISTINGS, json!({"first": 4})).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.call_count(&LISTINGS), 1);
    }

    #[tokio::test]
    async fn different_arguments_are_distinct_cache_entries() {
        let transport =
            MockTransport::new().respond(&LISTINGS, json!({"listings": {"nodes": []}}));
        let client = transport.into_client();

        client.query(&LISTINGS, json!({"first": 4})).await.unwrap();
        client.query(&LISTINGS, json!({"first": 8})).await.unwrap();

        assert_eq!(transport.call_count(&LISTINGS), 2);
    }

    #[tokio::test]
    async fn by_uri_slot_is_fully_replaced_by_a_different_selection() {
        let home_node = json!({"nodeByUri": {"hero": {"headline": "hi"}, "contact": {"phone": "1"}}});
        let contact_node = json!({"nodeByUri": {"contact": {"phone": "1"}}});
        let transport = MockTransport::new()
            .respond(&HOME_PAGE, home_node.clone())
            .respond(&HOME_CONTACT, contact_node.clone());
        let client = transport.into_client();

        client.query(&HOME_PAGE, json!({"uri": "/"})).await.unwrap();
        assert_eq!(
            client.peek_slot(&HOME_PAGE, &json!({"uri": "/"})),
            Some(home_node)
        );

        client
            .query(&HOME_CONTACT, json!({"uri": "/"}))
            .await
            .unwrap();

        // Old hero fields must not linger in the shared slot.
        let slot = client
            .peek_slot(&HOME_PAGE, &json!({"uri": "/"}))
            .unwrap();
        assert_eq!(slot, contact_node);
        assert!(slot["nodeByUri"]["hero"].is_null());
        assert_eq!(transport.call_count(&HOME_PAGE), 1);
        assert_eq!(transport.call_count(&HOME_CONTACT), 1);
    }

    #[tokio::test]
    async fn by_uri_operations_ignore_non_uri_arguments() {
        let transport = MockTransport::new().respond(&HOME_PAGE, json!({"nodeByUri": null}));
        let client = transport.into_client();

        client
            .query(&HOME_PAGE, json!({"uri": "/", "extra": 1}))
            .await
            .unwrap();
        client
            .query(&HOME_PAGE, json!({"uri": "/", "extra": 2}))
            .await
            .unwrap();

        assert_eq!(transport.call_count(&HOME_PAGE), 1);
    }

    // =========================================================================
    // Failure propagation
    // =========================================================================

    #[tokio::test]
    async fn graphql_errors_propagate_and_are_not_cached() {
        let transport = MockTransport::new().fail(&MENU_BY_SLUG, "menu service down");
        let client = transport.into_client();

        let first = client
            .query(&MENU_BY_SLUG, json!({"slug": "primary"}))
            .await;
        assert!(matches!(first, Err(ClientError::Graphql(_))));

        // No retry inside the client, but a later identical query goes
        // back to the wire because failures never enter the cache.
        let _ = client
            .query(&MENU_BY_SLUG, json!({"slug": "primary"}))
            .await;
        assert_eq!(transport.call_count(&MENU_BY_SLUG), 2);
    }

    #[tokio::test]
    async fn unset_endpoint_fails_at_request_time() {
        let client = CmsClient::new(None);
        let result = client.query(&LISTINGS, json!({"first": 4})).await;
        assert!(matches!(result, Err(ClientError::EndpointUnset)));
    }
}
