//! Typed CRUD operations over one remote resource collection.
//!
//! # Design
//! `ClientTemplate` turns intent-level calls (`find_one`, `create`, ...) into
//! `HttpRequest`s, hands them to its `Transport`, and decodes the answers with
//! its `Marshaller`. Everything resource-specific (collection URI, default
//! principal, header hooks) comes from an `Endpoint`, so one template type
//! serves every entity.
//!
//! Status policy:
//! - `find_one` treats any 4xx as absence and returns `Ok(None)`.
//! - `find_one_by_uri` and every collection read propagate any non-2xx as
//!   `TemplateError::Http`. The two single-resource lookups deliberately
//!   disagree on 4xx.
//! - `create*` needs a 2xx carrying `Location`, `update` exactly 200, and
//!   `delete` exactly 204. Another 2xx is an invariant violation; a non-2xx is
//!   propagated as `Http`.
//! - An empty collection body decodes to an empty `Vec`, and an empty
//!   single-resource body from `find_one` means absence.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::{AuthScheme, Authenticator, Credentials};
use crate::error::{Result, TemplateError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::marshaller::{accept_headers, content_type_headers, JsonMarshaller, Marshaller};
use crate::query::{
    construct_query, Constraint, PageRequest, SortOrder, NAME, SORT_BY, SORT_ORDER,
};
use crate::transport::{Transport, UreqTransport};

pub const LOCATION: &str = "location";

/// A remote entity with an identity and a name.
pub trait NameableResource: Serialize + DeserializeOwned + Clone + fmt::Debug {
    type Id: fmt::Display;

    /// `None` until the server has assigned one.
    fn id(&self) -> Option<&Self::Id>;

    fn name(&self) -> &str;
}

/// Per-entity hooks a concrete resource client provides.
pub trait Endpoint: Send + Sync {
    type Resource: NameableResource;

    /// Collection URI, without a trailing slash.
    fn uri(&self) -> &str;

    fn auth_scheme(&self) -> AuthScheme {
        AuthScheme::Basic
    }

    /// Principal installed whenever authentication is applied without
    /// explicit credentials.
    fn default_principal(&self) -> Credentials;

    /// Runs before every read request.
    fn before_read_operation(&self) {}

    fn find_headers(&self, media_type: &str) -> Vec<(String, String)> {
        accept_headers(media_type)
    }

    fn write_headers(&self, media_type: &str) -> Vec<(String, String)> {
        content_type_headers(media_type)
    }
}

/// Fixture hooks used by tests to produce and mutate entities.
pub trait EntityFixture<R> {
    /// A fresh, valid, not yet persisted entity.
    fn create_new_entity(&self) -> R;

    /// Alters a caller-visible field so an update is observable.
    fn change(&self, resource: &mut R);

    /// Makes the entity fail server-side validation.
    fn invalidate(&self, resource: &mut R);
}

/// Generic CRUD client for the collection described by `E`.
#[derive(Debug)]
pub struct ClientTemplate<E, T = UreqTransport, M = JsonMarshaller> {
    endpoint: E,
    transport: T,
    marshaller: M,
    authenticator: Authenticator,
}

type Id<E> = <<E as Endpoint>::Resource as NameableResource>::Id;

impl<E, T, M> ClientTemplate<E, T, M>
where
    E: Endpoint,
    T: Transport,
    M: Marshaller,
{
    pub fn new(endpoint: E, transport: T, marshaller: M) -> Self {
        let authenticator =
            Authenticator::new(endpoint.auth_scheme(), endpoint.default_principal());
        Self {
            endpoint,
            transport,
            marshaller,
            authenticator,
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    pub fn uri(&self) -> &str {
        self.endpoint.uri()
    }

    // find - one

    /// `GET {uri}/{id}`. Any 4xx (not found, forbidden, ...) and a 2xx with
    /// an empty body yield `Ok(None)`.
    pub fn find_one(&self, id: &Id<E>) -> Result<Option<E::Resource>> {
        let response = self.read(self.resource_uri(id))?;
        if response.is_client_error() {
            tracing::debug!(id = %id, status = response.status, "resource absent");
            return Ok(None);
        }
        let response = expect_success(response)?;
        if response.body.trim().is_empty() {
            tracing::debug!(id = %id, status = response.status, "empty resource body");
            return Ok(None);
        }
        self.marshaller.decode(&response.body).map(Some)
    }

    /// `GET uri`. Every non-2xx is an error, 4xx included.
    pub fn find_one_by_uri(&self, uri: &str) -> Result<E::Resource> {
        let response = expect_success(self.read(uri.to_string())?)?;
        self.marshaller.decode(&response.body)
    }

    // find one - by attributes

    pub fn find_by_name(&self, name: &str) -> Result<E::Resource> {
        let uri = format!("{}{}", self.uri(), construct_query(&[(NAME, name)]));
        self.find_one_by_uri(&uri)
    }

    /// Filters the collection and requires at most one match.
    ///
    /// The users service answers a filter made only of `name` with a single
    /// object, which fails to decode as a list; use `find_by_name` there.
    pub fn find_one_by_attributes<K, V>(
        &self,
        attributes: &[(K, V)],
    ) -> Result<Option<E::Resource>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut matches = self.find_all_by_attributes(attributes)?;
        if matches.len() > 1 {
            tracing::warn!(
                count = matches.len(),
                uri = self.uri(),
                "attribute lookup is ambiguous"
            );
            return Err(TemplateError::InvariantViolation(format!(
                "expected at most one resource, found {}",
                matches.len()
            )));
        }
        Ok(matches.pop())
    }

    // find - all

    pub fn find_all(&self) -> Result<Vec<E::Resource>> {
        self.find_all_by_uri(self.uri())
    }

    pub fn find_all_paginated(&self, page: u32, size: u32) -> Result<Vec<E::Resource>> {
        self.find_page(&PageRequest::unsorted(page, size))
    }

    pub fn find_all_sorted(
        &self,
        sort_by: &str,
        sort_order: SortOrder,
    ) -> Result<Vec<E::Resource>> {
        let query = construct_query(&[(SORT_BY, sort_by), (SORT_ORDER, sort_order.as_str())]);
        self.find_all_by_uri(&format!("{}{query}", self.uri()))
    }

    /// Fails with `Precondition` before sending anything when `sort_order` is
    /// given without `sort_by`.
    pub fn find_all_paginated_and_sorted(
        &self,
        page: u32,
        size: u32,
        sort_by: Option<&str>,
        sort_order: Option<SortOrder>,
    ) -> Result<Vec<E::Resource>> {
        let request = PageRequest::new(page, size, sort_by.map(str::to_string), sort_order)?;
        self.find_page(&request)
    }

    pub fn find_page(&self, request: &PageRequest) -> Result<Vec<E::Resource>> {
        tracing::debug!(page = request.page(), size = request.size(), "fetching page");
        let query = construct_query(&request.query_pairs());
        self.find_all_by_uri(&format!("{}{query}", self.uri()))
    }

    /// Same `name`-only caveat as `find_one_by_attributes`.
    pub fn find_all_by_attributes<K, V>(&self, attributes: &[(K, V)]) -> Result<Vec<E::Resource>>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let uri = format!("{}{}", self.uri(), construct_query(attributes));
        self.find_all_by_uri(&uri)
    }

    pub fn find_all_by_uri(&self, uri: &str) -> Result<Vec<E::Resource>> {
        let response = expect_success(self.read(uri.to_string())?)?;
        if response.body.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.marshaller.decode_list(&response.body)
    }

    // create

    /// Creates `resource`, then fetches it back from its `Location`.
    pub fn create(&self, resource: &E::Resource) -> Result<E::Resource> {
        let location = self.create_as_uri(resource)?;
        self.find_one_by_uri(&location)
    }

    /// Creates `resource` under the default principal and returns its
    /// absolute `Location`.
    #[tracing::instrument(skip_all, fields(uri = self.uri()))]
    pub fn create_as_uri(&self, resource: &E::Resource) -> Result<String> {
        self.given_authenticated(None)?;
        let response = expect_success(self.write(HttpMethod::Post, resource)?)?;

        let Some(location) = response.header(LOCATION) else {
            tracing::warn!(status = response.status, "created resource has no Location");
            return Err(TemplateError::InvariantViolation(
                "create response carries no Location header".to_string(),
            ));
        };
        self.resolve(location)
    }

    // update

    /// Replaces `resource` under the default principal. Requires 200.
    #[tracing::instrument(skip_all, fields(uri = self.uri()))]
    pub fn update(&self, resource: &E::Resource) -> Result<()> {
        self.given_authenticated(None)?;
        let response = expect_success(self.write(HttpMethod::Put, resource)?)?;
        expect_exact_status(&response, 200, "update")
    }

    // delete

    /// `DELETE {uri}/{id}`. Requires 204.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub fn delete(&self, id: &Id<E>) -> Result<()> {
        let request = HttpRequest::new(HttpMethod::Delete, self.resource_uri(id));
        let response = expect_success(self.exchange(request)?)?;
        expect_exact_status(&response, 204, "delete")
    }

    pub fn delete_all(&self) -> Result<()> {
        Err(TemplateError::Unsupported("delete all"))
    }

    // search

    pub fn search(&self, _constraints: &[Constraint]) -> Result<Vec<E::Resource>> {
        Err(TemplateError::Unsupported("search"))
    }

    // count

    pub fn count(&self) -> Result<u64> {
        Err(TemplateError::Unsupported("count"))
    }

    // authentication

    /// Installs `credentials` for subsequent requests; `None` selects the
    /// endpoint's default principal.
    pub fn given_authenticated(&self, credentials: Option<Credentials>) -> Result<&Self> {
        self.authenticator.authenticate(credentials)?;
        Ok(self)
    }

    // util

    fn resource_uri(&self, id: &Id<E>) -> String {
        format!("{}/{id}", self.uri())
    }

    fn resolve(&self, location: &str) -> Result<String> {
        Url::parse(self.uri())
            .and_then(|base| base.join(location))
            .map(String::from)
            .map_err(|e| {
                TemplateError::InvariantViolation(format!("unusable Location {location}: {e}"))
            })
    }

    fn read(&self, uri: String) -> Result<HttpResponse> {
        self.endpoint.before_read_operation();
        let mut request = HttpRequest::new(HttpMethod::Get, uri);
        request.headers = self.endpoint.find_headers(self.marshaller.media_type());
        self.exchange(request)
    }

    fn write(&self, method: HttpMethod, resource: &E::Resource) -> Result<HttpResponse> {
        let mut request = HttpRequest::new(method, self.uri());
        request.headers = self.endpoint.write_headers(self.marshaller.media_type());
        request.body = Some(self.marshaller.encode(resource)?);
        self.exchange(request)
    }

    fn exchange(&self, mut request: HttpRequest) -> Result<HttpResponse> {
        if let Some(header) = self.authenticator.authorization_header() {
            request.headers.push(header);
        }
        tracing::debug!(method = request.method.as_str(), uri = %request.uri, "sending request");
        self.transport.exchange(request)
    }
}

/// Map non-2xx responses to `TemplateError::Http`.
fn expect_success(response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    Err(TemplateError::Http {
        status: response.status,
        body: response.body,
    })
}

fn expect_exact_status(response: &HttpResponse, expected: u16, operation: &str) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    tracing::warn!(operation, expected, status = response.status, "unexpected success status");
    Err(TemplateError::InvariantViolation(format!(
        "{operation} expected status {expected}, got {}",
        response.status
    )))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use serde::Deserialize;

    use super::*;

    const BASE: &str = "http://localhost:3000/api/items";

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        name: String,
    }

    impl NameableResource for Item {
        type Id = u64;

        fn id(&self) -> Option<&u64> {
            self.id.as_ref()
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct ItemEndpoint {
        scheme: AuthScheme,
    }

    impl Endpoint for ItemEndpoint {
        type Resource = Item;

        fn uri(&self) -> &str {
            BASE
        }

        fn auth_scheme(&self) -> AuthScheme {
            self.scheme
        }

        fn default_principal(&self) -> Credentials {
            Credentials::new("admin", "adminpass")
        }
    }

    /// Replays queued responses and records every request it was given.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().clone()
        }
    }

    impl Transport for &ScriptedTransport {
        fn exchange(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.lock().push(request);
            self.responses.lock().pop_front().unwrap_or_else(|| {
                Err(TemplateError::Transport("no scripted response".to_string()))
            })
        }
    }

    fn respond(status: u16, body: &str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn created(location: &str) -> Result<HttpResponse> {
        Ok(HttpResponse {
            status: 201,
            headers: vec![("Location".to_string(), location.to_string())],
            body: String::new(),
        })
    }

    fn scripted(responses: Vec<Result<HttpResponse>>) -> ScriptedTransport {
        ScriptedTransport {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn template(
        transport: &ScriptedTransport,
    ) -> ClientTemplate<ItemEndpoint, &ScriptedTransport, JsonMarshaller> {
        ClientTemplate::new(
            ItemEndpoint {
                scheme: AuthScheme::Basic,
            },
            transport,
            JsonMarshaller,
        )
    }

    fn item(id: u64, name: &str) -> Item {
        Item {
            id: Some(id),
            name: name.to_string(),
        }
    }

    #[test]
    fn find_one_decodes_resource() {
        let transport = scripted(vec![respond(200, r#"{"id":7,"name":"alpha"}"#)]);
        let found = template(&transport).find_one(&7).unwrap();
        assert_eq!(found, Some(item(7, "alpha")));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].uri, format!("{BASE}/7"));
        assert_eq!(requests[0].header("accept"), Some("application/json"));
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn find_one_empty_body_is_absent() {
        let transport = scripted(vec![respond(200, ""), respond(204, "")]);
        let template = template(&transport);
        assert_eq!(template.find_one(&7).unwrap(), None);
        assert_eq!(template.find_one(&7).unwrap(), None);
    }

    #[test]
    fn find_one_treats_any_client_error_as_absent() {
        for status in [400, 401, 403, 404, 410] {
            let transport = scripted(vec![respond(status, "nope")]);
            assert_eq!(template(&transport).find_one(&1).unwrap(), None, "status {status}");
        }
    }

    #[test]
    fn find_one_propagates_server_errors() {
        let transport = scripted(vec![respond(500, "boom")]);
        let err = template(&transport).find_one(&1).unwrap_err();
        assert!(matches!(err, TemplateError::Http { status: 500, .. }));
    }

    #[test]
    fn find_one_by_uri_propagates_client_errors() {
        let transport = scripted(vec![respond(404, "")]);
        let err = template(&transport)
            .find_one_by_uri(&format!("{BASE}/9"))
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn find_by_name_queries_collection() {
        let transport = scripted(vec![respond(200, r#"{"id":1,"name":"alpha beta"}"#)]);
        let found = template(&transport).find_by_name("alpha beta").unwrap();
        assert_eq!(found.name, "alpha beta");
        assert_eq!(transport.requests()[0].uri, format!("{BASE}?name=alpha+beta"));
    }

    #[test]
    fn find_one_by_attributes_outcomes() {
        let transport = scripted(vec![
            respond(200, "[]"),
            respond(200, r#"[{"id":1,"name":"a"}]"#),
            respond(200, r#"[{"id":1,"name":"a"},{"id":2,"name":"a"}]"#),
        ]);
        let template = template(&transport);
        let attrs = [("name", "a")];

        assert_eq!(template.find_one_by_attributes(&attrs).unwrap(), None);
        assert_eq!(template.find_one_by_attributes(&attrs).unwrap(), Some(item(1, "a")));
        let err = template.find_one_by_attributes(&attrs).unwrap_err();
        assert!(matches!(err, TemplateError::InvariantViolation(_)));

        assert_eq!(transport.requests()[0].uri, format!("{BASE}?name=a"));
    }

    #[test]
    fn find_all_empty_body_is_empty_list() {
        let transport = scripted(vec![respond(200, ""), respond(200, "[]")]);
        let template = template(&transport);
        assert!(template.find_all().unwrap().is_empty());
        assert!(template.find_all().unwrap().is_empty());
        assert_eq!(transport.requests()[0].uri, BASE);
    }

    #[test]
    fn find_all_propagates_errors() {
        let transport = scripted(vec![respond(403, "forbidden")]);
        let err = template(&transport).find_all().unwrap_err();
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn paging_and_sorting_uris() {
        let transport = scripted(vec![
            respond(200, "[]"),
            respond(200, "[]"),
            respond(200, "[]"),
            respond(200, "[]"),
        ]);
        let template = template(&transport);
        template.find_all_paginated(1, 20).unwrap();
        template.find_all_sorted("name", SortOrder::Desc).unwrap();
        template
            .find_all_paginated_and_sorted(0, 5, Some("id"), Some(SortOrder::Asc))
            .unwrap();
        template
            .find_all_paginated_and_sorted(2, 5, Some("id"), None)
            .unwrap();

        let uris: Vec<String> = transport.requests().into_iter().map(|r| r.uri).collect();
        assert_eq!(
            uris,
            vec![
                format!("{BASE}?page=1&size=20"),
                format!("{BASE}?sortBy=name&sortOrder=desc"),
                format!("{BASE}?page=0&size=5&sortBy=id&sortOrder=asc"),
                format!("{BASE}?page=2&size=5&sortBy=id"),
            ]
        );
    }

    #[test]
    fn sort_order_without_sort_field_fails_before_sending() {
        let transport = scripted(vec![]);
        let err = template(&transport)
            .find_all_paginated_and_sorted(0, 10, None, Some(SortOrder::Asc))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Precondition(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn create_follows_location_with_default_principal() {
        let transport = scripted(vec![
            created("/api/items/12"),
            respond(200, r#"{"id":12,"name":"alpha"}"#),
        ]);
        let template = template(&transport);
        let new_item = Item {
            id: None,
            name: "alpha".to_string(),
        };

        let stored = template.create(&new_item).unwrap();
        assert_eq!(stored, item(12, "alpha"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].uri, BASE);
        assert_eq!(requests[0].header("content-type"), Some("application/json"));
        assert_eq!(
            requests[0].header("authorization"),
            Some(Credentials::new("admin", "adminpass").basic_authorization().as_str())
        );
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"name": "alpha"}));

        assert_eq!(requests[1].uri, "http://localhost:3000/api/items/12");
    }

    #[test]
    fn create_as_uri_keeps_absolute_location() {
        let transport = scripted(vec![created("http://elsewhere:9000/items/3")]);
        let location = template(&transport).create_as_uri(&item(0, "x")).unwrap();
        assert_eq!(location, "http://elsewhere:9000/items/3");
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn create_without_location_is_invariant_violation() {
        let transport = scripted(vec![respond(201, "")]);
        let err = template(&transport).create(&item(0, "x")).unwrap_err();
        assert!(matches!(err, TemplateError::InvariantViolation(_)));
    }

    #[test]
    fn create_rejected_by_server_propagates() {
        let transport = scripted(vec![respond(400, "name required")]);
        let err = template(&transport).create_as_uri(&item(0, "")).unwrap_err();
        assert!(matches!(err, TemplateError::Http { status: 400, .. }));
    }

    #[test]
    fn update_requires_ok() {
        let transport = scripted(vec![
            respond(200, r#"{"id":1,"name":"beta"}"#),
            respond(204, ""),
            respond(404, ""),
        ]);
        let template = template(&transport);
        template.update(&item(1, "beta")).unwrap();

        let err = template.update(&item(1, "beta")).unwrap_err();
        assert!(matches!(err, TemplateError::InvariantViolation(_)));

        let err = template.update(&item(1, "beta")).unwrap_err();
        assert_eq!(err.status(), Some(404));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].uri, BASE);
        assert!(requests[0].header("authorization").is_some());
    }

    #[test]
    fn delete_requires_no_content() {
        let transport = scripted(vec![respond(204, ""), respond(200, ""), respond(404, "")]);
        let template = template(&transport);
        template.delete(&4).unwrap();
        assert!(matches!(
            template.delete(&4).unwrap_err(),
            TemplateError::InvariantViolation(_)
        ));
        assert_eq!(template.delete(&4).unwrap_err().status(), Some(404));

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.uri, format!("{BASE}/4"));
    }

    #[test]
    fn unsupported_operations_always_fail() {
        let transport = scripted(vec![]);
        let template = template(&transport);
        assert!(matches!(template.count(), Err(TemplateError::Unsupported(_))));
        assert!(matches!(template.delete_all(), Err(TemplateError::Unsupported(_))));
        let constraints = [Constraint::new("name", crate::query::ClientOperation::Eq, "a")];
        assert!(matches!(
            template.search(&constraints),
            Err(TemplateError::Unsupported(_))
        ));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn explicit_credentials_ride_on_reads() {
        let transport = scripted(vec![respond(200, "[]")]);
        let template = template(&transport);
        let reader = Credentials::new("reader", "secret");
        template
            .given_authenticated(Some(reader.clone()))
            .unwrap()
            .find_all()
            .unwrap();
        assert_eq!(
            transport.requests()[0].header("authorization"),
            Some(reader.basic_authorization().as_str())
        );
    }

    #[test]
    fn reads_before_authentication_carry_no_credentials() {
        let transport = scripted(vec![respond(200, "[]")]);
        template(&transport).find_all().unwrap();
        assert!(transport.requests()[0].header("authorization").is_none());
    }

    #[test]
    fn digest_endpoint_cannot_write() {
        let transport = scripted(vec![]);
        let template = ClientTemplate::new(
            ItemEndpoint {
                scheme: AuthScheme::Digest,
            },
            &transport,
            JsonMarshaller,
        );
        let err = template.create(&item(0, "x")).unwrap_err();
        assert!(matches!(err, TemplateError::Unsupported(_)));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn transport_failures_propagate() {
        let transport = scripted(vec![Err(TemplateError::Transport("refused".to_string()))]);
        let err = template(&transport).find_one(&1).unwrap_err();
        assert!(matches!(err, TemplateError::Transport(_)));
    }

    /// Counts reads and tags every request with the hook that built it.
    #[derive(Default)]
    struct HookedEndpoint {
        reads: AtomicUsize,
    }

    impl Endpoint for HookedEndpoint {
        type Resource = Item;

        fn uri(&self) -> &str {
            BASE
        }

        fn default_principal(&self) -> Credentials {
            Credentials::new("admin", "adminpass")
        }

        fn before_read_operation(&self) {
            self.reads.fetch_add(1, Ordering::SeqCst);
        }

        fn find_headers(&self, media_type: &str) -> Vec<(String, String)> {
            let mut headers = accept_headers(media_type);
            headers.push(("x-hook".to_string(), "find".to_string()));
            headers
        }

        fn write_headers(&self, media_type: &str) -> Vec<(String, String)> {
            let mut headers = content_type_headers(media_type);
            headers.push(("x-hook".to_string(), "write".to_string()));
            headers
        }
    }

    #[test]
    fn endpoint_hooks_shape_reads_and_writes() {
        let one = r#"{"id":1,"name":"a"}"#;
        let transport = scripted(vec![
            respond(200, one),
            respond(200, one),
            respond(200, "[]"),
            respond(200, "[]"),
            respond(200, "[]"),
            respond(200, "[]"),
            respond(200, &format!("[{one}]")),
            created("/api/items/1"),
            respond(200, one),
            respond(204, ""),
        ]);
        let template = ClientTemplate::new(HookedEndpoint::default(), &transport, JsonMarshaller);
        let reads = || template.endpoint().reads.load(Ordering::SeqCst);

        template.find_one(&1).unwrap();
        template.find_one_by_uri(&format!("{BASE}/1")).unwrap();
        template.find_all().unwrap();
        template.find_all_paginated(0, 5).unwrap();
        template.find_all_sorted("name", SortOrder::Asc).unwrap();
        template
            .find_all_paginated_and_sorted(0, 5, Some("id"), None)
            .unwrap();
        template.find_one_by_attributes(&[("email", "a")]).unwrap();
        assert_eq!(reads(), 7);

        template.create_as_uri(&item(0, "a")).unwrap();
        template.update(&item(1, "a")).unwrap();
        template.delete(&1).unwrap();
        assert_eq!(reads(), 7);

        let requests = transport.requests();
        for request in &requests[..7] {
            assert_eq!(request.method, HttpMethod::Get);
            assert_eq!(request.header("x-hook"), Some("find"));
            assert_eq!(request.header("accept"), Some("application/json"));
        }
        for request in &requests[7..9] {
            assert_eq!(request.header("x-hook"), Some("write"));
            assert_eq!(request.header("content-type"), Some("application/json"));
        }
        assert_eq!(requests[7].method, HttpMethod::Post);
        assert_eq!(requests[8].method, HttpMethod::Put);
        assert_eq!(requests[9].method, HttpMethod::Delete);
        assert!(requests[9].header("x-hook").is_none());
    }
}
