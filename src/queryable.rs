//! Lazy URL builder shared by every entity and collection handle.
//!
//! A [`Queryable`] is a client plus a list of path segments plus OData query
//! options. Navigating appends segments and never touches the network; only
//! the terminal actions (`get`, `add`, `delete`, actions posting to the
//! server) issue requests.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::client::ProjectClient;
use crate::error::{ProjectError, Result};
use crate::odata::{self, ODataKey};
use crate::pagination::Page;
use crate::traits::{Add, Creatable, Delete, Deletable, Get, Kind, List};

/// Root path of the Project Server REST API, relative to the site URL.
pub const API_ROOT: &str = "_api/ProjectServer";

/// OData system query options.
///
/// Serializes to `$select`, `$expand`, `$filter`, `$orderby`, `$top` and
/// `$skip` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryOptions {
    #[serde(rename = "$select", skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(rename = "$expand", skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    #[serde(rename = "$filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "$orderby", skip_serializing_if = "Option::is_none")]
    pub orderby: Option<String>,
    #[serde(rename = "$top", skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(rename = "$skip", skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

impl QueryOptions {
    fn append(list: &mut Option<String>, items: &[&str]) {
        if items.is_empty() {
            return;
        }
        let joined = items.join(",");
        *list = Some(match list.take() {
            Some(existing) => format!("{existing},{joined}"),
            None => joined,
        });
    }

    /// Query pairs in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.select {
            pairs.push(("$select", v.clone()));
        }
        if let Some(v) = &self.expand {
            pairs.push(("$expand", v.clone()));
        }
        if let Some(v) = &self.filter {
            pairs.push(("$filter", v.clone()));
        }
        if let Some(v) = &self.orderby {
            pairs.push(("$orderby", v.clone()));
        }
        if let Some(v) = self.top {
            pairs.push(("$top", v.to_string()));
        }
        if let Some(v) = self.skip {
            pairs.push(("$skip", v.to_string()));
        }
        pairs
    }

    /// True if no option is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    name: String,
    key: String,
}

/// A client bound to an API path with pending query options.
#[derive(Clone)]
pub struct Queryable {
    client: ProjectClient,
    segments: Vec<Segment>,
    options: QueryOptions,
}

impl fmt::Debug for Queryable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queryable")
            .field("path", &self.path())
            .field("options", &self.options)
            .finish()
    }
}

impl Queryable {
    /// Start a path below the API root, e.g. `root(client, "Calendars")`.
    pub fn root(client: &ProjectClient, name: &str) -> Self {
        Self {
            client: client.clone(),
            segments: vec![Segment {
                name: API_ROOT.to_string(),
                key: String::new(),
            }],
            options: QueryOptions::default(),
        }
        .child(name)
    }

    /// The client requests are issued with.
    pub fn client(&self) -> &ProjectClient {
        &self.client
    }

    /// Append a path segment. Query options are not carried over.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment {
            name: name.to_string(),
            key: String::new(),
        });
        Self {
            client: self.client.clone(),
            segments,
            options: QueryOptions::default(),
        }
    }

    /// Append text to the last segment, e.g. a `('key')` address.
    #[must_use]
    pub fn concat(&self, suffix: &str) -> Self {
        let mut next = self.child_free_copy();
        if let Some(last) = next.segments.last_mut() {
            last.key.push_str(suffix);
        }
        next
    }

    /// Address an entity inside this collection path by key.
    #[must_use]
    pub fn keyed<I: ODataKey>(&self, id: &I) -> Self {
        self.concat(&format!("({})", id.key_literal()))
    }

    /// The object this one was navigated from.
    ///
    /// A keyed segment's parent is its collection; otherwise the last
    /// segment is dropped. The API root is never removed.
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut next = self.child_free_copy();
        if let Some(last) = next.segments.last_mut() {
            if !last.key.is_empty() {
                last.key.clear();
                return next;
            }
        }
        if next.segments.len() > 1 {
            next.segments.pop();
        }
        next
    }

    /// Apply [`parent`](Self::parent) `levels` times.
    #[must_use]
    pub fn ancestor(&self, levels: usize) -> Self {
        (0..levels).fold(self.child_free_copy(), |q, _| q.parent())
    }

    fn child_free_copy(&self) -> Self {
        Self {
            client: self.client.clone(),
            segments: self.segments.clone(),
            options: QueryOptions::default(),
        }
    }

    /// Pending query options.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Mutable access to the pending query options.
    pub fn options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }

    /// The path relative to the site URL.
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("{}{}", s.name, s.key))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The absolute URL, including query options.
    pub fn to_url(&self) -> Result<Url> {
        let mut url = self.client.url_for(&self.path())?;
        let pairs = self.options.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// GET this path and parse the JSON body.
    pub async fn get_json(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.path(), &self.options.pairs())
            .await?;
        read_json(response).await
    }

    /// GET an absolute next link and parse the JSON body.
    pub async fn get_json_at(&self, url: &str) -> Result<Value> {
        let response = self.client.get_absolute(url).await?;
        read_json(response).await
    }

    /// POST to this path, optionally with a JSON body.
    pub async fn post_json(&self, body: Option<&Value>) -> Result<Value> {
        let response = self.client.post(&self.path(), body).await?;
        read_json(response).await
    }

    /// POST a MERGE of `properties` tagged with `entity_type`.
    pub async fn merge_json<P>(&self, entity_type: &str, properties: &P) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let mut payload = match serde_json::to_value(properties)? {
            Value::Object(map) => map,
            other => {
                return Err(ProjectError::InvalidArgument(format!(
                    "update properties must be a JSON object, got {other}"
                )))
            }
        };
        let mut metadata = Map::new();
        metadata.insert("type".to_string(), Value::String(entity_type.to_string()));
        payload.insert("__metadata".to_string(), Value::Object(metadata));

        let response = self
            .client
            .merge(&self.path(), &Value::Object(payload))
            .await?;
        read_json(response).await
    }

    /// POST a DELETE of this path.
    pub async fn delete_json(&self) -> Result<Value> {
        let response = self.client.delete(&self.path()).await?;
        read_json(response).await
    }
}

/// Read a response body as JSON; an empty body reads as `null`.
async fn read_json(response: reqwest::Response) -> Result<Value> {
    let body = response.text().await.map_err(ProjectError::HttpError)?;
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

/// Build a JSON request body from a serializable value.
pub(crate) fn body_of<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    Ok(serde_json::to_value(body)?)
}

/// A single entity of kind `K`.
pub struct Instance<K: Kind> {
    query: Queryable,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Clone for Instance<K> {
    fn clone(&self) -> Self {
        Self::from_query(self.query.clone())
    }
}

impl<K: Kind> fmt::Debug for Instance<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("entity_type", &K::ENTITY_TYPE)
            .field("path", &self.query.path())
            .finish()
    }
}

impl<K: Kind> Instance<K> {
    /// Wrap a queryable path.
    pub fn from_query(query: Queryable) -> Self {
        Self {
            query,
            _kind: PhantomData,
        }
    }

    /// The underlying queryable.
    pub fn query(&self) -> &Queryable {
        &self.query
    }

    /// Restrict the returned properties.
    #[must_use]
    pub fn select(mut self, fields: &[&str]) -> Self {
        QueryOptions::append(&mut self.query.options_mut().select, fields);
        self
    }

    /// Inline related entities.
    #[must_use]
    pub fn expand(mut self, fields: &[&str]) -> Self {
        QueryOptions::append(&mut self.query.options_mut().expand, fields);
        self
    }

    /// The absolute URL this handle points at.
    pub fn to_url(&self) -> Result<Url> {
        self.query.to_url()
    }

    /// Navigate to a single related entity.
    pub fn navigate<T: Kind>(&self, property: &str) -> Instance<T> {
        Instance::from_query(self.query.child(property))
    }

    /// Navigate to a related collection.
    pub fn collection<T: Kind>(&self, property: &str) -> Collection<T> {
        Collection::from_query(self.query.child(property))
    }

    /// Fetch the entity and deserialize it into an arbitrary shape.
    #[tracing::instrument(skip(self), fields(path = %self.query.path()))]
    pub async fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
        let value = odata::entity(self.query.get_json().await?);
        Ok(serde_json::from_value(value)?)
    }

    /// POST to an action below this entity, returning the raw response.
    pub(crate) async fn invoke(&self, action: &str, body: Option<Value>) -> Result<Value> {
        self.query.child(action).post_json(body.as_ref()).await
    }

    /// POST to an action below this entity and parse the returned entity.
    pub(crate) async fn invoke_as<T: DeserializeOwned>(
        &self,
        action: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let value = odata::entity(self.invoke(action, body).await?);
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl<K: Kind> Get for Instance<K> {
    type Output = K::Data;

    async fn get(&self) -> Result<K::Data> {
        self.get_as::<K::Data>().await
    }
}

#[async_trait]
impl<K: Deletable> Delete for Instance<K> {
    #[tracing::instrument(skip(self), fields(path = %self.query.path()))]
    async fn delete(&self) -> Result<()> {
        self.query.delete_json().await?;
        Ok(())
    }
}

/// A queryable collection of entities of kind `K`.
pub struct Collection<K: Kind> {
    query: Queryable,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Clone for Collection<K> {
    fn clone(&self) -> Self {
        Self::from_query(self.query.clone())
    }
}

impl<K: Kind> fmt::Debug for Collection<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("entity_type", &K::ENTITY_TYPE)
            .field("path", &self.query.path())
            .field("options", self.query.options())
            .finish()
    }
}

impl<K: Kind> Collection<K> {
    /// Wrap a queryable path.
    pub fn from_query(query: Queryable) -> Self {
        Self {
            query,
            _kind: PhantomData,
        }
    }

    /// A collection directly below the API root, e.g. `Calendars`.
    pub fn root(client: &ProjectClient, name: &str) -> Self {
        Self::from_query(Queryable::root(client, name))
    }

    /// The underlying queryable.
    pub fn query(&self) -> &Queryable {
        &self.query
    }

    /// Address an entity in this collection by id.
    pub fn get_by_id(&self, id: impl Into<K::Id>) -> Instance<K> {
        Instance::from_query(self.query.keyed(&id.into()))
    }

    /// Restrict the returned properties.
    #[must_use]
    pub fn select(mut self, fields: &[&str]) -> Self {
        QueryOptions::append(&mut self.query.options_mut().select, fields);
        self
    }

    /// Inline related entities.
    #[must_use]
    pub fn expand(mut self, fields: &[&str]) -> Self {
        QueryOptions::append(&mut self.query.options_mut().expand, fields);
        self
    }

    /// Filter with an OData expression, e.g. `Name eq 'Plan'`.
    #[must_use]
    pub fn filter(mut self, expression: &str) -> Self {
        self.query.options_mut().filter = Some(expression.to_string());
        self
    }

    /// Add a sort key; calls accumulate in order.
    #[must_use]
    pub fn order_by(mut self, field: &str, ascending: bool) -> Self {
        let key = if ascending {
            field.to_string()
        } else {
            format!("{field} desc")
        };
        QueryOptions::append(&mut self.query.options_mut().orderby, &[&key]);
        self
    }

    /// Limit the number of returned entities.
    #[must_use]
    pub fn top(mut self, count: u32) -> Self {
        self.query.options_mut().top = Some(count);
        self
    }

    /// Skip the first `count` entities.
    #[must_use]
    pub fn skip(mut self, count: u32) -> Self {
        self.query.options_mut().skip = Some(count);
        self
    }

    /// The absolute URL this handle points at.
    pub fn to_url(&self) -> Result<Url> {
        self.query.to_url()
    }

    /// Interpret a server response describing one entity of this collection.
    pub(crate) fn created(&self, value: Value) -> Result<Created<K>> {
        let value = odata::entity(value);
        let id = value
            .get("Id")
            .and_then(<K::Id as ODataKey>::from_json)
            .ok_or_else(|| {
                ProjectError::UnexpectedResponse(format!(
                    "{} response has no usable Id",
                    K::ENTITY_TYPE
                ))
            })?;
        let data = serde_json::from_value(value)?;
        Ok(Created {
            data,
            instance: self.get_by_id(id),
        })
    }

    fn page_from(value: Value) -> Result<Page<K::Data>> {
        let (items, next_link) = odata::collection(value)?;
        let items = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<core::result::Result<Vec<K::Data>, _>>()?;
        Ok(Page::new(items, next_link))
    }
}

#[async_trait]
impl<K: Kind> Get for Collection<K> {
    type Output = Vec<K::Data>;

    async fn get(&self) -> Result<Vec<K::Data>> {
        Ok(self.get_page().await?.items)
    }
}

#[async_trait]
impl<K: Kind> List for Collection<K> {
    type Item = K::Data;

    #[tracing::instrument(skip(self), fields(path = %self.query.path()))]
    async fn get_page(&self) -> Result<Page<K::Data>> {
        Self::page_from(self.query.get_json().await?)
    }

    #[tracing::instrument(skip(self))]
    async fn next_page(&self, next_link: &str) -> Result<Page<K::Data>> {
        Self::page_from(self.query.get_json_at(next_link).await?)
    }
}

#[async_trait]
impl<K: Creatable> Add for Collection<K> {
    type Params = K::Creation;
    type Output = Created<K>;

    #[tracing::instrument(skip(self, params), fields(path = %self.query.path()))]
    async fn add(&self, params: &K::Creation) -> Result<Created<K>> {
        let body = odata::wrap_arrays(&body_of(params)?);
        let value = self.query.post_json(Some(&body)).await?;
        self.created(value)
    }
}

/// Result of an operation that creates or returns an entity.
///
/// Carries both the data the server answered with and a handle addressing
/// the entity for further navigation.
pub struct Created<K: Kind> {
    /// The entity as returned by the server.
    pub data: K::Data,
    /// A handle to the entity.
    pub instance: Instance<K>,
}

impl<K: Kind> fmt::Debug for Created<K>
where
    K::Data: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Created")
            .field("data", &self.data)
            .field("instance", &self.instance)
            .finish()
    }
}
