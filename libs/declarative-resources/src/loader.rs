//! Kind-agnostic declarative resource loader.
//!
//! Loading runs once, before the service accepts requests:
//!
//! 1. discover the raw definitions of the kind (a missing directory is fine);
//! 2. parse every definition, failing fast on the first error;
//! 3. order hierarchical kinds so that parents precede their children;
//! 4. validate each resource against what has been loaded so far and insert it.
//!
//! Any error aborts loading of the kind and is returned to the caller, which
//! is expected to abort startup.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::collection::DeclarativeCollection;
use crate::error::{LoaderError, ValidationError};
use crate::source::{RawResource, ResourceSource};

/// Error produced by [`ResourceHandler::parse`].
pub type ParseError = Box<dyn std::error::Error + Send + Sync>;

/// Kind-specific callbacks plugged into the generic loader.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    type Resource: Send + Sync;

    /// Turn one raw definition into a typed resource.
    ///
    /// # Errors
    /// Any parse failure; it is fatal for the whole load.
    fn parse(&self, raw: &RawResource) -> Result<Self::Resource, ParseError>;

    /// Check a parsed resource before it is inserted.
    ///
    /// `loaded` holds every resource of the kind accepted so far. Handlers of
    /// composite kinds typically also consult the mutable store here.
    ///
    /// # Errors
    /// Required fields missing, duplicate identifiers, unknown parents, ...
    async fn validate(
        &self,
        resource: &Self::Resource,
        loaded: &DeclarativeCollection<Self::Resource>,
    ) -> Result<(), ValidationError>;

    /// Storage key of the resource.
    fn resource_id(&self, resource: &Self::Resource) -> String;

    /// Parent identifier for hierarchical kinds. Flat kinds keep the default,
    /// which leaves the discovery order untouched.
    fn parent_id(&self, _resource: &Self::Resource) -> Option<String> {
        None
    }
}

/// Identifies what is being loaded and from where.
#[derive(Debug, Clone)]
pub struct ResourceLoaderConfig {
    /// Human readable kind name used in logs and errors.
    pub kind: String,
    /// Directory name relative to the source root.
    pub directory: String,
}

impl ResourceLoaderConfig {
    pub fn new(kind: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            directory: directory.into(),
        }
    }
}

/// Load every resource of one kind into `collection`.
///
/// Returns the number of resources inserted.
///
/// # Errors
/// Discovery, parse and validation failures, duplicate identifiers and parent
/// cycles. All of them are meant to be startup-fatal.
pub async fn load_resources<H>(
    config: &ResourceLoaderConfig,
    source: &dyn ResourceSource,
    handler: &H,
    collection: &mut DeclarativeCollection<H::Resource>,
) -> Result<usize, LoaderError>
where
    H: ResourceHandler + ?Sized,
{
    let kind = config.kind.as_str();
    let raw = source.read_resources(kind, &config.directory)?;
    if raw.is_empty() {
        info!(kind, "No declarative resources defined");
        return Ok(0);
    }

    let mut parsed = Vec::with_capacity(raw.len());
    for r in &raw {
        let resource = handler.parse(r).map_err(|e| {
            error!(kind, file = %r.name, error = %e, "Failed to parse declarative resource");
            LoaderError::parse(kind, &r.name, e.to_string())
        })?;
        parsed.push(resource);
    }

    let ordered = dependency_order(
        kind,
        parsed,
        |r| handler.resource_id(r),
        |r| handler.parent_id(r),
    )?;

    let mut loaded = 0;
    for resource in ordered {
        let id = handler.resource_id(&resource);

        if let Err(e) = handler.validate(&resource, collection).await {
            error!(kind, id = %id, error = %e, "Declarative resource failed validation");
            return Err(LoaderError::validation(kind, id, e));
        }

        if collection.insert(id.clone(), resource).is_err() {
            error!(kind, id = %id, "Duplicate declarative resource id");
            return Err(LoaderError::DuplicateId {
                kind: kind.to_owned(),
                id,
            });
        }

        debug!(kind, id = %id, "Loaded declarative resource");
        loaded += 1;
    }

    info!(kind, count = loaded, "Loaded declarative resources");
    Ok(loaded)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Order `items` so that every item comes after its parent.
///
/// Each item is visited after its declared parent (when that parent is part of
/// `items`). Parents that are not in `items` are ignored here: whether they
/// must exist is a validation concern. Relative order of unrelated items is
/// preserved.
///
/// # Errors
/// [`LoaderError::DependencyCycle`] when the parent links among `items` loop.
pub fn dependency_order<T, I, P>(
    kind: &str,
    items: Vec<T>,
    id: I,
    parent: P,
) -> Result<Vec<T>, LoaderError>
where
    I: Fn(&T) -> String,
    P: Fn(&T) -> Option<String>,
{
    let ids: Vec<String> = items.iter().map(&id).collect();
    let parents: Vec<Option<usize>> = {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(ids.len());
        for (i, item_id) in ids.iter().enumerate() {
            index.entry(item_id.as_str()).or_insert(i);
        }
        items
            .iter()
            .map(|item| parent(item).and_then(|p| index.get(p.as_str()).copied()))
            .collect()
    };

    let mut marks = vec![Mark::Unvisited; items.len()];
    let mut order = Vec::with_capacity(items.len());

    for start in 0..items.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        // Walk up the parent chain, then emit the chain top-down.
        let mut chain = Vec::new();
        let mut cur = Some(start);
        while let Some(i) = cur {
            match marks[i] {
                Mark::Done => break,
                Mark::Visiting => {
                    return Err(LoaderError::DependencyCycle {
                        kind: kind.to_owned(),
                        id: ids[i].clone(),
                    });
                }
                Mark::Unvisited => {
                    marks[i] = Mark::Visiting;
                    chain.push(i);
                    cur = parents[i];
                }
            }
        }

        for &i in chain.iter().rev() {
            marks[i] = Mark::Done;
            order.push(i);
        }
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|i| slots.get_mut(i).and_then(Option::take))
        .collect())
}
