//! Test entities, collections and graph wiring.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use content_interactions::adapters::cache::SharedEdgeTypeCache;
use content_interactions::adapters::events::EventLog;
use content_interactions::adapters::site::CurrentSite;
use content_interactions::domain::capability::{Denounceable, Favoritable, Likable, Rateable};
use content_interactions::domain::interaction::InteractionGraph;
use content_interactions::domain::node::{Entity, Pk, SiteId};
use content_interactions::domain::ports::{EntityCollection, EventSink, GraphStore};
use content_interactions::domain::reverse::{
    DenounceCollection, FavoriteCollection, LikableCollection,
};
use content_interactions::domain::type_registry::EdgeTypeRegistry;

use super::mock::CountingGraphStore;

pub const DEFAULT_SITE: SiteId = SiteId(1);

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Pk,
}

impl Entity for User {
    const KIND: &'static str = "auth.user";

    fn pk(&self) -> Pk {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Pk,
    pub title: String,
    /// Posts published on a specific site carry it explicitly
    pub site: Option<SiteId>,
}

impl Post {
    pub fn new(id: Pk) -> Self {
        Self {
            id,
            title: format!("post {id}"),
            site: None,
        }
    }

    pub fn on_site(id: Pk, site: SiteId) -> Self {
        Self {
            site: Some(site),
            ..Self::new(id)
        }
    }
}

impl Entity for Post {
    const KIND: &'static str = "blog.post";

    fn pk(&self) -> Pk {
        self.id
    }

    fn site(&self) -> Option<SiteId> {
        self.site
    }
}

impl Likable for Post {}
impl Favoritable for Post {}
impl Rateable for Post {}
impl Denounceable for Post {}

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Pk,
}

impl Entity for Video {
    const KIND: &'static str = "media.video";

    fn pk(&self) -> Pk {
        self.id
    }
}

impl Likable for Video {}
impl Favoritable for Video {}

/// Entity collection over a map, counting bulk fetches.
pub struct MemoryCollection<E> {
    items: HashMap<Pk, E>,
    pub fetches: AtomicUsize,
    pub last_request: std::sync::Mutex<Vec<Pk>>,
}

impl<E: Entity + Clone> MemoryCollection<E> {
    pub fn new(items: impl IntoIterator<Item = E>) -> Self {
        Self {
            items: items.into_iter().map(|e| (e.pk(), e)).collect(),
            fetches: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Vec<Pk> {
        self.last_request.lock().unwrap().clone()
    }
}

impl<E: Entity + Clone> EntityCollection<E> for MemoryCollection<E> {
    fn filter_pks(&self, pks: &[Pk]) -> Result<Vec<E>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = pks.to_vec();
        Ok(pks.iter().filter_map(|pk| self.items.get(pk).cloned()).collect())
    }
}

impl LikableCollection<Post> for MemoryCollection<Post> {}
impl FavoriteCollection<Post> for MemoryCollection<Post> {}
impl DenounceCollection<Post> for MemoryCollection<Post> {}
impl LikableCollection<Video> for MemoryCollection<Video> {}

/// A wired interaction graph over a counting store
pub struct TestGraph {
    pub graph: InteractionGraph,
    pub store: Arc<CountingGraphStore>,
    pub events: Arc<EventLog>,
    pub cache: Arc<SharedEdgeTypeCache>,
}

pub fn graph_with(store: CountingGraphStore) -> TestGraph {
    let events = Arc::new(EventLog::new());
    graph_with_sink(store, events.clone(), events)
}

pub fn graph_with_sink(
    store: CountingGraphStore,
    sink: Arc<dyn EventSink>,
    events: Arc<EventLog>,
) -> TestGraph {
    let store = Arc::new(store);
    let cache = Arc::new(SharedEdgeTypeCache::new());
    let registry = EdgeTypeRegistry::new(store.clone() as Arc<dyn GraphStore>, cache.clone());
    let graph = InteractionGraph::new(
        store.clone(),
        registry,
        Arc::new(CurrentSite::new(DEFAULT_SITE)),
        sink,
    );
    TestGraph {
        graph,
        store,
        events,
        cache,
    }
}

pub fn test_graph() -> TestGraph {
    graph_with(CountingGraphStore::bootstrapped())
}
