//! Like / Favorite / Rate / Denounce capabilities against the in-memory graph.

mod common;

use std::sync::Arc;

use common::fixtures::{DEFAULT_SITE, Post, User, Video, graph_with, graph_with_sink, test_graph};
use common::mock::{CountingGraphStore, FailingSink};
use content_interactions::adapters::events::EventLog;
use content_interactions::app::config::InteractionConfig;
use content_interactions::app::service::InteractionService;
use content_interactions::domain::capability::{Denounceable, Favoritable, Likable, Rateable};
use content_interactions::domain::edge_type::InteractionKind;
use content_interactions::domain::event::InteractionEvent;
use content_interactions::domain::interaction::{Apply, InteractionGraph};
use content_interactions::domain::node::{Entity, SiteId};

fn toggle_apply(kind: InteractionKind) -> Apply {
    match kind {
        InteractionKind::Like => Apply::Like,
        InteractionKind::Favorite => Apply::Favorite,
        InteractionKind::Denounce => Apply::Denounce {
            comment: "offensive".into(),
        },
        InteractionKind::Rate => unreachable!("rate is not a toggle"),
    }
}

const TOGGLES: [InteractionKind; 3] = [
    InteractionKind::Like,
    InteractionKind::Favorite,
    InteractionKind::Denounce,
];

#[test]
fn test_apply_then_retract_toggles_state() {
    for kind in TOGGLES {
        let t = test_graph();
        let (post, user) = (Post::new(1).node_ref(), User { id: 7 }.node_ref());

        assert!(!t.graph.actor_state(kind, &post, &user, DEFAULT_SITE).unwrap());

        t.graph.apply(&post, &user, DEFAULT_SITE, toggle_apply(kind)).unwrap().unwrap();
        assert!(t.graph.actor_state(kind, &post, &user, DEFAULT_SITE).unwrap(), "{kind}");

        assert!(t.graph.retract(kind, &post, &user, DEFAULT_SITE).unwrap());
        assert!(!t.graph.actor_state(kind, &post, &user, DEFAULT_SITE).unwrap(), "{kind}");

        // apply / retract / apply ends in the same state as one apply
        t.graph.apply(&post, &user, DEFAULT_SITE, toggle_apply(kind)).unwrap();
        assert!(t.graph.actor_state(kind, &post, &user, DEFAULT_SITE).unwrap());
        assert_eq!(t.graph.interaction_count(kind, &post, DEFAULT_SITE).unwrap(), 1);
    }
}

#[test]
fn test_count_increments_once_per_actor() {
    let t = test_graph();
    let post = Post::new(1);
    let (alice, bob) = (User { id: 1 }, User { id: 2 });

    assert_eq!(post.likes(&t.graph).unwrap(), 0);
    assert!(post.like(&t.graph, &alice).unwrap().unwrap().created);
    assert_eq!(post.likes(&t.graph).unwrap(), 1);

    // a second like from the same actor overwrites
    assert!(!post.like(&t.graph, &alice).unwrap().unwrap().created);
    assert_eq!(post.likes(&t.graph).unwrap(), 1);

    post.like(&t.graph, &bob).unwrap();
    assert_eq!(post.likes(&t.graph).unwrap(), 2);
    assert!(post.liked_by(&t.graph, &bob).unwrap());
}

#[test]
fn test_duplicate_apply_emits_single_event() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 1 };

    post.mark_as_favorite(&t.graph, &user).unwrap();
    post.mark_as_favorite(&t.graph, &user).unwrap();

    let events = t.events.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], InteractionEvent::MarkedAsFavorite { .. }));
}

#[test]
fn test_favorite_capability() {
    let t = test_graph();
    let video = Video { id: 3 };
    let user = User { id: 1 };

    assert!(!video.favorite_of(&t.graph, &user).unwrap());
    video.mark_as_favorite(&t.graph, &user).unwrap();
    assert!(video.favorite_of(&t.graph, &user).unwrap());
    assert_eq!(video.favorite_marks(&t.graph).unwrap(), 1);

    assert!(video.delete_favorite(&t.graph, &user).unwrap());
    assert_eq!(video.favorite_marks(&t.graph).unwrap(), 0);
    assert_eq!(
        t.events.events().last(),
        Some(&InteractionEvent::UnmarkedAsFavorite {
            subject: video.node_ref(),
            actor: user.node_ref(),
        })
    );
}

#[test]
fn test_rate_save_then_change() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 4 };

    assert_eq!(post.rating(&t.graph, &user).unwrap(), None);
    assert_eq!(post.full_rating(&t.graph, &user).unwrap(), (None, None));

    post.save_rate(&t.graph, &user, 4.0, Some("ok".into())).unwrap().unwrap();
    assert_eq!(post.rating(&t.graph, &user).unwrap(), Some(4.0));
    assert_eq!(
        post.full_rating(&t.graph, &user).unwrap(),
        (Some(4.0), Some("ok".to_string()))
    );
    assert_eq!(post.ratings(&t.graph).unwrap(), 1);

    post.change_rate(&t.graph, &user, 2.0, Some("bad".into())).unwrap().unwrap();
    assert_eq!(
        post.full_rating(&t.graph, &user).unwrap(),
        (Some(2.0), Some("bad".to_string()))
    );
    assert_eq!(post.ratings(&t.graph).unwrap(), 1);
    assert!(post.rated_by(&t.graph, &user).unwrap());

    let events = t.events.events();
    assert_eq!(
        events,
        vec![
            InteractionEvent::Rated {
                subject: post.node_ref(),
                actor: user.node_ref(),
                rating: 4.0,
                comment: Some("ok".into()),
            },
            InteractionEvent::RateModified {
                subject: post.node_ref(),
                actor: user.node_ref(),
                old_rating: Some(4.0),
                rating: 2.0,
                comment: Some("bad".into()),
            },
        ]
    );
}

#[test]
fn test_change_rate_without_previous_rating() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 4 };

    post.change_rate(&t.graph, &user, 3.0, None).unwrap().unwrap();
    assert_eq!(post.rating(&t.graph, &user).unwrap(), Some(3.0));
    assert!(matches!(
        t.events.events()[0],
        InteractionEvent::RateModified {
            old_rating: None,
            ..
        }
    ));
}

#[test]
fn test_denounce_comment() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 2 };

    assert_eq!(post.denounce_comment(&t.graph, &user).unwrap(), None);
    post.denounce(&t.graph, &user, "spam").unwrap();
    assert!(post.denounced_by(&t.graph, &user).unwrap());
    assert_eq!(post.denounce_comment(&t.graph, &user).unwrap().as_deref(), Some("spam"));
    assert_eq!(post.denounces(&t.graph).unwrap(), 1);

    assert!(post.remove_denounce(&t.graph, &user).unwrap());
    assert_eq!(post.denounce_comment(&t.graph, &user).unwrap(), None);
    assert!(matches!(
        t.events.events().last(),
        Some(InteractionEvent::DenounceRemoved { .. })
    ));
}

#[test]
fn test_retract_missing_edge_is_false_and_silent() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 1 };

    assert!(!post.unlike(&t.graph, &user).unwrap());
    assert!(!post.delete_favorite(&t.graph, &user).unwrap());
    assert!(!post.remove_denounce(&t.graph, &user).unwrap());
    assert!(t.events.events().is_empty());
}

#[test]
fn test_sites_do_not_mix() {
    let t = test_graph();
    let user = User { id: 1 };
    let here = Post::new(1);
    let elsewhere = Post::on_site(1, SiteId(2));

    here.like(&t.graph, &user).unwrap();
    assert!(here.liked_by(&t.graph, &user).unwrap());
    assert!(!elsewhere.liked_by(&t.graph, &user).unwrap());
    assert_eq!(elsewhere.likes(&t.graph).unwrap(), 0);

    elsewhere.like(&t.graph, &user).unwrap();
    here.unlike(&t.graph, &user).unwrap();
    assert!(elsewhere.liked_by(&t.graph, &user).unwrap());
}

#[test]
fn test_same_pk_different_kind_do_not_collide() {
    let t = test_graph();
    let user = User { id: 1 };
    let post = Post::new(5);
    let video = Video { id: 5 };

    post.like(&t.graph, &user).unwrap();
    assert!(post.liked_by(&t.graph, &user).unwrap());
    assert!(!video.liked_by(&t.graph, &user).unwrap());
    assert_eq!(video.likes(&t.graph).unwrap(), 0);
}

#[test]
fn test_missing_edge_types_report_empty_results() {
    let t = graph_with(CountingGraphStore::empty());
    let post = Post::new(1);
    let user = User { id: 1 };

    assert_eq!(post.likes(&t.graph).unwrap(), 0);
    assert!(!post.liked_by(&t.graph, &user).unwrap());
    assert!(post.like(&t.graph, &user).unwrap().is_none());
    assert!(!post.unlike(&t.graph, &user).unwrap());
    assert!(post.save_rate(&t.graph, &user, 5.0, None).unwrap().is_none());
    assert_eq!(post.rating(&t.graph, &user).unwrap(), None);
    assert!(t.events.events().is_empty());
    assert_eq!(t.store.writes(), 0);
}

#[test]
fn test_failing_sink_does_not_fail_interaction() {
    let sink = Arc::new(FailingSink::new());
    let t = graph_with_sink(
        CountingGraphStore::bootstrapped(),
        sink.clone(),
        Arc::new(EventLog::new()),
    );
    let post = Post::new(1);
    let user = User { id: 1 };

    assert!(post.like(&t.graph, &user).unwrap().is_some());
    assert!(post.unlike(&t.graph, &user).unwrap());
    assert_eq!(sink.attempts.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_store_outage_propagates() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 1 };
    // warm the cache so the failure comes from the edge calls, not the lookups
    t.graph.registry().warm_up().unwrap();

    t.store.set_offline(true);
    assert!(post.like(&t.graph, &user).is_err());
    assert!(post.likes(&t.graph).is_err());
    assert!(t.events.events().is_empty());
}

#[test]
fn test_rate_removal_is_silent() {
    let t = test_graph();
    let (post, user) = (Post::new(1).node_ref(), User { id: 1 }.node_ref());
    t.graph
        .apply(
            &post,
            &user,
            DEFAULT_SITE,
            Apply::Rate {
                rating: 1.0,
                comment: None,
            },
        )
        .unwrap();
    let before = t.events.events().len();

    assert!(t.graph.retract(InteractionKind::Rate, &post, &user, DEFAULT_SITE).unwrap());
    assert_eq!(t.events.events().len(), before);
    assert_eq!(t.graph.rating(&post, &user, DEFAULT_SITE).unwrap(), None);
}

#[test]
fn test_graph_clones_share_state() {
    let t = test_graph();
    let clone: InteractionGraph = t.graph.clone();
    let post = Post::new(1);
    let user = User { id: 1 };

    post.like(&t.graph, &user).unwrap();
    assert!(post.liked_by(&clone, &user).unwrap());
    assert_eq!(t.store.inner.total_edges().unwrap(), 2);
}

#[test]
fn test_concurrent_likes_from_one_actor_create_one_edge() {
    let t = test_graph();
    let post = Post::new(1);
    let user = User { id: 1 };

    let created: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| post.like(&t.graph, &user).unwrap().unwrap().created))
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    assert_eq!(created, 1);
    assert_eq!(post.likes(&t.graph).unwrap(), 1);
    let events = t.events.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], InteractionEvent::Liked { .. }));
}

#[test]
fn test_change_carries_previous_rating_without_rereading() {
    let t = test_graph();
    let (post, user) = (Post::new(1).node_ref(), User { id: 1 }.node_ref());
    let gets = t.store.gets();

    t.graph
        .apply(
            &post,
            &user,
            DEFAULT_SITE,
            Apply::ChangeRate {
                rating: 2.0,
                comment: None,
                previous: Some(5.0),
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(t.store.gets(), gets);
    assert!(matches!(
        t.events.events()[0],
        InteractionEvent::RateModified {
            old_rating: Some(old),
            rating,
            ..
        } if old == 5.0 && rating == 2.0
    ));
}

#[test]
fn test_service_rate_change_reads_previous_once() {
    let store = Arc::new(CountingGraphStore::bootstrapped());
    let events = Arc::new(EventLog::new());
    let service =
        InteractionService::from_config(&InteractionConfig::default(), store.clone(), events.clone());
    let (post, user) = (Post::new(1).node_ref(), User { id: 1 }.node_ref());

    assert!(service.rate(&post, &user, 4.0, None).result);
    let gets = store.gets();
    let changed = service.rate(&post, &user, 1.0, None);

    assert!(changed.result && changed.modified);
    assert_eq!(changed.old_rating, Some(4.0));
    assert_eq!(store.gets() - gets, 1);
    assert!(matches!(
        events.events().last(),
        Some(InteractionEvent::RateModified {
            old_rating: Some(old),
            ..
        }) if *old == 4.0
    ));
}
