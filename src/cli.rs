use crate::adapters::events::{EventBus, EventLog, TracingEventSink};
use crate::adapters::memory::MemoryGraphStore;
use crate::app::config::InteractionConfig;
use crate::app::dto::Outcome;
use crate::app::service::InteractionService;
use crate::domain::node::{NodeRef, SiteId};
use crate::domain::ports::EventSink;
use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Like, favorite, rate and denounce content stored in a typed-edge graph.
#[derive(Debug, Parser)]
#[command(name = "interactions", version, about)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Graph snapshot file (overrides the configuration)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Current site id (overrides the configuration)
    #[arg(long, global = true)]
    pub site: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Define the canonical edge types and create the snapshot
    Init,
    /// Show resolution state of the canonical edge types
    Types,
    /// Toggle a like
    Like {
        #[arg(long)]
        subject: NodeRef,
        #[arg(long)]
        actor: NodeRef,
    },
    /// Toggle a favorite mark
    Favorite {
        #[arg(long)]
        subject: NodeRef,
        #[arg(long)]
        actor: NodeRef,
    },
    /// Denounce, or withdraw a denounce
    Denounce {
        #[arg(long)]
        subject: NodeRef,
        #[arg(long)]
        actor: NodeRef,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Rate, or change an existing rating
    Rate {
        #[arg(long)]
        subject: NodeRef,
        #[arg(long)]
        actor: NodeRef,
        #[arg(long)]
        rating: f64,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Interaction counters of a subject, optionally with one actor's state
    Show {
        #[arg(long)]
        subject: NodeRef,
        #[arg(long)]
        actor: Option<NodeRef>,
    },
    /// Subjects of a kind liked by an actor
    Liked {
        #[arg(long)]
        actor: NodeRef,
        #[arg(long)]
        kind: String,
    },
    /// Subjects of a kind marked as favorite by an actor
    Favorites {
        #[arg(long)]
        actor: NodeRef,
        #[arg(long)]
        kind: String,
    },
    /// Subjects of a kind denounced by an actor
    Denounced {
        #[arg(long)]
        actor: NodeRef,
        #[arg(long)]
        kind: String,
    },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Init
                | Command::Like { .. }
                | Command::Favorite { .. }
                | Command::Denounce { .. }
                | Command::Rate { .. }
        )
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = InteractionConfig::load_or_default(cli.config.as_deref())?;
    if let Some(snapshot) = cli.snapshot {
        config.snapshot_path = snapshot;
    }
    if let Some(site) = cli.site {
        config.current_site = SiteId(site);
    }

    let store = Arc::new(
        MemoryGraphStore::open(&config.snapshot_path).with_context(|| {
            format!("Failed to open snapshot: {}", config.snapshot_path.display())
        })?,
    );
    if config.bootstrap_edge_types || matches!(cli.command, Command::Init) {
        store.bootstrap()?;
    }

    let log = Arc::new(EventLog::new());
    let bus = EventBus::new();
    let captured = log.clone();
    bus.subscribe(move |event| captured.emit(event))?;
    bus.subscribe(|event| TracingEventSink.emit(event))?;

    let service = InteractionService::from_config(&config, store.clone(), Arc::new(bus));
    let mutates = cli.command.mutates();

    let ok = match cli.command {
        Command::Init | Command::Types => print(&log, service.edge_types()?, true)?,
        Command::Like { subject, actor } => {
            let response = service.toggle_like(&subject, &actor);
            let ok = response.result;
            print(&log, response, ok)?
        }
        Command::Favorite { subject, actor } => {
            let response = service.toggle_favorite(&subject, &actor);
            let ok = response.result;
            print(&log, response, ok)?
        }
        Command::Denounce {
            subject,
            actor,
            comment,
        } => {
            let response = service.toggle_denounce(&subject, &actor, comment);
            let ok = response.result;
            print(&log, response, ok)?
        }
        Command::Rate {
            subject,
            actor,
            rating,
            comment,
        } => {
            let response = service.rate(&subject, &actor, rating, comment);
            let ok = response.result;
            print(&log, response, ok)?
        }
        Command::Show { subject, actor } => {
            print(&log, service.summary(&subject, actor.as_ref())?, true)?
        }
        Command::Liked { actor, kind } => print(&log, service.liked(&actor, &kind)?, true)?,
        Command::Favorites { actor, kind } => {
            print(&log, service.favorites(&actor, &kind)?, true)?
        }
        Command::Denounced { actor, kind } => {
            print(&log, service.denounced(&actor, &kind)?, true)?
        }
    };

    if mutates {
        store.save(&config.snapshot_path).with_context(|| {
            format!("Failed to write snapshot: {}", config.snapshot_path.display())
        })?;
    }
    if !ok {
        bail!("operation failed; see log output for details");
    }
    Ok(())
}

fn print<T: Serialize>(log: &EventLog, response: T, ok: bool) -> Result<bool> {
    let outcome = Outcome {
        response,
        events: log.drain(),
    };
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(ok)
}
