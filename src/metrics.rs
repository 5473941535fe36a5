use axum::routing::get;
use once_cell::sync::Lazy;
use prometheus::{Encoder, Opts, TextEncoder};

/// Every counter below must be registered into this instance before the
/// router is built, or it won't show up in the exported snapshot.
static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry(prometheus::Registry::new()));

pub static STARTED_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("giveaway_started", Opts::new("giveaway_started_total", "count of giveaways started"))
});
pub static RESOLVED_COUNTER: Lazy<OutcomeCounters> = Lazy::new(|| {
    let opts = Opts::new("giveaway_resolved_total", "count of giveaways resolved");
    OutcomeCounters {
        winners: Counter::new("giveaway_resolved (winners)", opts.clone().const_label("outcome", "winners")),
        no_entries: Counter::new("giveaway_resolved (no_entries)", opts.const_label("outcome", "no_entries")),
    }
});
pub static ENTRY_COUNTER: Lazy<ToggleCounters> = Lazy::new(|| {
    let opts = Opts::new("giveaway_entry_toggles_total", "count of entry toggle events applied");
    ToggleCounters {
        added: Counter::new("giveaway_entry (added)", opts.clone().const_label("action", "added")),
        removed: Counter::new("giveaway_entry (removed)", opts.const_label("action", "removed")),
    }
});
pub static SWEEP_COUNTER: Lazy<Counter> = Lazy::new(|| {
    Counter::new("sweep_ticks", Opts::new("sweep_ticks_total", "count of completed sweep ticks"))
});

pub fn init() -> axum::Router {
    let registry = REGISTRY
        .register(&STARTED_COUNTER)
        .register(&RESOLVED_COUNTER.winners)
        .register(&RESOLVED_COUNTER.no_entries)
        .register(&ENTRY_COUNTER.added)
        .register(&ENTRY_COUNTER.removed)
        .register(&SWEEP_COUNTER)
        .unwrap();

    axum::Router::new()
        .route("/metrics", get(|| async move {
            let mut buffer = vec![];
            let metrics = registry.gather();
            TextEncoder::new().encode(&metrics, &mut buffer).unwrap();
            String::from_utf8(buffer).unwrap()
        }))
}

pub struct Counter {
    inner: prometheus::Counter,
    name: String,
}
pub struct OutcomeCounters {
    winners: Counter,
    no_entries: Counter,
}
pub struct ToggleCounters {
    added: Counter,
    removed: Counter,
}
struct Registry(prometheus::Registry);

impl Counter {
    fn new(name: &str, opts: Opts) -> Counter {
        let c = prometheus::Counter::with_opts(opts)
            .unwrap_or_else(|e| panic!("unable to create {name} counter: {e}"));
        Counter { inner: c, name: name.to_string() }
    }

    pub fn inc(&self) {
        self.inner.inc()
    }
}

impl OutcomeCounters {
    pub fn winners(&self) {
        self.winners.inc()
    }

    pub fn no_entries(&self) {
        self.no_entries.inc()
    }
}

impl ToggleCounters {
    pub fn added(&self) {
        self.added.inc()
    }

    pub fn removed(&self) {
        self.removed.inc()
    }
}

impl Registry {
    fn register(&self, counter: &Counter) -> &Self {
        self.0.register(Box::new(counter.inner.clone()))
            .unwrap_or_else(|e| panic!("unable to register the {} counter: {e}", counter.name));
        self
    }

    fn unwrap(&self) -> prometheus::Registry {
        self.0.clone()
    }
}
