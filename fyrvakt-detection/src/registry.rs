//! Name-keyed analyzer registry.
//!
//! Every analyzer the node can run is registered here under a fixed name at
//! startup. Loading a configured list of names yields the enabled set in
//! configured order; names that are unknown or whose factory fails are logged
//! and left out, the rest of the pipeline carries on without them.

use std::collections::BTreeMap;
use std::sync::Arc;

use fyrvakt_core::Packet;
use tracing::{error, info};

use crate::analyzer::{Analyzer, AnalyzerReport};
use crate::error::DetectionError;
use crate::health::DeviceHealthTracker;
use crate::predictive::{self, PredictiveAnalyzer};
use crate::signal::{self, SignalAnalyzer};

/// Shared components handed to analyzer factories.
#[derive(Debug, Clone)]
pub struct AnalyzerContext {
    pub tracker: Arc<DeviceHealthTracker>,
}

pub type AnalyzerFactory =
    Box<dyn Fn(&AnalyzerContext) -> Result<Box<dyn Analyzer>, DetectionError> + Send + Sync>;

#[derive(Default)]
pub struct AnalyzerRegistry {
    factories: BTreeMap<String, AnalyzerFactory>,
}

impl AnalyzerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the signal and predictive-maintenance analyzers.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(signal::ANALYZER_NAME, |_ctx| {
            SignalAnalyzer::new()
                .map(|a| Box::new(a) as Box<dyn Analyzer>)
                .map_err(|e| DetectionError::AnalyzerInit {
                    name: signal::ANALYZER_NAME.into(),
                    reason: e.to_string(),
                })
        });
        registry.register(predictive::ANALYZER_NAME, |ctx| {
            Ok(Box::new(PredictiveAnalyzer::new(ctx.tracker.clone())))
        });
        registry
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&AnalyzerContext) -> Result<Box<dyn Analyzer>, DetectionError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiates a single analyzer.
    pub fn create(
        &self,
        name: &str,
        ctx: &AnalyzerContext,
    ) -> Result<Box<dyn Analyzer>, DetectionError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DetectionError::AnalyzerNotFound(name.to_owned()))?;
        factory(ctx)
    }

    /// Instantiates every analyzer in `names`, in order. Failures are logged
    /// and recorded on the returned set, never propagated.
    pub fn load<S: AsRef<str>>(&self, names: &[S], ctx: &AnalyzerContext) -> AnalyzerSet {
        info!("Loading {} analyzer(s)", names.len());

        let mut set = AnalyzerSet::default();
        for name in names.iter().map(AsRef::as_ref) {
            match self.create(name, ctx) {
                Ok(analyzer) => {
                    info!(analyzer = name, "analyzer loaded");
                    set.analyzers.push(analyzer);
                }
                Err(e) => {
                    error!(analyzer = name, error = %e, "failed to load analyzer");
                    set.failures.push((name.to_owned(), e));
                }
            }
        }
        set
    }
}

/// Analyzers enabled for the current run, in invocation order.
#[derive(Default)]
pub struct AnalyzerSet {
    analyzers: Vec<Box<dyn Analyzer>>,
    failures: Vec<(String, DetectionError)>,
}

impl AnalyzerSet {
    /// Runs every analyzer once on `packet`, in order.
    pub fn analyze(&self, packet: &Packet) -> Vec<AnalyzerReport> {
        self.analyzers.iter().map(|a| a.analyze(packet)).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    pub fn failures(&self) -> &[(String, DetectionError)] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}
