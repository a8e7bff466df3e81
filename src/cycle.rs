//! One slip-generation cycle: fetch, extract, select, compose, notify.

use common::config::SlipConfig;
use common::DocumentFetcher;
use prop_extractor::PropExtractor;
use slip_strategy::{LinkComposer, SelectionCriteria, SlipSelector};
use telegram_client::message::format_slip_message;
use telegram_client::{NotifyOutcome, SlipNotifier};
use tracing::{error, info, warn};

/// How a cycle ended. Every cycle ends in exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Slip message dispatched.
    Sent { legs: usize },
    /// Dry run: message rendered and logged, not sent.
    DryRun { legs: usize },
    /// Notifier declined to send (disabled or no destination).
    NotifySkipped(NotifyOutcome),
    /// The page yielded no propositions.
    NoCandidates,
    /// Candidates existed but none passed the filters.
    NothingMetCriteria,
    /// Composer produced an empty link.
    EmptyLink,
    /// Page could not be fetched or came back non-2xx.
    FetchFailed,
    /// Dispatch failed; not retried.
    NotifyFailed(String),
}

pub struct SlipGenerator {
    source_url: String,
    fetcher: Box<dyn DocumentFetcher>,
    extractor: PropExtractor,
    selector: SlipSelector,
    composer: LinkComposer,
    notifier: SlipNotifier,
    dry_run: bool,
    cycles_run: u64,
}

impl SlipGenerator {
    pub fn new(
        cfg: &SlipConfig,
        fetcher: Box<dyn DocumentFetcher>,
        extractor: PropExtractor,
        notifier: SlipNotifier,
        dry_run: bool,
    ) -> Self {
        Self {
            source_url: cfg.source.url.clone(),
            fetcher,
            extractor,
            selector: SlipSelector::new(SelectionCriteria::from(&cfg.filters)),
            composer: LinkComposer::new(cfg.target.base_url.clone()),
            notifier,
            dry_run,
            cycles_run: 0,
        }
    }

    pub fn cycles_run(&self) -> u64 {
        self.cycles_run
    }

    /// Run one cycle. Never fails; whatever goes wrong is logged and reported
    /// through the outcome so the next cycle can still run.
    pub async fn run_once(&mut self) -> CycleOutcome {
        self.cycles_run = self.cycles_run.saturating_add(1);
        let cycle = self.cycles_run;
        info!("Starting slip generation cycle {}", cycle);

        let outcome = self.run_stages().await;
        match &outcome {
            CycleOutcome::Sent { legs } => {
                info!("Cycle {}: generated and sent slip with {} props", cycle, legs)
            }
            CycleOutcome::DryRun { legs } => {
                info!("Cycle {}: dry run, slip with {} props not sent", cycle, legs)
            }
            CycleOutcome::NotifySkipped(reason) => {
                info!("Cycle {}: slip built but not sent ({:?})", cycle, reason)
            }
            CycleOutcome::NoCandidates => info!("Cycle {}: no props found", cycle),
            CycleOutcome::NothingMetCriteria => {
                info!("Cycle {}: no props met filtering criteria", cycle)
            }
            CycleOutcome::EmptyLink => info!("Cycle {}: composed link is empty", cycle),
            CycleOutcome::FetchFailed => error!("Cycle {}: failed to fetch source page", cycle),
            CycleOutcome::NotifyFailed(e) => {
                error!("Cycle {}: failed to send notification: {}", cycle, e)
            }
        }
        outcome
    }

    async fn run_stages(&self) -> CycleOutcome {
        let document = match self.fetcher.fetch(&self.source_url).await {
            Ok(doc) if doc.is_success() => doc,
            Ok(doc) => {
                warn!("Source page returned HTTP {}", doc.status);
                return CycleOutcome::FetchFailed;
            }
            Err(e) => {
                warn!("Source page fetch error: {}", e);
                return CycleOutcome::FetchFailed;
            }
        };

        let candidates = self.extractor.extract(&document.body);
        if candidates.is_empty() {
            return CycleOutcome::NoCandidates;
        }

        let shortlist = self.selector.select(candidates);
        if shortlist.is_empty() {
            return CycleOutcome::NothingMetCriteria;
        }
        for (i, prop) in shortlist.iter().enumerate() {
            info!("  Leg {}: {}", i + 1, prop);
        }

        let link = self.composer.compose(&shortlist);
        if link.is_empty() {
            return CycleOutcome::EmptyLink;
        }
        info!("Slip link: {}", link);

        if self.dry_run {
            info!("Dry run message:\n{}", format_slip_message(&shortlist, &link));
            return CycleOutcome::DryRun {
                legs: shortlist.len(),
            };
        }

        match self.notifier.send_slip(&shortlist, &link).await {
            Ok(NotifyOutcome::Sent) => CycleOutcome::Sent {
                legs: shortlist.len(),
            },
            Ok(NotifyOutcome::EmptyLink) => CycleOutcome::EmptyLink,
            Ok(other) => CycleOutcome::NotifySkipped(other),
            Err(e) => CycleOutcome::NotifyFailed(e.to_string()),
        }
    }
}
