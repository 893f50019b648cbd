//! One deck run, stage by stage.
//!
//! ```text
//! build batch -> provision document -> apply -> fetch + trace -> fix-up -> permissions
//! ```
//!
//! The batch is built before anything touches the network, so bad input
//! never leaves an orphan document behind. Every stage awaits the previous
//! one; a failing stage stops the run, except permission grants whose
//! failures are collected in the [`PermissionReport`].

use tracing::{Instrument, error, info, info_span, warn};

use crate::common::Result;
use crate::deck::{DeckContext, DuplicationFixup, ReportDeck, ReportDeckBuilder, TemplateDeckBuilder, TemplateLayout};
use crate::requests::EditOperation;
use crate::service::{FileService, OperationExecutor, PermissionManager, PermissionPlan, PermissionReport, PresentationService};
use crate::snapshot::describe;

/// Where the document comes from and what goes into it.
#[derive(Debug, Clone)]
pub enum DeckSource {
    /// Copy a template and fill its placeholders.
    Template {
        template_id: String,
        context: DeckContext,
        layout: TemplateLayout,
    },
    /// Create an empty presentation and lay out a report on it.
    Scratch(ReportDeck),
}

/// Everything a run needs, already validated.
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// Name of the new document
    pub title: String,
    pub source: DeckSource,
    pub sharing: PermissionPlan,
    /// Pin the fix-up batch to the revision observed by its fetch
    pub pin_revision: bool,
}

impl RunPlan {
    /// The main batch, built without touching the network.
    pub fn operations(&self) -> Result<Vec<EditOperation>> {
        match &self.source {
            DeckSource::Template { context, layout, .. } => TemplateDeckBuilder::new(layout.clone()).build(context),
            DeckSource::Scratch(deck) => ReportDeckBuilder::new().build(deck),
        }
    }

    fn fixup(&self) -> Option<DuplicationFixup> {
        match &self.source {
            DeckSource::Template { layout, .. } => Some(DuplicationFixup::new(
                TemplateDeckBuilder::new(layout.clone()).duplication(),
                &layout.timer_label,
                &layout.timer_text,
            )),
            DeckSource::Scratch(_) => None,
        }
    }
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub document_id: String,
    /// Operations in the main batch
    pub operations_applied: usize,
    /// Structural trace of the document right after the main batch
    pub structure: Vec<String>,
    /// Element rewritten by the duplication fix-up
    pub patched_element: Option<String>,
    pub permissions: PermissionReport,
}

/// Runs [`RunPlan`]s against a presentation and a file service.
pub struct DeckRun<'a, P: ?Sized, F: ?Sized> {
    slides: &'a P,
    files: &'a F,
}

impl<'a, P, F> DeckRun<'a, P, F>
where
    P: PresentationService + ?Sized,
    F: FileService + ?Sized,
{
    pub fn new(slides: &'a P, files: &'a F) -> Self {
        Self { slides, files }
    }

    pub async fn execute(&self, plan: &RunPlan) -> Result<RunSummary> {
        let span = info_span!("deck_run", title = %plan.title);
        self.stages(plan).instrument(span).await
    }

    async fn stages(&self, plan: &RunPlan) -> Result<RunSummary> {
        let operations = plan
            .operations()
            .inspect_err(|e| error!(error = %e, "building the batch failed"))?;
        let mut fixup = plan.fixup();

        let document_id = self
            .provision(plan)
            .await
            .inspect_err(|e| error!(error = %e, "could not obtain a document"))?;
        info!(document = %document_id, "document ready");

        let mut executor = OperationExecutor::new(self.slides).with_revision_pinning(plan.pin_revision);

        if operations.is_empty() {
            warn!(document = %document_id, "nothing to apply");
        } else {
            let result = executor
                .apply(&document_id, &operations)
                .await
                .inspect_err(|e| error!(document = %document_id, error = %e, "batch failed"))?;
            info!(document = %document_id, operations = result.operation_count, "batch applied");
            if let Some(fixup) = fixup.as_mut() {
                fixup.mark_duplicated(&result)?;
            }
        }

        let snapshot = executor
            .fetch(&document_id)
            .await
            .inspect_err(|e| error!(document = %document_id, error = %e, "fetch failed"))?;
        let structure = describe(&snapshot);
        for line in &structure {
            info!("{}", line);
        }

        let patched_element = match fixup.as_mut() {
            Some(fixup) => Some(
                fixup
                    .run(&mut executor, &document_id)
                    .await
                    .inspect_err(|e| error!(document = %document_id, error = %e, "duplication fix-up failed"))?,
            ),
            None => None,
        };

        let permissions = PermissionManager::new(self.files)
            .apply(&document_id, &plan.sharing)
            .await;
        if !permissions.is_complete() {
            warn!(
                document = %document_id,
                failures = permissions.failures().len(),
                "deck is populated but not fully handed over"
            );
        }

        Ok(RunSummary {
            document_id,
            operations_applied: operations.len(),
            structure,
            patched_element,
            permissions,
        })
    }

    async fn provision(&self, plan: &RunPlan) -> Result<String> {
        match &plan.source {
            DeckSource::Template { template_id, .. } => {
                info!(template = %template_id, "copying template");
                self.files.copy_file(template_id, &plan.title).await
            },
            DeckSource::Scratch(_) => {
                info!("creating presentation");
                self.slides.create(&plan.title).await
            },
        }
    }
}
