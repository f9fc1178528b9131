use std::time::Instant;

use tracing::{info, warn};
use travelseed_core::{IdAllocator, ReferenceRegistry, TravelDomain};

use crate::emitter::EntityEmitter;
use crate::errors::{GenerationError, Result};
use crate::model::{CategoryReport, GenerateOptions, GenerationReport};
use crate::pipelines::{self, BUS_ROUTES, FLIGHT_ROUTES};
use crate::sink::{CategoryOutput, OutputSink};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub report: GenerationReport,
    /// Natural keys registered during the run and the ids they resolved to.
    pub registry: ReferenceRegistry,
}

/// Runs every category pipeline in dependency order.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate both script streams for `domain` into `sink`.
    ///
    /// Categories run as airports, flight routes, bus stops, bus routes,
    /// countries and cities, meals, hotels. The first failure aborts the run;
    /// files of categories already finished stay in the sink. Options that
    /// would push a file ordinal past two digits are rejected before
    /// anything is written.
    pub fn run<S: OutputSink>(
        &self,
        domain: &TravelDomain,
        sink: &mut S,
    ) -> Result<GenerationResult> {
        self.options.validate()?;
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now().to_rfc3339();

        let mut run = Run {
            sink,
            allocator: IdAllocator::new(self.options.entity_ids),
            registry: ReferenceRegistry::new(),
            next_ordinal: self.options.ordinal_base,
            report: GenerationReport::new(run_id.clone(), started_at),
        };

        info!(
            run_id = %run_id,
            entities = domain.entity_count(),
            entity_ids = ?self.options.entity_ids,
            "generation started"
        );

        match run.all_categories(domain) {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    events = run.report.events_emitted,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "generation completed"
                );
                Ok(GenerationResult {
                    report: run.report,
                    registry: run.registry,
                })
            }
            Err(err) => {
                warn!(
                    run_id = %run_id,
                    events = run.allocator.last_event_id(),
                    error = %err,
                    "generation failed"
                );
                Err(err)
            }
        }
    }
}

struct Run<'s, S> {
    sink: &'s mut S,
    allocator: IdAllocator,
    registry: ReferenceRegistry,
    next_ordinal: u32,
    report: GenerationReport,
}

impl<S: OutputSink> Run<'_, S> {
    fn all_categories(&mut self, domain: &TravelDomain) -> Result<()> {
        self.category("airports", |emitter, registry| {
            pipelines::airports(emitter, registry, &domain.airports)
        })?;
        self.category("flight_routes", |emitter, registry| {
            pipelines::routes(emitter, registry, FLIGHT_ROUTES, &domain.flight_routes)
        })?;
        self.category("bus_stops", |emitter, registry| {
            pipelines::bus_stops(emitter, registry, &domain.bus_stops)
        })?;
        self.category("bus_routes", |emitter, registry| {
            pipelines::routes(emitter, registry, BUS_ROUTES, &domain.bus_routes)
        })?;
        self.category("countries_and_cities", |emitter, registry| {
            pipelines::countries_and_cities(emitter, registry, &domain.countries)
        })?;
        self.category("meals", |emitter, registry| {
            pipelines::meals(emitter, registry, &domain.meals)
        })?;
        self.category("hotels", |emitter, registry| {
            pipelines::hotels(emitter, registry, &domain.hotels)
        })
    }

    /// Run one pipeline inside its own output session.
    ///
    /// The session is closed on both paths; a pipeline error wins over a
    /// close error.
    fn category<F>(&mut self, name: &str, pipeline: F) -> Result<()>
    where
        F: FnOnce(&mut EntityEmitter<'_, S::Writer>, &mut ReferenceRegistry) -> Result<()>,
    {
        let ordinal = self.next_ordinal;
        self.next_ordinal = ordinal.checked_add(1).ok_or_else(|| {
            GenerationError::InvalidOptions(format!("file ordinal overflow after {ordinal}"))
        })?;
        let start = Instant::now();
        info!(category = name, ordinal, "category started");

        let mut output = CategoryOutput::open(&mut *self.sink, ordinal, name)?;
        let mut emitter = EntityEmitter::new(&mut self.allocator, &mut output);
        let outcome = pipeline(&mut emitter, &mut self.registry);
        let category = CategoryReport {
            name: name.to_string(),
            ordinal,
            entities: emitter.emitted(),
            first_event_id: emitter.first_event_id(),
            last_event_id: emitter.last_event_id(),
        };
        let closed = output.close();

        outcome?;
        closed?;

        info!(
            category = name,
            entities = category.entities,
            duration_ms = start.elapsed().as_millis() as u64,
            "category generated"
        );
        self.report.record_category(category);
        Ok(())
    }
}
