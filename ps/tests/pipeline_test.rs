//! End-to-end tests for the planning and forgotten-item pipeline

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Barrier;

use packsmart::collab::{
    CollaboratorError, ForecastLookup, ForgottenCheckInput, ForgottenItemCheck, ImageLookup, ListGenerationInput,
    ListGenerator, StaticForecastTable,
};
use packsmart::domain::{
    FETCH_FAILED_DESCRIPTION, ForecastSet, IMAGE_SET_SIZE, ImageResource, PLACEHOLDER_DATA_URI, TEMPERATURE_UNAVAILABLE,
    TripParameters,
};
use packsmart::history::{HISTORY_FILE_NAME, TripHistory, TripRecord};
use packsmart::planner::{ForgottenItemReconciler, MergeOutcome, PLAN_FAILED_MESSAGE, PackingOrchestrator};
use packsmart::session::PackingSession;

// Test doubles

struct FixedList {
    names: Vec<&'static str>,
    seen: Mutex<Vec<ListGenerationInput>>,
}

impl FixedList {
    fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ListGenerator for FixedList {
    async fn generate_list(&self, input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError> {
        self.seen.lock().unwrap().push(input.clone());
        Ok(self.names.iter().map(|n| n.to_string()).collect())
    }
}

struct CountedImages(usize);

#[async_trait]
impl ImageLookup for CountedImages {
    async fn generate_images(&self, destination: &str) -> Result<Vec<ImageResource>, CollaboratorError> {
        Ok((0..self.0)
            .map(|i| ImageResource::new(format!("data:image/png;base64,IMG{i}"), format!("{destination} {i}")))
            .collect())
    }
}

struct FailingForecast;

#[async_trait]
impl ForecastLookup for FailingForecast {
    async fn lookup_forecast(&self, _destination: &str) -> Result<ForecastSet, CollaboratorError> {
        Err(CollaboratorError::Unavailable("weather service down".to_string()))
    }
}

struct FailingList;

#[async_trait]
impl ListGenerator for FailingList {
    async fn generate_list(&self, _input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError> {
        Err(CollaboratorError::InvalidOutput("not json".to_string()))
    }
}

struct FailingImages;

#[async_trait]
impl ImageLookup for FailingImages {
    async fn generate_images(&self, _destination: &str) -> Result<Vec<ImageResource>, CollaboratorError> {
        Err(CollaboratorError::Unavailable("image quota exhausted".to_string()))
    }
}

/// Both collaborators wait on one barrier, so they only finish if run together
struct RendezvousList(Arc<Barrier>);

#[async_trait]
impl ListGenerator for RendezvousList {
    async fn generate_list(&self, _input: &ListGenerationInput) -> Result<Vec<String>, CollaboratorError> {
        self.0.wait().await;
        Ok(vec!["Phone".to_string()])
    }
}

struct RendezvousImages(Arc<Barrier>);

#[async_trait]
impl ImageLookup for RendezvousImages {
    async fn generate_images(&self, _destination: &str) -> Result<Vec<ImageResource>, CollaboratorError> {
        self.0.wait().await;
        Ok(Vec::new())
    }
}

struct ScriptedCheck {
    names: Vec<&'static str>,
    calls: Mutex<Vec<ForgottenCheckInput>>,
}

impl ScriptedCheck {
    fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ForgottenItemCheck for ScriptedCheck {
    async fn check_forgotten(&self, input: &ForgottenCheckInput) -> Result<Vec<String>, CollaboratorError> {
        self.calls.lock().unwrap().push(input.clone());
        Ok(self.names.iter().map(|n| n.to_string()).collect())
    }
}

fn orchestrator(
    forecast: impl ForecastLookup + 'static,
    lists: impl ListGenerator + 'static,
    images: impl ImageLookup + 'static,
) -> PackingOrchestrator {
    PackingOrchestrator::new(Arc::new(forecast), Arc::new(lists), Arc::new(images))
}

fn paris_beach() -> TripParameters {
    TripParameters::new("Paris", "beach", 5).unwrap()
}

// Orchestrator

#[tokio::test]
async fn test_paris_scenario() {
    let lists = Arc::new(FixedList::new(&["Sunscreen", "Swimsuit", "Phone"]));
    let orchestrator = PackingOrchestrator::new(
        Arc::new(StaticForecastTable::new()),
        lists.clone(),
        Arc::new(CountedImages(5)),
    );

    let result = orchestrator.plan_trip(&paris_beach()).await;

    assert!(result.failure.is_none());
    let names: Vec<&str> = result.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Sunscreen", "Swimsuit", "Phone"]);
    assert!(result.items.iter().all(|i| i.is_suggestion && !i.packed));
    assert_eq!(result.weather, StaticForecastTable::resolve("Paris"));
    assert_eq!(result.images.as_slice().len(), IMAGE_SET_SIZE);
    assert_eq!(result.images.real_count(), 5);

    let seen = lists.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].trip_type, "beach");
    assert_eq!(seen[0].duration, 5);
    assert_eq!(
        seen[0].destination_weather,
        "Partly cloudy with a chance of light showers in the evening 22°C"
    );
}

#[tokio::test]
async fn test_unknown_destination_gets_generic_forecast() {
    for destination in ["Ulaanbaatar", "Timbuktu, Mali", "Zz"] {
        let params = TripParameters::new(destination, "city", 2).unwrap();
        let result = orchestrator(StaticForecastTable::new(), FixedList::new(&["Phone"]), CountedImages(0))
            .plan_trip(&params)
            .await;

        assert!(result.failure.is_none(), "{destination}");
        for point in result.weather.points() {
            assert!(!point.description.is_empty());
            assert!(point.has_temperature());
        }
    }
}

#[tokio::test]
async fn test_images_always_padded_to_five() {
    for produced in 0..=IMAGE_SET_SIZE {
        let result = orchestrator(StaticForecastTable::new(), FixedList::new(&["Phone"]), CountedImages(produced))
            .plan_trip(&paris_beach())
            .await;

        assert_eq!(result.images.as_slice().len(), IMAGE_SET_SIZE);
        assert_eq!(result.images.real_count(), produced);
        for image in result.images.iter().skip(produced) {
            assert!(image.is_placeholder);
            assert_eq!(image.source_data, PLACEHOLDER_DATA_URI);
        }
    }
}

#[tokio::test]
async fn test_failure_shape_is_independent_of_collaborator() {
    let params = paris_beach();
    let results = vec![
        orchestrator(FailingForecast, FixedList::new(&["Phone"]), CountedImages(5))
            .plan_trip(&params)
            .await,
        orchestrator(StaticForecastTable::new(), FailingList, CountedImages(5))
            .plan_trip(&params)
            .await,
        orchestrator(StaticForecastTable::new(), FixedList::new(&["Phone"]), FailingImages)
            .plan_trip(&params)
            .await,
    ];

    for result in &results {
        assert!(result.items.is_empty());
        assert_eq!(result.failure.as_ref().unwrap().message, PLAN_FAILED_MESSAGE);
        for point in result.weather.points() {
            assert_eq!(point.description, FETCH_FAILED_DESCRIPTION);
            assert_eq!(point.temperature, TEMPERATURE_UNAVAILABLE);
        }
        assert_eq!(result.images.as_slice().len(), IMAGE_SET_SIZE);
        assert!(result.images.iter().all(|i| i.is_placeholder));
    }

    // Same shape whichever collaborator failed, ids aside
    let shape = |r: &packsmart::PackingSessionResult| {
        (
            r.items.len(),
            r.weather.clone(),
            r.images.iter().map(|i| i.source_data.clone()).collect::<Vec<_>>(),
            r.failure.as_ref().map(|f| f.message.clone()),
        )
    };
    assert_eq!(shape(&results[0]), shape(&results[1]));
    assert_eq!(shape(&results[1]), shape(&results[2]));
}

#[tokio::test]
async fn test_list_and_images_run_concurrently() {
    let barrier = Arc::new(Barrier::new(2));
    let orchestrator = orchestrator(
        StaticForecastTable::new(),
        RendezvousList(barrier.clone()),
        RendezvousImages(barrier),
    );

    let result = tokio::time::timeout(Duration::from_secs(5), orchestrator.plan_trip(&paris_beach()))
        .await
        .expect("list generation and image lookup should overlap");
    assert_eq!(result.items.len(), 1);
}

// Reconciler and merge

#[tokio::test]
async fn test_merge_law() {
    let mut session = PackingSession::new();
    let ticket = session.begin_plan(paris_beach());
    let plan = orchestrator(StaticForecastTable::new(), FixedList::new(&["Passport", "Phone"]), CountedImages(0))
        .plan_trip(&ticket.params)
        .await;
    assert!(session.apply_plan(&ticket, plan));

    let check = Arc::new(ScriptedCheck::new(&["passport", "Sunscreen"]));
    let reconciler = ForgottenItemReconciler::new(check.clone());
    let (trip, names) = session.forgotten_request().unwrap();
    let result = reconciler.reconcile_forgotten(&trip, &names).await;

    // Reconciler does not filter; the merge does
    assert_eq!(result.additions.len(), 2);
    assert_eq!(session.apply_forgotten(result), Ok(MergeOutcome::Added(1)));

    let names: Vec<&str> = session.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Passport", "Phone", "Sunscreen"]);
    assert_eq!(check.calls.lock().unwrap()[0].packed_items, vec!["Passport", "Phone"]);
}

#[tokio::test]
async fn test_merge_keeps_check_order() {
    let mut session = PackingSession::new();
    let ticket = session.begin_plan(paris_beach());
    session.apply_plan(
        &ticket,
        orchestrator(StaticForecastTable::new(), FixedList::new(&["Phone"]), CountedImages(0))
            .plan_trip(&ticket.params)
            .await,
    );

    let check = ScriptedCheck::new(&["Zinc cream", "Adapter", "phone", "Book"]);
    let reconciler = ForgottenItemReconciler::new(Arc::new(check));
    let (trip, names) = session.forgotten_request().unwrap();
    let outcome = session.apply_forgotten(reconciler.reconcile_forgotten(&trip, &names).await);

    assert_eq!(outcome, Ok(MergeOutcome::Added(3)));
    let names: Vec<&str> = session.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Phone", "Zinc cream", "Adapter", "Book"]);
}

#[tokio::test]
async fn test_reconciler_has_no_internal_gate() {
    let check = Arc::new(ScriptedCheck::new(&["Toothbrush"]));
    let reconciler = ForgottenItemReconciler::new(check.clone());

    let result = reconciler.reconcile_forgotten(&paris_beach(), &[]).await;

    assert_eq!(check.calls.lock().unwrap().len(), 1);
    assert!(check.calls.lock().unwrap()[0].packed_items.is_empty());
    assert_eq!(result.additions.len(), 1);
    assert!(result.additions[0].is_suggestion);
}

// History

#[tokio::test]
async fn test_history_cap_and_image_stripping() {
    let temp = TempDir::new().unwrap();
    let history: TripHistory = historystore::HistoryLog::open(temp.path(), HISTORY_FILE_NAME).unwrap();

    let mut ids = Vec::new();
    for day in 1..=10 {
        let params = TripParameters::new("Rome", "city", day).unwrap();
        let mut session = PackingSession::new();
        let ticket = session.begin_plan(params);
        let plan = orchestrator(StaticForecastTable::new(), FixedList::new(&["Phone"]), CountedImages(5))
            .plan_trip(&ticket.params)
            .await;
        session.apply_plan(&ticket, plan);

        let record: TripRecord = session.snapshot().unwrap();
        assert!(record.images.is_some());
        let entries = history.append(record);
        ids.push(entries[0].id.clone());
    }

    let full = history.list();
    assert_eq!(full.len(), 10);
    let oldest = full[9].id.clone();
    assert_eq!(oldest, ids[0]);

    let extra = TripRecord {
        trip_parameters: TripParameters::new("Oslo", "ski", 4).unwrap(),
        items: Vec::new(),
        weather: None,
        images: Some(packsmart::ImageSet::placeholders("Oslo")),
    };
    let entries = history.append(extra);

    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].record.trip_parameters.destination, "Oslo");
    assert!(entries.iter().all(|e| e.id != oldest));
    assert!(history.list().iter().all(|e| e.record.images.is_none()));
}
