//! Lifecycle engine integration tests

use async_trait::async_trait;
use gke_lifecycle::operator::{
    BackoffPolicy, GKEClusterConfig, GKEClusterConfigSpec, GkeClusterService, LifecycleEngine,
    Operation, OperatorError, Outcome, ServiceError, ERR_NOT_FOUND, ERR_WAIT,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

/// Control plane that replays a fixed script of responses and records every call
#[derive(Default)]
struct ScriptedControlPlane {
    responses: Mutex<VecDeque<Result<Operation, ServiceError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedControlPlane {
    fn new(responses: Vec<Result<Operation, ServiceError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, name: &str) -> Result<Operation, ServiceError> {
        self.calls.lock().unwrap().push(name.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::api(500, "script exhausted")))
    }
}

#[async_trait]
impl GkeClusterService for ScriptedControlPlane {
    async fn cluster_delete(&self, name: &str) -> Result<Operation, ServiceError> {
        self.next(name)
    }

    async fn node_pool_delete(&self, name: &str) -> Result<Operation, ServiceError> {
        self.next(name)
    }
}

fn cluster_config() -> GKEClusterConfig {
    GKEClusterConfig::new(
        "prod",
        GKEClusterConfigSpec {
            project_id: "acme".to_string(),
            cluster_name: "prod".to_string(),
            region: "europe-west1".to_string(),
            zone: "europe-west1-b".to_string(),
            ..Default::default()
        },
    )
}

fn engine(steps: u32) -> LifecycleEngine {
    LifecycleEngine::new(BackoffPolicy::fixed(Duration::from_millis(2), steps))
}

fn busy() -> Result<Operation, ServiceError> {
    Err(ServiceError::api(
        400,
        format!("Cluster prod is currently being upgraded. {}.", ERR_WAIT),
    ))
}

fn not_found() -> Result<Operation, ServiceError> {
    Err(ServiceError::api(404, format!("{}: cluster prod", ERR_NOT_FOUND)))
}

fn accepted() -> Result<Operation, ServiceError> {
    Ok(Operation {
        name: "operation-42".to_string(),
        operation_type: "DELETE_CLUSTER".to_string(),
        ..Default::default()
    })
}

#[tokio::test]
async fn busy_then_success_takes_n_plus_one_attempts() {
    let client = ScriptedControlPlane::new(vec![busy(), busy(), busy(), accepted()]);

    assert_ok!(
        engine(6)
            .remove_cluster(&CancellationToken::new(), &client, &cluster_config())
            .await
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls
        .iter()
        .all(|c| c == "projects/acme/locations/europe-west1-b/clusters/prod"));
}

#[tokio::test]
async fn always_busy_stops_after_max_steps() {
    let client = ScriptedControlPlane::new((0..10).map(|_| busy()).collect());

    let err = engine(5)
        .remove_cluster(&CancellationToken::new(), &client, &cluster_config())
        .await
        .unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(client.calls().len(), 5);
    assert!(err
        .to_string()
        .contains("projects/acme/locations/europe-west1-b/clusters/prod"));
}

#[tokio::test]
async fn absent_cluster_is_deleted_on_first_attempt() {
    let client = ScriptedControlPlane::new(vec![not_found(), busy()]);

    assert_ok!(
        engine(3)
            .remove_cluster(&CancellationToken::new(), &client, &cluster_config())
            .await
    );
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn fatal_error_is_surfaced_verbatim() {
    let client = ScriptedControlPlane::new(vec![
        busy(),
        Err(ServiceError::api(403, "Required 'container.clusters.delete' permission")),
    ]);

    let err = engine(5)
        .remove_cluster(&CancellationToken::new(), &client, &cluster_config())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OperatorError::Remote(ServiceError::api(
            403,
            "Required 'container.clusters.delete' permission"
        ))
    );
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn cancelled_before_first_attempt_makes_no_call() {
    let client = ScriptedControlPlane::new(vec![accepted()]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = assert_err!(
        engine(3)
            .remove_cluster(&cancel, &client, &cluster_config())
            .await
    );
    assert!(err.is_cancelled());
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn node_pool_cancelled_before_attempt_makes_no_call() {
    let client = ScriptedControlPlane::new(vec![accepted()]);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = assert_err!(
        engine(3)
            .remove_node_pool(&cancel, &client, &cluster_config(), "pool-a")
            .await
    );
    assert_eq!(err, OperatorError::Cancelled);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn incomplete_spec_is_rejected_without_calls() {
    let client = ScriptedControlPlane::new(vec![accepted(), accepted()]);
    let empty = GKEClusterConfig::new("empty", GKEClusterConfigSpec::default());

    let err = assert_err!(
        engine(3)
            .remove_cluster(&CancellationToken::new(), &client, &empty)
            .await
    );
    assert!(matches!(err, OperatorError::InvalidSpec(_)));

    let err = assert_err!(
        engine(3)
            .remove_node_pool(&CancellationToken::new(), &client, &empty, "pool-a")
            .await
    );
    assert!(matches!(err, OperatorError::InvalidSpec(_)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn cluster_name_cannot_alias_a_node_pool() {
    let client = ScriptedControlPlane::new(vec![accepted()]);
    let mut aliased = cluster_config();
    aliased.spec.cluster_name = "prod/nodePools/pool-a".to_string();

    let err = assert_err!(
        engine(3)
            .remove_cluster(&CancellationToken::new(), &client, &aliased)
            .await
    );
    assert!(matches!(err, OperatorError::InvalidSpec(_)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn cancellation_during_backoff_stops_further_attempts() {
    let client = Arc::new(ScriptedControlPlane::new(
        (0..10).map(|_| busy()).collect(),
    ));
    let cancel = CancellationToken::new();
    let engine = LifecycleEngine::new(BackoffPolicy::fixed(Duration::from_secs(60), 10));

    let task = {
        let client = Arc::clone(&client);
        let cancel = cancel.clone();
        tokio::spawn(async move {
            engine
                .remove_cluster(&cancel, client.as_ref(), &cluster_config())
                .await
        })
    };

    // Let the first attempt run and the engine enter its 60s wait
    while client.calls().is_empty() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("engine did not observe cancellation")
        .expect("task panicked");

    assert_eq!(result, Err(OperatorError::Cancelled));
    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn node_pool_delete_maps_outcomes() {
    let cases = vec![
        (accepted(), Outcome::Changed),
        (busy(), Outcome::Retry),
        (not_found(), Outcome::NotChanged),
    ];

    for (response, expected) in cases {
        let client = ScriptedControlPlane::new(vec![response, busy()]);
        let outcome = engine(3)
            .remove_node_pool(&CancellationToken::new(), &client, &cluster_config(), "pool-a")
            .await
            .unwrap();

        assert_eq!(outcome, expected);
        assert_eq!(
            client.calls(),
            vec!["projects/acme/locations/europe-west1-b/clusters/prod/nodePools/pool-a"]
        );
    }
}

#[tokio::test]
async fn node_pool_delete_returns_fatal_error_as_not_changed() {
    let fatal = ServiceError::api(500, "backend error");
    let client = ScriptedControlPlane::new(vec![Err(fatal.clone())]);

    let err = engine(3)
        .remove_node_pool(&CancellationToken::new(), &client, &cluster_config(), "pool-a")
        .await
        .unwrap_err();

    assert_eq!(err, OperatorError::Remote(fatal));
    assert_eq!(err.outcome(), Outcome::NotChanged);
}

#[tokio::test]
async fn engine_is_shareable_across_tasks() {
    let engine = Arc::new(engine(3));
    let mut handles = Vec::new();

    for i in 0..4 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            let client = ScriptedControlPlane::new(vec![busy(), accepted()]);
            let mut config = cluster_config();
            config.spec.cluster_name = format!("prod-{}", i);
            let result = engine
                .remove_cluster(&CancellationToken::new(), &client, &config)
                .await;
            (result, client.calls())
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let (result, calls) = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(calls.len(), 2);
        assert!(calls[0].ends_with(&format!("/clusters/prod-{}", i)));
    }
}
