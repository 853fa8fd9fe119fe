//! End-to-end compatibility scenarios driving the full check run.

use oacheck_core::{run_checks, ApiDocument, CheckConfig, Incompatibility};
use pretty_assertions::assert_eq;

fn document(content: &str) -> ApiDocument {
    ApiDocument::parse(content).unwrap()
}

#[test]
fn missing_translated_route_reports_exactly_one_failure() {
    let open = document(
        r#"
info:
  version: 3.1.0
paths:
  /api/flows/:
    get:
      tags: [Flows]
"#,
    );
    let hosted = document("paths: {}\n");

    let report = run_checks(&open, &hosted, &CheckConfig::default());

    assert!(!report.is_compatible());
    assert_eq!(
        report.incompatibilities,
        vec![Incompatibility::MissingRoute {
            method: "GET".into(),
            path: "/api/accounts/{account_id}/workspaces/{workspace_id}/flows/".into(),
        }]
    );
    assert_eq!(
        report.incompatibilities[0].to_string(),
        "Missing hosted route GET: /api/accounts/{account_id}/workspaces/{workspace_id}/flows/"
    );
}

#[test]
fn hosted_may_require_more_than_open() {
    // Open declares no required list while hosted requires `bar`; the open
    // required set is a subset of the hosted one, so the run passes.
    let open = document(
        r#"
info:
  version: 3.1.0
paths: {}
components:
  schemas:
    Foo:
      properties:
        bar: { type: string }
"#,
    );
    let hosted = document(
        r#"
info:
  version: 3.1.0
paths: {}
components:
  schemas:
    Foo:
      properties:
        bar: { type: string }
      required: [bar]
"#,
    );

    let report = run_checks(&open, &hosted, &CheckConfig::default());
    assert!(report.is_compatible());

    // The reverse direction is a real mismatch.
    let reverse = run_checks(&hosted, &open, &CheckConfig::default());
    assert_eq!(reverse.incompatibilities.len(), 1);
}

#[test]
fn forward_compatible_request_prop_suppresses_the_failure() {
    let open = document(
        r##"
info:
  version: 3.1.0
paths:
  /api/deployments/:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/DeploymentCreate"
components:
  schemas:
    DeploymentCreate:
      type: object
      properties:
        name: { type: string }
        job_variables: { type: object, default: {} }
"##,
    );
    let hosted = document(
        r##"
paths:
  /api/accounts/{account_id}/workspaces/{workspace_id}/deployments/:
    post:
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/DeploymentCreate"
components:
  schemas:
    DeploymentCreate:
      type: object
      properties:
        name: { type: string }
"##,
    );

    let report = run_checks(&open, &hosted, &CheckConfig::default());
    assert!(report.is_compatible());
}

#[test]
fn every_failure_is_collected_across_checkers() {
    // One missing route, one parameter mismatch, one body-field mismatch, and
    // one type mismatch must all appear in a single report.
    let open = document(
        r##"
info:
  version: 3.1.0
paths:
  /api/flows/:
    get:
      tags: [Flows]
  /api/flow_runs/:
    post:
      tags: [Flow Runs]
      parameters:
        - name: limit
          in: query
          required: false
          schema: { type: integer }
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/FlowRunCreate"
components:
  schemas:
    FlowRunCreate:
      type: object
      properties:
        name: { type: string }
        state: { type: string }
    StateType:
      enum: [RUNNING, SCHEDULED]
"##,
    );
    let hosted = document(
        r##"
paths:
  /api/accounts/{account_id}/workspaces/{workspace_id}/flow_runs/:
    post:
      parameters:
        - name: limit
          in: query
          required: true
          schema: { type: integer }
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/FlowRunCreate"
components:
  schemas:
    FlowRunCreate:
      type: object
      properties:
        name: { type: string }
    StateType:
      enum: [RUNNING]
"##,
    );

    let report = run_checks(&open, &hosted, &CheckConfig::default());

    // The shared body schema also diverges as a named type, so five
    // independent diagnostics come back from one run.
    assert_eq!(report.incompatibilities.len(), 5);

    let mut kinds: Vec<&str> = report
        .incompatibilities
        .iter()
        .map(|issue| match issue {
            Incompatibility::MissingRoute { .. } => "route",
            Incompatibility::ParameterMismatch { .. } => "parameter",
            Incompatibility::BodyFieldMissing { .. } => "body-field",
            Incompatibility::TypeFieldMissing { .. } => "type-field",
            Incompatibility::TypeFacetMismatch { .. } => "type-facet",
            other => panic!("unexpected diagnostic: {:?}", other),
        })
        .collect();
    kinds.sort_unstable();
    assert_eq!(
        kinds,
        vec!["body-field", "parameter", "route", "type-facet", "type-field"]
    );
}

#[test]
fn compatible_documents_produce_an_empty_report() {
    let open = document(
        r#"
info:
  version: 3.1.0
paths:
  /api/flows/:
    get:
      tags: [Flows]
      parameters:
        - name: x-api-version
          in: header
          required: false
          schema: { type: string }
components:
  schemas:
    FlowCreate:
      type: object
      properties:
        name: { type: string }
      required: [name]
"#,
    );
    let hosted = document(
        r#"
paths:
  /api/accounts/{account_id}/workspaces/{workspace_id}/flows/:
    get:
      parameters:
        - name: account_id
          in: path
          required: true
          schema: { type: string, format: uuid }
        - name: workspace_id
          in: path
          required: true
          schema: { type: string, format: uuid }
        - name: x-api-version
          in: header
          required: false
          schema: { type: string }
components:
  schemas:
    FlowCreate:
      type: object
      properties:
        name: { type: string }
      required: [name]
"#,
    );

    let report = run_checks(&open, &hosted, &CheckConfig::default());
    assert!(report.is_compatible());
    assert!(report.gaps.is_empty());
}
