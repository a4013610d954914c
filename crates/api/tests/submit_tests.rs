//! Wizard submissions end to end: wizard -> submitter -> upload/API.

mod common;

use api::{ClientService, ClientSubmitter, PenaltySubmitter, FinanceService, StaffService, StaffSubmitter, Uploader};
use common::{Harness, PREFIX, client_json};
use loandesk_core::{Role, UploadConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};
use wizard::{ClientForm, FinishOutcome, PenaltyForm, StaffForm, Wizard, WizardStatus};

fn uploader(h: &Harness) -> Uploader {
  Uploader::new(UploadConfig {
    url: h.server.uri(),
    cloud_name: "demo".to_string(),
    upload_preset: "unsigned".to_string(),
    timeout_secs: 5,
  })
  .unwrap()
}

fn fill_client(w: &mut Wizard<ClientForm>) {
  w.set("firstName", "Ada");
  w.set("lastName", "Obi");
  w.set("email", "ada@example.com");
  w.set("phone", "08012345678");
  w.set("dateOfBirth", "1990-04-12");
  w.set("nationalId", "NIN12345");
  w.set("address", "12 Marina Road");
  assert!(matches!(w.next(), wizard::Advance::Moved { from: 0, to: 1 }));

  w.set("principal", "100,000");
  w.set("interestRate", "10");
  w.set("durationMonths", "12");
  w.set("startDate", "2024-01-15");
  assert!(matches!(w.next(), wizard::Advance::Moved { from: 1, to: 2 }));
}

#[tokio::test]
async fn test_client_create_uploads_then_posts() {
  let h = Harness::logged_in(Role::CreditAgent, "/clients/new").await;
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(b"%PDF-1.4 id").unwrap();

  Mock::given(method("POST"))
    .and(path("/demo/auto/upload"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({
      "secure_url": "https://files.example.com/id.pdf",
      "public_id": "docs/id"
    })))
    .expect(1)
    .mount(&h.server)
    .await;
  Mock::given(method("POST"))
    .and(path(format!("{}/clients", PREFIX)))
    .and(body_partial_json(json!({
      "firstName": "Ada",
      "loan": {"principal": 100000.0, "durationMonths": 12},
      "documents": [{"url": "https://files.example.com/id.pdf", "publicId": "docs/id", "name": "ID document"}]
    })))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({
      "data": client_json("c1"),
      "message": "Client created successfully"
    })))
    .expect(1)
    .mount(&h.server)
    .await;

  let submitter = ClientSubmitter::new(ClientService::new(h.api.clone()), Some(uploader(&h)));
  let mut w = Wizard::new(ClientForm::create()).unwrap();
  fill_client(&mut w);
  w.set("idDocument", file.path().to_string_lossy().to_string());
  w.request_submit();

  let outcome = w.finish(&submitter).await;
  assert_eq!(
    outcome,
    FinishOutcome::Completed {
      message: "Client created successfully".to_string(),
      route: "/clients".to_string(),
    }
  );
}

#[tokio::test]
async fn test_client_update_failure_then_retry() {
  let h = Harness::logged_in(Role::Manager, "/clients/c1/edit").await;
  let existing: loandesk_core::Client = serde_json::from_value(client_json("c1")).unwrap();

  Mock::given(method("PUT"))
    .and(path(format!("{}/clients/c1", PREFIX)))
    .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Email already in use"})))
    .up_to_n_times(1)
    .mount(&h.server)
    .await;
  Mock::given(method("PUT"))
    .and(path(format!("{}/clients/c1", PREFIX)))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": client_json("c1")})))
    .mount(&h.server)
    .await;

  let submitter = ClientSubmitter::new(ClientService::new(h.api.clone()), None);
  let (form, draft) = ClientForm::edit(&existing);
  let mut w = Wizard::with_draft(form, draft).unwrap();
  w.next();
  w.next();
  assert!(w.is_last_step());

  w.request_submit();
  assert_eq!(
    w.finish(&submitter).await,
    FinishOutcome::Failed {
      message: "Email already in use".to_string()
    }
  );
  assert_eq!(w.draft().get("email"), Some("ada@example.com"));

  assert!(w.retry());
  assert_eq!(w.status(), &WizardStatus::Editing);
  assert_eq!(w.step(), 2);

  w.back();
  w.back();
  w.set("email", "ada.obi@example.com");
  w.next();
  w.next();
  w.request_submit();
  assert_eq!(
    w.finish(&submitter).await,
    FinishOutcome::Completed {
      message: "Client Ada Obi updated".to_string(),
      route: "/clients/c1".to_string(),
    }
  );
}

#[tokio::test]
async fn test_attachment_without_uploader_fails() {
  let h = Harness::logged_in(Role::CreditAgent, "/clients/new").await;
  let file = tempfile::NamedTempFile::new().unwrap();
  Mock::given(method("POST"))
    .and(path(format!("{}/clients", PREFIX)))
    .respond_with(ResponseTemplate::new(201))
    .expect(0)
    .mount(&h.server)
    .await;

  let submitter = ClientSubmitter::new(ClientService::new(h.api.clone()), None);
  let mut w = Wizard::new(ClientForm::create()).unwrap();
  fill_client(&mut w);
  w.set("proofOfAddress", file.path().to_string_lossy().to_string());
  w.request_submit();

  assert!(matches!(w.finish(&submitter).await, FinishOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_staff_create_default_message() {
  let h = Harness::logged_in(Role::Director, "/agents/new").await;
  Mock::given(method("POST"))
    .and(path(format!("{}/agents", PREFIX)))
    .and(body_partial_json(json!({"role": "creditAgent", "managerId": "m1", "password": "s3cret-pass"})))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {
      "id": "a1",
      "role": "creditAgent",
      "firstName": "Tunde",
      "lastName": "Ade",
      "email": "tunde@example.com",
      "phone": "08011112222",
      "managerId": "m1"
    }})))
    .expect(1)
    .mount(&h.server)
    .await;

  let submitter = StaffSubmitter::new(StaffService::new(h.api.clone(), Role::CreditAgent), None);
  let mut w = Wizard::new(StaffForm::create(Role::CreditAgent)).unwrap();
  w.set("firstName", "Tunde");
  w.set("lastName", "Ade");
  w.set("email", "tunde@example.com");
  w.set("password", "s3cret-pass");
  w.next();
  w.set("phone", "08011112222");
  w.set("managerId", "m1");
  w.next();
  w.request_submit();

  assert_eq!(
    w.finish(&submitter).await,
    FinishOutcome::Completed {
      message: "Credit agent Tunde Ade created".to_string(),
      route: "/agents".to_string(),
    }
  );
}

#[tokio::test]
async fn test_penalty_uses_server_message() {
  let h = Harness::logged_in(Role::Manager, "/finance/c1").await;
  Mock::given(method("POST"))
    .and(path(format!("{}/clients/c1/penalties", PREFIX)))
    .and(body_partial_json(json!({"amount": 500.0, "reason": "Late payment"})))
    .respond_with(ResponseTemplate::new(201).set_body_json(json!({
      "data": {"id": "p1", "amount": 500.0, "reason": "Late payment", "appliedOn": "2024-05-01"},
      "message": "Penalty applied"
    })))
    .expect(1)
    .mount(&h.server)
    .await;

  let submitter = PenaltySubmitter::new(FinanceService::new(h.api.clone()));
  let mut w = Wizard::new(PenaltyForm::new("c1")).unwrap();
  w.set("amount", "500");
  w.set("reason", "Late payment");
  w.request_submit();

  assert_eq!(
    w.finish(&submitter).await,
    FinishOutcome::Completed {
      message: "Penalty applied".to_string(),
      route: "/finance/c1".to_string(),
    }
  );
}
