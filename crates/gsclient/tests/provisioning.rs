//! End-to-end provisioning flows through the facade client.

use std::time::Duration;

use gsclient::ip::{IpCreateRequest, IpFamily};
use gsclient::storage::{StorageCreateRequest, StorageTemplate, StorageType};
use gsclient::uuid::{
    IpUuid, IsoImageUuid, LocationUuid, ObjectUuid, ServerUuid, SshkeyUuid, TemplateUuid,
};
use gsclient::{Error, GridscaleClient, PollPolicy, RequestState, RequestUuid, ServiceClientBuilder};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn facade(server: &MockServer) -> GridscaleClient {
    let service = ServiceClientBuilder::new(server.uri(), "user-uuid", "secret-token")
        .unwrap()
        .with_poll_policy(
            PollPolicy::new()
                .with_interval(Duration::from_millis(5))
                .with_timeout(Duration::from_secs(2)),
        )
        .build()
        .unwrap();
    GridscaleClient::from_service_client(service)
}

#[tokio::test]
async fn storage_from_named_template_waits_for_provisioning() {
    let server = MockServer::start().await;
    let template = TemplateUuid::new_v4();
    let location = LocationUuid::new_v4();
    let key = SshkeyUuid::new_v4();
    let request_uuid = RequestUuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/objects/templates"))
        .and(header("X-Auth-UserId", "user-uuid"))
        .and(header("X-Auth-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "templates": {
                template.to_string(): {"object_uuid": template, "name": "Ubuntu 22.04"}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/objects/templates/{template}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template": {"object_uuid": template, "name": "Ubuntu 22.04", "capacity": 10}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/objects/storages"))
        .and(body_json(json!({
            "capacity": 20,
            "location_uuid": location,
            "name": "web01-root",
            "storage_type": "storage_high",
            "template": {"template_uuid": template, "sshkeys": [key]}
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "request_uuid": request_uuid,
            "object_uuid": ObjectUuid::new_v4()
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/requests/{request_uuid}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            request_uuid.to_string(): {"status": "pending"}
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/requests/{request_uuid}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            request_uuid.to_string(): {"status": "done"}
        })))
        .mount(&server)
        .await;

    let client = facade(&server);
    let found = client
        .templates()
        .get_template_by_name("Ubuntu 22.04")
        .await
        .unwrap();

    let mut storage_template = StorageTemplate::new(found.object_uuid);
    storage_template.sshkeys = vec![key];
    let request = StorageCreateRequest {
        capacity: 20,
        location_uuid: location,
        name: "web01-root".into(),
        storage_type: Some(StorageType::StorageHigh),
        template: Some(storage_template),
        labels: Vec::new(),
    };
    let response = client.storages().create_storage(&request).await.unwrap();
    assert_eq!(response.request_uuid, request_uuid);

    let status = client.request_status(&request_uuid).await.unwrap();
    assert_eq!(status.status, RequestState::Done);
}

#[tokio::test]
async fn insert_isoimage_and_wait_for_unrelated_request() {
    let server = MockServer::start().await;
    let machine = ServerUuid::new_v4();
    let iso = IsoImageUuid::new_v4();
    let request_uuid = RequestUuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/objects/servers/{machine}/isoimages").as_str()))
        .and(body_json(json!({"object_uuid": iso})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/requests/{request_uuid}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            request_uuid.to_string(): {"status": "failed", "message": "server is locked"}
        })))
        .mount(&server)
        .await;

    let client = facade(&server);
    client.servers().link_isoimage(machine, iso).await.unwrap();

    let err = client
        .wait_for_request_completion(&request_uuid)
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::RequestFailed { ref message, .. } if message == "server is locked")
    );
}

#[tokio::test]
async fn failed_create_leaves_object_uuid_for_cleanup() {
    let server = MockServer::start().await;
    let ip = IpUuid::new_v4();
    let request_uuid = RequestUuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/objects/ips"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "request_uuid": request_uuid,
            "object_uuid": ip,
            "ip": "185.201.147.17",
            "prefix": "185.201.147.17/32"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/requests/{request_uuid}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            request_uuid.to_string(): {"status": "failed", "message": "quota exceeded"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/objects/ips/{ip}").as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = facade(&server);
    let request = IpCreateRequest::new(IpFamily::V4, LocationUuid::new_v4());
    let err = client.ips().create_ip(&request).await.unwrap_err();

    let leftover: IpUuid = err
        .object_uuid()
        .expect("failed create should report the object UUID")
        .parse()
        .unwrap();
    assert_eq!(leftover, ip);
    client.ips().delete_ip(leftover).await.unwrap();
}
