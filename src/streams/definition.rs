//! Static per-resource stream descriptors
//!
//! Each resource the tap replicates is described by one descriptor: its
//! id, primary key, bookmark field, the query param the bookmark is sent
//! as, and the full set of filters the upstream endpoint accepts.

use crate::types::{JsonValue, ReplicationMethod};
use once_cell::sync::Lazy;

/// Static description of one replicable resource
#[derive(Debug)]
pub struct StreamDefinition {
    /// Stream id, also the endpoint path segment and response envelope key
    pub stream_id: &'static str,
    /// Primary key fields
    pub key_properties: &'static [&'static str],
    /// Record field holding the replication bookmark
    pub bookmark_field: &'static str,
    /// Query parameter name the bookmark lower bound is sent as
    pub bookmark_query_param: &'static str,
    /// Query parameters the endpoint accepts
    pub valid_query_params: &'static [&'static str],
    /// How the stream replicates
    pub replication_method: ReplicationMethod,
    /// Embedded singer schema for the stream's records, parsed once
    schema: Lazy<JsonValue>,
}

impl StreamDefinition {
    /// The stream's JSON schema
    pub fn schema(&self) -> JsonValue {
        (*self.schema).clone()
    }

    /// Whether a query parameter is accepted by this stream's endpoint
    pub fn accepts_param(&self, param: &str) -> bool {
        self.valid_query_params.contains(&param)
    }
}

/// Jobs stream descriptor
pub static JOBS: StreamDefinition = StreamDefinition {
    stream_id: "jobs",
    key_properties: &["id"],
    bookmark_field: "updated_at",
    bookmark_query_param: "updated_after",
    valid_query_params: &[
        "state",
        "job_request_id",
        "classification",
        "w2_hourly_rate",
        "w2_pay_status",
        "updated_before",
        "updated_after",
    ],
    replication_method: ReplicationMethod::Incremental,
    schema: Lazy::new(|| parse_schema(include_str!("../schemas/jobs.json"))),
};

/// Job requests stream descriptor
pub static JOB_REQUESTS: StreamDefinition = StreamDefinition {
    stream_id: "job_requests",
    key_properties: &["id"],
    bookmark_field: "updated_at",
    bookmark_query_param: "updated_after",
    valid_query_params: &[
        "state",
        "company_id",
        "multi_day_job_request_id",
        "classification",
        "w2_hourly_rate",
        "updated_before",
        "updated_after",
        "agent_code",
    ],
    replication_method: ReplicationMethod::Incremental,
    schema: Lazy::new(|| parse_schema(include_str!("../schemas/job_requests.json"))),
};

/// Users stream descriptor
pub static USERS: StreamDefinition = StreamDefinition {
    stream_id: "users",
    key_properties: &["id"],
    bookmark_field: "updated_at",
    bookmark_query_param: "updated_after",
    valid_query_params: &[
        "type",
        "email",
        "first_name",
        "last_name",
        "external_id",
        "onboarding_last_state",
        "w2_onboarding_status",
        "w2_employee_id",
        "address_state",
        "drug_tested",
        "updated_before",
        "updated_after",
    ],
    replication_method: ReplicationMethod::Incremental,
    schema: Lazy::new(|| parse_schema(include_str!("../schemas/users.json"))),
};

fn parse_schema(json: &str) -> JsonValue {
    serde_json::from_str(json).expect("embedded schema is valid JSON")
}

/// All streams the tap can replicate
pub static AVAILABLE_STREAMS: &[&StreamDefinition] = &[&JOBS, &JOB_REQUESTS, &USERS];

/// Look up a stream definition by id
pub fn find(stream_id: &str) -> Option<&'static StreamDefinition> {
    AVAILABLE_STREAMS
        .iter()
        .copied()
        .find(|def| def.stream_id == stream_id)
}
