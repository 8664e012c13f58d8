//! Fuzz target for job result parsing and event shaping.
//!
//! Arbitrary job documents must never panic while rows are iterated and
//! shaped into GELF payloads.

#![no_main]

use hb_common::{HostFacts, OptsLookup};
use hb_gelf::{build_event, EventContext, GelfPayload, JobReturn};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(job) = serde_json::from_slice::<JobReturn>(data) else {
        return;
    };
    let facts = HostFacts::default();
    let host = facts.resolve(&job.id);
    let lookup = OptsLookup::default();

    for (query, row) in job.rows() {
        let context = EventContext {
            query: query.to_string(),
            job_id: job.jid.clone(),
            minion_id: job.id.clone(),
            dest_host: host.hostname.clone(),
            dest_ip: host.ipv4.clone(),
        };
        let event = build_event(&[], &context.to_map(), &facts.cloud_details, row, &lookup);
        let _ = GelfPayload::new(&host.hostname, "fuzz", event).to_json();
    }
});
