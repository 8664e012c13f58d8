//! Returner loop: job results to GELF payloads.

use crate::{
    build_event, destinations_for, DestinationConfig, EventContext, GelfPayload, GelfTransport,
    SourceKind,
};
use hb_common::{ConfigLookup, HostFacts, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Results of one job as handed over by the host runtime.
///
/// `queries` is a list of mappings from query name to a payload whose `data`
/// field holds the result rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobReturn {
    /// Reporting minion id.
    pub id: String,

    /// Job id.
    pub jid: String,

    /// Per-query results. A missing or null `return` is an empty list.
    #[serde(rename = "return", default, deserialize_with = "null_as_empty")]
    pub queries: Vec<Map<String, Value>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

impl JobReturn {
    /// Iterate `(query_name, row)` pairs in result order.
    ///
    /// Payloads without a `data` list and rows that are not mappings are
    /// skipped.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.queries
            .iter()
            .flat_map(|query| query.iter())
            .flat_map(|(name, payload)| {
                payload
                    .get("data")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
                    .filter_map(move |row| row.as_object().map(|row| (name.as_str(), row)))
            })
    }
}

/// Shape every result row of `job` and deliver it to every destination.
///
/// Returns the number of payloads sent. The first delivery failure aborts the
/// call and is returned unchanged.
pub fn return_results(
    job: &JobReturn,
    facts: &HostFacts,
    lookup: &dyn ConfigLookup,
    destinations: &[DestinationConfig],
    transport: &dyn GelfTransport,
) -> Result<usize> {
    if job.queries.is_empty() {
        tracing::debug!(jid = %job.jid, "job returned no results, nothing to send");
        return Ok(0);
    }

    let host = facts.resolve(&job.id);
    let mut sent = 0;

    for destination in destinations {
        for (query, row) in job.rows() {
            let context = EventContext {
                query: query.to_string(),
                job_id: job.jid.clone(),
                minion_id: job.id.clone(),
                dest_host: host.hostname.clone(),
                dest_ip: host.ipv4.clone(),
            };
            let event = build_event(
                &destination.custom_fields,
                &context.to_map(),
                &facts.cloud_details,
                row,
                lookup,
            );

            let payload = GelfPayload::new(&host.hostname, &destination.sourcetype, event);
            transport.send(destination, &payload.to_json()?)?;
            sent += 1;
        }
        tracing::debug!(
            endpoint = %destination.endpoint(),
            jid = %job.jid,
            "delivered job results"
        );
    }

    tracing::info!(jid = %job.jid, minion_id = %job.id, sent, "graylog returner finished");
    Ok(sent)
}

/// Query-result returner: reads the Nebula destinations from `lookup` and
/// delivers `job` to each of them.
pub fn returner(
    job: &JobReturn,
    facts: &HostFacts,
    lookup: &dyn ConfigLookup,
    transport: &dyn GelfTransport,
) -> Result<usize> {
    if job.queries.is_empty() {
        tracing::debug!(jid = %job.jid, "job returned no results, nothing to send");
        return Ok(0);
    }
    let destinations = destinations_for(lookup, SourceKind::Nebula)?;
    return_results(job, facts, lookup, &destinations, transport)
}
